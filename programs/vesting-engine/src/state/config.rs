use anchor_lang::prelude::*;

use crate::constants::{
    CONFIG_SEED, DEFAULT_MAX_SCHEDULE_AMOUNT, MAX_DURATION, MIN_DURATION, NATIVE_MINT,
};
use crate::error::VestingError;

/// What the vault holds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetKind {
    /// SPL token (or token-2022) balance in a vault token account.
    #[default]
    Token,
    /// Lamports in a system-owned vault PDA.
    Native,
}

/// Settings supplied when an engine is initialized.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineSettings {
    /// Holder of the schedule-creation capability. Default key = owner.
    pub creator: Pubkey,
    /// Bulk commitment root. All zeros disables claims.
    pub merkle_root: [u8; 32],
    /// Per-schedule amount cap. 0 = `DEFAULT_MAX_SCHEDULE_AMOUNT`.
    pub max_schedule_amount: u64,
    /// Minimum schedule duration in seconds. 0 = `MIN_DURATION`.
    pub min_duration: i64,
}

/// Engine state PDA: authorities, commitment and system-wide aggregates.
#[account]
#[derive(Default, Debug)]
pub struct VestingConfig {
    /// Administers schedules and reclaims surplus.
    pub owner: Pubkey,
    /// May create schedules directly.
    pub creator: Pubkey,
    /// Vested mint, `NATIVE_MINT` for lamport engines.
    pub mint: Pubkey,
    pub asset: AssetKind,
    /// Root of the offline-built beneficiary tree.
    pub merkle_root: [u8; 32],
    /// Blocks release, revoke and claim. Accrual continues.
    pub paused: bool,
    /// Set while a vault transfer is being executed.
    pub in_flight: bool,
    /// Sum of (amount_total - released) over active schedules.
    pub total_allocated: u64,
    /// Append-only counter of schedules ever created.
    pub schedules_created: u64,
    pub max_schedule_amount: u64,
    pub min_duration: i64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl VestingConfig {
    pub const SIZE: usize =
        32 + // owner
        32 + // creator
        32 + // mint
        1 +  // asset
        32 + // merkle_root
        1 +  // paused
        1 +  // in_flight
        8 +  // total_allocated
        8 +  // schedules_created
        8 +  // max_schedule_amount
        8 +  // min_duration
        1 +  // bump
        1;   // vault_bump

    /// Fill a freshly created config from its settings.
    pub fn configure(
        &mut self,
        owner: Pubkey,
        mint: Pubkey,
        asset: AssetKind,
        settings: &EngineSettings,
        bump: u8,
        vault_bump: u8,
    ) -> Result<()> {
        require!(owner != Pubkey::default(), VestingError::InvalidPubkey);
        match asset {
            AssetKind::Token => require!(mint != NATIVE_MINT, VestingError::InvalidTokenMint),
            AssetKind::Native => require!(mint == NATIVE_MINT, VestingError::InvalidConfig),
        }
        let min_duration = if settings.min_duration == 0 {
            MIN_DURATION
        } else {
            settings.min_duration
        };
        require!(
            (1..=MAX_DURATION).contains(&min_duration),
            VestingError::InvalidConfig
        );
        let max_schedule_amount = if settings.max_schedule_amount == 0 {
            DEFAULT_MAX_SCHEDULE_AMOUNT
        } else {
            settings.max_schedule_amount
        };
        let creator = if settings.creator == Pubkey::default() {
            owner
        } else {
            settings.creator
        };

        *self = VestingConfig {
            owner,
            creator,
            mint,
            asset,
            merkle_root: settings.merkle_root,
            paused: false,
            in_flight: false,
            total_allocated: 0,
            schedules_created: 0,
            max_schedule_amount,
            min_duration,
            bump,
            vault_bump,
        };
        Ok(())
    }

    pub fn has_commitment(&self) -> bool {
        self.merkle_root != [0u8; 32]
    }

    pub fn address(owner: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[CONFIG_SEED, owner.as_ref(), mint.as_ref()], &crate::ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EngineSettings {
        EngineSettings {
            creator: Pubkey::default(),
            merkle_root: [0u8; 32],
            max_schedule_amount: 0,
            min_duration: 0,
        }
    }

    #[test]
    fn defaults_fill_zeroed_settings() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut cfg = VestingConfig::default();
        cfg.configure(owner, mint, AssetKind::Token, &settings(), 254, 253)
            .unwrap();

        assert_eq!(cfg.creator, owner);
        assert_eq!(cfg.min_duration, MIN_DURATION);
        assert_eq!(cfg.max_schedule_amount, DEFAULT_MAX_SCHEDULE_AMOUNT);
        assert!(!cfg.has_commitment());
        assert_eq!((cfg.bump, cfg.vault_bump), (254, 253));
    }

    #[test]
    fn native_engine_requires_native_mint() {
        let owner = Pubkey::new_unique();
        let mut cfg = VestingConfig::default();
        assert!(cfg
            .configure(owner, Pubkey::new_unique(), AssetKind::Native, &settings(), 1, 1)
            .is_err());
        cfg.configure(owner, NATIVE_MINT, AssetKind::Native, &settings(), 1, 1)
            .unwrap();
        assert_eq!(cfg.asset, AssetKind::Native);
        assert!(cfg
            .configure(owner, NATIVE_MINT, AssetKind::Token, &settings(), 1, 1)
            .is_err());
    }

    #[test]
    fn rejects_out_of_range_min_duration() {
        let mut s = settings();
        s.min_duration = MAX_DURATION + 1;
        let mut cfg = VestingConfig::default();
        assert!(cfg
            .configure(Pubkey::new_unique(), Pubkey::new_unique(), AssetKind::Token, &s, 1, 1)
            .is_err());
        s.min_duration = -5;
        assert!(cfg
            .configure(Pubkey::new_unique(), Pubkey::new_unique(), AssetKind::Token, &s, 1, 1)
            .is_err());
    }
}
