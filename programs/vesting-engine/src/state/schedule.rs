use anchor_lang::prelude::*;

use crate::constants::SCHEDULE_SEED;
use crate::error::VestingError;

/// Two states, one transition: Active -> Revoked.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScheduleStatus {
    #[default]
    Active,
    Revoked,
}

/// How the schedule came to exist.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScheduleOrigin {
    /// Created by the creation-capability holder.
    #[default]
    Direct,
    /// Materialized by a verified claim against the Merkle commitment.
    Claimed { leaf: [u8; 32] },
}

/// Instruction input describing a schedule. Also the claimed leaf payload.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleTerms {
    /// Unix seconds at which accrual starts.
    pub start: i64,
    /// Seconds after `start` before anything is releasable.
    pub cliff_duration: i64,
    /// Seconds from `start` to full vesting.
    pub duration: i64,
    /// Accrual granularity in seconds.
    pub slice_length: u64,
    pub revokable: bool,
    pub amount: u64,
}

/// One vesting schedule PDA.
#[account]
#[derive(Default, Debug)]
pub struct VestingSchedule {
    pub config: Pubkey,
    pub beneficiary: Pubkey,
    /// Sequence index within the beneficiary's holder account.
    pub index: u32,
    /// Absolute time before which nothing is releasable (start + cliff duration).
    pub cliff: i64,
    pub start: i64,
    pub duration: i64,
    pub slice_length: u64,
    pub amount_total: u64,
    pub released: u64,
    pub status: ScheduleStatus,
    pub revokable: bool,
    pub origin: ScheduleOrigin,
    pub bump: u8,
}

impl VestingSchedule {
    pub const SIZE: usize =
        32 +      // config
        32 +      // beneficiary
        4 +       // index
        8 +       // cliff
        8 +       // start
        8 +       // duration
        8 +       // slice_length
        8 +       // amount_total
        8 +       // released
        1 +       // status
        1 +       // revokable
        1 + 32 +  // origin (tag + leaf)
        1;        // bump

    pub fn is_active(&self) -> bool {
        self.status == ScheduleStatus::Active
    }

    /// True for an account that `init_if_needed` has just zero-created.
    pub fn is_vacant(&self) -> bool {
        self.config == Pubkey::default()
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self.origin, ScheduleOrigin::Claimed { .. })
    }

    pub fn end(&self) -> Result<i64> {
        Ok(self
            .start
            .checked_add(self.duration)
            .ok_or(VestingError::MathOverflow)?)
    }

    /// Units committed but not yet paid out.
    pub fn remaining(&self) -> Result<u64> {
        Ok(self
            .amount_total
            .checked_sub(self.released)
            .ok_or(VestingError::MathOverflow)?)
    }

    pub fn ensure_belongs(&self, config: &Pubkey, beneficiary: &Pubkey) -> Result<()> {
        require_keys_eq!(self.config, *config, VestingError::ScheduleMismatch);
        require_keys_eq!(self.beneficiary, *beneficiary, VestingError::ScheduleMismatch);
        Ok(())
    }

    /// Address of the `index`-th schedule of `beneficiary`, direct or claimed.
    pub fn direct_address(config: &Pubkey, beneficiary: &Pubkey, index: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                SCHEDULE_SEED,
                config.as_ref(),
                beneficiary.as_ref(),
                index.to_le_bytes().as_ref(),
            ],
            &crate::ID,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_deterministic_per_index() {
        let config = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        assert_eq!(
            VestingSchedule::direct_address(&config, &alice, 0),
            VestingSchedule::direct_address(&config, &alice, 0)
        );
        assert_ne!(
            VestingSchedule::direct_address(&config, &alice, 0).0,
            VestingSchedule::direct_address(&config, &alice, 1).0
        );
        assert_ne!(
            VestingSchedule::direct_address(&config, &alice, 0).0,
            VestingSchedule::direct_address(&config, &bob, 0).0
        );
    }

    #[test]
    fn zeroed_account_is_vacant_and_active() {
        let s = VestingSchedule::default();
        assert!(s.is_vacant());
        assert!(s.is_active());
        assert!(!s.is_claimed());
    }

    #[test]
    fn serialized_size_fits_declared_space() {
        let s = VestingSchedule {
            origin: ScheduleOrigin::Claimed { leaf: [7u8; 32] },
            ..Default::default()
        };
        let mut bytes = Vec::new();
        AnchorSerialize::serialize(&s, &mut bytes).unwrap();
        assert_eq!(bytes.len(), VestingSchedule::SIZE);
    }
}
