use anchor_lang::prelude::*;

use crate::constants::CLAIM_SEED;
use crate::error::VestingError;
use crate::state::{HolderAccount, VestingSchedule};

/// Replay guard for one committed leaf.
///
/// Derivation: ["claim", config, beneficiary, leaf]. Created on the first
/// claim with `init_if_needed`. The claimed schedule itself lives at the
/// holder index recorded here, like any directly created schedule.
#[account]
#[derive(Default, Debug)]
pub struct ClaimRecord {
    pub config: Pubkey,
    pub beneficiary: Pubkey,
    pub leaf: [u8; 32],
    /// Holder index the claimed schedule occupies.
    pub index: u32,
    pub bump: u8,
}

impl ClaimRecord {
    pub const SIZE: usize =
        32 + // config
        32 + // beneficiary
        32 + // leaf
        4 +  // index
        1;   // bump

    pub fn is_vacant(&self) -> bool {
        self.config == Pubkey::default()
    }

    /// Index of the schedule this claim refers to: the recorded one, or the
    /// holder's next free index on a first claim.
    pub fn schedule_index(&self, holder: &HolderAccount) -> u32 {
        if self.is_vacant() {
            holder.schedule_count
        } else {
            self.index
        }
    }

    pub fn check(&self, config: &Pubkey, beneficiary: &Pubkey, leaf: &[u8; 32]) -> Result<()> {
        require_keys_eq!(self.config, *config, VestingError::ClaimMismatch);
        require_keys_eq!(self.beneficiary, *beneficiary, VestingError::ClaimMismatch);
        require!(self.leaf == *leaf, VestingError::ClaimMismatch);
        Ok(())
    }

    pub fn bind(&mut self, config: Pubkey, beneficiary: Pubkey, leaf: [u8; 32], index: u32) {
        self.config = config;
        self.beneficiary = beneficiary;
        self.leaf = leaf;
        self.index = index;
    }

    pub fn schedule_address(&self) -> (Pubkey, u8) {
        VestingSchedule::direct_address(&self.config, &self.beneficiary, self.index)
    }

    pub fn address(config: &Pubkey, beneficiary: &Pubkey, leaf: &[u8; 32]) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[CLAIM_SEED, config.as_ref(), beneficiary.as_ref(), leaf.as_ref()],
            &crate::ID,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacant_record_points_at_next_holder_slot() {
        let record = ClaimRecord::default();
        let holder = HolderAccount {
            schedule_count: 3,
            ..Default::default()
        };
        assert!(record.is_vacant());
        assert_eq!(record.schedule_index(&holder), 3);
    }

    #[test]
    fn bound_record_keeps_its_index() {
        let config = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let leaf = [9u8; 32];
        let mut record = ClaimRecord::default();
        record.bind(config, alice, leaf, 1);

        let holder = HolderAccount {
            schedule_count: 4,
            ..Default::default()
        };
        assert_eq!(record.schedule_index(&holder), 1);
        assert_eq!(
            record.schedule_address(),
            VestingSchedule::direct_address(&config, &alice, 1)
        );
        assert!(record.check(&config, &alice, &leaf).is_ok());
        assert!(record.check(&config, &alice, &[8u8; 32]).is_err());
        assert!(record.check(&config, &Pubkey::new_unique(), &leaf).is_err());
    }

    #[test]
    fn record_and_schedule_namespaces_differ() {
        let config = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let leaf = [0u8; 32];
        assert_ne!(
            ClaimRecord::address(&config, &alice, &leaf).0,
            VestingSchedule::direct_address(&config, &alice, 0).0
        );
    }

    #[test]
    fn serialized_size_fits_declared_space() {
        let record = ClaimRecord::default();
        let mut bytes = Vec::new();
        AnchorSerialize::serialize(&record, &mut bytes).unwrap();
        assert_eq!(bytes.len(), ClaimRecord::SIZE);
    }
}
