use anchor_lang::prelude::*;

use crate::constants::HOLDER_SEED;
use crate::error::VestingError;

/// Per-beneficiary index PDA: schedule counter and outstanding allocation.
#[account]
#[derive(Default, Debug)]
pub struct HolderAccount {
    pub config: Pubkey,
    pub beneficiary: Pubkey,
    /// Next schedule index; also the cap counter.
    pub schedule_count: u32,
    /// Sum of (amount_total - released) over this holder's active schedules.
    pub allocated: u64,
    pub bump: u8,
}

impl HolderAccount {
    pub const SIZE: usize =
        32 + // config
        32 + // beneficiary
        4 +  // schedule_count
        8 +  // allocated
        1;   // bump

    pub fn is_vacant(&self) -> bool {
        self.beneficiary == Pubkey::default()
    }

    /// Fails if the holder is already bound to another engine or beneficiary.
    pub fn check_binding(&self, config: &Pubkey, beneficiary: &Pubkey) -> Result<()> {
        if self.is_vacant() {
            return Ok(());
        }
        require_keys_eq!(self.config, *config, VestingError::HolderMismatch);
        require_keys_eq!(self.beneficiary, *beneficiary, VestingError::HolderMismatch);
        Ok(())
    }

    pub fn bind(&mut self, config: Pubkey, beneficiary: Pubkey) {
        self.config = config;
        self.beneficiary = beneficiary;
    }

    pub fn address(config: &Pubkey, beneficiary: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[HOLDER_SEED, config.as_ref(), beneficiary.as_ref()],
            &crate::ID,
        )
    }
}
