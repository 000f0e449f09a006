//! Aggregate bookkeeping and the read-only allocation view.
//!
//! `config.total_allocated` and every `holder.allocated` move together, so the
//! total always equals the sum over holders.

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::{HolderAccount, VestingConfig};

/// Funds held by the vault that no schedule has a claim on.
pub fn available(config: &VestingConfig, held: u64) -> u64 {
    held.saturating_sub(config.total_allocated)
}

pub fn allocate(config: &mut VestingConfig, holder: &mut HolderAccount, amount: u64) -> Result<()> {
    let total = config
        .total_allocated
        .checked_add(amount)
        .ok_or(VestingError::MathOverflow)?;
    let by_holder = holder
        .allocated
        .checked_add(amount)
        .ok_or(VestingError::MathOverflow)?;
    config.total_allocated = total;
    holder.allocated = by_holder;
    Ok(())
}

pub fn deallocate(config: &mut VestingConfig, holder: &mut HolderAccount, amount: u64) -> Result<()> {
    let total = config
        .total_allocated
        .checked_sub(amount)
        .ok_or(VestingError::MathOverflow)?;
    let by_holder = holder
        .allocated
        .checked_sub(amount)
        .ok_or(VestingError::MathOverflow)?;
    config.total_allocated = total;
    holder.allocated = by_holder;
    Ok(())
}

/// Token-shaped, read-only view over the allocation aggregates.
///
/// Lets other programs observe claimable allocation. The balances it reports
/// cannot be moved through it.
pub struct AllocationView<'a> {
    config: &'a VestingConfig,
}

impl<'a> AllocationView<'a> {
    pub fn new(config: &'a VestingConfig) -> Self {
        Self { config }
    }

    pub fn total_supply(&self) -> u64 {
        self.config.total_allocated
    }

    pub fn balance_of(&self, holder: &HolderAccount) -> u64 {
        holder.allocated
    }

    pub fn allowance(&self, _owner: &Pubkey, _spender: &Pubkey) -> u64 {
        0
    }

    pub fn transfer(&self, _to: &Pubkey, _amount: u64) -> Result<()> {
        err!(VestingError::NonTransferable)
    }

    pub fn approve(&self, _spender: &Pubkey, _amount: u64) -> Result<()> {
        err!(VestingError::NonTransferable)
    }

    pub fn transfer_from(&self, _from: &Pubkey, _to: &Pubkey, _amount: u64) -> Result<()> {
        err!(VestingError::NonTransferable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_deallocate_move_together() {
        let mut cfg = VestingConfig::default();
        let mut a = HolderAccount::default();
        let mut b = HolderAccount::default();

        allocate(&mut cfg, &mut a, 300).unwrap();
        allocate(&mut cfg, &mut b, 200).unwrap();
        deallocate(&mut cfg, &mut a, 100).unwrap();

        assert_eq!(cfg.total_allocated, 400);
        assert_eq!(cfg.total_allocated, a.allocated + b.allocated);
        assert_eq!(available(&cfg, 1_000), 600);
        assert_eq!(available(&cfg, 100), 0);
    }

    #[test]
    fn failed_update_leaves_both_counters() {
        let mut cfg = VestingConfig::default();
        let mut holder = HolderAccount {
            allocated: u64::MAX,
            ..Default::default()
        };
        assert!(allocate(&mut cfg, &mut holder, 1).is_err());
        assert_eq!(cfg.total_allocated, 0);
        assert_eq!(holder.allocated, u64::MAX);

        let mut holder = HolderAccount::default();
        cfg.total_allocated = 5;
        assert!(deallocate(&mut cfg, &mut holder, 5).is_err());
        assert_eq!(cfg.total_allocated, 5);
    }

    #[test]
    fn view_reports_aggregates_and_refuses_movement() {
        let cfg = VestingConfig {
            total_allocated: 900,
            ..Default::default()
        };
        let holder = HolderAccount {
            allocated: 400,
            ..Default::default()
        };
        let view = AllocationView::new(&cfg);
        let someone = Pubkey::new_unique();

        assert_eq!(view.total_supply(), 900);
        assert_eq!(view.balance_of(&holder), 400);
        assert_eq!(view.allowance(&someone, &someone), 0);
        assert!(view.transfer(&someone, 1).is_err());
        assert!(view.approve(&someone, 0).is_err());
        assert!(view.transfer_from(&someone, &someone, 400).is_err());
    }
}
