//! Token-shaped balance queries over the allocation aggregates. Balances
//! are readable but never movable.

use anchor_lang::prelude::*;

use crate::accounting::AllocationView;
use crate::constants::{CONFIG_SEED, HOLDER_SEED};
use crate::state::{HolderAccount, VestingConfig};

pub fn total_supply_handler(ctx: Context<EngineView>) -> Result<u64> {
    Ok(AllocationView::new(&ctx.accounts.config).total_supply())
}

pub fn balance_of_handler(ctx: Context<HolderView>) -> Result<u64> {
    let view = AllocationView::new(&ctx.accounts.config);
    Ok(view.balance_of(&ctx.accounts.holder))
}

pub fn allowance_handler(ctx: Context<EngineView>, owner: Pubkey, spender: Pubkey) -> Result<u64> {
    Ok(AllocationView::new(&ctx.accounts.config).allowance(&owner, &spender))
}

pub fn transfer_handler(ctx: Context<EngineView>, to: Pubkey, amount: u64) -> Result<()> {
    AllocationView::new(&ctx.accounts.config).transfer(&to, amount)
}

pub fn approve_handler(ctx: Context<EngineView>, spender: Pubkey, amount: u64) -> Result<()> {
    AllocationView::new(&ctx.accounts.config).approve(&spender, amount)
}

pub fn transfer_from_handler(
    ctx: Context<EngineView>,
    from: Pubkey,
    to: Pubkey,
    amount: u64,
) -> Result<()> {
    AllocationView::new(&ctx.accounts.config).transfer_from(&from, &to, amount)
}

#[derive(Accounts)]
pub struct EngineView<'info> {
    #[account(
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, VestingConfig>,
}

#[derive(Accounts)]
pub struct HolderView<'info> {
    #[account(
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, VestingConfig>,

    #[account(
        seeds = [HOLDER_SEED, config.key().as_ref(), holder.beneficiary.as_ref()],
        bump = holder.bump
    )]
    pub holder: Account<'info, HolderAccount>,
}
