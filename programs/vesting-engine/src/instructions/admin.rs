use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::lifecycle;
use crate::state::VestingConfig;

pub fn set_paused_handler(ctx: Context<AdminConfig>, paused: bool) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    lifecycle::set_paused(&mut ctx.accounts.config, &caller, paused)
}

/// Reassign the schedule-creation capability.
pub fn set_creator_handler(ctx: Context<AdminConfig>, new_creator: Pubkey) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    lifecycle::set_creator(&mut ctx.accounts.config, &caller, new_creator)
}

#[derive(Accounts)]
pub struct AdminConfig<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, VestingConfig>,

    pub authority: Signer<'info>,
}
