use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, HOLDER_SEED, VAULT_SEED};
use crate::ledger::VaultHoldings;
use crate::lifecycle::{self, Books};
use crate::state::{HolderAccount, VestingConfig, VestingSchedule};

pub fn update_schedule_handler(
    ctx: Context<UpdateSchedule>,
    new_amount: u64,
    new_duration: i64,
    new_cliff_duration: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let holdings = VaultHoldings::new(&accounts.config, &accounts.vault.to_account_info());
    let caller = accounts.authority.key();

    let mut books = Books {
        config_key: accounts.config.key(),
        config: &mut accounts.config,
        holder: &mut accounts.holder,
    };
    lifecycle::update_schedule(
        &mut books,
        &mut accounts.schedule,
        &holdings,
        &caller,
        new_amount,
        new_duration,
        new_cliff_duration,
        now,
    )
}

#[derive(Accounts)]
pub struct UpdateSchedule<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(mut)]
    pub schedule: Account<'info, VestingSchedule>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, config.key().as_ref(), schedule.beneficiary.as_ref()],
        bump = holder.bump
    )]
    pub holder: Account<'info, HolderAccount>,

    /// CHECK: vault PDA, read for its balance.
    #[account(seeds = [VAULT_SEED, config.key().as_ref()], bump = config.vault_bump)]
    pub vault: UncheckedAccount<'info>,

    pub authority: Signer<'info>,
}
