use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::constants::{CONFIG_SEED, HOLDER_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::ledger::VaultLedger;
use crate::lifecycle::{self, Books};
use crate::state::{HolderAccount, VestingConfig, VestingSchedule};

/// Release across all of the holder's schedules, passed as writable remaining
/// accounts in any order (indexes `0..holder.schedule_count`). Large holders
/// need an address lookup table to fit the full set. Returns the total paid.
pub fn release_all_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ReleaseAll<'info>>,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let mut schedules = ctx
        .remaining_accounts
        .iter()
        .map(|info| {
            require!(info.is_writable, VestingError::ScheduleNotWritable);
            Account::<VestingSchedule>::try_from(info)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ledger = ctx.accounts.vault_ledger()?;
    let accounts = ctx.accounts;
    let caller = accounts.authority.key();
    let mut books = Books {
        config_key: accounts.config.key(),
        config: &mut accounts.config,
        holder: &mut accounts.holder,
    };
    let total = lifecycle::release_all(&mut books, &mut schedules[..], &mut ledger, &caller, now)?;

    // remaining accounts are not persisted by the framework
    for schedule in &schedules {
        schedule.exit(&crate::ID)?;
    }
    msg!("released {} across {} schedules", total, schedules.len());
    Ok(total)
}

#[derive(Accounts)]
pub struct ReleaseAll<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        mut,
        seeds = [HOLDER_SEED, config.key().as_ref(), holder.beneficiary.as_ref()],
        bump = holder.bump
    )]
    pub holder: Account<'info, HolderAccount>,

    /// CHECK: vault PDA; token or lamport, validated by the ledger.
    #[account(mut, seeds = [VAULT_SEED, config.key().as_ref()], bump = config.vault_bump)]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: beneficiary's token account or wallet, validated by the ledger.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,

    pub mint: Option<InterfaceAccount<'info, Mint>>,
    pub token_program: Option<Interface<'info, TokenInterface>>,

    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

impl<'info> ReleaseAll<'info> {
    fn vault_ledger(&self) -> Result<VaultLedger<'info>> {
        VaultLedger::new(
            &self.config,
            &self.vault.to_account_info(),
            &self.destination.to_account_info(),
            self.mint.as_ref(),
            self.token_program.as_ref(),
            &self.system_program,
        )
    }
}
