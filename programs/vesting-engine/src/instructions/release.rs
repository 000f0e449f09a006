use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::constants::{CONFIG_SEED, HOLDER_SEED, VAULT_SEED};
use crate::ledger::VaultLedger;
use crate::lifecycle::{self, Books};
use crate::state::{HolderAccount, VestingConfig, VestingSchedule};

pub fn release_handler(ctx: Context<Release>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let mut ledger = ctx.accounts.vault_ledger()?;
    let accounts = ctx.accounts;
    let caller = accounts.authority.key();

    let mut books = Books {
        config_key: accounts.config.key(),
        config: &mut accounts.config,
        holder: &mut accounts.holder,
    };
    lifecycle::release_schedule(
        &mut books,
        &mut accounts.schedule,
        &mut ledger,
        &caller,
        amount,
        now,
    )
}

#[derive(Accounts)]
pub struct Release<'info> {
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

impl<'info> Release<'info> {
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
