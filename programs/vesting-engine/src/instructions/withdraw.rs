use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::constants::{CONFIG_SEED, VAULT_SEED};
use crate::ledger::VaultLedger;
use crate::lifecycle;
use crate::state::VestingConfig;

pub fn withdraw_handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let mut ledger = ctx.accounts.vault_ledger()?;
    let caller = ctx.accounts.authority.key();
    lifecycle::withdraw_surplus(&mut ctx.accounts.config, &mut ledger, &caller, amount)
}

/// Withdraw the entire surplus; succeeds with 0 when there is none.
pub fn sweep_handler(ctx: Context<Withdraw>) -> Result<u64> {
    let mut ledger = ctx.accounts.vault_ledger()?;
    let caller = ctx.accounts.authority.key();
    let swept = lifecycle::sweep_surplus(&mut ctx.accounts.config, &mut ledger, &caller)?;
    msg!("swept {}", swept);
    Ok(swept)
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, VestingConfig>>,

    /// CHECK: vault PDA; token or lamport, validated by the ledger.
    #[account(mut, seeds = [VAULT_SEED, config.key().as_ref()], bump = config.vault_bump)]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: owner's token account or wallet, validated by the ledger.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,

    pub mint: Option<InterfaceAccount<'info, Mint>>,
    pub token_program: Option<Interface<'info, TokenInterface>>,

    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
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
