use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{CONFIG_SEED, VAULT_SEED};
use crate::events::VaultFunded;
use crate::ledger::{self, Holdings, VaultHoldings};
use crate::state::VestingConfig;

/// Anyone may top up the vault. Deposits only become allocation through
/// schedule creation or a claim.
pub fn fund_handler(ctx: Context<Fund>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let vault = accounts.vault.to_account_info();
    ledger::deposit(
        &accounts.config,
        &vault,
        &accounts.funder.to_account_info(),
        accounts.source_tokens.as_ref(),
        accounts.mint.as_ref(),
        accounts.token_program.as_ref(),
        &accounts.system_program,
        amount,
    )?;

    let held = VaultHoldings::new(&accounts.config, &vault).held()?;
    emit!(VaultFunded {
        config: accounts.config.key(),
        funder: accounts.funder.key(),
        amount,
        held,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Fund<'info> {
    #[account(
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, VestingConfig>,

    /// CHECK: vault PDA; its kind is checked against the engine asset on deposit.
    #[account(mut, seeds = [VAULT_SEED, config.key().as_ref()], bump = config.vault_bump)]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(mut)]
    pub source_tokens: Option<InterfaceAccount<'info, TokenAccount>>,
    pub mint: Option<InterfaceAccount<'info, Mint>>,
    pub token_program: Option<Interface<'info, TokenInterface>>,
    pub system_program: Program<'info, System>,
}
