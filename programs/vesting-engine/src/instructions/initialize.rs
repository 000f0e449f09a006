use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{CONFIG_SEED, NATIVE_MINT, VAULT_SEED};
use crate::events::EngineInitialized;
use crate::state::{AssetKind, EngineSettings, VestingConfig};

pub fn initialize_token_engine_handler(
    ctx: Context<InitializeTokenEngine>,
    settings: EngineSettings,
) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let mint = ctx.accounts.mint.key();
    let config_key = ctx.accounts.config.key();
    let config = &mut ctx.accounts.config;
    config.configure(
        owner,
        mint,
        AssetKind::Token,
        &settings,
        ctx.bumps.config,
        ctx.bumps.vault,
    )?;

    announce(config_key, config);
    Ok(())
}

pub fn initialize_native_engine_handler(
    ctx: Context<InitializeNativeEngine>,
    settings: EngineSettings,
) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let config_key = ctx.accounts.config.key();
    ctx.accounts.config.configure(
        owner,
        NATIVE_MINT,
        AssetKind::Native,
        &settings,
        ctx.bumps.config,
        ctx.bumps.vault,
    )?;

    // the vault stays a plain system account; keep it rent exempt from the start
    let reserve = Rent::get()?.minimum_balance(0);
    let missing = reserve.saturating_sub(ctx.accounts.vault.lamports());
    if missing > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.owner.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                },
            ),
            missing,
        )?;
    }

    announce(config_key, &ctx.accounts.config);
    Ok(())
}

fn announce(config_key: Pubkey, config: &VestingConfig) {
    msg!(
        "engine {} initialized for owner {}",
        config_key,
        config.owner
    );
    emit!(EngineInitialized {
        config: config_key,
        owner: config.owner,
        creator: config.creator,
        mint: config.mint,
        native: config.asset == AssetKind::Native,
        merkle_root: config.merkle_root,
    });
}

#[derive(Accounts)]
pub struct InitializeTokenEngine<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + VestingConfig::SIZE,
        seeds = [CONFIG_SEED, owner.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub config: Account<'info, VestingConfig>,

    #[account(
        init,
        payer = owner,
        token::mint = mint,
        token::authority = config,
        token::token_program = token_program,
        seeds = [VAULT_SEED, config.key().as_ref()],
        bump
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct InitializeNativeEngine<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + VestingConfig::SIZE,
        seeds = [CONFIG_SEED, owner.key().as_ref(), NATIVE_MINT.as_ref()],
        bump
    )]
    pub config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [VAULT_SEED, config.key().as_ref()], bump)]
    pub vault: SystemAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}
