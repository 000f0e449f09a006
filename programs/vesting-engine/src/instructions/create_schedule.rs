use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, HOLDER_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::error::VestingError;
use crate::ledger::{self, VaultHoldings};
use crate::lifecycle::{self, Books};
use crate::state::{AssetKind, HolderAccount, ScheduleTerms, VestingConfig, VestingSchedule};

/// Create a schedule backed by funds already in the vault.
pub fn create_schedule_handler(
    ctx: Context<CreateSchedule>,
    beneficiary: Pubkey,
    terms: ScheduleTerms,
) -> Result<()> {
    open(ctx, beneficiary, &terms)
}

/// Deposit `terms.amount` lamports from the creator, then create the schedule.
pub fn create_schedule_native_handler(
    ctx: Context<CreateSchedule>,
    beneficiary: Pubkey,
    terms: ScheduleTerms,
) -> Result<()> {
    let accounts = &ctx.accounts;
    require!(
        accounts.config.asset == AssetKind::Native,
        VestingError::InvalidConfig
    );
    ledger::deposit(
        &accounts.config,
        &accounts.vault.to_account_info(),
        &accounts.creator.to_account_info(),
        None,
        None,
        None,
        &accounts.system_program,
        terms.amount,
    )?;
    open(ctx, beneficiary, &terms)
}

fn open(ctx: Context<CreateSchedule>, beneficiary: Pubkey, terms: &ScheduleTerms) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = ctx.accounts;
    let holdings = VaultHoldings::new(&accounts.config, &accounts.vault.to_account_info());
    let caller = accounts.creator.key();

    accounts.schedule.bump = ctx.bumps.schedule;
    if accounts.holder.is_vacant() {
        accounts.holder.bump = ctx.bumps.holder;
    }
    let mut books = Books {
        config_key: accounts.config.key(),
        config: &mut accounts.config,
        holder: &mut accounts.holder,
    };
    let index = lifecycle::create_schedule(
        &mut books,
        &mut accounts.schedule,
        &holdings,
        &caller,
        beneficiary,
        terms,
        now,
    )?;
    msg!("schedule {} created for {}", index, beneficiary);
    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct CreateSchedule<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        init_if_needed,
        payer = creator,
        space = 8 + HolderAccount::SIZE,
        seeds = [HOLDER_SEED, config.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub holder: Account<'info, HolderAccount>,

    #[account(
        init,
        payer = creator,
        space = 8 + VestingSchedule::SIZE,
        seeds = [
            SCHEDULE_SEED,
            config.key().as_ref(),
            beneficiary.as_ref(),
            holder.schedule_count.to_le_bytes().as_ref()
        ],
        bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    /// CHECK: vault PDA, read for its balance (and credited by native creation).
    #[account(mut, seeds = [VAULT_SEED, config.key().as_ref()], bump = config.vault_bump)]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}
