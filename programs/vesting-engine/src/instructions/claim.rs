use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::constants::{CLAIM_SEED, CONFIG_SEED, HOLDER_SEED, SCHEDULE_SEED, VAULT_SEED};
use crate::ledger::VaultLedger;
use crate::lifecycle::{self, Books};
use crate::state::{ClaimRecord, HolderAccount, ScheduleTerms, VestingConfig, VestingSchedule};

/// Proof-gated activation of a committed schedule. Anyone may submit it and
/// pay for the accounts; funds only ever go to `beneficiary`.
pub fn claim_handler(
    ctx: Context<Claim>,
    beneficiary: Pubkey,
    terms: ScheduleTerms,
    leaf: [u8; 32],
    proof: Vec<[u8; 32]>,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let mut ledger = ctx.accounts.vault_ledger()?;
    let accounts = ctx.accounts;

    if accounts.claim_record.is_vacant() {
        accounts.claim_record.bump = ctx.bumps.claim_record;
    }
    if accounts.schedule.is_vacant() {
        accounts.schedule.bump = ctx.bumps.schedule;
    }
    if accounts.holder.is_vacant() {
        accounts.holder.bump = ctx.bumps.holder;
    }
    let mut books = Books {
        config_key: accounts.config.key(),
        config: &mut accounts.config,
        holder: &mut accounts.holder,
    };
    let released = lifecycle::claim_schedule(
        &mut books,
        &mut accounts.claim_record,
        &mut accounts.schedule,
        &mut ledger,
        beneficiary,
        &terms,
        leaf,
        &proof,
        now,
    )?;
    msg!("claim for {} released {}", beneficiary, released);
    Ok(released)
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey, terms: ScheduleTerms, leaf: [u8; 32])]
pub struct Claim<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED, config.owner.as_ref(), config.mint.as_ref()],
        bump = config.bump
    )]
    pub config: Box<Account<'info, VestingConfig>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + ClaimRecord::SIZE,
        seeds = [CLAIM_SEED, config.key().as_ref(), beneficiary.as_ref(), leaf.as_ref()],
        bump
    )]
    pub claim_record: Account<'info, ClaimRecord>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + HolderAccount::SIZE,
        seeds = [HOLDER_SEED, config.key().as_ref(), beneficiary.as_ref()],
        bump
    )]
    pub holder: Account<'info, HolderAccount>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + VestingSchedule::SIZE,
        seeds = [
            SCHEDULE_SEED,
            config.key().as_ref(),
            beneficiary.as_ref(),
            claim_record.schedule_index(&holder).to_le_bytes().as_ref()
        ],
        bump
    )]
    pub schedule: Account<'info, VestingSchedule>,

    /// CHECK: vault PDA; token or lamport, validated by the ledger.
    #[account(mut, seeds = [VAULT_SEED, config.key().as_ref()], bump = config.vault_bump)]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: beneficiary's token account or wallet, validated by the ledger.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,

    pub mint: Option<InterfaceAccount<'info, Mint>>,
    pub token_program: Option<Interface<'info, TokenInterface>>,

    #[account(mut)]
    pub payer: Signer<'info>,
    pub system_program: Program<'info, System>,
}

impl<'info> Claim<'info> {
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
