#![allow(unexpected_cfgs)]

pub mod accounting;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod lifecycle;
pub mod policy;
pub mod state;
pub mod utils;

use anchor_lang::prelude::*;

pub use instructions::*;
pub use state::{EngineSettings, ScheduleTerms};

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod vesting_engine {
    use super::*;

    pub fn initialize_token_engine(
        ctx: Context<InitializeTokenEngine>,
        settings: EngineSettings,
    ) -> Result<()> {
        initialize::initialize_token_engine_handler(ctx, settings)
    }

    pub fn initialize_native_engine(
        ctx: Context<InitializeNativeEngine>,
        settings: EngineSettings,
    ) -> Result<()> {
        initialize::initialize_native_engine_handler(ctx, settings)
    }

    pub fn fund(ctx: Context<Fund>, amount: u64) -> Result<()> {
        fund::fund_handler(ctx, amount)
    }

    pub fn create_schedule(
        ctx: Context<CreateSchedule>,
        beneficiary: Pubkey,
        terms: ScheduleTerms,
    ) -> Result<()> {
        create_schedule::create_schedule_handler(ctx, beneficiary, terms)
    }

    pub fn create_schedule_native(
        ctx: Context<CreateSchedule>,
        beneficiary: Pubkey,
        terms: ScheduleTerms,
    ) -> Result<()> {
        create_schedule::create_schedule_native_handler(ctx, beneficiary, terms)
    }

    pub fn update_schedule(
        ctx: Context<UpdateSchedule>,
        new_amount: u64,
        new_duration: i64,
        new_cliff_duration: i64,
    ) -> Result<()> {
        update_schedule::update_schedule_handler(ctx, new_amount, new_duration, new_cliff_duration)
    }

    pub fn revoke(ctx: Context<Revoke>) -> Result<()> {
        revoke::revoke_handler(ctx)
    }

    pub fn release(ctx: Context<Release>, amount: u64) -> Result<()> {
        release::release_handler(ctx, amount)
    }

    pub fn release_all<'info>(ctx: Context<'_, '_, 'info, 'info, ReleaseAll<'info>>) -> Result<u64> {
        release_all::release_all_handler(ctx)
    }

    pub fn claim(
        ctx: Context<Claim>,
        beneficiary: Pubkey,
        terms: ScheduleTerms,
        leaf: [u8; 32],
        proof: Vec<[u8; 32]>,
    ) -> Result<u64> {
        claim::claim_handler(ctx, beneficiary, terms, leaf, proof)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        withdraw::withdraw_handler(ctx, amount)
    }

    pub fn sweep(ctx: Context<Withdraw>) -> Result<u64> {
        withdraw::sweep_handler(ctx)
    }

    pub fn set_paused(ctx: Context<AdminConfig>, paused: bool) -> Result<()> {
        admin::set_paused_handler(ctx, paused)
    }

    pub fn set_creator(ctx: Context<AdminConfig>, new_creator: Pubkey) -> Result<()> {
        admin::set_creator_handler(ctx, new_creator)
    }

    pub fn quote_releasable(ctx: Context<QuoteReleasable>) -> Result<u64> {
        quote::quote_releasable_handler(ctx)
    }

    pub fn total_supply(ctx: Context<EngineView>) -> Result<u64> {
        balance_view::total_supply_handler(ctx)
    }

    pub fn balance_of(ctx: Context<HolderView>) -> Result<u64> {
        balance_view::balance_of_handler(ctx)
    }

    pub fn allowance(ctx: Context<EngineView>, owner: Pubkey, spender: Pubkey) -> Result<u64> {
        balance_view::allowance_handler(ctx, owner, spender)
    }

    pub fn transfer(ctx: Context<EngineView>, to: Pubkey, amount: u64) -> Result<()> {
        balance_view::transfer_handler(ctx, to, amount)
    }

    pub fn approve(ctx: Context<EngineView>, spender: Pubkey, amount: u64) -> Result<()> {
        balance_view::approve_handler(ctx, spender, amount)
    }

    pub fn transfer_from(
        ctx: Context<EngineView>,
        from: Pubkey,
        to: Pubkey,
        amount: u64,
    ) -> Result<()> {
        balance_view::transfer_from_handler(ctx, from, to, amount)
    }
}
