use anchor_lang::prelude::*;

use crate::events::ReleasableQuote;
use crate::lifecycle;
use crate::state::VestingSchedule;
use crate::utils::vesting_math;

/// Read-only: releasable amount right now, as return data and an event.
pub fn quote_releasable_handler(ctx: Context<QuoteReleasable>) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let schedule = &ctx.accounts.schedule;
    let vested_amount = vesting_math::vested_amount(schedule, now)?;
    let releasable = lifecycle::compute_releasable(schedule, now)?;

    emit!(ReleasableQuote {
        beneficiary: schedule.beneficiary,
        index: schedule.index,
        vested_amount,
        released_amount: schedule.released,
        releasable,
    });
    Ok(releasable)
}

#[derive(Accounts)]
pub struct QuoteReleasable<'info> {
    pub schedule: Account<'info, VestingSchedule>,
}
