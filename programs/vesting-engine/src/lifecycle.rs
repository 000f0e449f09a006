//! Schedule lifecycle against plain account structs.
//!
//! Each operation validates everything first, then mutates accounting, then
//! (if value moves) checkpoints the config and calls the ledger. A failed
//! transfer restores every struct the call touched.

use core::ops::DerefMut;

use anchor_lang::prelude::*;

use crate::accounting;
use crate::constants::{
    MAX_DURATION, MAX_PROOF_DEPTH, MAX_SCHEDULES_PER_HOLDER, MAX_SLICE_SECONDS, MAX_START_DELAY,
};
use crate::error::VestingError;
use crate::events::{
    CreatorSet, FundsReleased, PauseSet, ScheduleCreated, ScheduleRevoked, ScheduleUpdated,
    SurplusWithdrawn,
};
use crate::ledger::{Holdings, Ledger};
use crate::policy::{authorize, Capability};
use crate::state::{
    ClaimRecord, HolderAccount, ScheduleOrigin, ScheduleStatus, ScheduleTerms, VestingConfig,
    VestingSchedule,
};
use crate::utils::{merkle, vesting_math};

/// Engine config plus the holder an operation acts on.
pub struct Books<'a> {
    pub config_key: Pubkey,
    pub config: &'a mut VestingConfig,
    pub holder: &'a mut HolderAccount,
}

impl Books<'_> {
    fn check_schedule(&self, schedule: &VestingSchedule) -> Result<()> {
        schedule.ensure_belongs(&self.config_key, &self.holder.beneficiary)?;
        require_keys_eq!(self.holder.config, self.config_key, VestingError::HolderMismatch);
        Ok(())
    }
}

/// Copies of everything a payout mutates.
struct Rollback {
    config: VestingConfig,
    holder: HolderAccount,
    schedule: VestingSchedule,
}

impl Rollback {
    fn capture(books: &Books, schedule: &VestingSchedule) -> Self {
        Self {
            config: books.config.clone(),
            holder: books.holder.clone(),
            schedule: schedule.clone(),
        }
    }

    fn restore(self, books: &mut Books, schedule: &mut VestingSchedule) {
        *books.config = self.config;
        *books.holder = self.holder;
        *schedule = self.schedule;
    }
}

fn validate_timing(config: &VestingConfig, duration: i64, cliff_duration: i64) -> Result<()> {
    require!(
        (config.min_duration..=MAX_DURATION).contains(&duration),
        VestingError::InvalidDuration
    );
    require!(
        (0..=duration).contains(&cliff_duration),
        VestingError::InvalidCliff
    );
    Ok(())
}

fn validate_amount(config: &VestingConfig, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::InvalidAmount);
    require!(
        amount <= config.max_schedule_amount,
        VestingError::AmountAboveCap
    );
    Ok(())
}

pub fn validate_terms(config: &VestingConfig, terms: &ScheduleTerms, now: i64) -> Result<()> {
    validate_amount(config, terms.amount)?;
    require!(terms.start >= 0, VestingError::InvalidTimestamp);
    let horizon = now
        .checked_add(MAX_START_DELAY)
        .ok_or(VestingError::MathOverflow)?;
    require!(terms.start <= horizon, VestingError::StartTooFar);
    validate_timing(config, terms.duration, terms.cliff_duration)?;
    require!(
        terms.slice_length > 0 && terms.slice_length <= MAX_SLICE_SECONDS,
        VestingError::InvalidSliceLength
    );
    Ok(())
}

/// Shared by direct creation and claim materialization.
fn open_schedule<H: Holdings>(
    books: &mut Books,
    schedule: &mut VestingSchedule,
    holdings: &H,
    beneficiary: Pubkey,
    terms: &ScheduleTerms,
    origin: ScheduleOrigin,
    now: i64,
) -> Result<u32> {
    validate_terms(books.config, terms, now)?;
    require!(beneficiary != Pubkey::default(), VestingError::InvalidPubkey);
    books
        .holder
        .check_binding(&books.config_key, &beneficiary)?;
    let index = books.holder.schedule_count;
    require!(
        index < MAX_SCHEDULES_PER_HOLDER,
        VestingError::TooManySchedules
    );
    let available = accounting::available(books.config, holdings.held()?);
    require!(available >= terms.amount, VestingError::InsufficientFunds);
    let cliff = terms
        .start
        .checked_add(terms.cliff_duration)
        .ok_or(VestingError::MathOverflow)?;
    let next_index = index.checked_add(1).ok_or(VestingError::MathOverflow)?;
    let created = books
        .config
        .schedules_created
        .checked_add(1)
        .ok_or(VestingError::MathOverflow)?;

    accounting::allocate(books.config, books.holder, terms.amount)?;
    if books.holder.is_vacant() {
        books.holder.bind(books.config_key, beneficiary);
    }
    books.holder.schedule_count = next_index;
    books.config.schedules_created = created;
    *schedule = VestingSchedule {
        config: books.config_key,
        beneficiary,
        index,
        cliff,
        start: terms.start,
        duration: terms.duration,
        slice_length: terms.slice_length,
        amount_total: terms.amount,
        released: 0,
        status: ScheduleStatus::Active,
        revokable: terms.revokable,
        origin,
        bump: schedule.bump,
    };

    emit!(ScheduleCreated {
        config: books.config_key,
        beneficiary,
        index,
        start: schedule.start,
        cliff,
        duration: schedule.duration,
        slice_length: schedule.slice_length,
        amount: schedule.amount_total,
        revokable: schedule.revokable,
        claimed: schedule.is_claimed(),
    });
    Ok(index)
}

/// Accounting first, then the transfer; undone if the transfer fails.
fn pay_out<L: Ledger>(
    books: &mut Books,
    schedule: &mut VestingSchedule,
    ledger: &mut L,
    amount: u64,
) -> Result<()> {
    require!(!books.config.in_flight, VestingError::ReentrantCall);
    let released = schedule
        .released
        .checked_add(amount)
        .ok_or(VestingError::MathOverflow)?;
    require!(
        released <= schedule.amount_total,
        VestingError::ExceedsReleasable
    );

    let rollback = Rollback::capture(books, schedule);
    accounting::deallocate(books.config, books.holder, amount)?;
    schedule.released = released;
    books.config.in_flight = true;

    let beneficiary = schedule.beneficiary;
    let outcome = ledger
        .checkpoint(books.config)
        .and_then(|_| ledger.transfer(&beneficiary, amount));
    if let Err(err) = outcome {
        msg!("payout of {} failed, accounting restored", amount);
        rollback.restore(books, schedule);
        return Err(err);
    }
    books.config.in_flight = false;

    emit!(FundsReleased {
        config: books.config_key,
        beneficiary,
        index: schedule.index,
        amount,
        released_total: schedule.released,
    });
    Ok(())
}

/// Direct creation by the creation-capability holder.
pub fn create_schedule<H: Holdings>(
    books: &mut Books,
    schedule: &mut VestingSchedule,
    holdings: &H,
    caller: &Pubkey,
    beneficiary: Pubkey,
    terms: &ScheduleTerms,
    now: i64,
) -> Result<u32> {
    authorize(books.config, Capability::CreateSchedules, caller)?;
    open_schedule(
        books,
        schedule,
        holdings,
        beneficiary,
        terms,
        ScheduleOrigin::Direct,
        now,
    )
}

/// Owner edit of amount, duration and cliff while the schedule is still
/// vesting. `start` never changes.
#[allow(clippy::too_many_arguments)]
pub fn update_schedule<H: Holdings>(
    books: &mut Books,
    schedule: &mut VestingSchedule,
    holdings: &H,
    caller: &Pubkey,
    new_amount: u64,
    new_duration: i64,
    new_cliff_duration: i64,
    now: i64,
) -> Result<()> {
    authorize(books.config, Capability::Administer, caller)?;
    books.check_schedule(schedule)?;
    require!(schedule.is_active(), VestingError::ScheduleNotActive);
    require!(now < schedule.end()?, VestingError::ScheduleFullyVested);
    validate_amount(books.config, new_amount)?;
    validate_timing(books.config, new_duration, new_cliff_duration)?;
    if now > schedule.start {
        require!(
            new_amount >= schedule.amount_total,
            VestingError::CannotShrinkStartedSchedule
        );
    }
    require!(
        new_amount >= schedule.released,
        VestingError::BelowReleased
    );
    let cliff = schedule
        .start
        .checked_add(new_cliff_duration)
        .ok_or(VestingError::MathOverflow)?;

    let old_amount = schedule.amount_total;
    if new_amount > old_amount {
        let delta = new_amount - old_amount;
        let available = accounting::available(books.config, holdings.held()?);
        require!(available >= delta, VestingError::InsufficientFunds);
        accounting::allocate(books.config, books.holder, delta)?;
    } else if new_amount < old_amount {
        accounting::deallocate(books.config, books.holder, old_amount - new_amount)?;
    }
    schedule.amount_total = new_amount;
    schedule.duration = new_duration;
    schedule.cliff = cliff;

    emit!(ScheduleUpdated {
        config: books.config_key,
        beneficiary: schedule.beneficiary,
        index: schedule.index,
        old_amount,
        new_amount,
        duration: new_duration,
        cliff,
    });
    Ok(())
}

/// Pay out what has accrued, then return the unreleased remainder to surplus.
/// Returns the remainder.
pub fn revoke_schedule<L: Ledger>(
    books: &mut Books,
    schedule: &mut VestingSchedule,
    ledger: &mut L,
    caller: &Pubkey,
    now: i64,
) -> Result<u64> {
    authorize(books.config, Capability::Administer, caller)?;
    require!(!books.config.paused, VestingError::SchedulePaused);
    books.check_schedule(schedule)?;
    require!(schedule.is_active(), VestingError::ScheduleNotActive);
    require!(schedule.revokable, VestingError::NotRevocable);

    let paid_out = vesting_math::releasable(schedule, now)?;
    if paid_out > 0 {
        pay_out(books, schedule, ledger, paid_out)?;
    }
    let unreleased = schedule.remaining()?;
    accounting::deallocate(books.config, books.holder, unreleased)?;
    schedule.status = ScheduleStatus::Revoked;

    emit!(ScheduleRevoked {
        config: books.config_key,
        beneficiary: schedule.beneficiary,
        index: schedule.index,
        paid_out,
        unreleased,
    });
    Ok(unreleased)
}

/// Release up to the currently releasable amount of one schedule.
pub fn release_schedule<L: Ledger>(
    books: &mut Books,
    schedule: &mut VestingSchedule,
    ledger: &mut L,
    caller: &Pubkey,
    amount: u64,
    now: i64,
) -> Result<()> {
    require!(!books.config.paused, VestingError::SchedulePaused);
    books.check_schedule(schedule)?;
    authorize(
        books.config,
        Capability::ManageSchedule {
            beneficiary: schedule.beneficiary,
        },
        caller,
    )?;
    require!(schedule.is_active(), VestingError::ScheduleNotActive);
    require!(amount > 0, VestingError::InvalidAmount);
    let releasable = vesting_math::releasable(schedule, now)?;
    require!(amount <= releasable, VestingError::ExceedsReleasable);
    pay_out(books, schedule, ledger, amount)
}

/// Release everything releasable across the holder's schedules. The set must
/// be complete, revoked ones included; revoked and not-yet-accrued schedules
/// are then skipped. Returns the total paid.
pub fn release_all<L, S>(
    books: &mut Books,
    schedules: &mut [S],
    ledger: &mut L,
    caller: &Pubkey,
    now: i64,
) -> Result<u64>
where
    L: Ledger,
    S: DerefMut<Target = VestingSchedule>,
{
    require!(!books.config.paused, VestingError::SchedulePaused);
    authorize(
        books.config,
        Capability::ManageSchedule {
            beneficiary: books.holder.beneficiary,
        },
        caller,
    )?;

    let count = books.holder.schedule_count;
    let mut seen: u64 = 0;
    for schedule in schedules.iter() {
        books.check_schedule(schedule)?;
        require!(schedule.index < count, VestingError::ScheduleMismatch);
        let bit = 1u64 << schedule.index;
        require!(seen & bit == 0, VestingError::DuplicateSchedule);
        seen |= bit;
    }
    let expected = 1u64.checked_shl(count).map_or(u64::MAX, |bit| bit - 1);
    require!(seen == expected, VestingError::IncompleteScheduleSet);

    let mut total: u64 = 0;
    for schedule in schedules.iter_mut() {
        let schedule: &mut VestingSchedule = schedule;
        let amount = vesting_math::releasable(schedule, now)?;
        if amount == 0 {
            continue;
        }
        pay_out(books, schedule, ledger, amount)?;
        total = total.checked_add(amount).ok_or(VestingError::MathOverflow)?;
    }
    Ok(total)
}

/// Authenticate `terms` for `beneficiary` against the commitment, materialize
/// the schedule at the holder's next index on first use, then release
/// whatever is releasable. `record` remembers which index the leaf took.
#[allow(clippy::too_many_arguments)]
pub fn claim_schedule<L: Ledger>(
    books: &mut Books,
    record: &mut ClaimRecord,
    schedule: &mut VestingSchedule,
    ledger: &mut L,
    beneficiary: Pubkey,
    terms: &ScheduleTerms,
    leaf: [u8; 32],
    proof: &[[u8; 32]],
    now: i64,
) -> Result<u64> {
    require!(!books.config.paused, VestingError::SchedulePaused);
    require!(books.config.has_commitment(), VestingError::NoCommitment);
    require!(proof.len() <= MAX_PROOF_DEPTH, VestingError::ProofTooLong);
    require!(
        merkle::leaf_hash(&beneficiary, terms) == leaf,
        VestingError::LeafMismatch
    );
    require!(
        merkle::verify(proof, &books.config.merkle_root, &leaf),
        VestingError::InvalidProof
    );

    let origin = ScheduleOrigin::Claimed { leaf };
    if record.is_vacant() {
        require!(schedule.is_vacant(), VestingError::ClaimMismatch);
        let index = open_schedule(books, schedule, &*ledger, beneficiary, terms, origin, now)?;
        record.bind(books.config_key, beneficiary, leaf, index);
    } else {
        record.check(&books.config_key, &beneficiary, &leaf)?;
        books.check_schedule(schedule)?;
        require!(
            schedule.index == record.index && schedule.origin == origin,
            VestingError::ClaimMismatch
        );
    }

    let amount = vesting_math::releasable(schedule, now)?;
    if amount == 0 {
        return Ok(0);
    }
    pay_out(books, schedule, ledger, amount)?;
    Ok(amount)
}

/// Read-only releasable amount for `schedule` at `now`.
pub fn compute_releasable(schedule: &VestingSchedule, now: i64) -> Result<u64> {
    vesting_math::releasable(schedule, now)
}

/// Owner reclaim of funds beyond `total_allocated`.
pub fn withdraw_surplus<L: Ledger>(
    config: &mut VestingConfig,
    ledger: &mut L,
    caller: &Pubkey,
    amount: u64,
) -> Result<()> {
    authorize(config, Capability::Administer, caller)?;
    require!(!config.in_flight, VestingError::ReentrantCall);
    require!(amount > 0, VestingError::InvalidAmount);
    let surplus = accounting::available(config, ledger.held()?);
    require!(amount <= surplus, VestingError::InsufficientFunds);

    config.in_flight = true;
    let owner = config.owner;
    let outcome = ledger
        .checkpoint(config)
        .and_then(|_| ledger.transfer(&owner, amount));
    config.in_flight = false;
    outcome?;

    emit!(SurplusWithdrawn {
        owner,
        amount,
        remaining_surplus: surplus - amount,
    });
    Ok(())
}

/// Withdraw the whole surplus. Returns the amount swept, possibly 0.
pub fn sweep_surplus<L: Ledger>(
    config: &mut VestingConfig,
    ledger: &mut L,
    caller: &Pubkey,
) -> Result<u64> {
    authorize(config, Capability::Administer, caller)?;
    let surplus = accounting::available(config, ledger.held()?);
    if surplus == 0 {
        emit!(SurplusWithdrawn {
            owner: config.owner,
            amount: 0,
            remaining_surplus: 0,
        });
        return Ok(0);
    }
    withdraw_surplus(config, ledger, caller, surplus)?;
    Ok(surplus)
}

pub fn set_paused(config: &mut VestingConfig, caller: &Pubkey, paused: bool) -> Result<()> {
    authorize(config, Capability::Administer, caller)?;
    require!(config.paused != paused, VestingError::PauseUnchanged);
    config.paused = paused;
    emit!(PauseSet {
        owner: config.owner,
        paused,
    });
    Ok(())
}

pub fn set_creator(config: &mut VestingConfig, caller: &Pubkey, new_creator: Pubkey) -> Result<()> {
    authorize(config, Capability::Administer, caller)?;
    require!(new_creator != Pubkey::default(), VestingError::InvalidPubkey);
    let old_creator = config.creator;
    config.creator = new_creator;
    emit!(CreatorSet {
        owner: config.owner,
        old_creator,
        new_creator,
    });
    Ok(())
}
