//! Slice-quantized linear vesting.
//!
//! - nothing is releasable before the cliff or once revoked
//! - at or after start + duration the whole remainder is releasable
//! - otherwise vested = floor(amount_total * whole_slices_elapsed * slice / duration)
//!
//! All division floors, so a given (schedule, now) always yields the same amount.

use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::VestingSchedule;

/// Amount vested by `now`, ignoring what was already released.
pub fn vested_amount(schedule: &VestingSchedule, now: i64) -> Result<u64> {
    if !schedule.is_active() || now < schedule.cliff {
        return Ok(0);
    }
    if now >= schedule.end()? {
        return Ok(schedule.amount_total);
    }

    let elapsed = now
        .checked_sub(schedule.start)
        .ok_or(VestingError::MathOverflow)?;
    // cliff >= start, so elapsed is non-negative here
    let elapsed = u64::try_from(elapsed).map_err(|_| VestingError::MathOverflow)?;
    let slices = elapsed
        .checked_div(schedule.slice_length)
        .ok_or(VestingError::MathOverflow)?;
    let vested_seconds = slices
        .checked_mul(schedule.slice_length)
        .ok_or(VestingError::MathOverflow)?;
    let duration = u64::try_from(schedule.duration).map_err(|_| VestingError::MathOverflow)?;

    let v = (schedule.amount_total as u128)
        .checked_mul(vested_seconds as u128)
        .ok_or(VestingError::MathOverflow)?
        .checked_div(duration as u128)
        .ok_or(VestingError::MathOverflow)?;
    Ok(u64::try_from(v).map_err(|_| VestingError::MathOverflow)?)
}

/// Amount that may be released at `now`.
pub fn releasable(schedule: &VestingSchedule, now: i64) -> Result<u64> {
    if !schedule.is_active() || now < schedule.cliff {
        return Ok(0);
    }
    if now >= schedule.end()? {
        return schedule.remaining();
    }
    // An update may lengthen a schedule below what was already paid.
    Ok(vested_amount(schedule, now)?.saturating_sub(schedule.released))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ScheduleStatus;

    fn schedule(amount: u64, start: i64, cliff_duration: i64, duration: i64, slice: u64) -> VestingSchedule {
        VestingSchedule {
            config: Pubkey::new_unique(),
            beneficiary: Pubkey::new_unique(),
            start,
            cliff: start + cliff_duration,
            duration,
            slice_length: slice,
            amount_total: amount,
            ..Default::default()
        }
    }

    #[test]
    fn nothing_before_cliff() {
        let t = 1_700_000_000;
        let s = schedule(1000, t, 86_400, 604_800, 60);
        assert_eq!(releasable(&s, t).unwrap(), 0);
        assert_eq!(releasable(&s, t + 86_400 - 1).unwrap(), 0);
        // cliff reached: one day of whole minutes has vested
        assert_eq!(releasable(&s, t + 86_400).unwrap(), 1000 * 86_400 / 604_800);
    }

    #[test]
    fn full_remainder_at_end() {
        let t = 1_700_000_000;
        let mut s = schedule(1000, t, 86_400, 604_800, 60);
        assert_eq!(releasable(&s, t + 604_800).unwrap(), 1000);
        s.released = 250;
        assert_eq!(releasable(&s, t + 604_800).unwrap(), 750);
        assert_eq!(releasable(&s, t + 10 * 604_800).unwrap(), 750);
    }

    #[test]
    fn accrual_is_quantized_to_slices() {
        let s = schedule(1000, 0, 0, 100, 10);
        // 35s elapsed -> 3 slices -> 30s -> 300
        assert_eq!(vested_amount(&s, 35).unwrap(), 300);
        assert_eq!(releasable(&s, 35).unwrap(), 300);
        assert_eq!(releasable(&s, 39).unwrap(), 300);
        assert_eq!(releasable(&s, 40).unwrap(), 400);

        let mut s = s;
        s.released = 120;
        assert_eq!(releasable(&s, 35).unwrap(), 180);
    }

    #[test]
    fn floors_fractional_units() {
        let s = schedule(10, 0, 0, 3, 1);
        assert_eq!(releasable(&s, 1).unwrap(), 3);
        assert_eq!(releasable(&s, 2).unwrap(), 6);
        assert_eq!(releasable(&s, 3).unwrap(), 10);
    }

    #[test]
    fn revoked_schedule_never_releases() {
        let mut s = schedule(1000, 0, 0, 100, 1);
        s.status = ScheduleStatus::Revoked;
        for now in [0, 50, 100, 1_000_000] {
            assert_eq!(releasable(&s, now).unwrap(), 0);
        }
    }

    #[test]
    fn repeated_queries_agree() {
        let s = schedule(987_654_321, 1_000, 30, 1_000_000, 7);
        let now = 1_000 + 123_457;
        let first = releasable(&s, now).unwrap();
        for _ in 0..5 {
            assert_eq!(releasable(&s, now).unwrap(), first);
        }
    }

    #[test]
    fn non_decreasing_and_clamped() {
        let mut s = schedule(1_000_003, 500, 40, 10_000, 13);
        s.released = 1_000;
        let mut last = 0;
        for now in (0..12_000).step_by(37) {
            let r = releasable(&s, now).unwrap();
            assert!(r >= last);
            assert!(r <= s.amount_total - s.released);
            last = r;
        }
        assert_eq!(last, s.amount_total - s.released);
    }

    #[test]
    fn released_beyond_vested_yields_zero() {
        let mut s = schedule(1000, 0, 0, 1000, 1);
        s.released = 600;
        assert_eq!(releasable(&s, 500).unwrap(), 0);
    }

    #[test]
    fn large_amounts_do_not_overflow() {
        let s = schedule(u64::MAX, 0, 0, 604_800, 60);
        let half = releasable(&s, 302_400).unwrap();
        assert_eq!(half, u64::MAX / 2);
    }
}
