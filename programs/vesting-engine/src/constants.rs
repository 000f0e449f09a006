//! Program-wide constants.

use anchor_lang::prelude::Pubkey;

pub const CONFIG_SEED: &[u8] = b"config";
pub const VAULT_SEED: &[u8] = b"vault";
pub const HOLDER_SEED: &[u8] = b"holder";
pub const SCHEDULE_SEED: &[u8] = b"schedule";
pub const CLAIM_SEED: &[u8] = b"claim";

/// Stand-in mint key for engines that vest native lamports.
pub const NATIVE_MINT: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// How far in the future a schedule may start.
pub const MAX_START_DELAY: i64 = 30 * SECONDS_PER_WEEK;

/// Default lower bound on schedule duration; engines may configure a shorter one.
pub const MIN_DURATION: i64 = 7 * SECONDS_PER_DAY;

pub const MAX_DURATION: i64 = 50 * 365 * SECONDS_PER_DAY;

/// Upper bound on the accrual slice.
pub const MAX_SLICE_SECONDS: u64 = 60;

/// Schedules a single beneficiary may hold per engine. Must stay below 64,
/// `release_all` tracks seen indexes in a `u64` mask.
pub const MAX_SCHEDULES_PER_HOLDER: u32 = 50;

/// Longest Merkle proof accepted by `claim`.
pub const MAX_PROOF_DEPTH: usize = 32;

/// Default per-schedule cap: a holder at the schedule limit cannot overflow
/// its allocation counter.
pub const DEFAULT_MAX_SCHEDULE_AMOUNT: u64 = u64::MAX / MAX_SCHEDULES_PER_HOLDER as u64;
