use anchor_lang::prelude::*;

/// Custom error codes for the vesting engine.
#[error_code]
pub enum VestingError {
    #[msg("Unauthorized: owner signature required")]
    UnauthorizedOwner,

    #[msg("Unauthorized: schedule-creation capability required")]
    UnauthorizedCreator,

    #[msg("Unauthorized: beneficiary or owner signature required")]
    UnauthorizedCaller,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Amount exceeds the per-schedule cap")]
    AmountAboveCap,

    #[msg("Duration outside the allowed range")]
    InvalidDuration,

    #[msg("Cliff duration must be within [0, duration]")]
    InvalidCliff,

    #[msg("Slice length must be within [1, 60] seconds")]
    InvalidSliceLength,

    #[msg("Start is too far in the future")]
    StartTooFar,

    #[msg("Beneficiary already holds the maximum number of schedules")]
    TooManySchedules,

    #[msg("Insufficient unallocated funds")]
    InsufficientFunds,

    #[msg("Schedule is not active")]
    ScheduleNotActive,

    #[msg("Schedule is not revokable")]
    NotRevocable,

    #[msg("Amount exceeds the releasable balance")]
    ExceedsReleasable,

    #[msg("Schedule has fully vested and can no longer be edited")]
    ScheduleFullyVested,

    #[msg("Cannot shrink a schedule that has already started")]
    CannotShrinkStartedSchedule,

    #[msg("Amount is below what has already been released")]
    BelowReleased,

    #[msg("Releases and claims are paused")]
    SchedulePaused,

    #[msg("Pause flag already has the requested value")]
    PauseUnchanged,

    #[msg("A payout is already in flight")]
    ReentrantCall,

    #[msg("Schedule does not belong to this engine or holder")]
    ScheduleMismatch,

    #[msg("Holder account is bound to another beneficiary")]
    HolderMismatch,

    #[msg("Schedule passed more than once")]
    DuplicateSchedule,

    #[msg("Every schedule of the holder must be passed")]
    IncompleteScheduleSet,

    #[msg("Schedule account must be writable")]
    ScheduleNotWritable,

    #[msg("No Merkle commitment configured")]
    NoCommitment,

    #[msg("Leaf does not match the claimed schedule parameters")]
    LeafMismatch,

    #[msg("Merkle proof does not reach the committed root")]
    InvalidProof,

    #[msg("Proof is too long")]
    ProofTooLong,

    #[msg("Claim record or schedule does not match this leaf")]
    ClaimMismatch,

    #[msg("Token mint and token program accounts are required")]
    MissingTokenAccounts,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Destination does not belong to the recipient")]
    InvalidDestination,

    #[msg("Vesting allocations are not transferable")]
    NonTransferable,

    #[msg("Math overflow")]
    MathOverflow,
}
