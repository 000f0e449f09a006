use anchor_lang::prelude::*;

#[event]
pub struct EngineInitialized {
    pub config: Pubkey,
    pub owner: Pubkey,
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub native: bool,
    pub merkle_root: [u8; 32],
}

#[event]
pub struct VaultFunded {
    pub config: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub held: u64,
}

#[event]
pub struct ScheduleCreated {
    pub config: Pubkey,
    pub beneficiary: Pubkey,
    pub index: u32,
    pub start: i64,
    pub cliff: i64,
    pub duration: i64,
    pub slice_length: u64,
    pub amount: u64,
    pub revokable: bool,
    /// Materialized from the Merkle commitment rather than created directly.
    pub claimed: bool,
}

#[event]
pub struct ScheduleUpdated {
    pub config: Pubkey,
    pub beneficiary: Pubkey,
    pub index: u32,
    pub old_amount: u64,
    pub new_amount: u64,
    pub duration: i64,
    pub cliff: i64,
}

#[event]
pub struct FundsReleased {
    pub config: Pubkey,
    pub beneficiary: Pubkey,
    pub index: u32,
    pub amount: u64,
    pub released_total: u64,
}

#[event]
pub struct ScheduleRevoked {
    pub config: Pubkey,
    pub beneficiary: Pubkey,
    pub index: u32,
    /// Accrued amount paid out as part of the revocation.
    pub paid_out: u64,
    /// Amount returned to the unallocated surplus.
    pub unreleased: u64,
}

#[event]
pub struct SurplusWithdrawn {
    pub owner: Pubkey,
    pub amount: u64,
    pub remaining_surplus: u64,
}

#[event]
pub struct PauseSet {
    pub owner: Pubkey,
    pub paused: bool,
}

#[event]
pub struct CreatorSet {
    pub owner: Pubkey,
    pub old_creator: Pubkey,
    pub new_creator: Pubkey,
}

#[event]
pub struct ReleasableQuote {
    pub beneficiary: Pubkey,
    pub index: u32,
    pub vested_amount: u64,
    pub released_amount: u64,
    pub releasable: u64,
}
