pub mod merkle;
pub mod vesting_math;
