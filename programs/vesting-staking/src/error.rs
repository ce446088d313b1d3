use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("Caller lacks the required role or membership")]
    Forbidden = 1,
    #[msg("Operation is not valid in the current program phase")]
    InvalidState = 2,
    #[msg("Malformed strategy or input parameter")]
    InvalidParameter = 3,
    #[msg("Allocation input sequences differ in length")]
    LengthMismatch = 4,
    #[msg("Amount or capacity limit exceeded")]
    LimitExceeded = 5,
    #[msg("Unknown vesting strategy id")]
    InvalidStrategy = 6,
    #[msg("Cliff period has not elapsed yet")]
    NotYetVested = 7,
    #[msg("Nothing new to release")]
    NothingToRelease = 8,
    #[msg("Entry not found")]
    NotFound = 9,
    #[msg("Arithmetic overflow")]
    Overflow = 10,
}
