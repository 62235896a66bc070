use anchor_lang::prelude::*;

/// Custom error codes for the vesting vault program.
#[error_code]
pub enum VestingError {
    #[msg("Vault is already initialized")]
    AlreadyInitialized,

    #[msg("Caller is not authorized to administer the vault")]
    InvalidAdmin,

    #[msg("A vesting schedule already exists for this beneficiary")]
    DuplicateBeneficiary,

    #[msg("Invalid schedule: allocation must be > 0 and start <= cliff <= end, start < end")]
    InvalidSchedule,

    #[msg("Vesting account not found")]
    NotFound,

    #[msg("Unauthorized: only the beneficiary may claim")]
    Unauthorized,

    #[msg("Claimed amount would exceed the allocation")]
    Overflow,

    #[msg("Token transfer failed")]
    TransferFailed,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,
}
