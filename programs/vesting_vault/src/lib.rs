//! # Vesting Vault
//!
//! Custodial SPL-token vault with per-beneficiary linear vesting:
//!  - one vault per deployment, scoped to a single mint
//!  - one schedule per beneficiary, gated by a cliff, fully vested at `end_at`
//!  - beneficiary-signed claims that release the vested delta
//!
//! The accounting core (`state`, `utils::schedule`) is shared between the
//! on-chain program and the host-side [`ledger`].

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
#[cfg(not(target_os = "solana"))]
pub mod ledger;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("GvzD2zDi4AvLjRA5893csKVsHYezfv6D2B3SpAenSxoi");

#[program]
pub mod vesting_vault {
    use super::*;

    /// Create the singleton vault scoped to `mint`, with `admin` as its administrator.
    pub fn initialize_vault(ctx: Context<InitializeVault>, admin: Pubkey) -> Result<()> {
        initialize_vault::handler(ctx, admin)
    }

    /// Deposit `total_tokens` into custody and record the beneficiary's schedule.
    pub fn initialize_vesting(
        ctx: Context<InitializeVesting>,
        beneficiary: Pubkey,
        total_tokens: u64,
        end_at: i64,
        cliff_period_till: i64,
    ) -> Result<()> {
        initialize_vesting::handler(ctx, beneficiary, total_tokens, end_at, cliff_period_till)
    }

    /// Release the currently vested, unclaimed amount to the signing beneficiary.
    pub fn claim(ctx: Context<Claim>) -> Result<u64> {
        claim::handler(ctx)
    }

    /// Emit and return the amount a beneficiary could claim right now.
    pub fn quote_claimable(ctx: Context<QuoteClaimable>) -> Result<u64> {
        quote_claimable::handler(ctx)
    }

    pub fn rotate_admin(ctx: Context<RotateAdmin>, new_admin: Pubkey) -> Result<()> {
        rotate_admin::handler(ctx, new_admin)
    }
}
