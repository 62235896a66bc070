use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::utils::schedule;

/// Per-beneficiary vesting schedule PDA (seeds = [b"vesting", beneficiary]).
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct VestingAccount {
    /// The only key allowed to claim from this schedule.
    pub beneficiary: Pubkey,
    /// Allocation, fixed at creation.
    pub total_tokens: u64,
    /// Schedule start (Unix seconds), set at creation.
    pub started_at: i64,
    /// Everything is vested at or after this timestamp.
    pub end_at: i64,
    /// Nothing is claimable before this timestamp.
    pub cliff_period_till: i64,
    /// Cumulative amount delivered; only ever increases.
    pub claimed_tokens: u64,
    pub bump: u8,
}

/// Lifecycle of a schedule, derived from `claimed_tokens`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingPhase {
    Pending,
    Accruing,
    FullyVested,
}

impl VestingAccount {
    pub const SIZE: usize =
        32 + // beneficiary
        8 +  // total_tokens
        8 +  // started_at
        8 +  // end_at
        8 +  // cliff_period_till
        8 +  // claimed_tokens
        1;   // bump

    /// Validated constructor; `claimed_tokens` starts at zero.
    pub fn new(
        beneficiary: Pubkey,
        total_tokens: u64,
        started_at: i64,
        end_at: i64,
        cliff_period_till: i64,
        bump: u8,
    ) -> std::result::Result<Self, VestingError> {
        if beneficiary == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        validate_schedule(total_tokens, started_at, end_at, cliff_period_till)?;
        Ok(Self {
            beneficiary,
            total_tokens,
            started_at,
            end_at,
            cliff_period_till,
            claimed_tokens: 0,
            bump,
        })
    }

    pub fn vested_amount(&self, now: i64) -> std::result::Result<u64, VestingError> {
        schedule::vested_amount(
            self.total_tokens,
            self.started_at,
            self.end_at,
            self.cliff_period_till,
            now,
        )
    }

    pub fn claimable(&self, now: i64) -> std::result::Result<u64, VestingError> {
        schedule::claimable(self, now)
    }

    /// Adds `delta` to the claimed total. Fails without mutating if the
    /// result would exceed the allocation.
    pub fn record_claim(&mut self, delta: u64) -> std::result::Result<u64, VestingError> {
        let claimed = self
            .claimed_tokens
            .checked_add(delta)
            .ok_or(VestingError::Overflow)?;
        if claimed > self.total_tokens {
            return Err(VestingError::Overflow);
        }
        self.claimed_tokens = claimed;
        Ok(claimed)
    }

    pub fn remaining(&self) -> u64 {
        self.total_tokens.saturating_sub(self.claimed_tokens)
    }

    pub fn phase(&self) -> VestingPhase {
        if self.claimed_tokens == 0 {
            VestingPhase::Pending
        } else if self.claimed_tokens < self.total_tokens {
            VestingPhase::Accruing
        } else {
            VestingPhase::FullyVested
        }
    }
}

pub fn validate_schedule(
    total_tokens: u64,
    started_at: i64,
    end_at: i64,
    cliff_period_till: i64,
) -> std::result::Result<(), VestingError> {
    if total_tokens == 0 {
        return Err(VestingError::InvalidSchedule);
    }
    if end_at <= started_at {
        return Err(VestingError::InvalidSchedule);
    }
    if cliff_period_till < started_at || cliff_period_till > end_at {
        return Err(VestingError::InvalidSchedule);
    }
    Ok(())
}
