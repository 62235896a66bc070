//! Linear, cliff-gated vesting math.
//!
//! - vested(now) = 0 before the cliff, `total` at or after the end, otherwise
//!   floor(total * (now - start) / (end - start)).
//! - claimable(now) = vested(now) - claimed, saturating at zero.
//!
//! Accrual is measured from the start, not the cliff: whatever accrued during
//! the cliff becomes claimable as soon as the cliff passes.

use crate::error::VestingError;
use crate::state::VestingAccount;

/// Amount vested to date for the given schedule bounds.
pub fn vested_amount(
    total_tokens: u64,
    started_at: i64,
    end_at: i64,
    cliff_period_till: i64,
    now: i64,
) -> Result<u64, VestingError> {
    if now < cliff_period_till {
        return Ok(0);
    }
    if now >= end_at {
        return Ok(total_tokens);
    }

    // i128 so that extreme timestamps cannot wrap before the bounds checks.
    let elapsed = (now as i128) - (started_at as i128);
    let duration = (end_at as i128) - (started_at as i128);
    if duration <= 0 {
        return Err(VestingError::InvalidSchedule);
    }
    if elapsed <= 0 {
        return Ok(0);
    }

    let v = (total_tokens as u128)
        .checked_mul(elapsed as u128)
        .ok_or(VestingError::Overflow)?
        .checked_div(duration as u128)
        .ok_or(VestingError::InvalidSchedule)?;
    u64::try_from(v).map_err(|_| VestingError::Overflow)
}

/// Tokens deliverable right now for `schedule`.
pub fn claimable(schedule: &VestingAccount, now: i64) -> Result<u64, VestingError> {
    let vested = vested_amount(
        schedule.total_tokens,
        schedule.started_at,
        schedule.end_at,
        schedule.cliff_period_till,
        now,
    )?;
    Ok(vested.saturating_sub(schedule.claimed_tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::prelude::Pubkey;

    const T: i64 = 1_700_000_000;

    fn schedule(total: u64, cliff: i64, end: i64) -> VestingAccount {
        VestingAccount::new(Pubkey::new_unique(), total, T, T + end, T + cliff, 255).unwrap()
    }

    #[test]
    fn linear_example() {
        let s = schedule(100, 2, 10);
        assert_eq!(claimable(&s, T + 1).unwrap(), 0);
        assert_eq!(claimable(&s, T + 2).unwrap(), 20);
        assert_eq!(claimable(&s, T + 5).unwrap(), 50);
        assert_eq!(claimable(&s, T + 10).unwrap(), 100);
    }

    #[test]
    fn cliff_gates_everything_before_it() {
        let s = schedule(1_000, 30, 100);
        for now in [T - 50, T, T + 1, T + 29] {
            assert_eq!(claimable(&s, now).unwrap(), 0, "now = {now}");
        }
        // Accrued-during-cliff tokens appear at once.
        assert_eq!(claimable(&s, T + 30).unwrap(), 300);
    }

    #[test]
    fn full_allocation_at_and_after_end() {
        let s = schedule(7, 0, 3);
        assert_eq!(claimable(&s, T + 3).unwrap(), 7);
        assert_eq!(claimable(&s, i64::MAX).unwrap(), 7);
    }

    #[test]
    fn cliff_at_end_is_all_or_nothing() {
        let s = schedule(42, 10, 10);
        assert_eq!(claimable(&s, T + 9).unwrap(), 0);
        assert_eq!(claimable(&s, T + 10).unwrap(), 42);
    }

    #[test]
    fn floor_division_never_over_distributes() {
        let s = schedule(10, 0, 3);
        assert_eq!(claimable(&s, T + 1).unwrap(), 3);
        assert_eq!(claimable(&s, T + 2).unwrap(), 6);
        assert_eq!(claimable(&s, T + 3).unwrap(), 10);
    }

    #[test]
    fn wide_arithmetic_for_large_allocations() {
        let s = schedule(u64::MAX, 0, 1_000_000);
        let half = claimable(&s, T + 500_000).unwrap();
        assert_eq!(half, u64::MAX / 2);
    }

    #[test]
    fn claimed_is_subtracted_and_clamped() {
        let mut s = schedule(100, 2, 10);
        s.claimed_tokens = 50;
        assert_eq!(claimable(&s, T + 5).unwrap(), 0);
        assert_eq!(claimable(&s, T + 6).unwrap(), 10);
        // Clock regression after a claim yields zero, not an error.
        assert_eq!(claimable(&s, T + 3).unwrap(), 0);
        assert_eq!(claimable(&s, T).unwrap(), 0);
    }

    #[test]
    fn vested_amount_is_monotonic_in_time() {
        let mut last = 0;
        for dt in 0..=120 {
            let v = vested_amount(999, T, T + 100, T + 10, T + dt).unwrap();
            assert!(v >= last);
            assert!(v <= 999);
            last = v;
        }
        assert_eq!(last, 999);
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        assert!(matches!(
            vested_amount(10, T, T, T - 1, T - 1),
            Err(VestingError::InvalidSchedule)
        ));
        assert!(matches!(
            vested_amount(10, T + 5, T + 1, T, T),
            Err(VestingError::InvalidSchedule)
        ));
    }
}
