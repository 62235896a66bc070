#![no_main]

use libfuzzer_sys::fuzz_target;
use vesting_vault::utils::schedule;

fuzz_target!(|data: &[u8]| {
    if data.len() < 48 {
        return;
    }

    let word = |i: usize| u64::from_le_bytes(data[i * 8..i * 8 + 8].try_into().unwrap_or([0; 8]));
    let total = word(0);
    let started_at = word(1) as i64;
    let end_at = word(2) as i64;
    let cliff = word(3) as i64;
    let now = word(4) as i64;
    let later = now.saturating_add((word(5) % 1_000_000) as i64);

    if total == 0 || end_at <= started_at || cliff < started_at || cliff > end_at {
        return;
    }

    // Valid schedules never error and never exceed the allocation.
    let v_now = schedule::vested_amount(total, started_at, end_at, cliff, now)
        .expect("valid schedule must not error");
    let v_later = schedule::vested_amount(total, started_at, end_at, cliff, later)
        .expect("valid schedule must not error");

    assert!(v_now <= total);
    assert!(v_later >= v_now);
    if now < cliff {
        assert_eq!(v_now, 0);
    }
    if now >= end_at {
        assert_eq!(v_now, total);
    }
});
