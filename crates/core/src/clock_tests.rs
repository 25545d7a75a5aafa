// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_clock_advances() {
    let clock = FakeClock::at(1_000);
    assert_eq!(clock.now_ms(), 1_000);
    clock.advance(Duration::from_secs(2));
    assert_eq!(clock.now_ms(), 3_000);
    clock.advance_ms(500);
    assert_eq!(clock.now_ms(), 3_500);
}

#[test]
fn fake_clock_clones_share_time() {
    let clock = FakeClock::new();
    let other = clock.clone();
    clock.advance_ms(42);
    assert_eq!(other.now_ms(), 42);
}

#[test]
fn fake_clock_can_jump_backwards() {
    let clock = FakeClock::at(10_000);
    clock.set_ms(1_000);
    assert_eq!(clock.now_ms(), 1_000);
}

#[test]
fn system_clock_is_past_2020() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock::new().now_ms() > 1_577_836_800_000);
}
