//! Delays past the timer ceiling bridge in hops and still fire exactly
//! once, never early.

use crate::prelude::*;
use nudge_engine::MAX_DELAY_MS;

#[tokio::test]
async fn fire_instant_three_ceilings_away_fires_exactly_once() {
    let start = HOUR_MS;
    let fire_at = start + 3 * MAX_DELAY_MS;
    let (mut engine, notifier, clock) = engine_at(start);

    let task = Task::new("t-sabbatical", "back from leave")
        .with_due(fire_at)
        .with_reminders(vec![0]);
    engine.recover(vec![task]).await;
    assert_eq!(engine.pending_count(), 1);

    // Walk the clock forward one wake-up at a time, the way the daemon
    // loop does. Each wake-up is at most one ceiling away.
    let mut wakeups = 0;
    while let Some(wakeup) = engine.next_wakeup() {
        assert!(wakeup - clock.now_ms() <= MAX_DELAY_MS);
        assert!(notifier.calls().is_empty(), "fired before the instant");
        clock.set_ms(wakeup);
        engine.tick().await;
        wakeups += 1;
        assert!(wakeups < 16, "bridge failed to make progress");
    }

    assert!(clock.now_ms() >= fire_at);
    assert_eq!(notifier.calls().len(), 1);
    assert_eq!(engine.active_alerts().len(), 1);

    // Nothing left armed, and later ticks stay quiet
    clock.advance_ms(HOUR_MS);
    engine.tick().await;
    assert_eq!(notifier.calls().len(), 1);
}

#[tokio::test]
async fn cancelling_mid_bridge_prevents_the_fire() {
    let start = HOUR_MS;
    let fire_at = start + 3 * MAX_DELAY_MS;
    let (mut engine, notifier, clock) = engine_at(start);

    let task = Task::new("t-1", "far out")
        .with_due(fire_at)
        .with_reminders(vec![0]);
    engine.recover(vec![task]).await;

    // Cross one hop, then delete the task while the delay is bridging
    let first_hop = engine.next_wakeup().unwrap();
    clock.set_ms(first_hop);
    engine.tick().await;
    engine.tasks_changed(Vec::new()).await;
    assert_eq!(engine.pending_count(), 0);

    clock.set_ms(fire_at + HOUR_MS);
    engine.tick().await;
    assert!(notifier.calls().is_empty());
}
