use std::time::Duration;

use sky_battle::config::{AUTO_FIRE_PERIOD, FRAME_PERIOD};
use sky_battle::schedule::{Scheduler, Tick};

fn running() -> Scheduler {
    let mut scheduler = Scheduler::new(FRAME_PERIOD, AUTO_FIRE_PERIOD);
    scheduler.start();
    scheduler
}

#[test]
fn stopped_scheduler_produces_nothing() {
    let mut scheduler = Scheduler::new(FRAME_PERIOD, AUTO_FIRE_PERIOD);
    assert!(!scheduler.is_running());
    assert!(scheduler.advance(Duration::from_secs(5)).is_empty());
}

#[test]
fn frames_arrive_every_fifty_millis() {
    let mut scheduler = running();
    assert!(scheduler.advance(Duration::from_millis(49)).is_empty());
    assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![Tick::Frame]);
    assert_eq!(
        scheduler.advance(Duration::from_millis(100)),
        vec![Tick::Frame, Tick::Frame]
    );
}

#[test]
fn frame_precedes_auto_fire_when_both_are_due() {
    let mut scheduler = running();
    let ticks = scheduler.advance(Duration::from_millis(500));
    assert_eq!(ticks.len(), 11);
    assert!(ticks[..10].iter().all(|tick| *tick == Tick::Frame));
    assert_eq!(ticks[10], Tick::AutoFire);
}

#[test]
fn leftover_time_carries_over() {
    let mut scheduler = running();
    let mut frames = 0;
    for _ in 0..30 {
        frames += scheduler
            .advance(Duration::from_millis(33))
            .iter()
            .filter(|tick| **tick == Tick::Frame)
            .count();
    }
    // 990 ms of wall time.
    assert_eq!(frames, 19);
}

#[test]
fn stopping_and_restarting_resets_the_clocks() {
    let mut scheduler = running();
    let _ = scheduler.advance(Duration::from_millis(40));
    scheduler.stop();
    assert!(scheduler.advance(Duration::from_millis(100)).is_empty());

    scheduler.start();
    assert!(scheduler.advance(Duration::from_millis(40)).is_empty());
    assert_eq!(scheduler.advance(Duration::from_millis(10)), vec![Tick::Frame]);
}
