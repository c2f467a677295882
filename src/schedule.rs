//! The two game clocks, replayed on one thread.
//!
//! Wall time is fed in with [`Scheduler::advance`]; every clock period that
//! elapsed comes back as a [`Tick`], in the order the clocks would have fired.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Run one full level frame.
    Frame,
    /// Let the player fire.
    AutoFire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Clock {
    period: Duration,
    until_next: Duration,
}

impl Clock {
    fn new(period: Duration) -> Self {
        Self {
            period,
            until_next: period,
        }
    }

    fn reset(&mut self) {
        self.until_next = self.period;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduler {
    frame: Clock,
    auto_fire: Clock,
    running: bool,
}

impl Scheduler {
    pub fn new(frame_period: Duration, auto_fire_period: Duration) -> Self {
        Self {
            frame: Clock::new(frame_period.max(Duration::from_millis(1))),
            auto_fire: Clock::new(auto_fire_period.max(Duration::from_millis(1))),
            running: false,
        }
    }

    /// Restarts both clocks from a full period.
    pub fn start(&mut self) {
        self.frame.reset();
        self.auto_fire.reset();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Consumes `elapsed` and returns the ticks that fell inside it.  When both
    /// clocks are due at the same instant the frame comes first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Tick> {
        let mut ticks = Vec::new();
        if !self.running {
            return ticks;
        }

        let mut remaining = elapsed;
        loop {
            let step = self.frame.until_next.min(self.auto_fire.until_next);
            if step > remaining {
                break;
            }
            remaining -= step;
            self.frame.until_next -= step;
            self.auto_fire.until_next -= step;

            if self.frame.until_next.is_zero() {
                ticks.push(Tick::Frame);
                self.frame.reset();
            }
            if self.auto_fire.until_next.is_zero() {
                ticks.push(Tick::AutoFire);
                self.auto_fire.reset();
            }
        }
        self.frame.until_next -= remaining;
        self.auto_fire.until_next -= remaining;
        ticks
    }
}
