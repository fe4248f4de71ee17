use std::time::Duration;

use crate::consts;

/// Delay and sound counters. They only move when the driver calls
/// `countdown`, which it should do at 60 Hz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn countdown(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }
}

/// Converts wall-clock time into whole 60 Hz timer ticks, carrying the
/// remainder between calls so the tick rate does not depend on how often
/// the host polls.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickClock {
    carry: Duration,
}

impl TickClock {
    pub fn period() -> Duration {
        Duration::from_secs(1) / consts::TIMER_HZ
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let period = TickClock::period();
        self.carry += elapsed;
        let ticks = (self.carry.as_nanos() / period.as_nanos()) as u32;
        self.carry -= period * ticks;
        ticks
    }
}
