//! Game clock.
//!
//! The clock never reads wall time itself: callers pass elapsed durations to
//! `tick`, which keeps it deterministic under test and in simulated matches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::types::Color;

/// Initial time and per-move increment, both in seconds. `initial_secs == 0`
/// means untimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeControl {
    #[serde(default)]
    pub initial_secs: u64,
    #[serde(default)]
    pub increment_secs: u64,
}

impl TimeControl {
    /// 10, 15 and 30 minute games.
    pub const PRESETS: [TimeControl; 3] = [
        TimeControl::new(600, 0),
        TimeControl::new(900, 0),
        TimeControl::new(1800, 0),
    ];

    pub const fn new(initial_secs: u64, increment_secs: u64) -> Self {
        Self {
            initial_secs,
            increment_secs,
        }
    }

    pub const fn unlimited() -> Self {
        Self::new(0, 0)
    }

    pub fn is_unlimited(&self) -> bool {
        self.initial_secs == 0
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::PRESETS[0]
    }
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "Unlimited")
        } else {
            write!(f, "{}+{}", self.initial_secs / 60, self.increment_secs)
        }
    }
}

/// Per-side countdown clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    time_control: TimeControl,
    remaining: [Duration; 2],
    running_for: Option<Color>,
    flagged: Option<Color>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(TimeControl::default())
    }
}

impl Clock {
    pub fn new(time_control: TimeControl) -> Self {
        let initial = Duration::from_secs(time_control.initial_secs);
        Self {
            time_control,
            remaining: [initial; 2],
            running_for: None,
            flagged: None,
        }
    }

    pub fn time_control(&self) -> TimeControl {
        self.time_control
    }

    /// Start counting down for `c`. No-op on an untimed or flagged clock.
    pub fn start(&mut self, c: Color) {
        if self.time_control.is_unlimited() || self.flagged.is_some() {
            return;
        }
        self.running_for = Some(c);
    }

    /// Hand the clock to `c`, crediting the increment to the side that
    /// just moved.
    pub fn switch_to(&mut self, c: Color) {
        if let Some(prev) = self.running_for {
            if prev != c {
                let inc = Duration::from_secs(self.time_control.increment_secs);
                self.remaining[prev.idx()] += inc;
            }
        }
        self.start(c);
    }

    pub fn stop(&mut self) {
        self.running_for = None;
    }

    /// Charge `elapsed` to the running side. Returns that side once, at the
    /// moment its time reaches zero; the clock stops afterwards.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Color> {
        let side = self.running_for?;
        let left = &mut self.remaining[side.idx()];
        *left = left.saturating_sub(elapsed);
        if left.is_zero() {
            self.flagged = Some(side);
            self.running_for = None;
            return Some(side);
        }
        None
    }

    pub fn remaining(&self, c: Color) -> Duration {
        self.remaining[c.idx()]
    }

    pub fn running_for(&self) -> Option<Color> {
        self.running_for
    }

    /// The side whose time ran out, if any.
    pub fn flagged(&self) -> Option<Color> {
        self.flagged
    }

    /// Restore full time for both sides and stop.
    pub fn reset(&mut self) {
        *self = Self::new(self.time_control);
    }
}

/// `m:ss`, with tenths under ten seconds.
pub fn format_time(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    if duration.as_millis() < 10_000 {
        let tenths = (duration.as_millis() % 1000) / 100;
        format!("{mins}:{secs:02}.{tenths}")
    } else {
        format!("{mins}:{secs:02}")
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
