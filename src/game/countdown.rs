use std::time::{Duration, Instant};

/// The round timer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Countdown {
    started: Instant,
    duration: Duration,
}

impl Countdown {
    pub(super) fn new(duration: Duration, now: Instant) -> Countdown {
        Countdown {
            started: now,
            duration,
        }
    }

    pub(super) fn restart(&mut self, now: Instant) {
        self.started = now;
    }

    /// Whole seconds left on the clock at `now`.  Partial seconds elapsed are
    /// not counted against the player.
    pub(super) fn remaining_secs(&self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.started).as_secs();
        self.duration.as_secs().saturating_sub(elapsed)
    }

    pub(super) fn total_secs(&self) -> u64 {
        self.duration.as_secs()
    }
}

/// Format a number of seconds as `MM:SS`
pub(super) fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
