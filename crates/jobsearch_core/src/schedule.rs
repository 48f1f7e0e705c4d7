use crate::Millis;

pub const FAST_POLL_INTERVAL_MS: Millis = 200;
pub const SLOW_POLL_INTERVAL_MS: Millis = 500;
/// Time after acceptance at which polling drops to the slow interval.
pub const CADENCE_SWITCH_AFTER_MS: Millis = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollCadence {
    #[default]
    Fast,
    Slow,
}

/// Due times of status polls for one search.
///
/// Due times are offsets from the moment the search was accepted and sit on a
/// fixed grid: every 200 ms before the two second mark (200 to 1800 ms), then
/// every 500 ms counted from that mark (2500, 3000, ...).
/// A poll whose reply arrives late skips the grid points already in the past,
/// so there is never more than one outstanding poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    started_at: Millis,
    last_due: Millis,
}

impl PollSchedule {
    pub fn start(at: Millis) -> Self {
        Self {
            started_at: at,
            last_due: 0,
        }
    }

    /// Moves to the next due time that is not before `now` and returns the
    /// delay until it.
    pub fn advance(&mut self, now: Millis) -> Millis {
        let elapsed = now.saturating_sub(self.started_at);
        let mut due = next_offset(self.last_due);
        while due < elapsed {
            due = next_offset(due);
        }
        self.last_due = due;
        due - elapsed
    }

    /// Cadence of the interval that led to the current due time.
    pub fn cadence(&self) -> PollCadence {
        if self.last_due < CADENCE_SWITCH_AFTER_MS {
            PollCadence::Fast
        } else {
            PollCadence::Slow
        }
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }
}

/// The switch at 2000 ms replaces the fast tick that would fall on it.
fn next_offset(previous: Millis) -> Millis {
    let fast = previous + FAST_POLL_INTERVAL_MS;
    if fast < CADENCE_SWITCH_AFTER_MS {
        fast
    } else {
        previous.max(CADENCE_SWITCH_AFTER_MS) + SLOW_POLL_INTERVAL_MS
    }
}
