use std::time::{Duration, Instant};

/// A cancellable periodic deadline.
///
/// Nothing runs on its own: the owner asks `due(now)` from its loop and does
/// the work when it returns `true`.
#[derive(Debug, Clone)]
pub struct PollTicker {
    period: Duration,
    next_due: Option<Instant>,
}

impl PollTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// (Re)arm the ticker; the first tick fires one period from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// `true` once per elapsed period. Missed periods collapse into one tick.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(at) if now >= at => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, `None` while cancelled.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|at| at.saturating_duration_since(now))
    }
}
