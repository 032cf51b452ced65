use super::tally::VoteTally;
use std::time::{Duration, Instant};

/// A single timed accumulation period.
#[derive(Debug, Clone)]
pub struct ObservationWindow {
    started_at: Instant,
    duration: Duration,
    tally: VoteTally,
}

impl ObservationWindow {
    pub fn open(started_at: Instant, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
            tally: VoteTally::new(),
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration.saturating_sub(self.elapsed(now))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.duration
    }

    pub fn vote(&mut self, label: &str) {
        self.tally.cast(label);
    }

    pub fn tally(&self) -> &VoteTally {
        &self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_is_inclusive() {
        let t0 = Instant::now();
        let window = ObservationWindow::open(t0, Duration::from_secs(5));

        assert!(!window.is_expired(t0 + Duration::from_millis(4999)));
        assert!(window.is_expired(t0 + Duration::from_secs(5)));
        assert_eq!(window.remaining(t0 + Duration::from_secs(7)), Duration::ZERO);
        assert_eq!(window.remaining(t0 + Duration::from_secs(2)), Duration::from_secs(3));
    }
}
