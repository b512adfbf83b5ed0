use std::time::Duration;

/// Retry pacing for catalog fetches: walks the schedule on each failure and
/// stays on its last step until reset.
pub struct Backoff {
    schedule: Vec<Duration>,
    index: usize,
}

impl Backoff {
    pub fn new(schedule: Vec<Duration>) -> Self {
        Self { schedule, index: 0 }
    }

    /// Delay to wait before the next attempt.
    pub fn on_failure(&mut self) -> Duration {
        let delay = self
            .schedule
            .get(self.index)
            .cloned()
            .unwrap_or_else(|| Duration::from_secs(1));
        if self.index + 1 < self.schedule.len() {
            self.index += 1;
        }
        delay
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl Default for Backoff {
    /// Gentle ramp for a service that may still be starting up.
    fn default() -> Self {
        Self::new(vec![
            Duration::from_millis(500),
            Duration::from_millis(500),
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
        ])
    }
}
