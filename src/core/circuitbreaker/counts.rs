use serde::{Deserialize, Serialize};

/// `Counts` holds the numbers of requests and their outcomes in the current generation.
/// Every field is cleared when the generation changes.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// admitted calls
    pub requests: u32,
    pub total_successes: u32,
    pub total_failures: u32,
    pub consecutive_successes: u32,
    pub consecutive_failures: u32,
}

impl Counts {
    pub fn on_request(&mut self) {
        self.requests = self.requests.saturating_add(1);
    }

    pub fn on_success(&mut self) {
        self.total_successes = self.total_successes.saturating_add(1);
        self.consecutive_successes = self.consecutive_successes.saturating_add(1);
        self.consecutive_failures = 0;
    }

    pub fn on_failure(&mut self) {
        self.total_failures = self.total_failures.saturating_add(1);
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_successes = 0;
    }

    pub fn clear(&mut self) {
        *self = Counts::default();
    }

    /// `failure_ratio` is `total_failures / requests`, or 0 when nothing was admitted.
    pub fn failure_ratio(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.total_failures as f64 / self.requests as f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn consecutive_resets_on_opposite_outcome() {
        let mut counts = Counts::default();
        for _ in 0..3 {
            counts.on_request();
            counts.on_failure();
        }
        assert_eq!(counts.consecutive_failures, 3);
        assert_eq!(counts.consecutive_successes, 0);

        counts.on_request();
        counts.on_success();
        assert_eq!(counts.consecutive_failures, 0);
        assert_eq!(counts.consecutive_successes, 1);

        counts.on_request();
        counts.on_failure();
        assert_eq!(counts.consecutive_failures, 1);
        assert_eq!(counts.consecutive_successes, 0);

        assert_eq!(counts.requests, 5);
        assert_eq!(counts.total_failures, 4);
        assert_eq!(counts.total_successes, 1);
        assert_eq!(
            counts.total_successes + counts.total_failures,
            counts.requests
        );
    }

    #[test]
    fn clear() {
        let mut counts = Counts {
            requests: 5,
            total_successes: 2,
            total_failures: 3,
            consecutive_successes: 0,
            consecutive_failures: 3,
        };
        counts.clear();
        assert_eq!(counts, Counts::default());
    }

    #[test]
    fn failure_ratio() {
        let mut counts = Counts::default();
        assert_eq!(counts.failure_ratio(), 0.0);
        for i in 0..10 {
            counts.on_request();
            if i % 2 == 0 {
                counts.on_failure();
            } else {
                counts.on_success();
            }
        }
        assert!((counts.failure_ratio() - 0.5).abs() < f64::EPSILON);
    }
}
