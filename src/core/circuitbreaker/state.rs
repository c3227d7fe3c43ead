use serde::{Deserialize, Serialize};
use std::fmt;

/// States of Circuit Breaker State Machine
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Closed,
    HalfOpen,
    Open,
}

impl Default for State {
    fn default() -> State {
        State::Closed
    }
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Closed => "closed",
            State::HalfOpen => "half-open",
            State::Open => "open",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `Generation` identifies the observation window an admitted call belongs to.
/// It is handed out by `CircuitBreaker::allow()` and must be given back to
/// `CircuitBreaker::record_result()`. A new one is minted on every state change
/// and on every Closed window reset, so results of calls admitted before are dropped.
///
/// It can only be compared, never built or inspected outside of this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub(crate) fn first() -> Self {
        Generation(0)
    }

    #[must_use]
    pub(crate) fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn state_display() {
        assert_eq!(State::default(), State::Closed);
        assert_eq!(State::Closed.to_string(), "closed");
        assert_eq!(State::HalfOpen.to_string(), "half-open");
        assert_eq!(State::Open.to_string(), "open");
    }

    #[test]
    fn generation_advances() {
        let g0 = Generation::first();
        let g1 = g0.next();
        let g2 = g1.next();
        assert_ne!(g0, g1);
        assert_ne!(g1, g2);
        assert_ne!(g0, g2);
        assert_eq!(g1, g0.next());
        assert!(g2.0 > g1.0 && g1.0 > g0.0);
    }
}
