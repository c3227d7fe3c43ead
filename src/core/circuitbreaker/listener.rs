use super::State;
use crate::logging;

/// `StateChangeListener` listens on the circuit breaker state change event.
///
/// Listeners are called synchronously while the breaker updates its state,
/// on the latency path of the call that caused the change.
/// They must be cheap, must not block, and must not call back into the same breaker.
///
/// They must not panic either. A protected call that panics is recorded as a failure
/// while its thread unwinds, and if that failure trips the breaker the listeners run
/// during the unwinding, where a second panic aborts the process.
pub trait StateChangeListener: Sync + Send {
    fn on_state_change(&self, name: &str, from: State, to: State);
}

impl<F> StateChangeListener for F
where
    F: Fn(&str, State, State) + Send + Sync,
{
    fn on_state_change(&self, name: &str, from: State, to: State) {
        self(name, from, to)
    }
}

/// `LoggingListener` writes every state change to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl StateChangeListener for LoggingListener {
    fn on_state_change(&self, name: &str, from: State, to: State) {
        match to {
            State::Open => logging::warn!(
                "[CircuitBreaker] Breaker {} state changed: {} -> {}",
                name,
                from,
                to
            ),
            _ => logging::info!(
                "[CircuitBreaker] Breaker {} state changed: {} -> {}",
                name,
                from,
                to
            ),
        }
    }
}

#[cfg(test)]
pub(crate) use test::MockStateListener;
