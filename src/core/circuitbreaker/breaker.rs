use super::*;
use crate::{
    base::{BlockError, BlockType},
    logging,
    utils::{self, Clock, SystemClock},
};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The mutable part of a breaker, only touched while holding `CircuitBreaker::core`.
#[derive(Debug)]
struct BreakerCore {
    state: State,
    generation: Generation,
    counts: Counts,
    /// end of the current window in `Clock` milliseconds,
    /// the Closed reset deadline or the Open timeout, always `None` in Half-Open
    expiry: Option<u64>,
}

/// `CircuitBreaker` is a state machine to prevent sending requests that are likely to fail.
///
/// `allow()` is the admission gate and `record_result()` reports the outcome of an admitted call.
/// Most callers should use the executor APIs (`execute`, `acquire`) which pair them automatically.
pub struct CircuitBreaker {
    settings: Settings,
    clock: Arc<dyn Clock>,
    core: Mutex<BreakerCore>,
}

impl CircuitBreaker {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    pub fn with_clock(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_millis();
        let mut core = BreakerCore {
            state: State::Closed,
            generation: Generation::first(),
            counts: Counts::default(),
            expiry: None,
        };
        core.expiry = closed_expiry(&settings, now);
        CircuitBreaker {
            settings,
            clock,
            core: Mutex::new(core),
        }
    }

    pub fn name(&self) -> &str {
        self.settings.name()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `current_state` returns a snapshot of the state.
    /// Time-based transitions are not applied here, they are left to the next `allow()`.
    pub fn current_state(&self) -> State {
        self.lock().state
    }

    /// `counts` returns a snapshot of the counts of the current generation.
    pub fn counts(&self) -> Counts {
        self.lock().counts
    }

    /// `allow` checks whether a call may proceed. On success it returns the generation
    /// that must be handed to `record_result()` once the call finished.
    /// It never blocks beyond the short critical section and never queues.
    pub fn allow(&self) -> std::result::Result<Generation, BlockError> {
        let now = self.clock.now_millis();
        let mut core = self.lock();
        self.apply_expiry(&mut core, now);

        match core.state {
            State::Open => {
                return Err(self.block(BlockType::BreakerOpen));
            }
            State::HalfOpen if core.counts.requests >= self.settings.max_requests() => {
                return Err(self.block(BlockType::TooManyRequests));
            }
            _ => {}
        }
        core.counts.on_request();
        Ok(core.generation)
    }

    /// `record_result` reports the outcome of a call admitted under `generation`.
    /// Outcomes of a superseded generation are dropped.
    pub fn record_result(&self, generation: Generation, success: bool) {
        let now = self.clock.now_millis();
        let mut core = self.lock();
        if core.generation != generation {
            logging::trace!(
                "[CircuitBreaker] Breaker {} drops a stale result, success: {}",
                self.name(),
                success
            );
            return;
        }
        if success {
            self.on_success(&mut core, now);
        } else {
            self.on_failure(&mut core, now);
        }
    }

    fn on_success(&self, core: &mut BreakerCore, now: u64) {
        match core.state {
            State::Closed => core.counts.on_success(),
            State::HalfOpen => {
                core.counts.on_success();
                if core.counts.consecutive_successes >= self.settings.max_requests() {
                    self.set_state(core, State::Closed, now);
                }
            }
            State::Open => {}
        }
    }

    fn on_failure(&self, core: &mut BreakerCore, now: u64) {
        match core.state {
            State::Closed => {
                core.counts.on_failure();
                if self.settings.ready_to_trip(&core.counts) {
                    self.set_state(core, State::Open, now);
                }
            }
            State::HalfOpen => {
                core.counts.on_failure();
                self.set_state(core, State::Open, now);
            }
            State::Open => {}
        }
    }

    /// applies the lazy time-based transitions
    fn apply_expiry(&self, core: &mut BreakerCore, now: u64) {
        match (core.state, core.expiry) {
            (State::Closed, Some(expiry)) if now >= expiry => {
                self.to_new_generation(core, now);
            }
            (State::Open, Some(expiry)) if now >= expiry => {
                self.set_state(core, State::HalfOpen, now);
            }
            _ => {}
        }
    }

    fn set_state(&self, core: &mut BreakerCore, to: State, now: u64) {
        if core.state == to {
            return;
        }
        let from = core.state;
        core.state = to;
        self.to_new_generation(core, now);

        if to == State::Open {
            logging::debug!(
                "[CircuitBreaker] Breaker {} opened, next probe after {} ms (wall clock {})",
                self.name(),
                utils::duration_millis(self.settings.timeout()),
                utils::format_time_millis(
                    utils::curr_time_millis() + utils::duration_millis(self.settings.timeout())
                )
            );
        }
        for listener in self.settings.listeners() {
            listener.on_state_change(self.name(), from, to);
        }
        for listener in state_change_listeners().iter() {
            listener.on_state_change(self.name(), from, to);
        }

        #[cfg(feature = "exporter")]
        crate::exporter::add_state_change_counter(self.name(), from.as_str(), to.as_str());
    }

    fn to_new_generation(&self, core: &mut BreakerCore, now: u64) {
        core.generation = core.generation.next();
        core.counts.clear();
        core.expiry = match core.state {
            State::Closed => closed_expiry(&self.settings, now),
            State::Open => Some(now.saturating_add(utils::duration_millis(self.settings.timeout()))),
            State::HalfOpen => None,
        };
    }

    fn block(&self, block_type: BlockType) -> BlockError {
        #[cfg(feature = "exporter")]
        crate::exporter::add_rejected_counter(self.name(), block_type);
        BlockError::new(block_type, self.name())
    }

    // A listener panicking while the lock is held must not take the breaker down with it,
    // the core is always left consistent between two statements.
    fn lock(&self) -> MutexGuard<'_, BreakerCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn closed_expiry(settings: &Settings, now: u64) -> Option<u64> {
    settings
        .interval()
        .map(|interval| now.saturating_add(utils::duration_millis(interval)))
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.lock();
        f.debug_struct("CircuitBreaker")
            .field("settings", &self.settings)
            .field("state", &core.state)
            .field("generation", &core.generation)
            .field("counts", &core.counts)
            .field("expiry", &core.expiry)
            .finish()
    }
}
