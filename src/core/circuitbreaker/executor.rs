use super::*;
use crate::base::{BlockError, CallError};
use std::error;

/// `Permit` is the admission of a single call. Its outcome is reported exactly once:
/// either explicitly with `record()`, or as a failure when the permit is dropped unreported,
/// which covers panics and cancelled futures.
#[derive(Debug)]
#[must_use = "an unreported permit is recorded as a failure when dropped"]
pub struct Permit<'a> {
    breaker: &'a CircuitBreaker,
    generation: Option<Generation>,
}

impl<'a> Permit<'a> {
    pub fn generation(&self) -> Option<Generation> {
        self.generation
    }

    pub fn record(mut self, success: bool) {
        if let Some(generation) = self.generation.take() {
            self.breaker.record_result(generation, success);
        }
    }
}

impl<'a> Drop for Permit<'a> {
    fn drop(&mut self) {
        if let Some(generation) = self.generation.take() {
            self.breaker.record_result(generation, false);
        }
    }
}

impl CircuitBreaker {
    /// `acquire` asks for admission and wraps the generation in a `Permit`.
    pub fn acquire(&self) -> std::result::Result<Permit<'_>, BlockError> {
        let generation = self.allow()?;
        Ok(Permit {
            breaker: self,
            generation: Some(generation),
        })
    }

    /// `execute` runs `op` if the breaker admits it. `Ok` counts as a success,
    /// an `Err` is classified by the `is_successful` setting.
    /// The operation's value or error is handed back untouched.
    /// A panic in `op` is recorded as a failure and then resumed.
    pub fn execute<T, E, F>(&self, op: F) -> std::result::Result<T, CallError<E>>
    where
        E: error::Error + 'static,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let settings = self.settings();
        self.execute_with(
            |res: &std::result::Result<T, E>| match res {
                Ok(_) => true,
                Err(err) => settings.is_successful(err),
            },
            op,
        )
    }

    /// `execute_with` is `execute` with a per-call classifier, for error types
    /// that don't implement `std::error::Error`.
    pub fn execute_with<T, E, C, F>(
        &self,
        classify: C,
        op: F,
    ) -> std::result::Result<T, CallError<E>>
    where
        C: FnOnce(&std::result::Result<T, E>) -> bool,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let permit = self.acquire()?;
        let res = op();
        permit.record(classify(&res));
        res.map_err(CallError::Inner)
    }

    #[cfg(feature = "async")]
    /// async flavor of `execute`. `op` builds the future once the call is admitted.
    /// Dropping the returned future after admission records a failure.
    pub async fn execute_async<T, E, F, Fut>(
        &self,
        op: F,
    ) -> std::result::Result<T, CallError<E>>
    where
        E: error::Error + 'static,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, E>>,
    {
        let settings = self.settings();
        self.execute_async_with(
            |res: &std::result::Result<T, E>| match res {
                Ok(_) => true,
                Err(err) => settings.is_successful(err),
            },
            op,
        )
        .await
    }

    #[cfg(feature = "async")]
    pub async fn execute_async_with<T, E, C, F, Fut>(
        &self,
        classify: C,
        op: F,
    ) -> std::result::Result<T, CallError<E>>
    where
        C: FnOnce(&std::result::Result<T, E>) -> bool,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<T, E>>,
    {
        let permit = self.acquire()?;
        let res = op().await;
        permit.record(classify(&res));
        res.map_err(CallError::Inner)
    }
}
