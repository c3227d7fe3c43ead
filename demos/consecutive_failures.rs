//! Drives a breaker through a full cycle against a simulated flaky service:
//! seven failing calls trip it and get rejected, then after the timeout
//! five successful calls close it again.
//!
//! Run with `cargo run --example consecutive_failures --features logger_env`.
//! Set `RUST_LOG=info` to see the state changes.

use sentinel_breaker::{base::CallError, circuitbreaker, logging, utils};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
struct ServiceError;

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service unavailable")
    }
}

impl std::error::Error for ServiceError {}

static SERVICE_DOWN: AtomicBool = AtomicBool::new(true);

fn call_service() -> Result<String, ServiceError> {
    if SERVICE_DOWN.load(Ordering::SeqCst) {
        Err(ServiceError)
    } else {
        Ok("hello".into())
    }
}

fn report(round: usize, res: Result<String, CallError<ServiceError>>) {
    match res {
        Ok(body) => println!("call {}: succeeded, got {}", round, body),
        Err(CallError::Blocked(err)) => println!("call {}: rejected, {}", round, err),
        Err(CallError::Inner(err)) => println!("call {}: failed, {}", round, err),
    }
}

fn main() -> sentinel_breaker::Result<()> {
    let mut config_path = String::from("testdata/config/breaker.yaml");
    sentinel_breaker::init_with_config_file(&mut config_path)?;
    let breaker = circuitbreaker::get_breaker("demo-service")
        .ok_or_else(|| sentinel_breaker::Error::msg("demo-service is not configured"))?;

    println!("-- the service is down");
    for round in 1..=7 {
        report(round, breaker.execute(call_service));
        println!("   state: {}", breaker.current_state());
    }

    let wait = utils::duration_millis(breaker.settings().timeout()) + 100;
    println!("-- waiting {} ms for the breaker to probe again", wait);
    utils::sleep_for_ms(wait);
    SERVICE_DOWN.store(false, Ordering::SeqCst);

    println!("-- the service is back");
    for round in 8..=12 {
        report(round, breaker.execute(call_service));
        println!("   state: {}", breaker.current_state());
    }
    logging::info!("[Demo] Final counts {:?}", breaker.counts());
    Ok(())
}
