//! Prometheus metrics of the breakers, served over HTTP by `prometheus_exporter`.
use crate::{base::BlockType, config, logging, Error, Result};
use lazy_static::lazy_static;
use prometheus_exporter::{
    prometheus::{default_registry, opts, CounterVec},
    Builder,
};
use std::net::SocketAddr;
use std::sync::Mutex;

lazy_static! {
    static ref PROCESS_NAME: String = std::env::args().next().unwrap_or_else(|| "<unknown>".to_owned());
    static ref PID_STRING: String = format!("{}", std::process::id());
    static ref STATE_CHANGE_COUNTER: CounterVec = CounterVec::new(
        opts!(
            "circuit_breaker_state_changed_total",
            "Circuit breaker total state change count"
        ),
        &["process", "pid", "breaker", "from_state", "to_state"]
    )
    .unwrap();
    static ref REJECTED_COUNTER: CounterVec = CounterVec::new(
        opts!(
            "circuit_breaker_rejected_total",
            "Circuit breaker total rejected call count"
        ),
        &["process", "pid", "breaker", "block_type"]
    )
    .unwrap();
    static ref COUNTER_METRICS: Vec<CounterVec> = {
        vec![STATE_CHANGE_COUNTER.clone(), REJECTED_COUNTER.clone()]
    };
    static ref EXPORTER_STATE: Mutex<ExporterState> = Mutex::new(ExporterState::default());
}

// metrics stay in the default registry once registered, even if the endpoint failed to start
#[derive(Debug, Default)]
struct ExporterState {
    registered: bool,
    started: bool,
}

pub fn add_state_change_counter(breaker: &str, from: &str, to: &str) {
    STATE_CHANGE_COUNTER
        .with_label_values(&[&PROCESS_NAME, &PID_STRING, breaker, from, to])
        .inc();
}

pub fn add_rejected_counter(breaker: &str, block_type: BlockType) {
    REJECTED_COUNTER
        .with_label_values(&[&PROCESS_NAME, &PID_STRING, breaker, block_type.as_str()])
        .inc();
}

pub fn reset_breaker_metrics() {
    for item in &*COUNTER_METRICS {
        item.reset();
    }
}

fn register_breaker_metrics() -> Result<()> {
    // `prometheus_exporter` only serves the default registry
    let registry = default_registry();
    for item in &*COUNTER_METRICS {
        registry.register(Box::new(item.clone()))?;
    }
    Ok(())
}

/// `init` registers the metrics and starts the HTTP endpoint once per process.
/// A failed start can be retried, e.g. after fixing the configured address.
pub fn init() -> Result<()> {
    let mut state = EXPORTER_STATE.lock().unwrap();
    if state.started {
        return Ok(());
    }
    let binding: SocketAddr = config::exporter_addr()
        .parse()
        .map_err(|err| Error::msg(format!("invalid exporter address: {}", err)))?;
    let metrics_path = config::exporter_metrics_path();
    if !state.registered {
        register_breaker_metrics()?;
        state.registered = true;
    }
    let mut builder = Builder::new(binding);
    builder.with_endpoint(&metrics_path)?;
    builder.start()?;
    logging::info!(
        "[Exporter] Serving breaker metrics on http://{}{}",
        binding,
        metrics_path
    );
    state.started = true;
    Ok(())
}
