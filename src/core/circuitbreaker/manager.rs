use super::*;
use crate::{config::BreakerConfig, logging, Error, Result};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

lazy_static! {
    static ref STATE_CHANGE_LISTENERS: Mutex<Vec<Arc<dyn StateChangeListener>>> =
        Mutex::new(Vec::new());
    static ref BREAKER_MAP: RwLock<HashMap<String, Arc<CircuitBreaker>>> =
        RwLock::new(HashMap::new());
}

/// `state_change_listeners` returns the listeners notified by every breaker,
/// after the breaker's own listeners.
pub fn state_change_listeners() -> Vec<Arc<dyn StateChangeListener>> {
    STATE_CHANGE_LISTENERS.lock().unwrap().clone()
}

/// register_state_change_listeners registers the global state change listener for all circuit breakers
pub fn register_state_change_listeners(mut listeners: Vec<Arc<dyn StateChangeListener>>) {
    if listeners.is_empty() {
        return;
    }
    STATE_CHANGE_LISTENERS
        .lock()
        .unwrap()
        .append(&mut listeners);
}

/// clear_state_change_listeners clears the all StateChangeListener
pub fn clear_state_change_listeners() {
    STATE_CHANGE_LISTENERS.lock().unwrap().clear();
}

/// `register_breaker` builds a breaker from `settings` and registers it under its name.
// This func acquires the write lock on global `BREAKER_MAP`,
// please release your locks on it before calling this func
pub fn register_breaker(settings: Settings) -> Result<Arc<CircuitBreaker>> {
    settings.is_valid()?;
    let mut breaker_map = BREAKER_MAP.write().unwrap();
    if breaker_map.contains_key(settings.name()) {
        return Err(Error::msg(format!(
            "breaker {} is already registered",
            settings.name()
        )));
    }
    let breaker = Arc::new(CircuitBreaker::new(settings));
    breaker_map.insert(breaker.name().to_string(), Arc::clone(&breaker));
    logging::info!(
        "[CircuitBreaker] Breaker registered, settings: {:?}",
        breaker.settings()
    );
    Ok(breaker)
}

pub fn get_breaker(name: &str) -> Option<Arc<CircuitBreaker>> {
    BREAKER_MAP.read().unwrap().get(name).map(Arc::clone)
}

/// `get_breakers` returns all the registered breakers
pub fn get_breakers() -> Vec<Arc<CircuitBreaker>> {
    BREAKER_MAP.read().unwrap().values().map(Arc::clone).collect()
}

/// `remove_breaker` unregisters a breaker. Handles to it stay usable.
pub fn remove_breaker(name: &str) -> bool {
    BREAKER_MAP.write().unwrap().remove(name).is_some()
}

pub fn clear_breakers() {
    BREAKER_MAP.write().unwrap().clear();
}

/// `load_breakers` replaces all registered breakers with the ones built from `configs`.
/// Invalid configs are ignored, the returned value is the number of breakers loaded.
/// A breaker whose config did not change keeps its state.
// This func acquires the write lock on global `BREAKER_MAP`,
// please release your locks on it before calling this func
pub fn load_breakers(configs: Vec<BreakerConfig>) -> Result<usize> {
    let mut valid_configs: HashMap<String, BreakerConfig> = HashMap::with_capacity(configs.len());
    for config in configs {
        if let Err(err) = config.is_valid() {
            logging::warn!(
                "[CircuitBreaker load_breakers] Ignoring invalid breaker config {:?}, reason: {:?}",
                config,
                err
            );
            continue;
        }
        if valid_configs.contains_key(&config.name) {
            return Err(Error::msg(format!(
                "duplicated breaker name {}",
                config.name
            )));
        }
        valid_configs.insert(config.name.clone(), config);
    }

    let mut breaker_map = BREAKER_MAP.write().unwrap();
    let mut new_breaker_map = HashMap::with_capacity(valid_configs.len());
    for (name, config) in valid_configs {
        let reusable = breaker_map
            .get(&name)
            .filter(|old| same_settings(old.settings(), &config));
        let breaker = match reusable {
            Some(old) => Arc::clone(old),
            None => Arc::new(CircuitBreaker::new(config.to_settings())),
        };
        new_breaker_map.insert(name, breaker);
    }

    if new_breaker_map.is_empty() {
        logging::info!("[CircuitBreaker] Breakers were cleared")
    } else {
        logging::info!(
            "[CircuitBreaker] Breakers were loaded: {:?}",
            new_breaker_map.keys()
        )
    }
    let loaded = new_breaker_map.len();
    *breaker_map = new_breaker_map;
    Ok(loaded)
}

fn same_settings(settings: &Settings, config: &BreakerConfig) -> bool {
    let other = config.to_settings();
    settings.max_requests() == other.max_requests()
        && settings.interval() == other.interval()
        && settings.timeout() == other.timeout()
        && settings.trip_strategy() == other.trip_strategy()
        && settings.listeners().len() == other.listeners().len()
}
