//! Initialization func initialize the breaker runtime environment, including:
//! 1. override global config, from manually config or yaml file or env variable
//! 2. initialize global logger
//! 3. register the configured breakers and start the exporter

use crate::{circuitbreaker, config, config::ConfigEntity, logging, Result};

/// `init_default` initializes the breakers using the configuration from system
/// environment and the default value.
#[inline]
pub fn init_default() -> Result<()> {
    init_breakers(&mut String::new())
}

/// `init_with_config` initializes the breakers using given config.
#[inline]
pub fn init_with_config(config_entity: ConfigEntity) -> Result<()> {
    config_entity.check()?;
    config::reset_global_config(config_entity);
    config::override_items_from_system_env()?;
    init_core_components()
}

/// `init_with_config_file` loads the configuration from the given YAML file
/// and initializes the breakers.
#[inline]
pub fn init_with_config_file(config_path: &mut String) -> Result<()> {
    init_breakers(config_path)
}

#[inline]
fn init_breakers(config_path: &mut String) -> Result<()> {
    config::init_config_with_yaml(config_path)?;
    init_core_components()
}

// `init_core_components` init core components with global config
fn init_core_components() -> Result<()> {
    config::init_log()?;
    let loaded = circuitbreaker::load_breakers(config::breakers())?;
    logging::info!(
        "[Init] {} breaker(s) registered for app {}",
        loaded,
        config::app_name()
    );
    #[cfg(feature = "exporter")]
    crate::exporter::init()?;
    Ok(())
}
