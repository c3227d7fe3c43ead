use super::{constant::*, BreakerConfig, ConfigEntity};
use crate::{logging, utils, Error, Result};
use lazy_static::lazy_static;
use std::env;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::sync::RwLock;

lazy_static! {
    static ref GLOBAL_CONFIG: RwLock<ConfigEntity> = RwLock::new(ConfigEntity::new());
}

pub fn reset_global_config(entity: ConfigEntity) {
    *GLOBAL_CONFIG.write().unwrap() = entity;
}

// init_config_with_yaml loads general configuration from the YAML file under provided path.
// Files with a `.json` extension are read as JSON.
pub fn init_config_with_yaml(config_path: &mut String) -> Result<()> {
    apply_yaml_config_file(config_path)?;
    override_items_from_system_env()?;
    Ok(())
}

// apply_yaml_config_file loads general configuration from the given YAML file.
fn apply_yaml_config_file(config_path: &mut String) -> Result<()> {
    // Priority: system environment > YAML file > default config
    if utils::is_blank(config_path) {
        *config_path = env::var(CONF_FILE_PATH_ENV_KEY).unwrap_or_else(|_| CONFIG_FILENAME.into());
    }
    load_global_config_from_yaml_file(config_path)
}

fn load_global_config_from_yaml_file(path_str: &str) -> Result<()> {
    if path_str == CONFIG_FILENAME {
        return Ok(());
    }
    let path = Path::new(path_str);
    if !path.exists() {
        return Err(Error::msg(format!(
            "breaker configuration file {} does not exist",
            path_str
        )));
    }
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    let entity: ConfigEntity = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };
    entity.check()?;
    logging::info!("[Config] Resolving breaker config from file, file {}", path_str);
    reset_global_config(entity);
    Ok(())
}

pub(crate) fn override_items_from_system_env() -> Result<()> {
    if let Ok(app_name) = env::var(APP_NAME_ENV_KEY) {
        if !utils::is_blank(&app_name) {
            let mut cfg = GLOBAL_CONFIG.write().unwrap();
            cfg.config.app.app_name = app_name;
            cfg.check()?;
        }
    }
    Ok(())
}

pub fn init_log() -> Result<()> {
    logging::logger_init(log_config_file());
    logging::info!("[Config] App name resolved, appName {}", app_name());
    logging::info!(
        "[Config] Print effective global config, globalConfig {:?}",
        GLOBAL_CONFIG.read().unwrap()
    );
    Ok(())
}

#[inline]
pub fn log_config_file() -> Option<String> {
    let file = GLOBAL_CONFIG.read().unwrap().config.log.config_file.clone();
    if utils::is_blank(&file) {
        None
    } else {
        Some(file)
    }
}

#[inline]
pub fn app_name() -> String {
    GLOBAL_CONFIG.read().unwrap().config.app.app_name.clone()
}

#[inline]
pub fn exporter_addr() -> String {
    GLOBAL_CONFIG.read().unwrap().config.log.exporter.addr.clone()
}

#[inline]
pub fn exporter_metrics_path() -> String {
    GLOBAL_CONFIG
        .read()
        .unwrap()
        .config
        .log
        .exporter
        .metrics_path
        .clone()
}

#[inline]
pub fn breakers() -> Vec<BreakerConfig> {
    GLOBAL_CONFIG.read().unwrap().config.breakers.clone()
}
