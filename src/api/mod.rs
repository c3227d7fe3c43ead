//! mod `api` provides the topmost fundamental APIs for users of the breakers.
//! The breakers can be used without initialization, it is only needed to load
//! configured breakers into the registry. There are three ways to perform initialization:
//!
//!  1. `init_default()`, using default config and the environment variables.
//!  2. `init_with_config(config_entity: ConfigEntity)`, using customized config entity to initialize.
//!  3. `init_with_config_file(config_path: &mut String)`, using yaml file to initialize.

pub mod init;

pub use init::*;

pub use crate::core::config;
