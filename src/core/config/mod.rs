//! Configuration of the breaker suite: built-in defaults, an optional YAML file
//! and environment overrides, resolved in that order.

pub mod base;
pub mod constant;
pub mod entity;

pub use base::*;
pub use constant::*;
pub use entity::*;
