//! Configuration loading and management.
//!
//! - [`types`]: Core config struct definitions (Config, ServiceConfig, LoggingConfig, BindingSeed)
//! - [`validation`]: Startup checks that collect every problem at once
//! - [`defaults`]: Serde default value functions

mod defaults;
mod types;
pub mod validation;

pub use types::{BindingSeed, Config, ConfigError, LogFormat, LoggingConfig, ServiceConfig};
pub use validation::{ValidationError, validate};
