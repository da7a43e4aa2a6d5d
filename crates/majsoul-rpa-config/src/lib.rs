//! # majsoul-rpa config
//!
//! TOML configuration for the browser, the input humanization, the event
//! feed and the per-action timeouts.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
