//! Server startup concerns.

pub mod config;

pub use config::{BuildMode, Config, ConfigError};
