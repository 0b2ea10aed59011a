//! Configuration
//!
//! Typed, validated device configuration and the `settings.toml` reader
//! that produces it.

pub mod settings;
pub mod types;

pub use settings::{parse_settings, ConfigError, SettingKey, Settings};
pub use types::*;
