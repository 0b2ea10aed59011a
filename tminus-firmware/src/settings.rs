//! Embedded settings
//!
//! `settings.toml` is compiled into the image. The build script has
//! already checked it, but the device parses and validates it again at
//! start-up so the core parser stays the single source of truth.

use defmt::*;

use tminus_core::config::{parse_settings, ConfigError, CountdownConfig};

/// Edit settings.toml and rebuild to customize
const EMBEDDED_SETTINGS: &str = include_str!("../settings.toml");

/// Parse the embedded settings
pub fn load() -> Result<CountdownConfig<'static>, ConfigError> {
    info!("Loading settings ({} bytes)...", EMBEDDED_SETTINGS.len());
    let config = parse_settings(EMBEDDED_SETTINGS)?;
    log_settings_summary(&config);
    Ok(config)
}

/// Log a summary of the loaded settings
fn log_settings_summary(config: &CountdownConfig<'_>) {
    let at = config.target.at();
    info!("Settings loaded successfully");
    info!(
        "  event {} at {}-{}-{} {}:{}",
        config.target.name(),
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute()
    );
    debug!("  message: {} chars", config.target.message().chars().count());
    debug!(
        "  swap delay {}s, scroll step {}ms, brightness {}%",
        config.swap_delay_s,
        config.scroll_step_ms(),
        config.brightness.get()
    );
    debug!("  {}", config.credentials);
}
