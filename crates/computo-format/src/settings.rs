//! `computo.toml`: default policy for every computation.
//!
//! Every key is optional; missing keys take the [`ChainConfig`] defaults.
//!
//! ```toml
//! chain_mode = "next-day"
//! regime = "2/3"
//! view = "official"
//! rounding = "ceil"
//! global_credit_days = 0
//! apply_global_credit_to_minimums = false
//!
//! [adjustments]
//! tm_days = 0
//! cet_days = 0
//! ```

use std::path::Path;

use computo_core::{ChainConfig, ComputoError, Result};
use tracing::debug;

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "computo.toml";

/// Parses settings text.
///
/// # Errors
///
/// Returns [`ComputoError::Config`] on invalid TOML, unknown enum values,
/// or adjustments outside `-1..=1`.
pub fn parse_settings(text: &str) -> Result<ChainConfig> {
    let config: ChainConfig =
        toml::from_str(text).map_err(|e| ComputoError::Config(e.to_string()))?;
    config
        .adjustments
        .validate()
        .map_err(|e| ComputoError::Config(e.to_string()))?;
    Ok(config)
}

/// Loads settings from `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse.
pub fn load_settings(path: &Path) -> Result<ChainConfig> {
    let text = std::fs::read_to_string(path)?;
    let config = parse_settings(&text)?;
    debug!(path = %path.display(), "loaded settings");
    Ok(config)
}

/// Loads settings from `path` if it exists, otherwise returns the defaults.
///
/// # Errors
///
/// Fails only if the file exists and cannot be read or parsed.
pub fn load_settings_or_default(path: &Path) -> Result<ChainConfig> {
    if path.exists() {
        load_settings(path)
    } else {
        Ok(ChainConfig::default())
    }
}
