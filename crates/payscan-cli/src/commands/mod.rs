//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod inspect;
pub mod rates;

use std::path::Path;

use payscan_core::PayscanConfig;

/// Load the config given with `--config`, or the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PayscanConfig> {
    let config = if let Some(path) = config_path {
        PayscanConfig::from_file(Path::new(path))?
    } else {
        PayscanConfig::default()
    };
    Ok(config)
}
