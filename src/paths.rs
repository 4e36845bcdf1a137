//! Common paths for MyCircle data storage
//!
//! All MyCircle data is stored under ~/.config/mycircle/ on all
//! platforms:
//! - config.toml - User configuration

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the MyCircle data directory (~/.config/mycircle/)
///
/// This is consistent across all platforms for simplicity.
pub fn mycircle_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("mycircle");
    fs::create_dir_all(&dir).context("Failed to create mycircle directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/mycircle/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(mycircle_dir()?.join("config.toml"))
}
