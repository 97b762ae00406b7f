//! Cross-Platform Path Utilities
//!
//! Resolves the client's configuration directory (`~/.casefile/`) and the
//! default download location for exported reports.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Casefile directory (~/.casefile/)
pub fn casefile_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".casefile"))
}

/// Get the config file path (~/.casefile/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(casefile_dir()?.join("config.json"))
}

/// Directory exported reports land in when none is configured: the
/// platform download directory, else `~/Downloads`.
pub fn default_download_dir() -> AppResult<PathBuf> {
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => Ok(home_dir()?.join("Downloads")),
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Casefile directory, creating it if it doesn't exist
pub fn ensure_casefile_dir() -> AppResult<PathBuf> {
    let path = casefile_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
