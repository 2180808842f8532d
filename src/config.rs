//! User configuration (`config.toml`).
//!
//! ```toml
//! [sheet]
//! cols = 26
//! rows = 100
//!
//! [log]
//! filter = "elow=debug"
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use elow_core::document::{DEFAULT_COLS, DEFAULT_ROWS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sheet: SheetConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub cols: usize,
    pub rows: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `warn` or `elow_core=debug`.
    pub filter: Option<String>,
}

/// `<config dir>/elow/config.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "elow", "elow")?;
    Some(proj.config_dir().join("config.toml"))
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the user's config if there is one.
/// A broken default config falls back to defaults and is reported as a warning.
pub fn load_default_config() -> (Config, Vec<String>) {
    let Some(path) = user_config_path() else {
        return (Config::default(), Vec::new());
    };
    if !path.exists() {
        return (Config::default(), Vec::new());
    }
    match load_config_file(&path) {
        Ok(config) => (config, Vec::new()),
        Err(err) => (Config::default(), vec![format!("{:#}", err)]),
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str::<Config>(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sheet.cols, DEFAULT_COLS);
        assert_eq!(config.sheet.rows, DEFAULT_ROWS);
        assert_eq!(config.log.filter, None);
    }

    #[test]
    fn test_partial_config() {
        let config = parse_config("[sheet]\nrows = 10\n\n[log]\nfilter = \"debug\"\n").unwrap();
        assert_eq!(config.sheet.cols, DEFAULT_COLS);
        assert_eq!(config.sheet.rows, 10);
        assert_eq!(config.log.filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(parse_config("[sheet]\ncolumns = 3\n").is_err());
        assert!(parse_config("[sheet]\ncols = \"three\"\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = load_config_file(Path::new("/definitely/not/here/config.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read"));
    }
}
