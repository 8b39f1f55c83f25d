use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Use Nerd Font glyphs instead of ASCII icons.
    pub nerd_font: bool,
    /// Ask before deleting a card.
    pub confirm_delete: bool,
    /// chrono format string for the Added/Updated dates.
    pub date_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            nerd_font: false,
            confirm_delete: true,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path. No file, no logging: the terminal belongs to the TUI.
    pub file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}

/// `<config dir>/jobdeck/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jobdeck").join("config.toml"))
}

/// Parse a config file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the explicitly requested config, or the default one if it exists.
///
/// A missing explicit file is an error; a missing default file is not.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => match default_config_path() {
            Some(path) if path.is_file() => load_config(&path),
            _ => Ok(Config::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.ui.nerd_font);
        assert!(config.ui.confirm_delete);
        assert_eq!(config.ui.date_format, "%Y-%m-%d");
        assert_eq!(config.log.file, None);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\nconfirm_delete = false\n").unwrap();

        let config = load_config(&path).unwrap();

        assert!(!config.ui.confirm_delete);
        assert_eq!(config.ui.date_format, "%Y-%m-%d");
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[ui]\nnerd_font = true\ndate_format = \"%d.%m.%Y\"\n\n[log]\nfile = \"/tmp/jobdeck.log\"\nfilter = \"debug\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert!(config.ui.nerd_font);
        assert_eq!(config.ui.date_format, "%d.%m.%Y");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/jobdeck.log")));
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui\nnerd_font = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui]\nnerd_font = \"yes\"\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(resolve_config(Some(&path)), Err(ConfigError::Io { .. })));
    }
}
