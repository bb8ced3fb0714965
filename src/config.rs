//! Settings file support
//!
//! Settings come from an optional TOML file, `~/.lessmay.toml` by default.
//! Command-line flags take precedence over anything read here.

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file looked up in the home directory
pub const CONFIG_FILE_NAME: &str = ".lessmay.toml";

/// Skip substring used when none is configured
pub const DEFAULT_SKIP_PATH: &str = ".trash";

/// Vault location, relative to the home directory, scanned when no
/// directories are given
pub const DEFAULT_VAULT_DIR: &str = "Documents/Obsidian Vault";

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Could not determine the home directory")]
    NoHomeDir,
}

/// Result type alias using ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Contents of the settings file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Show debug-level log events
    pub verbose: bool,

    pub log_format: LogFormat,

    /// Paths containing any of these substrings are never processed
    pub skip_paths: Vec<String>,

    /// Directory scanned when none are given; `~` is expanded
    pub default_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: LogFormat::default(),
            skip_paths: vec![DEFAULT_SKIP_PATH.to_string()],
            default_path: None,
        }
    }
}

impl Settings {
    /// Load settings from an explicitly named file; the file must exist
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Load settings from `path` if it exists
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        match Self::load(path) {
            Ok(settings) => Ok(Some(settings)),
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Load `~/.lessmay.toml` if present, along with the path it was read from
    pub fn load_default() -> Result<Option<(Self, PathBuf)>> {
        let Some(home) = dirs::home_dir() else {
            return Ok(None);
        };
        let path = home.join(CONFIG_FILE_NAME);
        Ok(Self::load_optional(&path)?.map(|settings| (settings, path)))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Skip substrings to apply, without empty entries.
    ///
    /// An empty entry would exclude every path, so `--skip-path ''` turns
    /// skipping off instead.
    pub fn skip_substrings(&self) -> Vec<String> {
        self.skip_paths
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect()
    }

    /// Directory to scan when no directories are given on the command line
    pub fn resolved_default_path(&self) -> Result<PathBuf> {
        match &self.default_path {
            Some(path) => expand_tilde(path),
            None => Ok(home_dir()?.join(DEFAULT_VAULT_DIR)),
        }
    }
}

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Other paths, including `~user` forms, are returned unchanged.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(ConfigError::NoHomeDir)
}
