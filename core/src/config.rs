//! Optional defaults loaded from `~/.config/weblate/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot resolve config directory: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Connection defaults. Command-line flags and environment variables take
/// precedence over every field here.
#[derive(Debug, Default, Deserialize)]
pub struct WeblateConfig {
    /// Server URL, e.g. `https://hosted.weblate.org`.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub api_token: Option<SecretString>,
    /// Global request timeout; no timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl WeblateConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Default config location, if a file exists there.
pub fn default_config_path() -> Result<Option<PathBuf>, ConfigError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("weblate")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load `path`, or the default location when `path` is `None`.
/// A missing default file yields an empty config.
pub fn load(path: Option<&Path>) -> Result<WeblateConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path()? {
            Some(path) => path,
            None => return Ok(WeblateConfig::default()),
        },
    };

    let data = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let cfg = parse(&data).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

pub fn parse(data: &str) -> Result<WeblateConfig, toml::de::Error> {
    toml::from_str(data)
}
