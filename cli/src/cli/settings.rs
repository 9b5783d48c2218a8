//! Connection settings: flags and environment first, then the config file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use weblate_core::config::{self, WeblateConfig};
use weblate_core::params::Connection;
use weblate_core::UreqTransport;

pub struct Settings {
    pub host: String,
    pub api_token: SecretString,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn resolve(
        host: Option<String>,
        api_token: Option<String>,
        timeout_secs: Option<u64>,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let cfg = config::load(config_path).context("loading config")?;
        Ok(Self::merge(host, api_token, timeout_secs, cfg))
    }

    // Missing host or token is left empty; action validation reports it.
    fn merge(
        host: Option<String>,
        api_token: Option<String>,
        timeout_secs: Option<u64>,
        cfg: WeblateConfig,
    ) -> Self {
        let timeout = timeout_secs.map(Duration::from_secs).or_else(|| cfg.timeout());
        let api_token = match (api_token, cfg.api_token) {
            (Some(token), _) => SecretString::new(token),
            (None, Some(token)) => token,
            (None, None) => SecretString::new(String::new()),
        };
        Self {
            host: host.or(cfg.host).unwrap_or_default(),
            api_token,
            timeout,
        }
    }

    pub fn connection(&self) -> Connection {
        Connection {
            host: self.host.clone(),
            api_token: SecretString::new(self.api_token.expose_secret().clone()),
        }
    }

    pub fn transport(&self) -> UreqTransport {
        UreqTransport::new().with_timeout(self.timeout)
    }
}
