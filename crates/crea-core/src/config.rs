//! Settings loaded from `crea.toml`.

use crate::cep::VIACEP_BASE_URL;
use crate::error::CreaError;
use crate::extraction::Backend;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "crea.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Image drawn at the top of every inspection report page.
    pub logo_path: PathBuf,
    pub extractor: Backend,
    /// Ruleset JSON replacing the built-in one.
    pub rules_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub cep: CepConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CepConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            logo_path: PathBuf::from("10.png"),
            extractor: Backend::Auto,
            rules_path: None,
            output_dir: PathBuf::from("."),
            cep: CepConfig::default(),
        }
    }
}

impl Default for CepConfig {
    fn default() -> Self {
        CepConfig {
            base_url: VIACEP_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl CepConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load settings from `path`, else from `crea.toml` in the working
    /// directory, else fall back to defaults.
    ///
    /// An explicit path that does not exist is an error; a missing
    /// `crea.toml` is not.
    pub fn load(path: Option<&Path>) -> Result<Config, CreaError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    log::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, CreaError> {
        let content = std::fs::read_to_string(path).map_err(|e| CreaError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            CreaError::Config { reason, .. } => CreaError::Config {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Config, CreaError> {
        toml::from_str(content).map_err(|e| CreaError::Config {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })
    }
}
