use std::{
    fs,
    path::{Path, PathBuf},
};

use beginner_solver::SolverConfig;
use color_eyre::eyre::WrapErr;
use cube_core::DEFAULT_SCRAMBLE_LENGTH;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Settings read from `config.toml`. Every field may be left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub solver: SolverConfig,
    pub scramble_length: usize,
    /// Where solve statistics are appended as JSON lines. Nothing is logged
    /// when unset.
    pub stats_log: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            solver: SolverConfig::default(),
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            stats_log: None,
        }
    }
}

impl CliConfig {
    /// `cubesolve/config.toml` in the platform's configuration directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cubesolve").join("config.toml"))
    }

    /// Load `path`, or the default location if it exists, or fall back to
    /// the defaults.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<CliConfig> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match CliConfig::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No configuration file, using defaults");
                    return Ok(CliConfig::default());
                }
            },
        };
        info!("Reading configuration from {}", path.display());
        let text = fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        CliConfig::parse(&text).wrap_err_with(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<CliConfig, toml::de::Error> {
        toml::from_str(text)
    }
}
