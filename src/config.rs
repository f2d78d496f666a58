use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::extractor::monday::DEFAULT_ENDPOINT;

pub const API_KEY_ENV: &str = "MONDAY_API_KEY";

#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ExtractConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub boards: Vec<BoardId>,
    pub endpoint: Option<String>,
}

/// Board ids may be written as numbers or strings in config.toml.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BoardId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardId::Number(n) => write!(f, "{n}"),
            BoardId::Text(s) => f.write_str(s),
        }
    }
}

/// Settings after merging file, environment and command line.
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub board_ids: Vec<String>,
    pub endpoint: String,
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".monday-extract")
        .join("config.toml")
}

pub fn load_config() -> Result<ExtractConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<ExtractConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ExtractConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: ExtractConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

impl ExtractConfig {
    /// Layer overrides on top of the file. Precedence for the API key is
    /// command line, then environment, then file. Boards given on the command
    /// line replace the configured list.
    pub fn resolve(
        self,
        cli_api_key: Option<String>,
        env_api_key: Option<String>,
        cli_boards: Vec<String>,
    ) -> Result<Settings> {
        let api_key = cli_api_key
            .or(env_api_key)
            .or(self.api_key)
            .filter(|k| !k.trim().is_empty());
        let Some(api_key) = api_key else {
            bail!(
                "No API key configured. Set {API_KEY_ENV}, pass --api-key, or add api_key to {}",
                config_path().display()
            );
        };

        let board_ids = if cli_boards.is_empty() {
            self.boards.iter().map(ToString::to_string).collect()
        } else {
            cli_boards
        };
        if board_ids.is_empty() {
            bail!("No boards given. Pass --board <id> or add boards = [...] to config.toml");
        }

        Ok(Settings {
            api_key,
            board_ids,
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }
}
