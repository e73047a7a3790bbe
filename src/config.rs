use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `server.port`.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// `csv`, `json` or `jsonl`. Inferred from the file extension when unset.
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SentimentConfig {
    /// Optional tab-separated lexicon merged over the built-in one.
    #[serde(default)]
    pub lexicon: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Defaults used when no config file exists.
    pub fn minimal() -> Self {
        Self {
            dataset: DatasetConfig {
                path: PathBuf::from("data/reviews.csv"),
                format: None,
            },
            server: ServerConfig::default(),
            sentiment: SentimentConfig::default(),
        }
    }

    /// Applies a `PORT` value from the environment, if one was given.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<()> {
        if let Some(raw) = port {
            self.server.port = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a port number, got '{}'", PORT_ENV, raw))?;
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Loads `path` if it exists, otherwise falls back to [`Config::minimal`],
/// then applies the `PORT` environment override.
pub fn load_or_default(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        load_config(path)?
    } else {
        Config::minimal()
    };
    let port = std::env::var(PORT_ENV).ok();
    config.apply_port_override(port.as_deref())?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.dataset.path.as_os_str().is_empty() {
        anyhow::bail!("dataset.path must not be empty");
    }

    match config.dataset.format.as_deref() {
        None | Some("csv") | Some("json") | Some("jsonl") => {}
        Some(other) => anyhow::bail!(
            "Unknown dataset format: '{}'. Must be csv, json, or jsonl.",
            other
        ),
    }

    if config.server.host.trim().is_empty() {
        anyhow::bail!("server.host must not be empty");
    }

    Ok(())
}
