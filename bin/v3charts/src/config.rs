use std::collections::HashMap;
use std::path::PathBuf;

use alloy_primitives::Address;
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use v3charts_fetch::{DEFAULT_PRICE_API, DEFAULT_SURROUNDING_TICKS};

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChainConfig {
    pub rpc: String,
    /// Required for factories missing from the address book.
    pub tick_lens: Option<Address>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PricesConfig {
    #[serde(default = "default_price_url")]
    pub url: String,
    #[serde(default)]
    pub disabled: bool,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self { url: default_price_url(), disabled: false }
    }
}

fn default_price_url() -> String {
    DEFAULT_PRICE_API.to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct TicksConfig {
    #[serde(default = "default_surrounding")]
    pub surrounding: u32,
}

impl Default for TicksConfig {
    fn default() -> Self {
        Self { surrounding: DEFAULT_SURROUNDING_TICKS }
    }
}

fn default_surrounding() -> u32 {
    DEFAULT_SURROUNDING_TICKS
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub token1_left: bool,
    pub chain: Option<u64>,
    pub pool: Option<Address>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Keyed by chain id.
    #[serde(default)]
    pub chains: HashMap<String, ChainConfig>,
    #[serde(default)]
    pub prices: PricesConfig,
    #[serde(default)]
    pub ticks: TicksConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl AppConfig {
    pub async fn from_file(file_path: PathBuf) -> Result<Self, LoadConfigError> {
        let contents = fs::read_to_string(file_path).await?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, LoadConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn chain(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.get(&chain_id.to_string())
    }
}
