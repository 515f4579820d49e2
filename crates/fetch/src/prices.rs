use std::collections::HashMap;
use std::str::FromStr;

use alloy_primitives::Address;
use async_trait::async_trait;
use eyre::{eyre, Result};
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

pub const DEFAULT_PRICE_API: &str = "https://api.sushi.com/price/v1";

/// USD price per whole token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceMap {
    prices: HashMap<Address, f64>,
}

impl PriceMap {
    pub fn new(prices: HashMap<Address, f64>) -> Self {
        Self { prices }
    }

    /// Keys that are not addresses are skipped.
    pub fn from_response(response: HashMap<String, f64>) -> Self {
        let prices = response
            .into_iter()
            .filter_map(|(key, price)| match Address::from_str(&key) {
                Ok(address) => Some((address, price)),
                Err(e) => {
                    debug!("Skipping price key {} : {}", key, e);
                    None
                }
            })
            .collect();
        Self { prices }
    }

    pub fn get(&self, address: &Address) -> Option<f64> {
        self.prices.get(address).copied()
    }

    pub fn has(&self, address: &Address) -> bool {
        self.prices.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn prices(&self, chain_id: u64) -> Result<PriceMap>;
}

pub struct HttpPriceOracle {
    client: Client,
    base_url: String,
}

impl HttpPriceOracle {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), base_url: base_url.into() }
    }

    pub fn chain_url(&self, chain_id: u64) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{chain_id}"))?)
    }
}

impl Default for HttpPriceOracle {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_API)
    }
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn prices(&self, chain_id: u64) -> Result<PriceMap> {
        let url = self.chain_url(chain_id)?;
        debug!("Fetching prices from {}", url);

        let response = self.client.get(url).header("Accept", "application/json").send().await?;
        if !response.status().is_success() {
            error!("Price request for chain {} failed : {}", chain_id, response.status());
            return Err(eyre!("Error fetching prices: {}", response.status()));
        }

        let body: HashMap<String, f64> = response.json().await?;
        let prices = PriceMap::from_response(body);
        debug!("Fetched {} prices for chain {}", prices.len(), chain_id);

        Ok(prices)
    }
}
