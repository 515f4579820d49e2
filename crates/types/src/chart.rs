use serde::{Deserialize, Serialize};

/// One display row of the liquidity chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub tick: i32,
    pub liquidity: f64,
    pub price0: f64,
    pub price1: f64,
    pub amount0_locked: f64,
    pub amount1_locked: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub entries: Vec<ChartEntry>,
    pub active_range: Option<ChartEntry>,
    /// Position of the current tick inside the active interval, in `[0, 1)`.
    pub active_range_percentage: Option<f64>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// USD value of the locked amounts, parallel to [`ChartData::entries`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UsdSeries {
    pub token0: Vec<f64>,
    pub token1: Vec<f64>,
}

/// Pool balances in whole tokens, with their USD value when a price is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceValues {
    pub token0: Option<f64>,
    pub token1: Option<f64>,
    pub token0_usd: Option<f64>,
    pub token1_usd: Option<f64>,
}
