use std::sync::Arc;

use eyre::Result;
use serde::Serialize;
use tracing::{debug, info, warn};
use v3charts_liquidity::{balance_values, project, reconstruct, usd_series, ChartOrientation, TickLedger};
use v3charts_types::{BalanceValues, ChartData, CoreError, PoolIdentity, PoolSnapshot, UsdSeries};

use crate::pool_state::PoolStateProvider;
use crate::prices::{PriceMap, PriceOracle};
use crate::ticks::TickLedgerProvider;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickChart {
    pub pool: PoolIdentity,
    pub snapshot: PoolSnapshot,
    pub data: ChartData,
    pub usd: Option<UsdSeries>,
    pub balances: BalanceValues,
}

/// Fetches a pool and its ticks and turns them into chart data.
pub struct TickChartService {
    pool_state: Arc<dyn PoolStateProvider>,
    ticks: Arc<dyn TickLedgerProvider>,
    prices: Option<Arc<dyn PriceOracle>>,
    orientation: ChartOrientation,
}

impl TickChartService {
    pub fn new(pool_state: Arc<dyn PoolStateProvider>, ticks: Arc<dyn TickLedgerProvider>) -> Self {
        Self { pool_state, ticks, prices: None, orientation: ChartOrientation::default() }
    }

    pub fn with_prices(self, prices: Arc<dyn PriceOracle>) -> Self {
        Self { prices: Some(prices), ..self }
    }

    pub fn with_orientation(self, orientation: ChartOrientation) -> Self {
        Self { orientation, ..self }
    }

    /// `Ok(None)` while the pool state or ticks are not available.
    pub async fn chart(&self, pool: &PoolIdentity) -> Result<Option<ChartData>> {
        Ok(self.tick_chart(pool).await?.map(|chart| chart.data))
    }

    pub async fn tick_chart(&self, pool: &PoolIdentity) -> Result<Option<TickChart>> {
        let partial = self.pool_state.pool_snapshot(pool).await?;
        let raw_balances = partial.balances;
        let snapshot = match partial.complete() {
            Ok(snapshot) => snapshot,
            Err(CoreError::InsufficientData(field)) => {
                debug!("Pool {} is missing {}", pool, field);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let ledger = TickLedger::new(self.ticks.ticks(pool, &snapshot).await?);
        if ledger.net_sum() != 0 {
            warn!("Net liquidity of {} sums to {} over the scanned ticks", pool, ledger.net_sum());
        }

        let Some(active) = reconstruct(&snapshot, &ledger)? else {
            debug!("No liquidity data for {}", pool);
            return Ok(None);
        };

        let data = project(&snapshot, &active, self.orientation)?;
        info!("Pool {} {}/{} : {} chart entries around tick {}", pool, snapshot.token0.get_symbol(), snapshot.token1.get_symbol(), data.entries.len(), active.active_tick);

        let prices = self.prices(pool).await;
        let token0_usd = prices.as_ref().and_then(|prices| prices.get(&snapshot.token0.get_address()));
        let token1_usd = prices.as_ref().and_then(|prices| prices.get(&snapshot.token1.get_address()));

        let usd = prices.as_ref().map(|_| usd_series(&data, token0_usd, token1_usd));
        let balances = balance_values(&snapshot, &raw_balances, token0_usd, token1_usd);

        Ok(Some(TickChart { pool: *pool, snapshot, data, usd, balances }))
    }

    async fn prices(&self, pool: &PoolIdentity) -> Option<PriceMap> {
        let oracle = self.prices.as_ref()?;
        match oracle.prices(pool.chain_id).await {
            Ok(prices) => Some(prices),
            Err(e) => {
                warn!("Failed to fetch prices for chain {} : {}", pool.chain_id, e);
                None
            }
        }
    }
}
