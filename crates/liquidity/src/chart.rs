use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;
use v3charts_types::{BalanceValues, ChartData, ChartEntry, CoreError, PoolBalances, PoolSnapshot, Token, UsdSeries};

use crate::active_liquidity::ActiveLiquidity;
use crate::locked::{active_range_tokens_locked, to_token_amount, tokens_locked};
use crate::price::Price;

pub const PRICE_SIGNIFICANT_DIGITS: u32 = 6;

/// Which token's side of the price is drawn on the left. Only the entry order changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartOrientation {
    /// Descending ticks.
    #[default]
    Token0Left,
    /// Ascending ticks.
    Token1Left,
}

impl ChartOrientation {
    pub fn from_token1_left(token1_left: bool) -> Self {
        if token1_left {
            ChartOrientation::Token1Left
        } else {
            ChartOrientation::Token0Left
        }
    }
}

fn display_price(price: &Price) -> Result<f64, CoreError> {
    price.to_significant(PRICE_SIGNIFICANT_DIGITS)?.parse::<f64>().map_err(|_| CoreError::PriceOverflow)
}

pub fn project(snapshot: &PoolSnapshot, active: &ActiveLiquidity, orientation: ChartOrientation) -> Result<ChartData, CoreError> {
    let (token0, token1) = (&snapshot.token0, &snapshot.token1);

    let mut entries = active
        .ticks
        .iter()
        .map(|tick| -> Result<ChartEntry, CoreError> {
            let locked = tokens_locked(token0, token1, snapshot.tick_spacing, tick);
            Ok(ChartEntry {
                tick: tick.tick,
                liquidity: tick.liquidity_active as f64,
                price0: display_price(&tick.price)?,
                price1: display_price(&tick.price.invert())?,
                amount0_locked: locked.amount0_locked,
                amount1_locked: locked.amount1_locked,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // the uniform formula assumes a full interval, the active one is only partly swapped through
    let mut active_range = None;
    let mut active_range_percentage = None;
    if let (Some(tick), Some(entry)) = (active.active(), entries.get_mut(active.active_index)) {
        let locked = active_range_tokens_locked(token0, token1, snapshot.tick_spacing, tick, active.sqrt_price_x96);
        entry.amount0_locked = locked.amount0_locked;
        entry.amount1_locked = locked.amount1_locked;

        active_range = Some(*entry);
        active_range_percentage = Some((active.current_tick - tick.tick) as f64 / snapshot.tick_spacing as f64);
    }

    if orientation == ChartOrientation::Token0Left {
        entries.reverse();
    }
    entries.retain(|entry| entry.liquidity > 0.0);

    Ok(ChartData { entries, active_range, active_range_percentage })
}

/// USD value of every entry. token0 is valued at and below the active tick, token1 at and above it.
pub fn usd_series(data: &ChartData, token0_usd: Option<f64>, token1_usd: Option<f64>) -> UsdSeries {
    let active_tick = data.active_range.map(|entry| entry.tick);

    let token0: Vec<f64> = token0_usd
        .map(|usd| {
            data.entries
                .iter()
                .map(|entry| match active_tick {
                    Some(active_tick) if entry.tick > active_tick => 0.0,
                    _ => entry.amount0_locked * usd,
                })
                .collect()
        })
        .unwrap_or_default();

    let token1: Vec<f64> = token1_usd
        .map(|usd| {
            data.entries
                .iter()
                .map(|entry| match active_tick {
                    Some(active_tick) if entry.tick < active_tick => 0.0,
                    _ => entry.amount1_locked * usd,
                })
                .collect()
        })
        .unwrap_or_default();

    UsdSeries { token0, token1 }
}

/// Whole-token pool balances valued at the given USD prices. A balance that cannot be scaled is left out.
pub fn balance_values(snapshot: &PoolSnapshot, balances: &PoolBalances, token0_usd: Option<f64>, token1_usd: Option<f64>) -> BalanceValues {
    let scale = |raw: Option<U256>, token: &Token| {
        raw.and_then(|raw| {
            to_token_amount(raw, token)
                .map_err(|err| debug!("Balance {} of {} not scaled : {}", raw, token.get_symbol(), err))
                .ok()
        })
    };

    let token0 = scale(balances.token0, &snapshot.token0);
    let token1 = scale(balances.token1, &snapshot.token1);

    BalanceValues {
        token0,
        token1,
        token0_usd: token0.zip(token0_usd).map(|(amount, usd)| amount * usd),
        token1_usd: token1.zip(token1_usd).map(|(amount, usd)| amount * usd),
    }
}
