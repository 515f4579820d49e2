use alloy_primitives::U256;
use tracing::{debug, warn};
use uniswap_v3_math::liquidity_math::{add_delta, sub_delta};
use uniswap_v3_math::tick_math::active_tick;
use v3charts_types::{CoreError, PoolSnapshot, RawTick, Token};

use crate::ledger::TickLedger;
use crate::price::Price;

pub const PRICE_FIXED_DIGITS: u32 = 8;

/// Liquidity in range over `[tick, tick + spacing)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedTick {
    pub tick: i32,
    pub liquidity_active: u128,
    pub liquidity_net: i128,
    pub price0: String,
    pub price: Price,
}

impl ProcessedTick {
    pub fn new(token0: &Token, token1: &Token, tick: i32, liquidity_active: u128, liquidity_net: i128) -> Result<Self, CoreError> {
        let price = Price::from_tick(token0, token1, tick)?;
        let price0 = price.to_fixed(PRICE_FIXED_DIGITS)?;
        Ok(Self { tick, liquidity_active, liquidity_net, price0, price })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveLiquidity {
    pub active_tick: i32,
    pub current_tick: i32,
    pub liquidity: u128,
    pub sqrt_price_x96: U256,
    /// Ascending by tick.
    pub ticks: Vec<ProcessedTick>,
    /// Position of the active tick in `ticks`.
    pub active_index: usize,
}

impl ActiveLiquidity {
    pub fn active(&self) -> Option<&ProcessedTick> {
        self.ticks.get(self.active_index)
    }
}

/// Crossing `entry` upwards applies its own net liquidity.
pub fn step_up(previous: &ProcessedTick, entry: &RawTick) -> u128 {
    add_delta(previous.liquidity_active, entry.liquidity_net).unwrap_or_else(|err| {
        warn!("Liquidity {} at tick {} out of range after applying {} : {}", previous.liquidity_active, entry.index, entry.liquidity_net, err);
        if entry.liquidity_net < 0 {
            0
        } else {
            u128::MAX
        }
    })
}

/// Moving below `previous` un-applies the net liquidity of `previous`, not of `entry`.
pub fn step_down(previous: &ProcessedTick, entry: &RawTick) -> u128 {
    sub_delta(previous.liquidity_active, previous.liquidity_net).unwrap_or_else(|err| {
        warn!("Liquidity {} at tick {} out of range after removing {} : {}", previous.liquidity_active, entry.index, previous.liquidity_net, err);
        if previous.liquidity_net > 0 {
            0
        } else {
            u128::MAX
        }
    })
}

/// Where the descending walk starts when the active tick is not initialized itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DescendingWalk {
    /// Below the pivot entry, which is left out of the profile.
    #[default]
    BelowPivot,
    /// At the pivot entry, so the interval between it and the active tick keeps its own row.
    FromPivot,
}

/// Rebuilds the liquidity profile around the current tick. `Ok(None)` when there is nothing to build from.
pub fn reconstruct(snapshot: &PoolSnapshot, ledger: &TickLedger) -> Result<Option<ActiveLiquidity>, CoreError> {
    reconstruct_with_walk(snapshot, ledger, DescendingWalk::default())
}

pub fn reconstruct_with_walk(snapshot: &PoolSnapshot, ledger: &TickLedger, walk: DescendingWalk) -> Result<Option<ActiveLiquidity>, CoreError> {
    if ledger.is_empty() {
        debug!("Empty tick ledger, no liquidity data");
        return Ok(None);
    }

    let Ok(active_tick) = active_tick(snapshot.current_tick, snapshot.tick_spacing) else {
        debug!("Tick spacing {} is not usable, no liquidity data", snapshot.tick_spacing);
        return Ok(None);
    };

    let pivot = ledger.find_pivot(active_tick)?;
    let pivot_entry = *ledger.get(pivot).ok_or(CoreError::PivotNotFound { active_tick, lowest: ledger.lowest().map(|tick| tick.index) })?;
    let pivot_is_active = pivot_entry.index == active_tick;
    let entries = ledger.as_slice();

    let (token0, token1) = (&snapshot.token0, &snapshot.token1);
    let active_net = if pivot_is_active { pivot_entry.liquidity_net } else { 0 };
    let active = ProcessedTick::new(token0, token1, active_tick, snapshot.liquidity, active_net)?;

    let mut subsequent_ticks: Vec<ProcessedTick> = Vec::with_capacity(entries.len() - pivot - 1);
    for entry in &entries[pivot + 1..] {
        let liquidity_active = step_up(subsequent_ticks.last().unwrap_or(&active), entry);
        subsequent_ticks.push(ProcessedTick::new(token0, token1, entry.index, liquidity_active, entry.liquidity_net)?);
    }

    let below = match walk {
        DescendingWalk::FromPivot if !pivot_is_active => &entries[..=pivot],
        _ => &entries[..pivot],
    };
    let mut previous_ticks: Vec<ProcessedTick> = Vec::with_capacity(below.len());
    for entry in below.iter().rev() {
        let liquidity_active = step_down(previous_ticks.last().unwrap_or(&active), entry);
        previous_ticks.push(ProcessedTick::new(token0, token1, entry.index, liquidity_active, entry.liquidity_net)?);
    }
    previous_ticks.reverse();

    debug!(
        "Reconstructed {} ticks below and {} above active tick {} for {}/{}",
        previous_ticks.len(),
        subsequent_ticks.len(),
        active_tick,
        token0.get_symbol(),
        token1.get_symbol()
    );

    let active_index = previous_ticks.len();
    let mut ticks = previous_ticks;
    ticks.push(active);
    ticks.extend(subsequent_ticks);

    Ok(Some(ActiveLiquidity {
        active_tick,
        current_tick: snapshot.current_tick,
        liquidity: snapshot.liquidity,
        sqrt_price_x96: snapshot.sqrt_price_x96,
        ticks,
        active_index,
    }))
}

/// Same as [`reconstruct`] for inputs that may not have arrived yet.
pub fn reconstruct_partial(snapshot: Option<&PoolSnapshot>, ledger: Option<&TickLedger>) -> Result<Option<ActiveLiquidity>, CoreError> {
    match (snapshot, ledger) {
        (Some(snapshot), Some(ledger)) => reconstruct(snapshot, ledger),
        _ => Ok(None),
    }
}
