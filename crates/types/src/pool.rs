use std::fmt::{Display, Formatter};

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{CoreError, Token};

/// A pool on a given chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolIdentity {
    pub chain_id: u64,
    pub address: Address,
}

impl PoolIdentity {
    pub fn new(chain_id: u64, address: Address) -> Self {
        Self { chain_id, address }
    }
}

impl Display for PoolIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.address, self.chain_id)
    }
}

/// Default tick spacing of the standard fee tiers, fee in hundredths of a bip.
pub fn fee_to_tick_spacing(fee: u32) -> Option<i32> {
    match fee {
        100 => Some(1),
        500 => Some(10),
        3000 => Some(60),
        10000 => Some(200),
        _ => None,
    }
}

/// Pool state borrowed by the liquidity engine for one computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub token0: Token,
    pub token1: Token,
    pub fee: u32,
    pub tick_spacing: i32,
    pub current_tick: i32,
    pub sqrt_price_x96: U256,
    pub liquidity: u128,
}

/// Raw token balances held by the pool contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolBalances {
    pub token0: Option<U256>,
    pub token1: Option<U256>,
}

/// Pool state as assembled by a provider, any read may have failed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialPoolSnapshot {
    pub token0: Option<Token>,
    pub token1: Option<Token>,
    pub fee: Option<u32>,
    pub tick_spacing: Option<i32>,
    pub current_tick: Option<i32>,
    pub sqrt_price_x96: Option<U256>,
    pub liquidity: Option<u128>,
    /// Not needed to chart the pool.
    #[serde(default)]
    pub balances: PoolBalances,
}

impl PartialPoolSnapshot {
    /// Tick spacing read from the pool, or the fee tier default.
    pub fn resolved_tick_spacing(&self) -> Option<i32> {
        self.tick_spacing.filter(|spacing| *spacing > 0).or_else(|| self.fee.and_then(fee_to_tick_spacing))
    }

    pub fn complete(self) -> Result<PoolSnapshot, CoreError> {
        let tick_spacing = self.resolved_tick_spacing().ok_or(CoreError::InsufficientData("tick_spacing"))?;

        Ok(PoolSnapshot {
            token0: self.token0.ok_or(CoreError::InsufficientData("token0"))?,
            token1: self.token1.ok_or(CoreError::InsufficientData("token1"))?,
            fee: self.fee.ok_or(CoreError::InsufficientData("fee"))?,
            tick_spacing,
            current_tick: self.current_tick.ok_or(CoreError::InsufficientData("current_tick"))?,
            sqrt_price_x96: self.sqrt_price_x96.ok_or(CoreError::InsufficientData("sqrt_price_x96"))?,
            liquidity: self.liquidity.ok_or(CoreError::InsufficientData("liquidity"))?,
        })
    }
}

impl From<PoolSnapshot> for PartialPoolSnapshot {
    fn from(value: PoolSnapshot) -> Self {
        Self {
            token0: Some(value.token0),
            token1: Some(value.token1),
            fee: Some(value.fee),
            tick_spacing: Some(value.tick_spacing),
            current_tick: Some(value.current_tick),
            sqrt_price_x96: Some(value.sqrt_price_x96),
            liquidity: Some(value.liquidity),
            balances: PoolBalances::default(),
        }
    }
}
