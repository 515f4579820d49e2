use std::marker::PhantomData;

use alloy::network::Network;
use alloy::providers::Provider;
use alloy::transports::Transport;
use alloy_primitives::Address;
use async_trait::async_trait;
use eyre::{eyre, OptionExt, Result};
use futures::future::try_join_all;
use tracing::{debug, error};
use uniswap_v3_math::tick_bitmap::word_range_around;
use uniswap_v3_math::tick_math::nearest_usable_tick;
use v3charts_address_book::{sushiswap_v3_factory, tick_lens_for_factory};
use v3charts_types::{PoolIdentity, PoolSnapshot, RawTick};

use crate::abi::{ITickLens, IUniswapV3Pool};

/// Ticks scanned on each side of the active tick when nothing else is configured.
pub const DEFAULT_SURROUNDING_TICKS: u32 = 1250;

/// Reads the initialized ticks of a pool around its current price.
#[async_trait]
pub trait TickLedgerProvider: Send + Sync {
    async fn ticks(&self, pool: &PoolIdentity, snapshot: &PoolSnapshot) -> Result<Vec<RawTick>>;
}

pub struct TickLensLedgerProvider<P, T, N> {
    client: P,
    tick_lens: Option<Address>,
    surrounding: u32,
    _t: PhantomData<(T, N)>,
}

impl<P, T, N> TickLensLedgerProvider<P, T, N>
where
    N: Network,
    T: Transport + Clone,
    P: Provider<T, N> + Send + Sync + Clone + 'static,
{
    pub fn new(client: P) -> Self {
        Self { client, tick_lens: None, surrounding: DEFAULT_SURROUNDING_TICKS, _t: PhantomData }
    }

    /// Overrides the TickLens otherwise picked from the pool factory.
    pub fn with_tick_lens(self, tick_lens: Option<Address>) -> Self {
        Self { tick_lens, ..self }
    }

    pub fn with_surrounding(self, surrounding: u32) -> Self {
        Self { surrounding, ..self }
    }

    async fn resolve_tick_lens(&self, pool: &PoolIdentity) -> Result<Address> {
        if let Some(tick_lens) = self.tick_lens {
            return Ok(tick_lens);
        }

        let uni3_pool = IUniswapV3Pool::IUniswapV3PoolInstance::new(pool.address, self.client.clone());
        let factory = uni3_pool.factory().call().await?._0;

        if sushiswap_v3_factory(pool.chain_id) == Some(factory) {
            debug!("{} is a SushiSwap V3 pool", pool);
        }

        tick_lens_for_factory(pool.chain_id, &factory).ok_or_eyre(format!("No TickLens known for factory {factory}, configure one for chain {}", pool.chain_id))
    }

    async fn fetch_word(&self, tick_lens: Address, pool: Address, word: i16) -> Result<Vec<RawTick>> {
        let lens = ITickLens::ITickLensInstance::new(tick_lens, self.client.clone());
        let populated = match lens.getPopulatedTicksInWord(pool, word).call().await {
            Ok(result) => result.populatedTicks,
            Err(e) => {
                error!("Failed to read tick bitmap word {} of {} : {}", word, pool, e);
                return Err(eyre!("TICK_WORD_READ_FAILED"));
            }
        };

        populated
            .into_iter()
            .map(|tick| {
                let index: i32 = tick.tick.try_into().map_err(|_| eyre!("BAD_TICK_INDEX"))?;
                Ok(RawTick::new(index, tick.liquidityNet))
            })
            .collect()
    }
}

#[async_trait]
impl<P, T, N> TickLedgerProvider for TickLensLedgerProvider<P, T, N>
where
    N: Network,
    T: Transport + Clone,
    P: Provider<T, N> + Send + Sync + Clone + 'static,
{
    async fn ticks(&self, pool: &PoolIdentity, snapshot: &PoolSnapshot) -> Result<Vec<RawTick>> {
        let tick_lens = self.resolve_tick_lens(pool).await?;
        let center = nearest_usable_tick(snapshot.current_tick, snapshot.tick_spacing)?;
        let words = word_range_around(center, snapshot.tick_spacing, self.surrounding)?;

        debug!("Fetching tick words {:?} of {} from {}", words, pool, tick_lens);

        let word_ticks = try_join_all(words.map(|word| self.fetch_word(tick_lens, pool.address, word))).await?;
        let ticks: Vec<RawTick> = word_ticks.into_iter().flatten().collect();

        debug!("Fetched {} initialized ticks of {}", ticks.len(), pool);
        Ok(ticks)
    }
}
