use std::marker::PhantomData;

use alloy::network::Network;
use alloy::providers::Provider;
use alloy::transports::Transport;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use eyre::Result;
use tracing::{debug, warn};
use v3charts_types::{PartialPoolSnapshot, PoolBalances, PoolIdentity, Token};

use crate::abi::{IUniswapV3Pool, IERC20};

/// Reads the current state of a pool. Fields that could not be read stay `None`.
#[async_trait]
pub trait PoolStateProvider: Send + Sync {
    async fn pool_snapshot(&self, pool: &PoolIdentity) -> Result<PartialPoolSnapshot>;
}

pub struct RpcPoolStateProvider<P, T, N> {
    client: P,
    _t: PhantomData<(T, N)>,
}

impl<P, T, N> RpcPoolStateProvider<P, T, N>
where
    N: Network,
    T: Transport + Clone,
    P: Provider<T, N> + Send + Sync + Clone + 'static,
{
    pub fn new(client: P) -> Self {
        Self { client, _t: PhantomData }
    }

    async fn fetch_token(&self, address: Address) -> Option<Token> {
        let erc20 = IERC20::IERC20Instance::new(address, self.client.clone());

        let decimals = match erc20.decimals().call().await {
            Ok(result) => result._0,
            Err(e) => {
                warn!("Failed to read decimals of {} : {}", address, e);
                return None;
            }
        };

        // tokens returning bytes32 symbols fail to decode, the address is shown instead
        let symbol = match erc20.symbol().call().await {
            Ok(result) => Some(result._0),
            Err(e) => {
                debug!("Failed to read symbol of {} : {}", address, e);
                None
            }
        };

        Some(Token::new_with_data(address, symbol, Some(decimals)))
    }

    async fn fetch_balance(&self, token: Option<&Token>, owner: Address) -> Option<U256> {
        let token = token?;
        let erc20 = IERC20::IERC20Instance::new(token.get_address(), self.client.clone());

        match erc20.balanceOf(owner).call().await {
            Ok(result) => Some(result._0),
            Err(e) => {
                debug!("Failed to read {} balance of {} : {}", token.get_symbol(), owner, e);
                None
            }
        }
    }
}

#[async_trait]
impl<P, T, N> PoolStateProvider for RpcPoolStateProvider<P, T, N>
where
    N: Network,
    T: Transport + Clone,
    P: Provider<T, N> + Send + Sync + Clone + 'static,
{
    async fn pool_snapshot(&self, pool: &PoolIdentity) -> Result<PartialPoolSnapshot> {
        debug!("Fetching pool state {}", pool);
        let uni3_pool = IUniswapV3Pool::IUniswapV3PoolInstance::new(pool.address, self.client.clone());

        let token0 = uni3_pool.token0().call().await.map(|r| r._0).ok();
        let token1 = uni3_pool.token1().call().await.map(|r| r._0).ok();
        let fee: Option<u32> = uni3_pool.fee().call().await.map(|r| r._0.to::<u32>()).ok();
        let tick_spacing: Option<i32> = uni3_pool.tickSpacing().call().await.ok().and_then(|r| r._0.try_into().ok());
        let liquidity: Option<u128> = uni3_pool.liquidity().call().await.map(|r| r._0).ok();

        let (sqrt_price_x96, current_tick) = match uni3_pool.slot0().call().await {
            Ok(slot0) => (Some(slot0.sqrtPriceX96.to::<U256>()), slot0.tick.try_into().ok()),
            Err(e) => {
                warn!("Failed to read slot0 of {} : {}", pool, e);
                (None, None)
            }
        };

        let token0 = match token0 {
            Some(address) => self.fetch_token(address).await,
            None => None,
        };
        let token1 = match token1 {
            Some(address) => self.fetch_token(address).await,
            None => None,
        };

        let balances = PoolBalances {
            token0: self.fetch_balance(token0.as_ref(), pool.address).await,
            token1: self.fetch_balance(token1.as_ref(), pool.address).await,
        };

        let snapshot = PartialPoolSnapshot { token0, token1, fee, tick_spacing, current_tick, sqrt_price_x96, liquidity, balances };
        debug!("Pool {} state {:?}", pool, snapshot);

        Ok(snapshot)
    }
}
