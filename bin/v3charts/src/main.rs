use std::sync::Arc;

use alloy::network::Ethereum;
use alloy::providers::ProviderBuilder;
use alloy::transports::http::{Client, Http};
use clap::Parser;
use eyre::{OptionExt, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};
use url::Url;
use v3charts_address_book::DEFAULT_POOL;
use v3charts_fetch::{HttpPriceOracle, RpcPoolStateProvider, TickChartService, TickLensLedgerProvider};
use v3charts_liquidity::{balance_values, project, reconstruct, usd_series, ChartOrientation, TickLedger};
use v3charts_types::{BalanceValues, ChartData, PoolBalances, PoolIdentity, PoolSnapshot, RawTick, UsdSeries};

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::output::{render_json, render_table};

mod cli;
mod config;
mod output;

const DEFAULT_CHAIN_ID: u64 = 1;

/// Snapshot and ticks captured from a pool, with optional USD prices.
#[derive(Clone, Debug, Deserialize)]
struct OfflineInput {
    snapshot: PoolSnapshot,
    ticks: Vec<RawTick>,
    token0_usd: Option<f64>,
    token1_usd: Option<f64>,
    #[serde(default)]
    balances: PoolBalances,
}

#[derive(Serialize)]
struct OfflineOutput<'a> {
    snapshot: &'a PoolSnapshot,
    data: &'a ChartData,
    usd: Option<&'a UsdSeries>,
    balances: &'a BalanceValues,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,alloy_rpc_client=off,alloy_transport_http=off,hyper_util=off,reqwest=off".into());
    let fmt_layer = fmt::Layer::default().with_target(false).with_writer(std::io::stderr).with_filter(env_filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Chart { config, pool, chain, token1_left, json } => {
            let config = AppConfig::from_file(config).await?;

            let chain_id = chain.or(config.chart.chain).unwrap_or(DEFAULT_CHAIN_ID);
            let pool = PoolIdentity::new(chain_id, pool.or(config.chart.pool).unwrap_or(DEFAULT_POOL));
            let chain_config = config.chain(chain_id).ok_or_eyre(format!("No [chains.{chain_id}] section in config"))?;

            let rpc_url = Url::parse(&chain_config.rpc)?;
            debug!("Connecting to {}", rpc_url);
            let provider = ProviderBuilder::new().on_http(rpc_url);

            let pool_state = RpcPoolStateProvider::<_, Http<Client>, Ethereum>::new(provider.clone());
            let ticks = TickLensLedgerProvider::<_, Http<Client>, Ethereum>::new(provider)
                .with_tick_lens(chain_config.tick_lens)
                .with_surrounding(config.ticks.surrounding);

            let mut service = TickChartService::new(Arc::new(pool_state), Arc::new(ticks))
                .with_orientation(ChartOrientation::from_token1_left(token1_left || config.chart.token1_left));
            if !config.prices.disabled {
                service = service.with_prices(Arc::new(HttpPriceOracle::new(config.prices.url.clone())));
            }

            info!("Charting pool {}", pool);
            let Some(chart) = service.tick_chart(&pool).await? else {
                println!("No liquidity data for pool {pool}");
                return Ok(());
            };

            if json {
                println!("{}", render_json(&chart)?);
            } else {
                println!("{}", render_table(&chart.snapshot, &chart.data, chart.usd.as_ref(), Some(&chart.balances)));
            }
        }
        Command::Offline { input, token1_left, json } => {
            let contents = fs::read_to_string(&input).await?;
            let input: OfflineInput = serde_json::from_str(&contents)?;

            let ledger = TickLedger::new(input.ticks);
            let Some(active) = reconstruct(&input.snapshot, &ledger)? else {
                println!("No liquidity data in fixture");
                return Ok(());
            };

            let data = project(&input.snapshot, &active, ChartOrientation::from_token1_left(token1_left))?;
            let usd = (input.token0_usd.is_some() || input.token1_usd.is_some()).then(|| usd_series(&data, input.token0_usd, input.token1_usd));
            let balances = balance_values(&input.snapshot, &input.balances, input.token0_usd, input.token1_usd);

            if json {
                println!("{}", render_json(&OfflineOutput { snapshot: &input.snapshot, data: &data, usd: usd.as_ref(), balances: &balances })?);
            } else {
                println!("{}", render_table(&input.snapshot, &data, usd.as_ref(), Some(&balances)));
            }
        }
    }

    Ok(())
}
