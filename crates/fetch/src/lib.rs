pub use pool_state::{PoolStateProvider, RpcPoolStateProvider};
pub use prices::{HttpPriceOracle, PriceMap, PriceOracle, DEFAULT_PRICE_API};
pub use service::{TickChart, TickChartService};
pub use ticks::{TickLedgerProvider, TickLensLedgerProvider, DEFAULT_SURROUNDING_TICKS};

pub mod abi;
mod pool_state;
mod prices;
mod service;
mod ticks;
