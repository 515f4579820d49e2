pub use chart::{BalanceValues, ChartData, ChartEntry, UsdSeries};
pub use error::CoreError;
pub use pool::{fee_to_tick_spacing, PartialPoolSnapshot, PoolBalances, PoolIdentity, PoolSnapshot};
pub use tick::RawTick;
pub use token::Token;

mod chart;
mod error;
mod pool;
mod tick;
mod token;
