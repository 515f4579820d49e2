pub use active_liquidity::{reconstruct, reconstruct_partial, reconstruct_with_walk, step_down, step_up, ActiveLiquidity, DescendingWalk, ProcessedTick};
pub use chart::{balance_values, project, usd_series, ChartOrientation};
pub use ledger::TickLedger;
pub use locked::{active_range_tokens_locked, tokens_locked, LockError, TokensLocked};
pub use price::{Fraction, Price};

pub mod active_liquidity;
pub mod chart;
pub mod ledger;
pub mod locked;
pub mod price;
