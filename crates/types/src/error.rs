use thiserror::Error;
use uniswap_v3_math::UniswapV3MathError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Tick {0} is outside of the valid tick range")]
    OutOfBoundsTick(i32),
    #[error("No initialized tick at or below active tick {active_tick}, lowest is {lowest:?}")]
    PivotNotFound { active_tick: i32, lowest: Option<i32> },
    #[error("Insufficient data: {0} is missing")]
    InsufficientData(&'static str),
    #[error("Price does not fit the fixed-point range")]
    PriceOverflow,
    #[error("Math error: {0}")]
    Math(#[from] UniswapV3MathError),
}

impl CoreError {
    /// Maps a tick math failure for `tick`, reporting range violations as [`CoreError::OutOfBoundsTick`].
    pub fn from_tick_math(tick: i32, err: UniswapV3MathError) -> Self {
        match err {
            UniswapV3MathError::T => CoreError::OutOfBoundsTick(tick),
            err => CoreError::Math(err),
        }
    }
}
