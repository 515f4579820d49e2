use crate::error::UniswapV3MathError;

/// Applies a signed net-liquidity delta, failing on underflow or overflow of the u128 range.
pub fn add_delta(x: u128, y: i128) -> Result<u128, UniswapV3MathError> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(UniswapV3MathError::LiquiditySub)
    } else {
        x.checked_add(y as u128).ok_or(UniswapV3MathError::LiquidityAdd)
    }
}

/// Same as [`add_delta`] but in the reverse direction, used when crossing a tick downwards.
pub fn sub_delta(x: u128, y: i128) -> Result<u128, UniswapV3MathError> {
    if y < 0 {
        x.checked_add(y.unsigned_abs()).ok_or(UniswapV3MathError::LiquidityAdd)
    } else {
        x.checked_sub(y as u128).ok_or(UniswapV3MathError::LiquiditySub)
    }
}
