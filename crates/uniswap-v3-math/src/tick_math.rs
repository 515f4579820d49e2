use alloy_primitives::U256;

use crate::error::UniswapV3MathError;

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
pub const MAX_SQRT_RATIO: U256 = U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

// sqrt(1.0001^-(2^i)) in Q128.128, i = 1..=19; bit 0 seeds the ratio below
const SQRT_RATIO_FACTORS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

/// Returns `sqrt(1.0001^tick) * 2^96`, rounded up, exactly as `TickMath.getSqrtRatioAtTick`.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, UniswapV3MathError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(UniswapV3MathError::T);
    }

    let mut ratio = if abs_tick & 0x1 != 0 { U256::from(0xfffcb933bd6fad37aa2d162d1a594001_u128) } else { U256::from(1) << 128usize };

    for (bit, factor) in SQRT_RATIO_FACTORS {
        if abs_tick & bit != 0 {
            ratio = (ratio * U256::from(factor)) >> 128usize;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    let (shifted, remainder): (U256, U256) = (ratio >> 32usize, ratio % (U256::from(1) << 32usize));
    Ok(if remainder.is_zero() { shifted } else { shifted + U256::from(1) })
}

/// Returns the greatest tick whose sqrt ratio is less than or equal to `sqrt_price_x_96`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x_96: U256) -> Result<i32, UniswapV3MathError> {
    if !(sqrt_price_x_96 >= MIN_SQRT_RATIO && sqrt_price_x_96 < MAX_SQRT_RATIO) {
        return Err(UniswapV3MathError::R);
    }

    let mut low = MIN_TICK;
    let mut high = MAX_TICK - 1;

    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x_96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

/// Rounds `tick` to the nearest multiple of `tick_spacing` (halves round up),
/// stepping back inside `[MIN_TICK, MAX_TICK]` when the rounded tick falls outside.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, UniswapV3MathError> {
    if tick_spacing <= 0 {
        return Err(UniswapV3MathError::TickSpacingIsZero);
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(UniswapV3MathError::T);
    }

    let tick = tick as i64;
    let spacing = tick_spacing as i64;
    let rounded = ((2 * tick + spacing).div_euclid(2 * spacing) * spacing) as i32;

    if rounded < MIN_TICK {
        Ok(rounded + tick_spacing)
    } else if rounded > MAX_TICK {
        Ok(rounded - tick_spacing)
    } else {
        Ok(rounded)
    }
}

/// Start of the spacing-aligned interval that contains `current_tick`.
pub fn active_tick(current_tick: i32, tick_spacing: i32) -> Result<i32, UniswapV3MathError> {
    if tick_spacing <= 0 {
        return Err(UniswapV3MathError::TickSpacingIsZero);
    }
    Ok(current_tick.div_euclid(tick_spacing) * tick_spacing)
}
