use std::ops::RangeInclusive;

use crate::error::UniswapV3MathError;
use crate::tick_math::{MAX_TICK, MIN_TICK};

/// Splits a compressed tick into its bitmap word and bit position.
pub fn position(compressed_tick: i32) -> (i16, u8) {
    ((compressed_tick >> 8) as i16, (compressed_tick & 0xff) as u8)
}

/// Index of the 256-bit bitmap word holding `tick`, i.e. `floor(tick / spacing / 256)`.
pub fn bitmap_word_index(tick: i32, tick_spacing: i32) -> Result<i16, UniswapV3MathError> {
    if tick_spacing <= 0 {
        return Err(UniswapV3MathError::TickSpacingIsZero);
    }
    Ok(position(tick.div_euclid(tick_spacing)).0)
}

/// Inclusive range of bitmap words covering `active_tick ± surrounding_ticks * spacing`.
/// The window is clamped to the valid tick range so a wide scan never asks for words past the edges.
pub fn word_range_around(active_tick: i32, tick_spacing: i32, surrounding_ticks: u32) -> Result<RangeInclusive<i16>, UniswapV3MathError> {
    let span = (surrounding_ticks as i64) * (tick_spacing as i64);
    let low = (active_tick as i64 - span).max(MIN_TICK as i64) as i32;
    let high = (active_tick as i64 + span).min(MAX_TICK as i64) as i32;

    Ok(bitmap_word_index(low, tick_spacing)?..=bitmap_word_index(high, tick_spacing)?)
}
