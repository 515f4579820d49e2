use alloy_primitives::{I256, U256, U512};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uniswap_v3_math::full_math::{mul_div, narrow, widen};
use uniswap_v3_math::sqrt_price_math::Q96;
use uniswap_v3_math::swap_math::compute_swap_step;
use uniswap_v3_math::tick_math::get_sqrt_ratio_at_tick;
use uniswap_v3_math::UniswapV3MathError;
use v3charts_types::{CoreError, Token};

use crate::active_liquidity::ProcessedTick;
use crate::price::Fraction;

pub const AMOUNT_FIXED_DIGITS: u32 = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("Degenerate interval")]
    DegenerateInterval,
    #[error("Math error: {0}")]
    Math(#[from] UniswapV3MathError),
    #[error("Scaling error: {0}")]
    Scale(#[from] CoreError),
}

/// Human-scale token amounts held by one tick interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokensLocked {
    pub amount0_locked: f64,
    pub amount1_locked: f64,
}

fn check_interval(sqrt_a: U256, sqrt_b: U256) -> Result<(), LockError> {
    if sqrt_a.is_zero() || sqrt_b <= sqrt_a {
        Err(LockError::DegenerateInterval)
    } else {
        Ok(())
    }
}

// liquidity * Q96 * delta / (upper * lower), whole product in 512 bits
fn amount0(liquidity: u128, delta: U256, upper: U256, lower: U256) -> Result<U256, LockError> {
    let numerator = widen(U256::from(liquidity)) * widen(Q96) * widen(delta);
    let denominator = widen(upper) * widen(lower);
    if denominator == U512::ZERO {
        return Err(LockError::DegenerateInterval);
    }
    narrow(numerator / denominator).ok_or(LockError::Math(UniswapV3MathError::DenominatorIsLteProdOne))
}

fn amount1(liquidity: u128, delta: U256) -> Result<U256, LockError> {
    Ok(mul_div(U256::from(liquidity), delta, Q96)?)
}

/// Raw amounts held by `liquidity` over the whole interval `[sqrt_a, sqrt_b]`.
pub fn interval_amounts_raw(liquidity: u128, sqrt_a: U256, sqrt_b: U256) -> Result<(U256, U256), LockError> {
    check_interval(sqrt_a, sqrt_b)?;
    let delta = sqrt_b - sqrt_a;
    Ok((amount0(liquidity, delta, sqrt_b, sqrt_a)?, amount1(liquidity, delta)?))
}

/// Raw amounts of the interval holding the current price: token0 above `sqrt_p`, token1 below it.
pub fn active_interval_amounts_raw(liquidity: u128, sqrt_a: U256, sqrt_b: U256, sqrt_p: U256) -> Result<(U256, U256), LockError> {
    check_interval(sqrt_a, sqrt_b)?;
    let sqrt_p = sqrt_p.clamp(sqrt_a, sqrt_b);
    Ok((amount0(liquidity, sqrt_b - sqrt_p, sqrt_b, sqrt_p)?, amount1(liquidity, sqrt_p - sqrt_a)?))
}

/// Same amounts as [`interval_amounts_raw`], obtained by swapping through the whole interval without fee.
pub fn swap_simulated_amounts_raw(liquidity: u128, sqrt_a: U256, sqrt_b: U256) -> Result<(U256, U256), LockError> {
    check_interval(sqrt_a, sqrt_b)?;

    // pushing the price up drains token0, pushing it down drains token1
    let up = compute_swap_step(sqrt_a, sqrt_b, liquidity, I256::MAX, 0)?;
    let down = compute_swap_step(sqrt_b, sqrt_a, liquidity, I256::MAX, 0)?;

    Ok((up.amount_out, down.amount_out))
}

fn interval_bounds(tick: i32, tick_spacing: i32) -> Result<(U256, U256), LockError> {
    if tick_spacing <= 0 {
        return Err(LockError::DegenerateInterval);
    }
    let upper = tick.checked_add(tick_spacing).ok_or(LockError::Math(UniswapV3MathError::T))?;
    Ok((get_sqrt_ratio_at_tick(tick)?, get_sqrt_ratio_at_tick(upper)?))
}

/// Raw smallest units to a token amount rounded half-up to [`AMOUNT_FIXED_DIGITS`] digits.
pub fn to_token_amount(raw: U256, token: &Token) -> Result<f64, LockError> {
    let scale = pow10(token.get_decimals())?;
    let text = Fraction::new(widen(raw), scale).to_fixed(AMOUNT_FIXED_DIGITS)?;
    text.parse::<f64>().map_err(|_| LockError::Scale(CoreError::PriceOverflow))
}

fn pow10(exp: u8) -> Result<U512, LockError> {
    U512::from(10u64).checked_pow(U512::from(exp)).ok_or(LockError::Scale(CoreError::PriceOverflow))
}

fn scale(token0: &Token, token1: &Token, (raw0, raw1): (U256, U256)) -> Result<TokensLocked, LockError> {
    Ok(TokensLocked { amount0_locked: to_token_amount(raw0, token0)?, amount1_locked: to_token_amount(raw1, token1)? })
}

/// Amounts locked in the full interval starting at `tick`, zero when they cannot be computed.
pub fn tokens_locked(token0: &Token, token1: &Token, tick_spacing: i32, tick: &ProcessedTick) -> TokensLocked {
    interval_bounds(tick.tick, tick_spacing)
        .and_then(|(sqrt_a, sqrt_b)| interval_amounts_raw(tick.liquidity_active, sqrt_a, sqrt_b))
        .and_then(|raw| scale(token0, token1, raw))
        .unwrap_or_else(|err| {
            debug!("Tokens locked at tick {} defaulted to zero : {}", tick.tick, err);
            TokensLocked::default()
        })
}

/// Amounts locked in the interval holding `sqrt_price_x96`, split at the current price.
pub fn active_range_tokens_locked(token0: &Token, token1: &Token, tick_spacing: i32, tick: &ProcessedTick, sqrt_price_x96: U256) -> TokensLocked {
    interval_bounds(tick.tick, tick_spacing)
        .and_then(|(sqrt_a, sqrt_b)| active_interval_amounts_raw(tick.liquidity_active, sqrt_a, sqrt_b, sqrt_price_x96))
        .and_then(|raw| scale(token0, token1, raw))
        .unwrap_or_else(|err| {
            debug!("Active range tokens locked at tick {} defaulted to zero : {}", tick.tick, err);
            TokensLocked::default()
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::Address;

    fn tokens() -> (Token, Token) {
        (
            Token::new_with_data(Address::repeat_byte(0x01), Some("USDC".to_string()), Some(6)),
            Token::new_with_data(Address::repeat_byte(0x02), Some("WETH".to_string()), Some(18)),
        )
    }

    fn processed(tick: i32, liquidity_active: u128) -> ProcessedTick {
        let (token0, token1) = tokens();
        ProcessedTick::new(&token0, &token1, tick, liquidity_active, 0).unwrap()
    }

    #[test]
    fn test_interval_amounts_raw() {
        let sqrt_a = get_sqrt_ratio_at_tick(0).unwrap();
        let sqrt_b = get_sqrt_ratio_at_tick(60).unwrap();
        let liquidity = 1_000_000_000_000_000_000u128;

        let (amount0, amount1) = interval_amounts_raw(liquidity, sqrt_a, sqrt_b).unwrap();

        // around 0.3% of liquidity on both sides of a 60 tick interval at price 1
        assert!(amount0 > U256::from(2_980_000_000_000_000u64) && amount0 < U256::from(3_000_000_000_000_000u64));
        assert!(amount1 > U256::from(2_990_000_000_000_000u64) && amount1 < U256::from(3_010_000_000_000_000u64));
        assert!(amount0 < amount1);
    }

    #[test]
    fn test_zero_liquidity_locks_nothing() {
        let sqrt_a = get_sqrt_ratio_at_tick(-60).unwrap();
        let sqrt_b = get_sqrt_ratio_at_tick(0).unwrap();
        assert_eq!(interval_amounts_raw(0, sqrt_a, sqrt_b).unwrap(), (U256::ZERO, U256::ZERO));

        let (token0, token1) = tokens();
        assert_eq!(tokens_locked(&token0, &token1, 60, &processed(-60, 0)), TokensLocked::default());
    }

    #[test]
    fn test_degenerate_interval() {
        let sqrt_a = get_sqrt_ratio_at_tick(0).unwrap();
        assert_eq!(interval_amounts_raw(100, sqrt_a, sqrt_a).unwrap_err(), LockError::DegenerateInterval);
        assert_eq!(active_interval_amounts_raw(100, sqrt_a, sqrt_a, sqrt_a).unwrap_err(), LockError::DegenerateInterval);

        let (token0, token1) = tokens();
        assert_eq!(tokens_locked(&token0, &token1, 0, &processed(0, 100)), TokensLocked::default());
        // upper bound outside the tick range
        assert_eq!(tokens_locked(&token0, &token1, 60, &processed(887_260, 1_000_000)), TokensLocked::default());
    }

    #[test]
    fn test_active_interval_splits_at_price() {
        let sqrt_a = get_sqrt_ratio_at_tick(0).unwrap();
        let sqrt_b = get_sqrt_ratio_at_tick(60).unwrap();
        let liquidity = 1_000_000_000_000_000_000u128;

        let full = interval_amounts_raw(liquidity, sqrt_a, sqrt_b).unwrap();

        // at the lower bound everything is token0, at the upper bound everything is token1
        assert_eq!(active_interval_amounts_raw(liquidity, sqrt_a, sqrt_b, sqrt_a).unwrap(), (full.0, U256::ZERO));
        assert_eq!(active_interval_amounts_raw(liquidity, sqrt_a, sqrt_b, sqrt_b).unwrap(), (U256::ZERO, full.1));

        // out of range prices are clamped
        let below = get_sqrt_ratio_at_tick(-10).unwrap();
        assert_eq!(active_interval_amounts_raw(liquidity, sqrt_a, sqrt_b, below).unwrap(), (full.0, U256::ZERO));

        let middle = get_sqrt_ratio_at_tick(30).unwrap();
        let (amount0, amount1) = active_interval_amounts_raw(liquidity, sqrt_a, sqrt_b, middle).unwrap();
        assert!(amount0 > U256::ZERO && amount0 < full.0);
        assert!(amount1 > U256::ZERO && amount1 < full.1);
    }

    #[test]
    fn test_swap_simulation_matches_closed_form() {
        let sqrt_a = get_sqrt_ratio_at_tick(-200_000).unwrap();
        let sqrt_b = get_sqrt_ratio_at_tick(-199_940).unwrap();
        let liquidity = 123_456_789_012_345_678_901u128;

        assert_eq!(swap_simulated_amounts_raw(liquidity, sqrt_a, sqrt_b).unwrap(), interval_amounts_raw(liquidity, sqrt_a, sqrt_b).unwrap());
    }

    #[test]
    fn test_to_token_amount() {
        let (usdc, weth) = tokens();
        assert_eq!(to_token_amount(U256::from(1_234_567u64), &usdc).unwrap(), 1.234567);
        assert_eq!(to_token_amount(U256::from(1_500_000_000_000_000_000u128), &weth).unwrap(), 1.5);
        // rounded half up at the 8th digit
        assert_eq!(to_token_amount(U256::from(5_000_000_000u64), &weth).unwrap(), 0.00000001);
        assert_eq!(to_token_amount(U256::from(4_999_999_999u64), &weth).unwrap(), 0.0);
    }

    #[test]
    fn test_active_range_tokens_locked() {
        let (token0, token1) = tokens();
        let tick = processed(0, 1_000_000_000_000_000_000);
        let sqrt_p = get_sqrt_ratio_at_tick(30).unwrap();

        let active = active_range_tokens_locked(&token0, &token1, 60, &tick, sqrt_p);
        let full = tokens_locked(&token0, &token1, 60, &tick);

        assert!(active.amount0_locked > 0.0 && active.amount0_locked < full.amount0_locked);
        assert!(active.amount1_locked > 0.0 && active.amount1_locked < full.amount1_locked);
    }
}
