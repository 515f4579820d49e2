use alloy_primitives::U256;

use crate::error::UniswapV3MathError;
use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};

pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
pub const RESOLUTION: usize = 96;
pub const MAX_U160: U256 = U256::from_limbs([u64::MAX, u64::MAX, 4294967295, 0]);

// returns (sqrtQX96)
pub fn get_next_sqrt_price_from_input(
    sqrt_price: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, UniswapV3MathError> {
    if sqrt_price.is_zero() {
        return Err(UniswapV3MathError::SqrtPriceIsZero);
    } else if liquidity == 0 {
        return Err(UniswapV3MathError::LiquidityIsZero);
    }

    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_price, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_price, liquidity, amount_in, true)
    }
}

// returns (sqrtQX96)
pub fn get_next_sqrt_price_from_output(
    sqrt_price: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, UniswapV3MathError> {
    if sqrt_price.is_zero() {
        return Err(UniswapV3MathError::SqrtPriceIsZero);
    } else if liquidity == 0 {
        return Err(UniswapV3MathError::LiquidityIsZero);
    }

    if zero_for_one {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_price, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_price, liquidity, amount_out, false)
    }
}

// returns (uint160 sqrtQX96)
pub fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_price_x_96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, UniswapV3MathError> {
    if amount.is_zero() {
        return Ok(sqrt_price_x_96);
    }

    let numerator_1 = U256::from(liquidity) << RESOLUTION;

    if add {
        let (product, overflowed) = amount.overflowing_mul(sqrt_price_x_96);
        if !overflowed {
            let (denominator, overflowed) = numerator_1.overflowing_add(product);
            if !overflowed {
                return mul_div_rounding_up(numerator_1, sqrt_price_x_96, denominator);
            }
        }

        let denominator = (numerator_1 / sqrt_price_x_96).checked_add(amount).ok_or(UniswapV3MathError::ProductDivAmount)?;
        div_rounding_up(numerator_1, denominator)
    } else {
        let (product, overflowed) = amount.overflowing_mul(sqrt_price_x_96);
        if overflowed || numerator_1 <= product {
            return Err(UniswapV3MathError::ProductDivAmount);
        }

        let denominator = numerator_1 - product;
        let next = mul_div_rounding_up(numerator_1, sqrt_price_x_96, denominator)?;
        if next > MAX_U160 {
            return Err(UniswapV3MathError::SafeCastToU160Overflow);
        }
        Ok(next)
    }
}

// returns (uint160 sqrtQX96)
pub fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_price_x_96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, UniswapV3MathError> {
    let liquidity = U256::from(liquidity);
    if liquidity.is_zero() {
        return Err(UniswapV3MathError::LiquidityIsZero);
    }

    if add {
        let quotient = if amount <= MAX_U160 { (amount << RESOLUTION) / liquidity } else { mul_div(amount, Q96, liquidity)? };

        let next = sqrt_price_x_96.checked_add(quotient).ok_or(UniswapV3MathError::SafeCastToU160Overflow)?;
        if next > MAX_U160 {
            return Err(UniswapV3MathError::SafeCastToU160Overflow);
        }
        Ok(next)
    } else {
        let quotient =
            if amount <= MAX_U160 { div_rounding_up(amount << RESOLUTION, liquidity)? } else { mul_div_rounding_up(amount, Q96, liquidity)? };

        if sqrt_price_x_96 <= quotient {
            return Err(UniswapV3MathError::SqrtPriceIsLteQuotient);
        }

        Ok(sqrt_price_x_96 - quotient)
    }
}

// returns (uint256 amount0)
pub fn get_amount_0_delta(
    mut sqrt_ratio_a_x_96: U256,
    mut sqrt_ratio_b_x_96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, UniswapV3MathError> {
    if sqrt_ratio_a_x_96 > sqrt_ratio_b_x_96 {
        (sqrt_ratio_a_x_96, sqrt_ratio_b_x_96) = (sqrt_ratio_b_x_96, sqrt_ratio_a_x_96)
    };

    if sqrt_ratio_a_x_96.is_zero() {
        return Err(UniswapV3MathError::SqrtPriceIsZero);
    }

    let numerator_1 = U256::from(liquidity) << RESOLUTION;
    let numerator_2 = sqrt_ratio_b_x_96 - sqrt_ratio_a_x_96;

    if round_up {
        let numerator_partial = mul_div_rounding_up(numerator_1, numerator_2, sqrt_ratio_b_x_96)?;
        div_rounding_up(numerator_partial, sqrt_ratio_a_x_96)
    } else {
        Ok(mul_div(numerator_1, numerator_2, sqrt_ratio_b_x_96)? / sqrt_ratio_a_x_96)
    }
}

// returns (uint256 amount1)
pub fn get_amount_1_delta(
    mut sqrt_ratio_a_x_96: U256,
    mut sqrt_ratio_b_x_96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, UniswapV3MathError> {
    if sqrt_ratio_a_x_96 > sqrt_ratio_b_x_96 {
        (sqrt_ratio_a_x_96, sqrt_ratio_b_x_96) = (sqrt_ratio_b_x_96, sqrt_ratio_a_x_96)
    };

    let liquidity = U256::from(liquidity);
    let delta = sqrt_ratio_b_x_96 - sqrt_ratio_a_x_96;

    if round_up {
        mul_div_rounding_up(liquidity, delta, Q96)
    } else {
        mul_div(liquidity, delta, Q96)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::ops::Sub;

    #[test]
    fn test_get_next_sqrt_price_from_input() {
        // Fails if price is zero
        let result = get_next_sqrt_price_from_input(U256::ZERO, 0, U256::from(100000000000000000_u128), false);
        assert_eq!(result.err().unwrap().to_string(), "Sqrt price is 0");

        // Fails if liquidity is zero
        let result = get_next_sqrt_price_from_input(U256::from(1), 0, U256::from(100000000000000000_u128), true);
        assert_eq!(result.err().unwrap().to_string(), "Liquidity is 0");

        // Returns input price if amount in is zero and zero_for_one = true
        let result = get_next_sqrt_price_from_input(Q96, 100000000000000000_u128, U256::ZERO, true);
        assert_eq!(result.unwrap(), Q96);

        // Returns input price if amount in is zero and zero_for_one = false
        let result = get_next_sqrt_price_from_input(Q96, 100000000000000000_u128, U256::ZERO, false);
        assert_eq!(result.unwrap(), Q96);

        // Input amount of 0.1 token1
        let result = get_next_sqrt_price_from_input(Q96, 1000000000000000000_u128, U256::from(100000000000000000_u128), false);
        assert_eq!(result.unwrap(), U256::from_str_radix("87150978765690771352898345369", 10).unwrap());

        // Input amount of 0.1 token0
        let result = get_next_sqrt_price_from_input(Q96, 1000000000000000000_u128, U256::from(100000000000000000_u128), true);
        assert_eq!(result.unwrap(), U256::from_str_radix("72025602285694852357767227579", 10).unwrap());

        // Amount in > type(uint96).max and zero_for_one = true
        let result = get_next_sqrt_price_from_input(Q96, 10000000000000000000_u128, U256::from(1) << 100usize, true);
        assert_eq!(result.unwrap(), U256::from_str_radix("624999999995069620", 10).unwrap());

        // Can return 1 with enough amount in and zero_for_one = true
        let result = get_next_sqrt_price_from_input(Q96, 1, U256::MAX / U256::from(2), true);
        assert_eq!(result.unwrap(), U256::from(1));
    }

    #[test]
    fn test_get_next_sqrt_price_from_output() {
        // Fails if price is zero
        let result = get_next_sqrt_price_from_output(U256::ZERO, 0, U256::from(1000000000), false);
        assert_eq!(result.err().unwrap().to_string(), "Sqrt price is 0");

        // Fails if liquidity is zero
        let result = get_next_sqrt_price_from_output(U256::from(1), 0, U256::from(1000000000), false);
        assert_eq!(result.err().unwrap().to_string(), "Liquidity is 0");

        // Fails if output amount is exactly the virtual reserves of token0
        let result = get_next_sqrt_price_from_output(
            U256::from_str_radix("20282409603651670423947251286016", 10).unwrap(),
            1024,
            U256::from(4),
            false,
        );
        assert_eq!(
            result.err().unwrap().to_string(),
            "require((product = amount * sqrtPX96) / amount == sqrtPX96 && numerator1 > product);"
        );

        // Fails if output amount is exactly the virtual reserves of token1
        let result = get_next_sqrt_price_from_output(
            U256::from_str_radix("20282409603651670423947251286016", 10).unwrap(),
            1024,
            U256::from(262144),
            true,
        );
        assert_eq!(result.err().unwrap().to_string(), "Sqrt price is less than or equal to quotient");

        // Succeeds if output amount is just less than the virtual reserves of token1
        let result = get_next_sqrt_price_from_output(
            U256::from_str_radix("20282409603651670423947251286016", 10).unwrap(),
            1024,
            U256::from(262143),
            true,
        );
        assert_eq!(result.unwrap(), U256::from_str_radix("77371252455336267181195264", 10).unwrap());

        // Output amount of 0.1 token1
        let result = get_next_sqrt_price_from_output(Q96, 1000000000000000000_u128, U256::from(100000000000000000_u128), false);
        assert_eq!(result.unwrap(), U256::from_str_radix("88031291682515930659493278152", 10).unwrap());

        // Output amount of 0.1 token0
        let result = get_next_sqrt_price_from_output(Q96, 1000000000000000000_u128, U256::from(100000000000000000_u128), true);
        assert_eq!(result.unwrap(), U256::from_str_radix("71305346262837903834189555302", 10).unwrap());
    }

    #[test]
    fn test_get_amount_0_delta() {
        // Returns 0 if liquidity is 0
        let amount_0 = get_amount_0_delta(Q96, Q96 * U256::from(2), 0, true);
        assert_eq!(amount_0.unwrap(), U256::ZERO);

        // Returns 0 if prices are equal
        let amount_0 = get_amount_0_delta(Q96, Q96, 0, true);
        assert_eq!(amount_0.unwrap(), U256::ZERO);

        // Returns 0.1 amount1 for price of 1 to 1.21
        let amount_0 = get_amount_0_delta(
            Q96,
            U256::from_str_radix("87150978765690771352898345369", 10).unwrap(),
            1000000000000000000,
            true,
        )
        .unwrap();
        assert_eq!(amount_0, U256::from_str_radix("90909090909090910", 10).unwrap());

        let amount_0_rounded_down = get_amount_0_delta(
            Q96,
            U256::from_str_radix("87150978765690771352898345369", 10).unwrap(),
            1000000000000000000,
            false,
        );
        assert_eq!(amount_0_rounded_down.unwrap(), amount_0.sub(U256::from(1)));
    }

    #[test]
    fn test_get_amount_1_delta() {
        // Returns 0 if liquidity is 0
        let amount_1 = get_amount_1_delta(Q96, Q96 * U256::from(2), 0, true);
        assert_eq!(amount_1.unwrap(), U256::ZERO);

        // Returns 0 if prices are equal
        let amount_1 = get_amount_1_delta(Q96, Q96, 0, true);
        assert_eq!(amount_1.unwrap(), U256::ZERO);

        // Returns 0.1 amount1 for price of 1 to 1.21
        let amount_1 = get_amount_1_delta(
            Q96,
            U256::from_str_radix("87150978765690771352898345369", 10).unwrap(),
            1000000000000000000,
            true,
        )
        .unwrap();
        assert_eq!(amount_1, U256::from_str_radix("100000000000000000", 10).unwrap());

        let amount_1_rounded_down = get_amount_1_delta(
            Q96,
            U256::from_str_radix("87150978765690771352898345369", 10).unwrap(),
            1000000000000000000,
            false,
        );
        assert_eq!(amount_1_rounded_down.unwrap(), amount_1.sub(U256::from(1)));
    }

    #[test]
    fn test_swap_computation() {
        let sqrt_price = U256::from_str_radix("1025574284609383690408304870162715216695788925244", 10).unwrap();
        let liquidity = 50015962439936049619261659728067971248;
        let zero_for_one = true;
        let amount_in = U256::from(406);

        let sqrt_q = get_next_sqrt_price_from_input(sqrt_price, liquidity, amount_in, zero_for_one).unwrap();
        assert_eq!(sqrt_q, U256::from_str_radix("1025574284609383582644711336373707553698163132913", 10).unwrap());

        let amount_0_delta = get_amount_0_delta(sqrt_q, sqrt_price, liquidity, true).unwrap();
        assert_eq!(amount_0_delta, U256::from(406));
    }
}
