use alloy_primitives::{I256, U256};

use crate::error::UniswapV3MathError;
use crate::full_math::{mul_div, mul_div_rounding_up};
use crate::sqrt_price_math::{get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input, get_next_sqrt_price_from_output};

const FEE_DENOMINATOR: u32 = 1_000_000;

/// Outcome of swapping within a single initialized-tick range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapStep {
    pub sqrt_ratio_next_x_96: U256,
    pub amount_in: U256,
    pub amount_out: U256,
    pub fee_amount: U256,
}

// positive amount_remaining swaps an exact input, negative an exact output; fee_pips in hundredths of a bip
pub fn compute_swap_step(
    sqrt_ratio_current_x_96: U256,
    sqrt_ratio_target_x_96: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee_pips: u32,
) -> Result<SwapStep, UniswapV3MathError> {
    let zero_for_one = sqrt_ratio_current_x_96 >= sqrt_ratio_target_x_96;
    let exact_in = amount_remaining >= I256::ZERO;
    let fee_complement = U256::from(FEE_DENOMINATOR - fee_pips);

    let mut amount_in = U256::ZERO;
    let mut amount_out = U256::ZERO;

    let sqrt_ratio_next_x_96 = if exact_in {
        let amount_remaining_less_fee = mul_div(amount_remaining.into_raw(), fee_complement, U256::from(FEE_DENOMINATOR))?;

        amount_in = if zero_for_one {
            get_amount_0_delta(sqrt_ratio_target_x_96, sqrt_ratio_current_x_96, liquidity, true)?
        } else {
            get_amount_1_delta(sqrt_ratio_current_x_96, sqrt_ratio_target_x_96, liquidity, true)?
        };

        if amount_remaining_less_fee >= amount_in {
            sqrt_ratio_target_x_96
        } else {
            get_next_sqrt_price_from_input(sqrt_ratio_current_x_96, liquidity, amount_remaining_less_fee, zero_for_one)?
        }
    } else {
        amount_out = if zero_for_one {
            get_amount_1_delta(sqrt_ratio_target_x_96, sqrt_ratio_current_x_96, liquidity, false)?
        } else {
            get_amount_0_delta(sqrt_ratio_current_x_96, sqrt_ratio_target_x_96, liquidity, false)?
        };

        let amount_remaining_abs = amount_remaining.unsigned_abs();
        if amount_remaining_abs >= amount_out {
            sqrt_ratio_target_x_96
        } else {
            get_next_sqrt_price_from_output(sqrt_ratio_current_x_96, liquidity, amount_remaining_abs, zero_for_one)?
        }
    };

    let max = sqrt_ratio_target_x_96 == sqrt_ratio_next_x_96;

    if zero_for_one {
        if !max || !exact_in {
            amount_in = get_amount_0_delta(sqrt_ratio_next_x_96, sqrt_ratio_current_x_96, liquidity, true)?
        }
        if !max || exact_in {
            amount_out = get_amount_1_delta(sqrt_ratio_next_x_96, sqrt_ratio_current_x_96, liquidity, false)?
        }
    } else {
        if !max || !exact_in {
            amount_in = get_amount_1_delta(sqrt_ratio_current_x_96, sqrt_ratio_next_x_96, liquidity, true)?
        }
        if !max || exact_in {
            amount_out = get_amount_0_delta(sqrt_ratio_current_x_96, sqrt_ratio_next_x_96, liquidity, false)?
        }
    }

    // cap the output amount to not exceed the remaining output amount
    if !exact_in && amount_out > amount_remaining.unsigned_abs() {
        amount_out = amount_remaining.unsigned_abs();
    }

    let fee_amount = if exact_in && sqrt_ratio_next_x_96 != sqrt_ratio_target_x_96 {
        // we didn't reach the target, so take the remainder of the maximum input as fee
        amount_remaining.into_raw() - amount_in
    } else {
        mul_div_rounding_up(amount_in, U256::from(fee_pips), fee_complement)?
    };

    Ok(SwapStep { sqrt_ratio_next_x_96, amount_in, amount_out, fee_amount })
}
