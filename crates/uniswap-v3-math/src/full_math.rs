use alloy_primitives::{U256, U512};

use crate::error::UniswapV3MathError;

pub const ONE: U256 = U256::from_limbs([1, 0, 0, 0]);
pub const TWO: U256 = U256::from_limbs([2, 0, 0, 0]);

/// Zero-extends a 256-bit value into the 512-bit product space.
pub fn widen(value: U256) -> U512 {
    let limbs = value.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

/// Truncates a 512-bit value back to 256 bits, `None` if any high limb is set.
pub fn narrow(value: U512) -> Option<U256> {
    let limbs = value.as_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        None
    } else {
        Some(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
    }
}

// floor(a * b / denominator) with a full 512-bit intermediate product
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, UniswapV3MathError> {
    if denominator.is_zero() {
        return Err(UniswapV3MathError::DenominatorIsZero);
    }

    let product = widen(a) * widen(b);
    let quotient = product / widen(denominator);

    narrow(quotient).ok_or(UniswapV3MathError::DenominatorIsLteProdOne)
}

// ceil(a * b / denominator)
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, UniswapV3MathError> {
    let result = mul_div(a, b, denominator)?;

    let product = widen(a) * widen(b);
    if (product % widen(denominator)).is_zero() {
        Ok(result)
    } else if result == U256::MAX {
        Err(UniswapV3MathError::ResultIsU256MAX)
    } else {
        Ok(result + ONE)
    }
}

pub fn div_rounding_up(a: U256, denominator: U256) -> Result<U256, UniswapV3MathError> {
    if denominator.is_zero() {
        return Err(UniswapV3MathError::DenominatorIsZero);
    }
    let (quotient, remainder) = a.div_rem(denominator);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + ONE)
    }
}
