use std::fmt::{Display, Formatter};

use alloy_primitives::U512;
use uniswap_v3_math::full_math::widen;
use uniswap_v3_math::tick_math::get_sqrt_ratio_at_tick;
use uniswap_v3_math::UniswapV3MathError;
use v3charts_types::{CoreError, Token};

const TEN: U512 = U512::from_limbs([10, 0, 0, 0, 0, 0, 0, 0]);
const TWO: U512 = U512::from_limbs([2, 0, 0, 0, 0, 0, 0, 0]);

fn pow10(exp: u32) -> Result<U512, CoreError> {
    (0..exp).try_fold(U512::from(1u64), |acc, _| acc.checked_mul(TEN).ok_or(CoreError::PriceOverflow))
}

// digits * 10^power as a plain decimal string
fn format_scaled(digits: U512, power: i32, trim_zeros: bool) -> String {
    let mut text = digits.to_string();
    if power >= 0 {
        text.push_str(&"0".repeat(power as usize));
        return text;
    }

    let places = power.unsigned_abs() as usize;
    if text.len() <= places {
        text = format!("{}{}", "0".repeat(places + 1 - text.len()), text);
    }
    let (integer, fraction) = text.split_at(text.len() - places);
    let fraction = if trim_zeros { fraction.trim_end_matches('0') } else { fraction };

    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

/// Exact non-negative rational number wide enough for squared Q64.96 ratios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: U512,
    pub denominator: U512,
}

impl Fraction {
    pub fn new(numerator: U512, denominator: U512) -> Self {
        Self { numerator, denominator }
    }

    pub fn invert(&self) -> Self {
        Self { numerator: self.denominator, denominator: self.numerator }
    }

    fn check_denominator(&self) -> Result<(), CoreError> {
        if self.denominator.is_zero() {
            Err(CoreError::Math(UniswapV3MathError::DenominatorIsZero))
        } else {
            Ok(())
        }
    }

    // floor(self * 10^scale + 1/2)
    fn scaled_half_up(&self, scale: i32) -> Result<U512, CoreError> {
        let (numerator, denominator) = if scale >= 0 {
            (self.numerator.checked_mul(pow10(scale as u32)?).ok_or(CoreError::PriceOverflow)?, self.denominator)
        } else {
            (self.numerator, self.denominator.checked_mul(pow10(scale.unsigned_abs())?).ok_or(CoreError::PriceOverflow)?)
        };

        let twice_numerator = numerator.checked_mul(TWO).and_then(|n| n.checked_add(denominator)).ok_or(CoreError::PriceOverflow)?;
        let twice_denominator = denominator.checked_mul(TWO).ok_or(CoreError::PriceOverflow)?;

        Ok(twice_numerator / twice_denominator)
    }

    // floor(log10(self)), self must be non-zero
    fn magnitude(&self) -> Result<i32, CoreError> {
        let quotient = self.numerator / self.denominator;
        if !quotient.is_zero() {
            return Ok(quotient.to_string().len() as i32 - 1);
        }

        let mut exponent = 0;
        let mut scaled = self.numerator;
        while scaled < self.denominator {
            scaled = scaled.checked_mul(TEN).ok_or(CoreError::PriceOverflow)?;
            exponent -= 1;
        }
        Ok(exponent)
    }

    /// Decimal string with `significant_digits` significant digits, rounded half-up, trailing zeros trimmed.
    pub fn to_significant(&self, significant_digits: u32) -> Result<String, CoreError> {
        self.check_denominator()?;
        if self.numerator.is_zero() {
            return Ok("0".to_string());
        }

        let significant_digits = significant_digits.max(1) as i32;
        let mut exponent = self.magnitude()?;
        let mut digits = self.scaled_half_up(significant_digits - 1 - exponent)?;

        // rounding carried into an extra digit, e.g. 9.9999999 -> 10.0000
        if digits.to_string().len() as i32 > significant_digits {
            digits /= TEN;
            exponent += 1;
        }

        Ok(format_scaled(digits, exponent - (significant_digits - 1), true))
    }

    /// Decimal string with exactly `decimal_places` fractional digits, rounded half-up.
    pub fn to_fixed(&self, decimal_places: u32) -> Result<String, CoreError> {
        self.check_denominator()?;
        let digits = self.scaled_half_up(decimal_places as i32)?;
        Ok(format_scaled(digits, -(decimal_places as i32), false))
    }
}

/// Price of one `base` token in `quote` tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Price {
    base: Token,
    quote: Token,
    raw: Fraction,
}

impl Price {
    /// `raw` is quote smallest units per base smallest unit.
    pub fn new(base: Token, quote: Token, raw: Fraction) -> Self {
        Self { base, quote, raw }
    }

    pub fn from_tick(base: &Token, quote: &Token, tick: i32) -> Result<Self, CoreError> {
        let sqrt_ratio_x96 = get_sqrt_ratio_at_tick(tick).map_err(|err| CoreError::from_tick_math(tick, err))?;
        let ratio_x192 = widen(sqrt_ratio_x96) * widen(sqrt_ratio_x96);
        let q192 = U512::from(1u64) << 192usize;

        let raw = if base.sorts_before(quote) { Fraction::new(ratio_x192, q192) } else { Fraction::new(q192, ratio_x192) };

        Ok(Self::new(base.clone(), quote.clone(), raw))
    }

    pub fn base(&self) -> &Token {
        &self.base
    }

    pub fn quote(&self) -> &Token {
        &self.quote
    }

    pub fn raw(&self) -> &Fraction {
        &self.raw
    }

    pub fn invert(&self) -> Self {
        Self { base: self.quote.clone(), quote: self.base.clone(), raw: self.raw.invert() }
    }

    /// The raw ratio scaled by `10^base.decimals / 10^quote.decimals`.
    pub fn adjusted(&self) -> Result<Fraction, CoreError> {
        let base_decimals = self.base.get_decimals() as u32;
        let quote_decimals = self.quote.get_decimals() as u32;

        if base_decimals >= quote_decimals {
            let scale = pow10(base_decimals - quote_decimals)?;
            Ok(Fraction::new(self.raw.numerator.checked_mul(scale).ok_or(CoreError::PriceOverflow)?, self.raw.denominator))
        } else {
            let scale = pow10(quote_decimals - base_decimals)?;
            Ok(Fraction::new(self.raw.numerator, self.raw.denominator.checked_mul(scale).ok_or(CoreError::PriceOverflow)?))
        }
    }

    pub fn to_significant(&self, significant_digits: u32) -> Result<String, CoreError> {
        self.adjusted()?.to_significant(significant_digits)
    }

    pub fn to_fixed(&self, decimal_places: u32) -> Result<String, CoreError> {
        self.adjusted()?.to_fixed(decimal_places)
    }

    pub fn to_f64(&self) -> Result<f64, CoreError> {
        self.to_significant(15)?.parse::<f64>().map_err(|_| CoreError::PriceOverflow)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_significant(6) {
            Ok(value) => write!(f, "{} {}/{}", value, self.quote.get_symbol(), self.base.get_symbol()),
            Err(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloy_primitives::Address;

    fn token(byte: u8, decimals: u8) -> Token {
        Token::new_with_data(Address::repeat_byte(byte), Some(format!("T{byte}")), Some(decimals))
    }

    #[test]
    fn test_from_tick_same_decimals() {
        let t0 = token(0x00, 18);
        let t1 = token(0x11, 18);

        assert_eq!(Price::from_tick(&t1, &t0, -74959).unwrap().to_significant(5).unwrap(), "1800");
        assert_eq!(Price::from_tick(&t0, &t1, -74959).unwrap().to_significant(5).unwrap(), "0.00055556");
        assert_eq!(Price::from_tick(&t0, &t1, 74959).unwrap().to_significant(5).unwrap(), "1800");
        assert_eq!(Price::from_tick(&t1, &t0, 74959).unwrap().to_significant(5).unwrap(), "0.00055556");
    }

    #[test]
    fn test_from_tick_decimal_difference() {
        let t0 = token(0x00, 18);
        let t2 = token(0x22, 6);

        assert_eq!(Price::from_tick(&t0, &t2, -276225).unwrap().to_significant(5).unwrap(), "1.01");
        assert_eq!(Price::from_tick(&t2, &t0, -276225).unwrap().to_significant(5).unwrap(), "0.99015");

        let t6 = token(0x00, 6);
        let t18 = token(0x11, 18);
        assert_eq!(Price::from_tick(&t6, &t18, 0).unwrap().to_significant(6).unwrap(), "0.000000000001");
    }

    #[test]
    fn test_significant_and_fixed() {
        let t0 = token(0x00, 18);
        let t1 = token(0x11, 18);

        assert_eq!(Price::from_tick(&t0, &t1, 0).unwrap().to_fixed(8).unwrap(), "1.00000000");
        assert_eq!(Price::from_tick(&t0, &t1, 0).unwrap().to_significant(6).unwrap(), "1");
        assert_eq!(Price::from_tick(&t0, &t1, 60).unwrap().to_significant(6).unwrap(), "1.00602");
        assert_eq!(Price::from_tick(&t0, &t1, -60).unwrap().to_significant(6).unwrap(), "0.994018");
        assert_eq!(Price::from_tick(&t0, &t1, -60).unwrap().to_fixed(8).unwrap(), "0.99401826");
        assert_eq!(Price::from_tick(&t0, &t1, 887272).unwrap().to_significant(6).unwrap(), "340257000000000000000000000000000000000");
    }

    #[test]
    fn test_fraction_rounding() {
        let third = Fraction::new(U512::from(1u64), U512::from(3u64));
        assert_eq!(third.to_significant(3).unwrap(), "0.333");
        assert_eq!(third.to_fixed(2).unwrap(), "0.33");

        let two_thirds = Fraction::new(U512::from(2u64), U512::from(3u64));
        assert_eq!(two_thirds.to_significant(3).unwrap(), "0.667");
        assert_eq!(two_thirds.to_fixed(0).unwrap(), "1");

        let nearly_ten = Fraction::new(U512::from(99_999_999u64), U512::from(10_000_000u64));
        assert_eq!(nearly_ten.to_significant(4).unwrap(), "10");

        let half = Fraction::new(U512::from(5u64), U512::from(1000u64));
        assert_eq!(half.to_fixed(2).unwrap(), "0.01");
        assert_eq!(Fraction::new(U512::ZERO, U512::from(7u64)).to_significant(6).unwrap(), "0");
        assert!(Fraction::new(U512::from(1u64), U512::ZERO).to_fixed(2).is_err());
    }

    #[test]
    fn test_invert_twice() {
        let t0 = token(0x00, 18);
        let t2 = token(0x22, 6);

        let price = Price::from_tick(&t0, &t2, -201_234).unwrap();
        let back = price.invert().invert();

        assert_eq!(back, price);
        assert_eq!(back.to_significant(6).unwrap(), price.to_significant(6).unwrap());
        assert_eq!(price.invert().base(), &t2);
    }

    #[test]
    fn test_out_of_bounds() {
        let t0 = token(0x00, 18);
        let t1 = token(0x11, 18);
        assert_eq!(Price::from_tick(&t0, &t1, 887273).unwrap_err(), CoreError::OutOfBoundsTick(887273));
    }
}
