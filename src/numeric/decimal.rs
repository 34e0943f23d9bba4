// ============================================================================
// Arbitrary-Precision Decimal
// Fixed-point arithmetic over a big integer with compile-time scale
// ============================================================================

use super::errors::{NumericError, NumericResult};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU64;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Fixed-point decimal number with compile-time scale and unbounded range.
///
/// Internally stores `value × 10^SCALE` as a [`BigInt`], so addition and
/// subtraction are exact and nothing ever wraps. Multiplication and division
/// truncate toward zero at the last internal digit.
///
/// Because the scale is a type parameter, combining two values of different
/// scale does not compile. The only runtime entry point that can see a foreign
/// scale is [`Decimal::from_scaled`], which rejects it.
///
/// # Example
/// ```
/// use idle_economy::numeric::Decimal;
///
/// let cost: Decimal<16> = "6".parse().unwrap();
/// let rate: Decimal<16> = "0.1".parse().unwrap();
/// let total = &cost + &rate;
/// assert_eq!(total.to_display_string(), "6.10");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal<const SCALE: u32 = 16> {
    unscaled: BigInt,
}

// ============================================================================
// Scale Helpers
// ============================================================================

fn pow10(n: u32) -> BigInt {
    BigInt::from(10u32).pow(n)
}

impl<const S: u32> Decimal<S> {
    /// Number of fractional digits carried by this type
    pub const SCALE: u32 = S;

    /// The scale factor (10^SCALE)
    #[inline]
    pub fn scale_factor() -> BigInt {
        pow10(S)
    }

    /// Zero value
    #[inline]
    pub fn zero() -> Self {
        Self {
            unscaled: BigInt::zero(),
        }
    }

    /// One (1.0)
    #[inline]
    pub fn one() -> Self {
        Self {
            unscaled: Self::scale_factor(),
        }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from the raw internal representation (already multiplied by 10^SCALE).
    #[inline]
    pub fn from_unscaled(unscaled: BigInt) -> Self {
        Self { unscaled }
    }

    /// Create from a raw value tagged with the scale it was produced at.
    ///
    /// # Errors
    /// Returns `ScaleMismatch` if `scale` differs from `SCALE`.
    pub fn from_scaled(unscaled: BigInt, scale: u32) -> NumericResult<Self> {
        if scale != S {
            return Err(NumericError::ScaleMismatch {
                expected: S,
                found: scale,
            });
        }
        Ok(Self { unscaled })
    }

    /// Create from an integer value.
    #[inline]
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            unscaled: value.into() * Self::scale_factor(),
        }
    }

    /// Create from a native float via its shortest round-trip decimal string.
    ///
    /// Digits beyond `SCALE` are truncated, like any other parsed string.
    ///
    /// # Errors
    /// Returns `InvalidInput` for NaN and infinities.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        value.to_string().parse()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled).
    #[inline]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub fn integer_part(&self) -> BigInt {
        &self.unscaled / Self::scale_factor()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.unscaled.is_positive()
    }

    /// Get absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Self {
            unscaled: self.unscaled.abs(),
        }
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    fn add_impl(&self, rhs: &Self) -> Self {
        Self {
            unscaled: &self.unscaled + &rhs.unscaled,
        }
    }

    fn sub_impl(&self, rhs: &Self) -> Self {
        Self {
            unscaled: &self.unscaled - &rhs.unscaled,
        }
    }

    fn mul_impl(&self, rhs: &Self) -> Self {
        Self {
            unscaled: (&self.unscaled * &rhs.unscaled) / Self::scale_factor(),
        }
    }

    /// Checked division, truncating toward zero.
    ///
    /// Computes `(self × 10^SCALE) / rhs` on the raw values.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> NumericResult<Self> {
        if rhs.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self {
            unscaled: (&self.unscaled * Self::scale_factor()) / &rhs.unscaled,
        })
    }

    /// Multiply by an integer (no scaling needed).
    #[inline]
    pub fn mul_int(&self, rhs: impl Into<BigInt>) -> Self {
        Self {
            unscaled: &self.unscaled * rhs.into(),
        }
    }

    /// Divide by a non-zero integer, truncating toward zero.
    ///
    /// Same result as `checked_div(&Decimal::from_integer(rhs))`, without the
    /// rescale round trip and without an error path.
    #[inline]
    pub fn div_int(&self, rhs: NonZeroU64) -> Self {
        Self {
            unscaled: &self.unscaled / BigInt::from(rhs.get()),
        }
    }

    // ========================================================================
    // Display Strings
    // ========================================================================

    /// Render with exactly two fractional digits, truncating.
    ///
    /// Raw values with no more digits than `SCALE` are left-padded to `SCALE`
    /// digits first and the fraction is the first two of those.
    pub fn to_display_string(&self) -> String {
        let digits = self.unscaled.magnitude().to_string();
        let scale = S as usize;
        let sign = if self.is_negative() { "-" } else { "" };

        let (int_part, frac_digits) = if digits.len() <= scale {
            ("0", format!("{:0>width$}", digits, width = scale))
        } else {
            let split = digits.len() - scale;
            (&digits[..split], digits[split..].to_string())
        };

        let mut frac: String = frac_digits.chars().take(2).collect();
        while frac.len() < 2 {
            frac.push('0');
        }

        format!("{}{}.{}", sign, int_part, frac)
    }

    /// Render large values as `D.RRRReE` using every integer digit.
    ///
    /// Values up to and including 1000 render exactly like
    /// [`to_display_string`](Self::to_display_string).
    pub fn to_scientific_string(&self) -> String {
        let threshold = Self::from_integer(1000);
        if self.unscaled <= threshold.unscaled {
            return self.to_display_string();
        }

        let digits = self.integer_part().to_string();
        let (lead, rest) = digits.split_at(1);
        format!("{}.{}e{}", lead, rest, digits.len() - 1)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<const S: u32> Default for Decimal<S> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

macro_rules! forward_binop {
    ($op:ident, $method:ident, $imp:ident) => {
        impl<'a, 'b, const S: u32> $op<&'b Decimal<S>> for &'a Decimal<S> {
            type Output = Decimal<S>;

            #[inline]
            fn $method(self, rhs: &'b Decimal<S>) -> Decimal<S> {
                self.$imp(rhs)
            }
        }

        impl<'b, const S: u32> $op<&'b Decimal<S>> for Decimal<S> {
            type Output = Decimal<S>;

            #[inline]
            fn $method(self, rhs: &'b Decimal<S>) -> Decimal<S> {
                self.$imp(rhs)
            }
        }

        impl<'a, const S: u32> $op<Decimal<S>> for &'a Decimal<S> {
            type Output = Decimal<S>;

            #[inline]
            fn $method(self, rhs: Decimal<S>) -> Decimal<S> {
                self.$imp(&rhs)
            }
        }

        impl<const S: u32> $op for Decimal<S> {
            type Output = Decimal<S>;

            #[inline]
            fn $method(self, rhs: Decimal<S>) -> Decimal<S> {
                self.$imp(&rhs)
            }
        }
    };
}

forward_binop!(Add, add, add_impl);
forward_binop!(Sub, sub, sub_impl);
forward_binop!(Mul, mul, mul_impl);

impl<const S: u32> Neg for Decimal<S> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            unscaled: -self.unscaled,
        }
    }
}

impl<'a, const S: u32> Neg for &'a Decimal<S> {
    type Output = Decimal<S>;

    #[inline]
    fn neg(self) -> Self::Output {
        Decimal {
            unscaled: -&self.unscaled,
        }
    }
}

impl<const S: u32> std::iter::Sum for Decimal<S> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl<const S: u32> fmt::Debug for Decimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal<{}>({})", S, self)
    }
}

/// Full precision: always `SCALE` fractional digits.
impl<const S: u32> fmt::Display for Decimal<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factor = Self::scale_factor();
        let magnitude = self.unscaled.abs();
        let int_part = &magnitude / &factor;
        let frac_part = (&magnitude % &factor).to_string();
        let sign = if self.is_negative() { "-" } else { "" };

        if S == 0 {
            write!(f, "{}{}", sign, int_part)
        } else {
            write!(
                f,
                "{}{}.{:0>width$}",
                sign,
                int_part,
                frac_part,
                width = S as usize
            )
        }
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<const S: u32> FromStr for Decimal<S> {
    type Err = NumericError;

    /// Parse from a decimal string.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - ".5" -> 0.5
    /// - "-0.001" -> -0.001
    /// - digits past SCALE are dropped, not rounded
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (is_negative, body) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        let (int_str, frac_str) = body.split_once('.').unwrap_or((body, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_str.is_empty() && frac_str.is_empty())
            || !all_digits(int_str)
            || !all_digits(frac_str)
        {
            return Err(NumericError::InvalidInput);
        }

        let scale = S as usize;
        let kept = &frac_str[..frac_str.len().min(scale)];

        let mut digits = String::with_capacity(int_str.len() + scale);
        digits.push_str(int_str);
        digits.push_str(kept);
        for _ in kept.len()..scale {
            digits.push('0');
        }

        let magnitude = if digits.is_empty() {
            BigInt::zero()
        } else {
            digits
                .parse::<BigInt>()
                .map_err(|_| NumericError::InvalidInput)?
        };

        Ok(Self {
            unscaled: if is_negative { -magnitude } else { magnitude },
        })
    }
}

// ============================================================================
// Serde (decimal string, never a float)
// ============================================================================

impl<const S: u32> Serialize for Decimal<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const S: u32> Deserialize<'de> for Decimal<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl<const S: u32> Decimal<S> {
    /// Convert from rust_decimal::Decimal, truncating digits past `SCALE`.
    pub fn from_rust_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        d.to_string().parse()
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// Intended for display and interop only; rust_decimal rounds once the
    /// value needs more than 28 significant digits.
    ///
    /// # Errors
    /// Returns `Overflow` if the integer part does not fit.
    pub fn to_rust_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        rust_decimal::Decimal::from_str(&self.to_string()).map_err(|_| NumericError::Overflow)
    }
}

// ============================================================================
// Type Aliases for Common Use Cases
// ============================================================================

/// Fractional digits carried by every in-game amount
pub const CURRENCY_SCALE: u32 = 16;

/// In-game currency and rate amounts
pub type Currency = Decimal<CURRENCY_SCALE>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    type D16 = Decimal<16>;

    fn d(s: &str) -> D16 {
        s.parse().unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(D16::SCALE, 16);
        assert_eq!(D16::zero().unscaled(), &BigInt::zero());
        assert_eq!(D16::one().unscaled(), &BigInt::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn test_from_integer() {
        let x = D16::from_integer(100);
        assert_eq!(x.integer_part(), BigInt::from(100));
        assert_eq!(x.to_string(), "100.0000000000000000");
    }

    #[test]
    fn test_from_scaled() {
        let x = D16::from_scaled(BigInt::from(5), 16).unwrap();
        assert_eq!(x.unscaled(), &BigInt::from(5));

        let err = D16::from_scaled(BigInt::from(5), 2).unwrap_err();
        assert_eq!(
            err,
            NumericError::ScaleMismatch {
                expected: 16,
                found: 2
            }
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(d("123.456").to_string(), "123.4560000000000000");
        assert_eq!(d("-0.001").to_string(), "-0.0010000000000000");
        assert_eq!(d("42"), D16::from_integer(42));
        assert_eq!(d(".5"), d("0.5"));
        assert_eq!(d("5."), D16::from_integer(5));
        assert_eq!(d("+7"), D16::from_integer(7));
        assert_eq!(d("  3.25 "), d("3.25"));
    }

    #[test]
    fn test_from_str_truncates_extra_digits() {
        // 17 fractional digits: the last one is dropped, not rounded
        let x = d("0.12345678901234569");
        assert_eq!(x.unscaled(), &BigInt::from(1_234_567_890_123_456u64));
    }

    #[test]
    fn test_from_str_invalid() {
        for bad in ["", ".", "-", "abc", "1.2.3", "1e5", "--1", "1-", "0x10", "1 000"] {
            assert_eq!(
                bad.parse::<D16>(),
                Err(NumericError::InvalidInput),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(D16::from_f64(1.0).unwrap(), D16::one());
        assert_eq!(D16::from_f64(0.1).unwrap(), d("0.1"));
        assert_eq!(D16::from_f64(1.5f64.powf(2.0)).unwrap(), d("2.25"));
        assert_eq!(D16::from_f64(f64::NAN), Err(NumericError::InvalidInput));
        assert_eq!(D16::from_f64(f64::INFINITY), Err(NumericError::InvalidInput));
    }

    #[test]
    fn test_from_f64_large_values_keep_all_digits() {
        let x = D16::from_f64(1e30).unwrap();
        assert_eq!(x.integer_part(), BigInt::from(10u32).pow(30));
    }

    #[test]
    fn test_add_sub() {
        assert_eq!((d("1") + d("2")).to_display_string(), "3.00");
        assert_eq!((d("2") - d("1")).to_display_string(), "1.00");

        // Subtraction is allowed to go negative
        let neg = &d("1") - &d("2.5");
        assert!(neg.is_negative());
        assert_eq!(neg.to_display_string(), "-1.50");
    }

    #[test]
    fn test_mul() {
        assert_eq!((d("123") * d("4")).to_display_string(), "492.00");
        assert_eq!((d("123") * d("123")).to_display_string(), "15129.00");
        assert_eq!((d("1.5") * d("1.5")), d("2.25"));
    }

    #[test]
    fn test_mul_truncates_toward_zero() {
        let tiny = D16::from_unscaled(BigInt::from(3));
        let half = d("0.5");
        // 3 * 0.5 = 1.5 raw units -> 1
        assert_eq!((&tiny * &half).unscaled(), &BigInt::from(1));
        // -1.5 raw units -> -1
        assert_eq!((-tiny * half).unscaled(), &BigInt::from(-1));
    }

    #[test]
    fn test_checked_div() {
        let x = d("123123123").checked_div(&d("2")).unwrap();
        assert_eq!(x.to_display_string(), "61561561.50");

        let third = d("1").checked_div(&d("3")).unwrap();
        assert_eq!(third.to_string(), "0.3333333333333333");

        assert_eq!(
            d("1").checked_div(&D16::zero()),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_int_helpers() {
        let rate = d("0.1");
        assert_eq!(rate.mul_int(3), d("0.3"));

        let per_tick = d("1.1").div_int(NonZeroU64::new(30).unwrap());
        assert_eq!(
            per_tick,
            d("1.1").checked_div(&D16::from_integer(30)).unwrap()
        );
    }

    #[test]
    fn test_comparison() {
        let a = d("100");
        let b = d("50");
        assert!(a > b);
        assert!(b <= a);
        assert!(a >= a.clone());
        assert_eq!(a.clone().min(b.clone()), b);
        assert_eq!(a.clone().max(b), a);
    }

    #[test]
    fn test_display_string() {
        assert_eq!(d("0.01").to_display_string(), "0.01");
        assert_eq!(d("12345").to_display_string(), "12345.00");
        assert_eq!(d("12345.6").to_display_string(), "12345.60");
        assert_eq!(d("12345.6789").to_display_string(), "12345.67");
        assert_eq!(D16::zero().to_display_string(), "0.00");
        assert_eq!(d("0.0099").to_display_string(), "0.00");
    }

    #[test]
    fn test_display_string_small_scales() {
        assert_eq!(Decimal::<0>::from_integer(7).to_display_string(), "7.00");
        assert_eq!("2.5".parse::<Decimal<1>>().unwrap().to_display_string(), "2.50");
        assert_eq!("0.5".parse::<Decimal<1>>().unwrap().to_display_string(), "0.50");
    }

    #[test]
    fn test_scientific_string() {
        assert_eq!(d("123").to_scientific_string(), "123.00");
        assert_eq!(d("1000").to_scientific_string(), d("1000").to_display_string());
        assert_eq!(d("1234").to_scientific_string(), "1.234e3");
        assert_eq!(d("1000.01").to_scientific_string(), "1.000e3");
        assert_eq!(d("98765432.99").to_scientific_string(), "9.8765432e7");
    }

    #[test]
    fn test_full_precision_display() {
        let x = d("-0.5");
        assert_eq!(x.to_string(), "-0.5000000000000000");
        assert_eq!(format!("{:?}", d("1")), "Decimal<16>(1.0000000000000000)");
        assert_eq!(Decimal::<0>::from_integer(-4).to_string(), "-4");
    }

    #[test]
    fn test_serde_uses_strings() {
        let x = d("12345678901234567890.0000000000000001");
        let json = serde_json::to_string(&x).unwrap();
        assert_eq!(json, "\"12345678901234567890.0000000000000001\"");

        let back: D16 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, x);

        assert!(serde_json::from_str::<D16>("\"nope\"").is_err());
        assert!(serde_json::from_str::<D16>("1.5").is_err());
    }

    #[test]
    fn test_rust_decimal_interop() {
        let rd = rust_decimal::Decimal::new(12345, 2); // 123.45
        let x = D16::from_rust_decimal(rd).unwrap();
        assert_eq!(x, d("123.45"));
        assert_eq!(x.to_rust_decimal().unwrap().normalize().to_string(), "123.45");

        let huge = D16::from_integer(BigInt::from(10u32).pow(30));
        assert_eq!(huge.to_rust_decimal(), Err(NumericError::Overflow));
    }

    #[test]
    fn test_sum() {
        let total: D16 = ["0.1", "0.2", "0.3"].iter().map(|s| d(s)).sum();
        assert_eq!(total, d("0.6"));
    }

    #[test]
    fn test_quickcheck_add_commutes() {
        fn prop(a: i64, b: i64) -> bool {
            let a = D16::from_unscaled(BigInt::from(a));
            let b = D16::from_unscaled(BigInt::from(b));
            &a + &b == &b + &a
        }
        quickcheck::quickcheck(prop as fn(i64, i64) -> bool);
    }

    #[test]
    fn test_quickcheck_integer_display() {
        fn prop(n: u32) -> bool {
            D16::from_integer(n).to_display_string() == format!("{}.00", n)
        }
        quickcheck::quickcheck(prop as fn(u32) -> bool);
    }
}
