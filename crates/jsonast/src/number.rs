//! Numeric values.
//!
//! JSON numbers become either an `i64` (plain digit runs) or a [`Decimal`]
//! (anything with a fraction or exponent). Decimals are exact: the digits of
//! the source text are kept in a `BigInt` coefficient together with a base-10
//! scale, so `123.01` prints back as `123.01` and never passes through binary
//! floating point.

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};
use thiserror::Error;

/// An arbitrary-precision decimal: `coefficient × 10^-scale`.
///
/// The scale written in the source is preserved (`1.50` keeps two fractional
/// digits), while equality and ordering compare numeric values (`1.5 == 1.50`).
#[derive(Debug, Clone)]
pub struct Decimal {
    coefficient: BigInt,
    scale: i64,
}

/// Why a decimal literal or construction was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    #[error("decimal literal has no digits")]
    NoDigits,
    #[error("decimal literal contains an invalid character")]
    InvalidCharacter,
    #[error("decimal exponent is out of range")]
    ExponentOutOfRange,
    #[error("decimal scale exceeds {} digits", Decimal::MAX_SCALE)]
    ScaleOutOfRange,
}

impl Decimal {
    /// Largest accepted magnitude of the scale. Plain notation writes at most
    /// this many padding zeros.
    pub const MAX_SCALE: u64 = 1 << 20;

    /// Exponent bound used by [`FromStr`] and the default parse options.
    pub const DEFAULT_MAX_EXPONENT: u64 = 1024;

    /// `coefficient × 10^-scale`, rejecting scales beyond [`Decimal::MAX_SCALE`].
    pub fn new(coefficient: impl Into<BigInt>, scale: i64) -> Result<Self, DecimalError> {
        if scale.unsigned_abs() > Self::MAX_SCALE {
            return Err(DecimalError::ScaleOutOfRange);
        }
        Ok(Self {
            coefficient: coefficient.into(),
            scale,
        })
    }

    /// The unscaled digits, with sign.
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    /// Number of digits after the decimal point; negative for trailing zeros
    /// folded out of an exponent.
    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.coefficient.is_negative()
    }

    /// Nearest `f64`, or `None` when the value is outside the `f64` range.
    pub fn to_f64(&self) -> Option<f64> {
        match self.leading_exponent() {
            _ if self.is_zero() => return Some(0.0),
            e if e > 309 => return None,
            e if e < -400 => return Some(if self.is_negative() { -0.0 } else { 0.0 }),
            _ => {}
        }
        let approx: f64 = self.to_string().parse().ok()?;
        approx.is_finite().then_some(approx)
    }

    /// Parse a decimal literal, rejecting exponents whose magnitude exceeds
    /// `max_exponent`.
    pub fn parse_bounded(text: &str, max_exponent: u64) -> Result<Self, DecimalError> {
        let (decimal, exponent) = parse_literal(text)?;
        if exponent.unsigned_abs() > max_exponent {
            return Err(DecimalError::ExponentOutOfRange);
        }
        Ok(decimal)
    }

    /// Decimal exponent of the leading digit (`123.4` → 2, `0.05` → -2).
    fn leading_exponent(&self) -> i128 {
        let digits = self.coefficient.magnitude().to_string().len() as i128;
        digits - 1 - i128::from(self.scale)
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let by_exponent = self.leading_exponent().cmp(&other.leading_exponent());
        if by_exponent != Ordering::Equal {
            return by_exponent;
        }
        // Same leading exponent: the scales differ by at most the digit counts.
        let (a, b) = (self.coefficient.magnitude(), other.coefficient.magnitude());
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => a.cmp(b),
            Ordering::Less => (a * pow10(other.scale.abs_diff(self.scale))).cmp(b),
            Ordering::Greater => a.cmp(&(b * pow10(self.scale.abs_diff(other.scale)))),
        }
    }
}

fn pow10(exponent: u64) -> BigUint {
    num_traits::pow(BigUint::from(10u8), exponent as usize)
}

/// Split `[+-]digits[.digits][(e|E)[+-]digits]` into a decimal and the written exponent.
fn parse_literal(text: &str) -> Result<(Decimal, i64), DecimalError> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let (integer, fraction) = match mantissa.split_once('.') {
        Some((_, "")) => return Err(DecimalError::NoDigits),
        Some((integer, fraction)) => (integer, fraction),
        None => (mantissa, ""),
    };

    if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::InvalidCharacter);
    }
    if integer.is_empty() && fraction.is_empty() {
        return Err(DecimalError::NoDigits);
    }

    let exponent = match exponent {
        None => 0,
        Some(raw) => parse_exponent(raw)?,
    };

    let scale = (fraction.len() as i64)
        .checked_sub(exponent)
        .ok_or(DecimalError::ExponentOutOfRange)?;
    if scale.unsigned_abs() > Decimal::MAX_SCALE {
        return Err(DecimalError::ScaleOutOfRange);
    }

    let digits = format!("{integer}{fraction}");
    let magnitude =
        BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(DecimalError::InvalidCharacter)?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    let coefficient = BigInt::from_biguint(sign, magnitude);

    Ok((Decimal { coefficient, scale }, exponent))
}

fn parse_exponent(raw: &str) -> Result<i64, DecimalError> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() {
        return Err(DecimalError::NoDigits);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::InvalidCharacter);
    }
    raw.parse::<i64>()
        .map_err(|_| DecimalError::ExponentOutOfRange)
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse_bounded(s, Decimal::DEFAULT_MAX_EXPONENT)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            coefficient: value.into(),
            scale: 0,
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = (self.coefficient.sign(), other.coefficient.sign());
        if lhs != rhs {
            return lhs.cmp(&rhs);
        }
        match lhs {
            Sign::NoSign => Ordering::Equal,
            Sign::Plus => self.cmp_magnitude(other),
            Sign::Minus => self.cmp_magnitude(other).reverse(),
        }
    }
}

/// Plain positional notation: no exponent, no grouping, `.` as separator, and
/// exactly `scale` fractional digits.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.coefficient.magnitude().to_string();
        if self.coefficient.is_negative() {
            f.write_char('-')?;
        }

        if self.scale <= 0 {
            f.write_str(&digits)?;
            if !self.coefficient.is_zero() {
                for _ in 0..self.scale.unsigned_abs() {
                    f.write_char('0')?;
                }
            }
            return Ok(());
        }

        let scale = self.scale.unsigned_abs() as usize;
        if digits.len() > scale {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            write!(f, "{integer}.{fraction}")
        } else {
            f.write_str("0.")?;
            for _ in digits.len()..scale {
                f.write_char('0')?;
            }
            f.write_str(&digits)
        }
    }
}

/// A JSON number.
///
/// Integers and decimals stay distinct so each prints back exactly as parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Number {
    Integer(i64),
    Decimal(Decimal),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(n) => Some(*n),
            Number::Decimal(_) => None,
        }
    }

    /// The value as a decimal, widening integers.
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Number::Integer(n) => Decimal::from(*n),
            Number::Decimal(d) => d.clone(),
        }
    }

    /// Nearest `f64`; see [`Decimal::to_f64`].
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Number::Integer(n) => Some(*n as f64),
            Number::Decimal(d) => d.to_f64(),
        }
    }
}

/// JSON text for the number. A decimal without fraction digits gets a `.0`
/// suffix so it reads back as a decimal rather than an integer.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Decimal(d) if d.scale() <= 0 => write!(f, "{d}.0"),
            Number::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value.into())
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::Decimal(value)
    }
}
