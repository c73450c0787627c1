//! Exact money arithmetic in minor units.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value_object::ValueObject;

/// Minor units per major currency unit (two decimal places).
const SCALE: i64 = 100;

/// Monetary amount stored as a signed count of minor units (e.g. paisa, cents).
///
/// Sums, splits and clamps are integer operations, so totals never drift the
/// way repeated floating-point rounding does. On the wire the amount is a JSON
/// number in major units (`1250.5`).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Convert a major-unit float, rounding to the nearest minor unit.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn from_major(major: f64) -> Option<Self> {
        if !major.is_finite() {
            return None;
        }
        Some(Self((major * SCALE as f64).round() as i64))
    }

    /// Lenient parse of human-entered money text.
    ///
    /// Keeps only ASCII digits, `.`, `+` and `-`, then reads the longest leading
    /// decimal number. Anything unparsable is zero.
    pub fn parse_lossy(text: &str) -> Self {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
            .collect();
        parse_decimal_prefix(&cleaned)
            .and_then(Self::from_major)
            .unwrap_or(Self::ZERO)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `max(0, self)`.
    pub fn clamp_non_negative(self) -> Self {
        self.max(Self::ZERO)
    }

    /// Multiply by a (possibly fractional) quantity, rounding to minor units.
    pub fn times(self, qty: f64) -> Self {
        let product = self.0 as f64 * qty;
        if !product.is_finite() {
            return Self::ZERO;
        }
        Self(product.round() as i64)
    }

    /// Split into `parts` amounts that sum back to `self` exactly.
    ///
    /// Every part but the last is `round2(self / parts)`; the last absorbs the
    /// remainder. `parts == 0` yields an empty list.
    pub fn split_evenly(self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }
        let n = parts as i128;
        let total = self.0 as i128;
        // floor(total / n + 1/2): half-way values round toward +inf.
        let share = (2 * total + n).div_euclid(2 * n) as i64;

        let mut out = vec![Money(share); parts - 1];
        let allocated: i64 = share.saturating_mul(parts as i64 - 1);
        out.push(Money(self.0.saturating_sub(allocated)));
        out
    }
}

/// Read the longest leading decimal number (`[+-]?digits[.digits]`).
///
/// At least one digit is required. Exponents are not recognised. Trailing text
/// after the number is ignored, so `"12-5"` reads as `12` and `"1.2.3"` as `1.2`.
pub fn parse_decimal_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    let mut number = text[..end].to_string();
    // "-.5" and "+.5" need a leading zero for the std parser.
    if number[int_start..].starts_with('.') {
        number.insert(int_start, '0');
    }
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        write!(f, "{sign}{}.{:02}", abs / scale, abs % scale)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Money::from_major(major)
            .ok_or_else(|| serde::de::Error::custom("money amount must be finite"))
    }
}
