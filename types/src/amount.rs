//! Token amount type.
//!
//! Amounts are fixed-point integers (u128) with 18 fractional decimal digits to
//! avoid floating-point errors. The smallest unit is 1 raw; one whole token is
//! [`TOKEN_UNIT`] raw.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

/// Number of fractional decimal digits in a [`TokenAmount`].
pub const TOKEN_DECIMALS: u32 = 18;

/// Raw units per whole token (10^18).
pub const TOKEN_UNIT: u128 = 10u128.pow(TOKEN_DECIMALS);

/// An amount of the ledger's token, stored as raw units.
///
/// Serializes as a decimal string of raw units so JSON consumers never lose
/// precision; deserialization also accepts integer numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Amount of `whole` tokens. Cannot overflow: `u64::MAX * 10^18 < u128::MAX`.
    pub const fn from_tokens(whole: u64) -> Self {
        Self(whole as u128 * TOKEN_UNIT)
    }


    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole-token part, discarding the fraction.
    pub const fn whole_tokens(&self) -> u128 {
        self.0 / TOKEN_UNIT
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `floor(self * numerator / denominator)` without forming the full
    /// product.
    ///
    /// Split as `q * n + r * n / d` with `self = q * d + r`; `r * n` is below
    /// `u64::MAX²` and always fits. Returns `None` when `denominator` is zero
    /// or the result itself exceeds u128.
    pub fn checked_mul_div(self, numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let (n, d) = (numerator as u128, denominator as u128);
        let (q, r) = (self.0 / d, self.0 % d);
        q.checked_mul(n)?.checked_add(r * n / d).map(Self)
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct RawAmountVisitor;

impl<'de> Visitor<'de> for RawAmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("raw token units as a decimal string or unsigned integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<u128>().map(TokenAmount).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TokenAmount(v as u128))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(TokenAmount(v))
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawAmountVisitor)
    }
}

/// Renders as a decimal with trailing fractional zeros trimmed, e.g. `1.5 VXT`.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / TOKEN_UNIT;
        let frac = self.0 % TOKEN_UNIT;
        if frac == 0 {
            write!(f, "{whole} VXT")
        } else {
            let digits = format!("{:0width$}", frac, width = TOKEN_DECIMALS as usize);
            write!(f, "{whole}.{} VXT", digits.trim_end_matches('0'))
        }
    }
}
