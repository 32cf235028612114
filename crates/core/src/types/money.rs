//! Money amounts in integer cents.
//!
//! Orders store Stripe-style `unit_amount` values and product prices are
//! persisted the same way, so the canonical representation is an integer
//! number of cents. Conversion to currency units happens through
//! [`rust_decimal::Decimal`] to keep revenue arithmetic exact.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Cents`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is negative.
    #[error("amount cannot be negative")]
    Negative,
    /// The amount does not fit in 64-bit cents.
    #[error("amount is out of range")]
    OutOfRange,
}

/// A non-negative money amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a raw cent count.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`] for negative inputs.
    pub const fn new(cents: i64) -> Result<Self, MoneyError> {
        if cents < 0 {
            return Err(MoneyError::Negative);
        }
        Ok(Self(cents))
    }

    /// Convert a currency-unit amount (e.g. `49.99`) into cents,
    /// rounding to the nearest whole cent.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or does not fit in i64 cents.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        let cents = (amount * Decimal::from(100)).round();
        let raw = cents.to_i64().ok_or(MoneyError::OutOfRange)?;
        Ok(Self(raw))
    }

    /// Get the raw cent count.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// The amount in currency units, exact to two decimal places.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

/// Format a currency amount for display: rounded to at most two decimal
/// places, trailing zeros dropped, integer digits grouped in threes.
///
/// ```
/// use rust_decimal::Decimal;
/// use stockroom_core::format_amount;
///
/// assert_eq!(format_amount(Decimal::new(2500, 2)), "25");
/// assert_eq!(format_amount(Decimal::new(123_456_789, 2)), "1 234 567.89");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let text = rounded.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let negative = int_part.starts_with('-');
    let digits = int_part.trim_start_matches('-');

    let mut out = String::with_capacity(text.len() + digits.len() / 3);
    if negative {
        out.push('-');
    }
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

// SQLx support (with postgres feature): stored as BIGINT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Cents {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Cents {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Self::new(raw).map_err(Into::into)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Cents {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert_eq!(Cents::new(-1), Err(MoneyError::Negative));
        assert!(Cents::new(0).is_ok());
    }

    #[test]
    fn test_from_decimal_rounds_to_whole_cents() {
        let cents = Cents::from_decimal(Decimal::new(49_995, 3)).unwrap(); // 49.995
        assert_eq!(cents.as_i64(), 5000);

        let cents = Cents::from_decimal(Decimal::new(1999, 2)).unwrap(); // 19.99
        assert_eq!(cents.as_i64(), 1999);
    }

    #[test]
    fn test_from_decimal_rejects_negative() {
        assert_eq!(
            Cents::from_decimal(Decimal::new(-100, 2)),
            Err(MoneyError::Negative)
        );
    }

    #[test]
    fn test_to_decimal_two_places() {
        let cents = Cents::new(1250).unwrap();
        assert_eq!(cents.to_decimal().to_string(), "12.50");
        assert_eq!(cents.to_string(), "12.50");
    }

    #[test]
    fn test_format_amount_integer() {
        assert_eq!(format_amount(Decimal::new(2500, 2)), "25");
        assert_eq!(format_amount(Decimal::ZERO), "0");
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(Decimal::from(1000)), "1 000");
        assert_eq!(format_amount(Decimal::new(123_456_789, 2)), "1 234 567.89");
    }

    #[test]
    fn test_format_amount_trims_trailing_zeros() {
        assert_eq!(format_amount(Decimal::new(12_345_50, 2)), "12 345.5");
    }

    #[test]
    fn test_format_amount_rounds_to_two_places() {
        assert_eq!(format_amount(Decimal::new(9_999, 3)), "10");
        assert_eq!(format_amount(Decimal::new(1_2345, 4)), "1.23");
    }
}
