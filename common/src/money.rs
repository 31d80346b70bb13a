//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

/// Non-negative amount of money in Russian rubles.
///
/// Displayed with thousands separated by spaces and a trailing ruble sign,
/// the way prices are rendered on the site: `1 250 000 ₽`.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(into = "Decimal", try_from = "Decimal")
)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] by checking the provided amount is
    /// non-negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount < Decimal::ZERO {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(amount) })
        }
    }

    /// Creates a new [`Price`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided amount must be non-negative.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the amount of this [`Price`] in rubles.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let truncated = self.0.trunc();
        let digits = truncated.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }
        write!(f, "{grouped} ₽")
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = &'static str;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("negative price")
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Price`")
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Price;

    fn price(amount: i64) -> Price {
        Price::new(Decimal::from(amount)).unwrap()
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(Price::new(Decimal::from(-1)).is_none());
        assert!(Price::new(Decimal::ZERO).is_some());
    }

    #[test]
    fn groups_thousands_in_display() {
        assert_eq!(price(0).to_string(), "0 ₽");
        assert_eq!(price(950).to_string(), "950 ₽");
        assert_eq!(price(1_250_000).to_string(), "1 250 000 ₽");
        assert_eq!(price(85_000).to_string(), "85 000 ₽");
    }

    #[test]
    fn from_str() {
        assert_eq!("1250000".parse::<Price>().unwrap(), price(1_250_000));
        assert!("-5".parse::<Price>().is_err());
        assert!("abc".parse::<Price>().is_err());
    }
}
