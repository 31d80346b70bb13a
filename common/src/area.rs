//! [`Area`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

/// Positive land area in square meters.
///
/// Displayed in sotkas (hundreds of square meters) below one hectare and in
/// hectares from one hectare up, matching how plot sizes are advertised:
/// `6.0 сот.`, `1.5 га`.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(into = "Decimal", try_from = "Decimal")
)]
pub struct Area(Decimal);

impl Area {
    /// Square meters in one hectare.
    const M2_IN_HECTARE: i64 = 10_000;

    /// Square meters in one sotka.
    const M2_IN_SOTKA: i64 = 100;

    /// Creates a new [`Area`] by checking the provided amount of square
    /// meters is positive.
    #[must_use]
    pub fn new(m2: Decimal) -> Option<Self> {
        if m2 <= Decimal::ZERO {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(m2) })
        }
    }

    /// Creates a new [`Area`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided amount of square meters must be positive.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(m2: Decimal) -> Self {
        Self(m2)
    }

    /// Returns this [`Area`] in square meters.
    #[must_use]
    pub fn m2(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= Decimal::from(Self::M2_IN_HECTARE) {
            write!(f, "{:.1} га", self.0 / Decimal::from(Self::M2_IN_HECTARE))
        } else {
            write!(f, "{:.1} сот.", self.0 / Decimal::from(Self::M2_IN_SOTKA))
        }
    }
}

impl From<Area> for Decimal {
    fn from(area: Area) -> Self {
        area.0
    }
}

impl TryFrom<Decimal> for Area {
    type Error = &'static str;

    fn try_from(m2: Decimal) -> Result<Self, Self::Error> {
        Self::new(m2).ok_or("non-positive area")
    }
}

impl FromStr for Area {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Area`")
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Area;

    fn area(m2: &str) -> Area {
        Area::new(m2.parse().unwrap()).unwrap()
    }

    #[test]
    fn rejects_non_positive() {
        assert!(Area::new(Decimal::ZERO).is_none());
        assert!(Area::new(Decimal::from(-100)).is_none());
        assert!(Area::new(Decimal::from(100)).is_some());
    }

    #[test]
    fn displays_sotkas_below_hectare() {
        assert_eq!(area("600").to_string(), "6.0 сот.");
        assert_eq!(area("1250").to_string(), "12.5 сот.");
        assert_eq!(area("9900").to_string(), "99.0 сот.");
    }

    #[test]
    fn displays_hectares_from_hectare_up() {
        assert_eq!(area("10000").to_string(), "1.0 га");
        assert_eq!(area("15000").to_string(), "1.5 га");
        assert_eq!(area("125000").to_string(), "12.5 га");
    }
}
