//! Settlement resolution definitions.

use std::str::FromStr;

use common::geo::Point;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::location;

/// Search input of a settlement lookup.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[as_ref(str, String)]
pub struct Query(String);

impl Query {
    /// Minimum number of characters a [`Query`] makes sense with.
    pub const MIN_LEN: usize = 2;

    /// Creates a new [`Query`] from the given raw user input, trimming the
    /// surrounding whitespace.
    ///
    /// Returns [`None`] if the trimmed input is shorter than
    /// [`Query::MIN_LEN`] characters.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let raw = raw.as_ref().trim();
        (raw.chars().count() >= Self::MIN_LEN)
            .then(|| Self(raw.to_owned()))
    }
}

impl FromStr for Query {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Query`")
    }
}

/// Single address suggestion returned by the hints provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Suggestion {
    /// Full human-readable address of this [`Suggestion`].
    pub value: String,

    /// Structured [`Address`] payload of this [`Suggestion`].
    #[serde(default)]
    pub data: Address,
}

impl Suggestion {
    /// Extracts the bare settlement name this [`Suggestion`] points at.
    ///
    /// The structured payload names the settlement either in its
    /// `settlement` field (villages, townships) or in `city` (towns).
    /// A [`Suggestion`] with neither doesn't describe a settlement at all
    /// and cannot be used.
    #[must_use]
    pub fn name(&self) -> Option<location::Name> {
        self.data
            .settlement
            .as_deref()
            .or(self.data.city.as_deref())
            .and_then(location::Name::new)
    }

    /// Geographic coordinates of this [`Suggestion`], if the payload carries
    /// them.
    #[must_use]
    pub fn coordinates(&self) -> Option<Point> {
        let lat = self.data.geo_lat.as_deref()?.parse().ok()?;
        let lon = self.data.geo_lon.as_deref()?.parse().ok()?;
        Some(Point { lat, lon })
    }

    /// Builds a [`Draft`] out of this [`Suggestion`].
    ///
    /// Returns [`None`] if the [`Suggestion`] names no settlement.
    #[must_use]
    pub fn draft(&self) -> Option<Draft> {
        Some(Draft {
            name: self.name()?,
            fias_id: self.data.fias_id,
            point: self.coordinates(),
        })
    }
}

/// Structured address payload of a [`Suggestion`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Address {
    /// Settlement name without its type prefix.
    #[serde(default)]
    pub settlement: Option<String>,

    /// Settlement name along with its type prefix (`пос. Янтарный`).
    #[serde(default)]
    pub settlement_with_type: Option<String>,

    /// City name without its type prefix.
    #[serde(default)]
    pub city: Option<String>,

    /// City name along with its type prefix (`г. Зеленоградск`).
    #[serde(default)]
    pub city_with_type: Option<String>,

    /// FIAS ID of the addressed object.
    #[serde(default)]
    pub fias_id: Option<Uuid>,

    /// KLADR ID of the addressed object.
    #[serde(default)]
    pub kladr_id: Option<String>,

    /// Latitude of the addressed object.
    #[serde(default)]
    pub geo_lat: Option<String>,

    /// Longitude of the addressed object.
    #[serde(default)]
    pub geo_lon: Option<String>,
}

/// Settlement record to be resolved into a canonical location entry.
#[derive(Clone, Debug, Serialize)]
pub struct Draft {
    /// [`location::Name`] of the settlement.
    pub name: location::Name,

    /// FIAS ID of the settlement, if known.
    pub fias_id: Option<Uuid>,

    /// Coordinates of the settlement, if known.
    pub point: Option<Point>,
}

#[cfg(test)]
mod spec {
    use super::{Address, Query, Suggestion};

    fn suggestion(settlement: Option<&str>, city: Option<&str>) -> Suggestion {
        Suggestion {
            value: "Калининградская обл".into(),
            data: Address {
                settlement: settlement.map(Into::into),
                city: city.map(Into::into),
                ..Address::default()
            },
        }
    }

    #[test]
    fn query_requires_two_characters() {
        assert_eq!(Query::new("я"), None);
        assert_eq!(Query::new("  я  "), None);
        assert_eq!(
            Query::new(" ян ").as_ref().map(AsRef::as_ref),
            Some("ян"),
        );
    }

    #[test]
    fn name_prefers_settlement_over_city() {
        let s = suggestion(Some("Янтарный"), Some("Калининград"));
        assert_eq!(s.name().as_ref().map(AsRef::as_ref), Some("Янтарный"));
    }

    #[test]
    fn name_falls_back_to_city() {
        let s = suggestion(None, Some("Зеленоградск"));
        assert_eq!(s.name().as_ref().map(AsRef::as_ref), Some("Зеленоградск"));
    }

    #[test]
    fn suggestion_without_settlement_names_nothing() {
        let s = suggestion(None, None);
        assert_eq!(s.name(), None);
        assert!(s.draft().is_none());
    }
}
