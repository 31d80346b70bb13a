//! Location read models.

use common::Slug;
use derive_more::Deref;
use serde::{Deserialize, Serialize};

use crate::domain::location;

/// Canonical location entry, either a district or a settlement.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Location {
    /// ID of this [`Location`].
    pub id: location::Id,

    /// Display name of this [`Location`].
    pub name: String,

    /// URL [`Slug`] of this [`Location`].
    pub slug: Slug,
}

/// Whole districts-and-settlements hierarchy of the catalog.
#[derive(Clone, Debug, Default, Deref, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Tree(Vec<District>);

impl Tree {
    /// Looks up a [`District`] of this [`Tree`] by its slug.
    #[must_use]
    pub fn district(&self, slug: &Slug) -> Option<&District> {
        self.0.iter().find(|d| &d.slug == slug)
    }

    /// Looks up a settlement by its slug along with the [`District`] it
    /// belongs to.
    #[must_use]
    pub fn settlement(
        &self,
        district: &Slug,
        settlement: &Slug,
    ) -> Option<(&District, &Settlement)> {
        let district = self.district(district)?;
        district.settlement(settlement).map(|s| (district, s))
    }

    /// Total number of published listings across the whole [`Tree`].
    #[must_use]
    pub fn listings(&self) -> u64 {
        self.0.iter().map(|d| d.listings).sum()
    }
}

impl FromIterator<District> for Tree {
    fn from_iter<I: IntoIterator<Item = District>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// District node of a locations [`Tree`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct District {
    /// ID of this [`District`].
    pub id: location::Id,

    /// Display name of this [`District`].
    pub name: String,

    /// URL [`Slug`] of this [`District`].
    pub slug: Slug,

    /// Number of published listings in this [`District`].
    #[serde(default)]
    pub listings: u64,

    /// [`Settlement`]s of this [`District`] having published listings.
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl District {
    /// Looks up a [`Settlement`] of this [`District`] by its slug.
    #[must_use]
    pub fn settlement(&self, slug: &Slug) -> Option<&Settlement> {
        self.settlements.iter().find(|s| &s.slug == slug)
    }

    /// IDs of all [`Settlement`]s of this [`District`], the selection a
    /// whole-district filter expands into.
    #[must_use]
    pub fn settlement_ids(&self) -> Vec<location::Id> {
        self.settlements.iter().map(|s| s.id).collect()
    }
}

/// Settlement node of a locations [`Tree`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settlement {
    /// ID of this [`Settlement`].
    pub id: location::Id,

    /// Display name of this [`Settlement`].
    pub name: String,

    /// URL [`Slug`] of this [`Settlement`].
    pub slug: Slug,

    /// Number of published listings in this [`Settlement`].
    #[serde(default)]
    pub listings: u64,
}

/// Locations a pair of catalog path slugs resolves into.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Resolved {
    /// Resolved district.
    pub district: Location,

    /// Resolved settlement, if the path nails one down.
    pub settlement: Option<Location>,
}

/// Selector of a [`Resolved`] location.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Selector {
    /// [`Slug`] of the district to resolve.
    pub district: Slug,

    /// [`Slug`] of the settlement to resolve inside the district.
    pub settlement: Option<Slug>,
}

#[cfg(test)]
mod tree_spec {
    use super::{District, Settlement, Tree};

    fn tree() -> Tree {
        [
            District {
                id: 1.into(),
                name: "Зеленоградский округ".into(),
                slug: "zelenogradsk".parse().unwrap(),
                listings: 7,
                settlements: vec![Settlement {
                    id: 11.into(),
                    name: "Янтарный".into(),
                    slug: "yantarnyy".parse().unwrap(),
                    listings: 3,
                }],
            },
            District {
                id: 2.into(),
                name: "Гурьевский округ".into(),
                slug: "guryevsk".parse().unwrap(),
                listings: 5,
                settlements: Vec::new(),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn finds_district_and_settlement_by_slugs() {
        let tree = tree();

        let guryevsk = tree.district(&"guryevsk".parse().unwrap());
        assert_eq!(guryevsk.map(|d| i64::from(d.id)), Some(2));

        let found = tree.settlement(
            &"zelenogradsk".parse().unwrap(),
            &"yantarnyy".parse().unwrap(),
        );
        assert_eq!(found.map(|(_, s)| i64::from(s.id)), Some(11));

        assert!(tree
            .settlement(
                &"guryevsk".parse().unwrap(),
                &"yantarnyy".parse().unwrap(),
            )
            .is_none());
    }

    #[test]
    fn counts_listings_across_districts() {
        assert_eq!(tree().listings(), 12);
    }

    #[test]
    fn expands_district_into_settlement_ids() {
        let tree = tree();
        let zelenogradsk =
            tree.district(&"zelenogradsk".parse().unwrap()).unwrap();
        assert_eq!(
            zelenogradsk
                .settlement_ids()
                .into_iter()
                .map(i64::from)
                .collect::<Vec<_>>(),
            [11],
        );
    }
}
