//! Map viewport read models.

use common::{
    geo::{Bounds, Point, Zoom},
    Area, Price,
};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::listing::{self, CadastralNumber, Status};

/// Parameters of one viewport query.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    /// Geographic [`Bounds`] of the viewport.
    pub bounds: Bounds,

    /// [`Zoom`] level of the viewport.
    pub zoom: Zoom,

    /// Catalog filter the map is narrowed with.
    pub filter: super::listing::list::Filter,
}

/// Payload of a viewport query.
///
/// Which of the two marker lists is populated follows the requested
/// [`Zoom`]: clusters below the clustering threshold, plots at it and above.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Page {
    /// [`Zoom`] this payload was built for.
    pub zoom: Zoom,

    /// [`Cluster`] markers of the viewport.
    #[serde(default)]
    pub clusters: Vec<Cluster>,

    /// [`Plot`] markers of the viewport.
    #[serde(default)]
    pub plots: Vec<Plot>,

    /// Total number of published plots within the viewport.
    #[serde(default, rename = "total_in_viewport")]
    pub total: u64,
}

/// Aggregated marker of plots packed in a map area.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Cluster {
    /// Centroid of the clustered plots.
    pub center: Point,

    /// Number of plots behind this [`Cluster`].
    pub count: u64,

    /// [`Bounds`] enclosing the clustered plots, for zoom-to-cluster.
    #[serde(default, with = "corners")]
    pub bounds: Option<Bounds>,

    /// [`Price`] range of the clustered plots.
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

/// Price range of a [`Cluster`], a `[min, max]` pair on the wire.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(from = "(Price, Price)", into = "(Price, Price)")]
pub struct PriceRange {
    /// Cheapest clustered plot.
    pub min: Price,

    /// Priciest clustered plot.
    pub max: Price,
}

impl From<(Price, Price)> for PriceRange {
    fn from((min, max): (Price, Price)) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for (Price, Price) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

/// ID of a [`Plot`] marker.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(i64);

/// Single plot marker of the map.
///
/// Everything beyond the ID is optional on the wire: an unpublished price or
/// a missing cadastral number never invalidates the whole [`Page`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Plot {
    /// ID of this [`Plot`].
    pub id: Id,

    /// [`CadastralNumber`] of this [`Plot`], if stated.
    #[serde(default)]
    pub cadastral_number: Option<CadastralNumber>,

    /// [`Area`] of this [`Plot`], if stated.
    #[serde(default)]
    pub area: Option<Area>,

    /// Publicly visible [`Price`] of this [`Plot`], if published.
    #[serde(default, rename = "price_public")]
    pub price: Option<Price>,

    /// Sale [`Status`] of this [`Plot`].
    #[serde(default)]
    pub status: Status,

    /// Boundary of this [`Plot`], an ordered ring of vertices.
    #[serde(default, rename = "polygon_coords")]
    pub polygon: Vec<Point>,

    /// ID of the listing offering this [`Plot`], once one exists.
    #[serde(default)]
    pub listing_id: Option<listing::Id>,
}

mod corners {
    //! `[[south, west], [north, east]]` wire representation of [`Bounds`].

    use common::geo::Bounds;
    use serde::{
        de::Error as _, Deserialize as _, Deserializer, Serialize as _,
        Serializer,
    };

    pub(super) fn serialize<S: Serializer>(
        bounds: &Option<Bounds>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        bounds
            .map(|b| [[b.south(), b.west()], [b.north(), b.east()]])
            .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Bounds>, D::Error> {
        Option::<[[f64; 2]; 2]>::deserialize(deserializer)?
            .map(|[[south, west], [north, east]]| {
                Bounds::new(north, south, east, west)
                    .ok_or_else(|| D::Error::custom("invalid cluster bounds"))
            })
            .transpose()
    }
}

#[cfg(test)]
mod spec {
    use super::Page;

    #[test]
    fn plot_without_published_price_decodes() {
        let page: Page = serde_json::from_str(
            r#"{
                "zoom": 14,
                "plots": [
                    {
                        "id": 5,
                        "cadastral_number": "39:03:010203:45",
                        "area": 600,
                        "price_public": 250000,
                        "status": "active",
                        "polygon_coords": [[54.69, 20.49], [54.71, 20.51]],
                        "listing_id": 7
                    },
                    {"id": 6, "status": "reserved", "polygon_coords": []}
                ],
                "total_in_viewport": 2
            }"#,
        )
        .unwrap();

        assert_eq!(page.plots.len(), 2);
        let bare = &page.plots[1];
        assert_eq!(bare.id, 6.into());
        assert!(bare.price.is_none());
        assert!(bare.area.is_none());
        assert!(bare.cadastral_number.is_none());
        assert!(bare.listing_id.is_none());
    }

    #[test]
    fn cluster_corners_and_price_pair_decode() {
        let page: Page = serde_json::from_str(
            r#"{
                "zoom": 11,
                "clusters": [{
                    "center": [54.7, 20.45],
                    "count": 8,
                    "bounds": [[54.6, 20.3], [54.8, 20.6]],
                    "price_range": [250000, 990000]
                }],
                "total_in_viewport": 8
            }"#,
        )
        .unwrap();

        let cluster = &page.clusters[0];
        let bounds = cluster.bounds.unwrap();
        assert_eq!(bounds.south(), 54.6);
        assert_eq!(bounds.north(), 54.8);
        let range = cluster.price_range.unwrap();
        assert_eq!(range.min, "250000".parse().unwrap());
        assert_eq!(range.max, "990000".parse().unwrap());
    }

    #[test]
    fn malformed_cluster_corners_are_rejected() {
        let res = serde_json::from_str::<Page>(
            r#"{
                "zoom": 11,
                "clusters": [{
                    "center": [54.7, 20.45],
                    "count": 8,
                    "bounds": [[54.8, 20.3], [54.6, 20.6]]
                }]
            }"#,
        );

        assert!(res.is_err());
    }
}
