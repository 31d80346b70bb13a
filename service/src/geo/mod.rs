//! Geographic URL routing.
//!
//! The catalog is addressed by two families of paths:
//! - canonical catalog pages under `/catalog[/{district}[/{settlement}]]`,
//!   carrying the filter selection in query parameters;
//! - geographic paths `/{district}`, `/{district}/{settlement}` and listing
//!   pages nested under them, resolved by a catch-all route.
//!
//! This module hosts the pure half of that mapping: [`Path`] classification
//! of raw segments and URL building. Probing classified segments against the
//! actual catalog lives in [`query::geo`].
//!
//! [`query::geo`]: crate::query::geo

use std::fmt::Write as _;

use common::{Area, Price, Slug};
use serde::Serialize;
use url::form_urlencoded;

use crate::{
    domain::listing,
    read::{self, listing::list},
};

/// Root path segments that are routed to fixed pages and so can never be
/// interpreted as district slugs.
pub const RESERVED: &[&str] = &[
    "about", "contacts", "map", "news", "privacy", "catalog", "listing",
    "api", "_next",
];

/// Checks whether the provided root `segment` is [`RESERVED`].
#[must_use]
pub fn is_reserved(segment: &str) -> bool {
    RESERVED.contains(&segment)
}

/// Shape of a geographic path, classified from its raw segments.
///
/// Classification is purely syntactic: whether the named slugs exist is up
/// to the catalog, and a 2-segment path stays [`Path::Ambiguous`] until the
/// catalog is probed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Path {
    /// `/{district}` catalog page.
    District(Slug),

    /// `/{district}/{tail}` page, where the tail is either a settlement
    /// catalog or a listing.
    Ambiguous {
        /// [`Slug`] of the district.
        district: Slug,

        /// [`Slug`] of either a settlement or a listing under the district.
        tail: Slug,
    },

    /// `/{district}/{settlement}/{listing}` listing page.
    Listing {
        /// [`Slug`] of the district.
        district: Slug,

        /// [`Slug`] of the settlement.
        settlement: Slug,

        /// [`Slug`] of the listing.
        listing: Slug,
    },
}

impl Path {
    /// Classifies the provided raw path `segments`.
    ///
    /// Returns [`None`] whenever the segments cannot name a catalog page:
    /// empty or overlong paths, malformed slugs, or a [`RESERVED`] root.
    #[must_use]
    pub fn classify<S: AsRef<str>>(segments: &[S]) -> Option<Self> {
        let mut segments = segments.iter().map(AsRef::as_ref);
        let root = segments.next()?;
        if is_reserved(root) {
            return None;
        }
        let district = Slug::new(root)?;
        match (segments.next(), segments.next(), segments.next()) {
            (None, ..) => Some(Self::District(district)),
            (Some(tail), None, _) => Some(Self::Ambiguous {
                district,
                tail: Slug::new(tail)?,
            }),
            (Some(settlement), Some(listing), None) => Some(Self::Listing {
                district,
                settlement: Slug::new(settlement)?,
                listing: Slug::new(listing)?,
            }),
            (Some(_), Some(_), Some(_)) => None,
        }
    }
}

/// Builds the URL path of a listing page, degrading along with the known
/// location chain.
///
/// The full `/{district}/{settlement}/{listing}` form is used when the whole
/// chain is known, `/{district}/{listing}` when only the district is, and
/// the `/listing/{listing}` fallback otherwise. A settlement alone cannot
/// address anything, so it degrades into the fallback too.
#[must_use]
pub fn listing_url(
    district: Option<&Slug>,
    settlement: Option<&Slug>,
    listing: &Slug,
) -> String {
    match (district, settlement) {
        (Some(d), Some(s)) => format!("/{d}/{s}/{listing}"),
        (Some(d), None) => format!("/{d}/{listing}"),
        (None, _) => format!("/listing/{listing}"),
    }
}

/// Query-string selection of a catalog page URL.
///
/// Parameters are emitted in a fixed order, so equal selections always
/// produce equal URLs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CatalogParams {
    /// [`Slug`]s of the settlements narrowing the catalog, comma-joined
    /// into a single `settlements` parameter.
    pub settlements: Vec<Slug>,

    /// Land use category of the listed plots.
    pub land_use_id: Option<listing::LandUseId>,

    /// Lowest acceptable [`Price`].
    pub price_min: Option<Price>,

    /// Highest acceptable [`Price`].
    pub price_max: Option<Price>,

    /// Smallest acceptable [`Area`].
    pub area_min: Option<Area>,

    /// Largest acceptable [`Area`].
    pub area_max: Option<Area>,

    /// Ordering of the catalog, omitted when default.
    pub sort: Option<list::Sort>,

    /// Requested page number, omitted for the first page.
    pub page: Option<u32>,
}

impl CatalogParams {
    /// Checks whether no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Builds the canonical URL path of a catalog page.
///
/// The path nests as `/catalog[/{district}[/{settlement}]]`, with the
/// `params` selection encoded into the query string. A settlement is only
/// addressable under its district, so one provided without a district is
/// ignored.
#[must_use]
pub fn catalog_url(
    district: Option<&Slug>,
    settlement: Option<&Slug>,
    params: &CatalogParams,
) -> String {
    let mut url = String::from("/catalog");
    if let Some(d) = district {
        _ = write!(url, "/{d}");
        if let Some(s) = settlement {
            _ = write!(url, "/{s}");
        }
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    if !params.settlements.is_empty() {
        let joined = params
            .settlements
            .iter()
            .map(AsRef::<str>::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        _ = query.append_pair("settlements", &joined);
    }
    if let Some(id) = params.land_use_id {
        _ = query.append_pair("land_use", &id.to_string());
    }
    if let Some(price) = params.price_min {
        _ = query.append_pair("price_min", &price.amount().to_string());
    }
    if let Some(price) = params.price_max {
        _ = query.append_pair("price_max", &price.amount().to_string());
    }
    if let Some(area) = params.area_min {
        _ = query.append_pair("area_min", &area.m2().to_string());
    }
    if let Some(area) = params.area_max {
        _ = query.append_pair("area_max", &area.m2().to_string());
    }
    if let Some(sort) = params.sort {
        _ = query.append_pair("sort", &sort.to_string());
    }
    if let Some(page) = params.page {
        _ = query.append_pair("page", &page.to_string());
    }
    let query = query.finish();
    if !query.is_empty() {
        _ = write!(url, "?{query}");
    }
    url
}

/// Single breadcrumb of a catalog or listing page.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Crumb {
    /// Display name of the crumb.
    pub name: String,

    /// URL path the crumb links to.
    pub href: String,
}

/// Builds the breadcrumbs of a page from its parent location chain, walking
/// the hierarchy root down to the immediate parent.
///
/// The "home" crumb is the renderer's concern and is never emitted here:
/// for a district catalog page pass no locations and get no crumbs.
#[must_use]
pub fn breadcrumbs(
    district: Option<&read::location::Location>,
    settlement: Option<&read::location::Location>,
) -> Vec<Crumb> {
    let Some(district) = district else {
        return Vec::new();
    };
    let mut crumbs = vec![Crumb {
        name: district.name.to_string(),
        href: catalog_url(Some(&district.slug), None, &CatalogParams::default()),
    }];
    if let Some(settlement) = settlement {
        crumbs.push(Crumb {
            name: settlement.name.to_string(),
            href: catalog_url(
                Some(&district.slug),
                Some(&settlement.slug),
                &CatalogParams::default(),
            ),
        });
    }
    crumbs
}

#[cfg(test)]
mod spec {
    use common::Slug;

    use super::{
        breadcrumbs, catalog_url, is_reserved, listing_url, CatalogParams,
        Path, RESERVED,
    };
    use crate::read;

    fn slug(v: &str) -> Slug {
        Slug::new(v).unwrap()
    }

    #[test]
    fn reserved_roots_are_never_districts() {
        for root in RESERVED {
            assert!(is_reserved(root));
            assert_eq!(Path::classify(&[*root]), None, "classified: {root}");
            assert_eq!(Path::classify(&[*root, "morskoe"]), None);
        }
        assert!(!is_reserved("zelenogradsk"));
    }

    #[test]
    fn classifies_by_segment_count() {
        assert_eq!(
            Path::classify(&["zelenogradsk"]),
            Some(Path::District(slug("zelenogradsk"))),
        );
        assert_eq!(
            Path::classify(&["zelenogradsk", "morskoe"]),
            Some(Path::Ambiguous {
                district: slug("zelenogradsk"),
                tail: slug("morskoe"),
            }),
        );
        assert_eq!(
            Path::classify(&["zelenogradsk", "morskoe", "uchastok-u-morya"]),
            Some(Path::Listing {
                district: slug("zelenogradsk"),
                settlement: slug("morskoe"),
                listing: slug("uchastok-u-morya"),
            }),
        );
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(Path::classify::<&str>(&[]), None);
        assert_eq!(Path::classify(&["a", "b", "c", "d"]), None);
        assert_eq!(Path::classify(&["Zelenogradsk"]), None);
        assert_eq!(Path::classify(&["zelenogradsk", ""]), None);
        assert_eq!(Path::classify(&["-morskoe"]), None);
    }

    #[test]
    fn listing_url_degrades_with_the_known_chain() {
        let (d, s, l) =
            (slug("zelenogradsk"), slug("morskoe"), slug("uchastok"));
        assert_eq!(
            listing_url(Some(&d), Some(&s), &l),
            "/zelenogradsk/morskoe/uchastok",
        );
        assert_eq!(listing_url(Some(&d), None, &l), "/zelenogradsk/uchastok");
        assert_eq!(listing_url(None, None, &l), "/listing/uchastok");
        assert_eq!(listing_url(None, Some(&s), &l), "/listing/uchastok");
    }

    #[test]
    fn catalog_url_nests_and_encodes_the_selection() {
        assert_eq!(
            catalog_url(None, None, &CatalogParams::default()),
            "/catalog",
        );
        assert_eq!(
            catalog_url(
                Some(&slug("zelenogradsk")),
                Some(&slug("morskoe")),
                &CatalogParams::default(),
            ),
            "/catalog/zelenogradsk/morskoe",
        );
        assert_eq!(
            catalog_url(None, Some(&slug("morskoe")), &CatalogParams::default()),
            "/catalog",
        );

        let params = CatalogParams {
            settlements: vec![slug("morskoe"), slug("kamenka")],
            price_min: Some("500000".parse().unwrap()),
            sort: Some(read::listing::list::Sort::PriceAsc),
            page: Some(2),
            ..CatalogParams::default()
        };
        assert_eq!(
            catalog_url(Some(&slug("zelenogradsk")), None, &params),
            "/catalog/zelenogradsk\
             ?settlements=morskoe%2Ckamenka\
             &price_min=500000\
             &sort=price_asc\
             &page=2",
        );
    }

    #[test]
    fn breadcrumbs_walk_the_parent_chain() {
        let district = read::location::Location {
            id: 1.into(),
            name: "Зеленоградский округ".into(),
            slug: slug("zelenogradsk"),
        };
        let settlement = read::location::Location {
            id: 2.into(),
            name: "Морское".into(),
            slug: slug("morskoe"),
        };

        assert!(breadcrumbs(None, None).is_empty());
        assert_eq!(
            breadcrumbs(Some(&district), None)
                .iter()
                .map(|c| c.href.as_str())
                .collect::<Vec<_>>(),
            ["/catalog/zelenogradsk"],
        );
        assert_eq!(
            breadcrumbs(Some(&district), Some(&settlement))
                .iter()
                .map(|c| (c.name.as_str(), c.href.as_str()))
                .collect::<Vec<_>>(),
            [
                ("Зеленоградский округ", "/catalog/zelenogradsk"),
                ("Морское", "/catalog/zelenogradsk/morskoe"),
            ],
        );
    }
}
