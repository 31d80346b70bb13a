//! Listing read models.

use common::{unit, Area, DateTimeOf, Price, Slug};
use serde::{Deserialize, Serialize};

use crate::domain::listing;

/// Catalog card of a published listing.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: listing::Id,

    /// URL [`Slug`] of this [`Listing`].
    pub slug: Slug,

    /// Title of this [`Listing`].
    pub title: String,

    /// [`Price`] of the plot.
    pub price: Price,

    /// [`Area`] of the plot.
    pub area: Area,

    /// Land use category of the plot.
    #[serde(default)]
    pub land_use: Option<LandUse>,

    /// [`Location`] of the plot.
    pub location: Location,

    /// URL of the preview image, if the listing has photos.
    #[serde(default)]
    pub preview: Option<String>,

    /// When this [`Listing`] was published.
    #[serde(with = "common::datetime::serde::iso8601")]
    pub published_at: PublicationDateTime,
}

/// Full page payload of a published listing.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Detail {
    /// ID of this listing.
    pub id: listing::Id,

    /// URL [`Slug`] of this listing.
    pub slug: Slug,

    /// Title of this listing.
    pub title: String,

    /// Free-form description of this listing.
    #[serde(default)]
    pub description: String,

    /// [`Price`] of the plot.
    pub price: Price,

    /// [`Area`] of the plot.
    pub area: Area,

    /// Land use category of the plot.
    #[serde(default)]
    pub land_use: Option<LandUse>,

    /// [`Location`] of the plot.
    pub location: Location,

    /// Cadastral number of the plot, if stated.
    #[serde(default)]
    pub cadastral_number: Option<listing::CadastralNumber>,

    /// Coordinates of the plot, if stated.
    #[serde(default)]
    pub point: Option<common::geo::Point>,

    /// URLs of the listing photos.
    #[serde(default)]
    pub images: Vec<String>,

    /// When this listing was published.
    #[serde(with = "common::datetime::serde::iso8601")]
    pub published_at: PublicationDateTime,
}

/// Land use category of a plot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LandUse {
    /// ID of this [`LandUse`] category.
    pub id: listing::LandUseId,

    /// Display name of this [`LandUse`] category (ИЖС, СНТ and the like).
    pub name: String,
}

/// Location a listing belongs to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Location {
    /// District the listing belongs to.
    pub district: super::location::Location,

    /// Settlement the listing belongs to, if it's tied to one.
    #[serde(default)]
    pub settlement: Option<super::location::Location>,
}

/// [`common::DateTime`] of a listing publication.
pub type PublicationDateTime = DateTimeOf<(Listing, unit::Publication)>;

pub mod list {
    //! Catalog list definitions.

    use common::{define_kind, pagination, Area, Price};

    use crate::domain::{listing, location};

    /// Page of catalog [`Listing`]s.
    ///
    /// [`Listing`]: super::Listing
    pub type Page = pagination::Page<super::Listing>;

    /// Page size the catalog uses when the client doesn't ask for another
    /// one.
    pub const DEFAULT_SIZE: u32 = 12;

    /// Selector of a catalog page.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Selector {
        /// Pagination arguments.
        pub page: pagination::Arguments,

        /// [`Filter`] narrowing the catalog.
        pub filter: Filter,

        /// Ordering of the catalog.
        pub sort: Sort,
    }

    /// Filter narrowing the catalog.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Filter {
        /// District the listings should belong to.
        pub district_id: Option<location::Id>,

        /// Settlements the listings should belong to any of.
        pub settlements: Vec<location::Id>,

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
    }

    define_kind! {
        #[doc = "Ordering of the catalog."]
        enum Sort {
            #[doc = "Freshest listings first."]
            Newest,

            #[doc = "Cheapest listings first."]
            PriceAsc,

            #[doc = "Priciest listings first."]
            PriceDesc,
        }
    }

    impl Default for Sort {
        fn default() -> Self {
            Self::Newest
        }
    }

    #[cfg(test)]
    mod sort_spec {
        use super::Sort;

        #[test]
        fn spells_snake_case() {
            assert_eq!(Sort::PriceAsc.to_string(), "price_asc");
            assert_eq!("price_desc".parse(), Ok(Sort::PriceDesc));
            assert_eq!("newest".parse(), Ok(Sort::Newest));
            assert!("cheapest".parse::<Sort>().is_err());
        }
    }
}
