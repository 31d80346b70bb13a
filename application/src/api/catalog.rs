//! Catalog handlers.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::{pagination, Area, Price, Slug};
use rust_decimal::Decimal;
use serde::Deserialize;
use service::{
    query,
    read::listing::{self, list},
    Query as _,
};

use crate::{AsError as _, Error, Service};

use super::{FilterError, LookupError};

/// Query parameters of a catalog page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
    /// 1-based page number.
    pub page: Option<u32>,

    /// Requested page size.
    pub size: Option<u32>,

    /// Ordering of the catalog.
    pub sort: Option<list::Sort>,

    /// ID of the district the listings should belong to.
    pub district: Option<i64>,

    /// Comma-joined IDs of the settlements the listings should belong to
    /// any of.
    pub settlements: Option<String>,

    /// ID of the land use category of the listed plots.
    pub land_use: Option<i64>,

    /// Lowest acceptable price, in rubles.
    pub price_min: Option<Decimal>,

    /// Highest acceptable price, in rubles.
    pub price_max: Option<Decimal>,

    /// Smallest acceptable area, in square meters.
    pub area_min: Option<Decimal>,

    /// Largest acceptable area, in square meters.
    pub area_max: Option<Decimal>,
}

impl Params {
    /// Converts these [`Params`] into a catalog [`list::Selector`].
    fn selector(self) -> Option<list::Selector> {
        Some(list::Selector {
            page: pagination::Arguments::new(
                self.page,
                self.size,
                list::DEFAULT_SIZE,
            ),
            filter: list::Filter {
                district_id: self.district.map(Into::into),
                settlements: super::settlement_ids(
                    self.settlements.as_deref(),
                )?,
                land_use_id: self.land_use.map(Into::into),
                price_min: super::bound(self.price_min, Price::new)?,
                price_max: super::bound(self.price_max, Price::new)?,
                area_min: super::bound(self.area_min, Area::new)?,
                area_max: super::bound(self.area_max, Area::new)?,
            },
            sort: self.sort.unwrap_or_default(),
        })
    }
}

/// `GET /api/catalog`
///
/// Serves a page of published catalog listings, selected by the filter,
/// sort and pagination query parameters.
pub async fn list(
    Extension(service): Extension<Service>,
    Query(params): Query<Params>,
) -> Result<Json<list::Page>, Error> {
    let selector = params.selector().ok_or(FilterError::Malformed)?;
    service
        .execute(query::listings::List::by(selector))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

/// `GET /api/listings/{slug}`
///
/// Serves the full payload of a published listing.
pub async fn detail(
    Extension(service): Extension<Service>,
    Path(slug): Path<Slug>,
) -> Result<Json<listing::Detail>, Error> {
    service
        .execute(query::listing::BySlug::by(slug))
        .await
        .map_err(|e| e.into_error())?
        .map(Json)
        .ok_or_else(|| LookupError::Missing.into())
}
