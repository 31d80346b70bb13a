//! Geographic catch-all handler.

use axum::{extract::Path, Extension, Json};
use serde::Serialize;
use service::{
    geo::{self, CatalogParams, Crumb},
    query, read, Query as _,
};

use crate::{AsError as _, Error, Service};

use super::LookupError;

/// Page a geographic path resolved into, ready for rendering.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    /// Catalog page of a district or a settlement.
    Catalog {
        /// Resolved location chain.
        location: read::location::Resolved,

        /// Breadcrumb trail of the page.
        breadcrumbs: Vec<Crumb>,

        /// Canonical URL path of the page.
        url: String,
    },

    /// Listing page.
    Listing {
        /// Resolved listing payload.
        listing: read::listing::Detail,

        /// Breadcrumb trail of the page.
        breadcrumbs: Vec<Crumb>,

        /// Canonical URL path of the page.
        url: String,
    },
}

impl From<query::geo::Page> for Page {
    fn from(page: query::geo::Page) -> Self {
        match page {
            query::geo::Page::Catalog(location) => {
                let url = geo::catalog_url(
                    Some(&location.district.slug),
                    location.settlement.as_ref().map(|s| &s.slug),
                    &CatalogParams::default(),
                );
                // A settlement catalog's only parent crumb is its district.
                let breadcrumbs = if location.settlement.is_some() {
                    geo::breadcrumbs(Some(&location.district), None)
                } else {
                    Vec::new()
                };
                Self::Catalog { location, breadcrumbs, url }
            }
            query::geo::Page::Listing(listing) => {
                let district = &listing.location.district;
                let settlement = listing.location.settlement.as_ref();
                let url = geo::listing_url(
                    Some(&district.slug),
                    settlement.map(|s| &s.slug),
                    &listing.slug,
                );
                let breadcrumbs =
                    geo::breadcrumbs(Some(district), settlement);
                Self::Listing { listing, breadcrumbs, url }
            }
        }
    }
}

/// `GET /api/geo/{*path}`
///
/// Resolves a raw geographic path into the page it addresses: a district or
/// settlement catalog, or a listing reached by any of its URL forms.
pub async fn resolve(
    Extension(service): Extension<Service>,
    Path(path): Path<String>,
) -> Result<Json<Page>, Error> {
    let segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    service
        .execute(query::geo::Resolve { segments })
        .await
        .map_err(|e| e.into_error())?
        .map(|page| Json(page.into()))
        .ok_or_else(|| LookupError::Missing.into())
}
