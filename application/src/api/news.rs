//! News handlers.

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::{pagination, Slug};
use serde::Deserialize;
use service::{
    query,
    read::news::{self, list},
    Query as _,
};

use crate::{AsError as _, Error, Service};

use super::LookupError;

/// Query parameters of a news feed page.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
    /// 1-based page number.
    pub page: Option<u32>,

    /// Requested page size.
    pub size: Option<u32>,
}

/// `GET /api/news`
///
/// Serves a page of published news articles, freshest first.
pub async fn list(
    Extension(service): Extension<Service>,
    Query(params): Query<Params>,
) -> Result<Json<list::Page>, Error> {
    let selector = list::Selector {
        page: pagination::Arguments::new(
            params.page,
            params.size,
            list::DEFAULT_SIZE,
        ),
    };
    service
        .execute(query::news::List::by(selector))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

/// `GET /api/news/{slug}`
///
/// Serves the full payload of a published news article.
pub async fn detail(
    Extension(service): Extension<Service>,
    Path(slug): Path<Slug>,
) -> Result<Json<news::Detail>, Error> {
    service
        .execute(query::news::BySlug::by(slug))
        .await
        .map_err(|e| e.into_error())?
        .map(Json)
        .ok_or_else(|| LookupError::Missing.into())
}
