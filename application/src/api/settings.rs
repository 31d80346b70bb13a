//! Site settings handler.

use axum::{Extension, Json};
use service::{query, read, Query as _};

use crate::Service;

/// `GET /api/settings`
///
/// Serves the cached site settings snapshot. Until the first background
/// refresh lands, the snapshot is empty rather than an error, so the site
/// renders without contacts instead of failing.
pub async fn snapshot(
    Extension(service): Extension<Service>,
) -> Json<read::settings::Settings> {
    match service.execute(query::settings::Snapshot).await {
        Ok(settings) => Json(settings.unwrap_or_default()),
        Err(e) => match e {},
    }
}
