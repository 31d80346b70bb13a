//! Location hierarchy handlers.

use axum::{Extension, Json};
use service::{query, read, Query as _};

use crate::{AsError as _, Error, Service};

/// `GET /api/locations`
///
/// Serves the whole districts-and-settlements hierarchy of the catalog,
/// with per-node listing counts.
pub async fn tree(
    Extension(service): Extension<Service>,
) -> Result<Json<read::location::Tree>, Error> {
    service
        .execute(query::location::Tree::by(()))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}
