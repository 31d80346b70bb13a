//! Settlement suggestion handlers.

use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use service::{
    command, domain::settlement, query, read, Command as _, Query as _,
};

use crate::{AsError as _, Error, Service};

/// Query parameters of a settlement lookup.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Raw search input.
    pub q: String,
}

/// `GET /api/suggest/settlements`
///
/// Looks settlement suggestions up for the provided search input. Input
/// shorter than the minimum query length answers an empty list without
/// reaching the provider.
pub async fn suggest(
    Extension(service): Extension<Service>,
    Query(params): Query<Params>,
) -> Result<Json<Vec<settlement::Suggestion>>, Error> {
    let Some(query) = settlement::Query::new(&params.q) else {
        return Ok(Json(Vec::new()));
    };
    service
        .execute(query::suggestions::Settlements(query))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

/// `POST /api/suggest/settlements/resolve`
///
/// Resolves a picked suggestion into a canonical catalog location,
/// creating it upstream when it's not known yet.
pub async fn resolve(
    Extension(service): Extension<Service>,
    Json(suggestion): Json<settlement::Suggestion>,
) -> Result<Json<read::location::Location>, Error> {
    service
        .execute(command::ResolveSettlement(suggestion))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}
