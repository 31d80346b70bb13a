//! REST API definitions.

pub mod catalog;
pub mod geo;
pub mod lead;
pub mod location;
pub mod map;
pub mod news;
pub mod session;
pub mod settings;
pub mod settlement;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use service::domain::location::Id;

use crate::{define_error, Service};

define_error! {
    enum LookupError {
        #[code = "NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Requested entity doesn't exist"]
        Missing,
    }
}

define_error! {
    enum FilterError {
        #[code = "INVALID_FILTER"]
        #[status = BAD_REQUEST]
        #[message = "Filter values are malformed or out of range"]
        Malformed,
    }
}

/// Builds the [`Router`] of the whole REST API, with the provided
/// [`Service`] injected into every handler.
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/api/settings", get(settings::snapshot))
        .route("/api/locations", get(location::tree))
        .route("/api/catalog", get(catalog::list))
        .route("/api/listings/:slug", get(catalog::detail))
        .route("/api/news", get(news::list))
        .route("/api/news/:slug", get(news::detail))
        .route("/api/map", get(map::viewport))
        .route("/ws/map", get(map::feed))
        .route("/api/leads", post(lead::submit))
        .route(
            "/api/session",
            post(session::create).delete(session::destroy),
        )
        .route("/api/session/me", get(session::me))
        .route("/api/suggest/settlements", get(settlement::suggest))
        .route(
            "/api/suggest/settlements/resolve",
            post(settlement::resolve),
        )
        .route("/api/geo/*path", get(geo::resolve))
        .layer(Extension(service))
}

/// Parses a comma-joined `settlements` filter parameter into location IDs.
///
/// An absent parameter selects nothing, which is a valid empty filter.
/// Returns [`None`] when any of the joined values is not an ID.
pub(crate) fn settlement_ids(
    raw: Option<&str>,
) -> Option<Vec<Id>> {
    raw.map_or(Some(Vec::new()), |raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i64>().ok().map(Into::into))
            .collect()
    })
}

/// Validates an optional filter bound through the provided constructor.
///
/// An absent bound stays absent; a provided one failing validation turns
/// the whole filter [`None`].
pub(crate) fn bound<T>(
    raw: Option<rust_decimal::Decimal>,
    make: impl FnOnce(rust_decimal::Decimal) -> Option<T>,
) -> Option<Option<T>> {
    match raw {
        None => Some(None),
        Some(v) => make(v).map(Some),
    }
}

#[cfg(test)]
mod settlement_ids_spec {
    use super::settlement_ids;

    #[test]
    fn splits_and_parses() {
        assert_eq!(settlement_ids(None), Some(Vec::new()));
        assert_eq!(settlement_ids(Some("")), Some(Vec::new()));
        assert_eq!(
            settlement_ids(Some("3, 7,11")),
            Some(vec![3.into(), 7.into(), 11.into()]),
        );
        assert_eq!(settlement_ids(Some("3,seven")), None);
    }
}
