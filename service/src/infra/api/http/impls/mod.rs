//! [`Api`] implementations of the [`Http`] gateway.
//!
//! [`Api`]: crate::infra::Api
//! [`Http`]: super::Http

mod lead;
mod listing;
mod location;
mod news;
mod session;
mod settings;
mod settlement;
mod viewport;

use common::pagination;
use itertools::Itertools as _;
use url::{form_urlencoded::Serializer, UrlQuery};

use crate::read::listing::list;

/// Appends the provided catalog [`list::Filter`] to a query string.
fn append_filter(
    query: &mut Serializer<'_, UrlQuery<'_>>,
    filter: &list::Filter,
) {
    if let Some(id) = filter.district_id {
        _ = query.append_pair("district_id", &id.to_string());
    }
    if !filter.settlements.is_empty() {
        _ = query.append_pair(
            "settlements",
            &filter.settlements.iter().map(ToString::to_string).join(","),
        );
    }
    if let Some(id) = filter.land_use_id {
        _ = query.append_pair("land_use_id", &id.to_string());
    }
    if let Some(price) = &filter.price_min {
        _ = query.append_pair("price_min", &price.amount().to_string());
    }
    if let Some(price) = &filter.price_max {
        _ = query.append_pair("price_max", &price.amount().to_string());
    }
    if let Some(area) = &filter.area_min {
        _ = query.append_pair("area_min", &area.m2().to_string());
    }
    if let Some(area) = &filter.area_max {
        _ = query.append_pair("area_max", &area.m2().to_string());
    }
}

/// Appends the provided [`pagination::Arguments`] to a query string.
fn append_page(
    query: &mut Serializer<'_, UrlQuery<'_>>,
    page: &pagination::Arguments,
) {
    _ = query.append_pair("page", &page.page().to_string());
    _ = query.append_pair("size", &page.size().to_string());
}
