//! [`Query`] collection related to a single listing.

use common::{operations::By, Slug};

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries a published [`listing::Detail`] by its URL [`Slug`].
///
/// [`listing::Detail`]: read::listing::Detail
pub type BySlug = ApiQuery<By<Option<read::listing::Detail>, Slug>>;
