//! [`Query`] collection related to the catalog of listings.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries a catalog page of published listings.
pub type List =
    ApiQuery<By<read::listing::list::Page, read::listing::list::Selector>>;
