//! [`Query`] collection related to the location hierarchy.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the whole location [`Tree`] of the catalog.
///
/// [`Tree`]: read::location::Tree
pub type Tree = ApiQuery<By<read::location::Tree, ()>>;

/// Queries the [`Resolved`] location chain of catalog path slugs.
///
/// [`Resolved`]: read::location::Resolved
pub type Resolved =
    ApiQuery<By<Option<read::location::Resolved>, read::location::Selector>>;
