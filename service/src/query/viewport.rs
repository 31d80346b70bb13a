//! [`Query`] collection related to the map viewport.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the [`viewport::Page`] of the provided [`viewport::Selector`].
///
/// [`viewport::Page`]: read::viewport::Page
/// [`viewport::Selector`]: read::viewport::Selector
pub type Contents =
    ApiQuery<By<read::viewport::Page, read::viewport::Selector>>;
