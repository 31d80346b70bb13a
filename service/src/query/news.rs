//! [`Query`] collection related to news articles.

use common::{operations::By, Slug};

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries a page of published news [`Article`]s.
///
/// [`Article`]: read::news::Article
pub type List = ApiQuery<By<read::news::list::Page, read::news::list::Selector>>;

/// Queries a published news [`Detail`] by its URL [`Slug`].
///
/// [`Detail`]: read::news::Detail
pub type BySlug = ApiQuery<By<Option<read::news::Detail>, Slug>>;
