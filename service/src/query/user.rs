//! [`Query`] collection related to the signed-in operator.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries the [`User`] profile behind the established operator session.
///
/// [`User`]: read::user::User
pub type Me = ApiQuery<By<read::user::User, ()>>;
