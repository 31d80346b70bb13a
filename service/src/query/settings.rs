//! [`Query`] collection related to site settings.

use std::convert::Infallible;

use common::operations::By;

use crate::{read::settings::Settings, Query, Service};

use super::ApiQuery;

/// Queries the site [`Settings`] from the catalog API.
pub type Fetch = ApiQuery<By<Settings, ()>>;

/// [`Query`] of the process-wide [`Settings`] snapshot kept fresh by
/// [`task::RefreshSettings`].
///
/// Never reaches out to the catalog API: answers [`None`] until the first
/// refresh lands.
///
/// [`task::RefreshSettings`]: crate::task::RefreshSettings
#[derive(Clone, Copy, Debug)]
pub struct Snapshot;

impl<A, S> Query<Snapshot> for Service<A, S> {
    type Ok = Option<Settings>;
    type Err = Infallible;

    async fn execute(&self, _: Snapshot) -> Result<Self::Ok, Self::Err> {
        Ok(self.settings())
    }
}
