//! Viewport [`Api`] implementations.
//!
//! [`Api`]: crate::infra::Api

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{
        api::{
            self,
            http::{Auth, Http},
        },
        Api,
    },
    read::viewport,
};

use super::append_filter;

impl Api<Select<By<viewport::Page, viewport::Selector>>> for Http {
    type Ok = viewport::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<viewport::Page, viewport::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let mut url = self.endpoint("map/viewport")?;
        {
            let bounds = &selector.bounds;
            let mut query = url.query_pairs_mut();
            _ = query.append_pair("north", &bounds.north().to_string());
            _ = query.append_pair("south", &bounds.south().to_string());
            _ = query.append_pair("east", &bounds.east().to_string());
            _ = query.append_pair("west", &bounds.west().to_string());
            _ = query.append_pair(
                "zoom",
                &u8::from(selector.zoom).to_string(),
            );
            append_filter(&mut query, &selector.filter);
        }

        self.perform(self.client.get(url), Auth::Public).await
    }
}
