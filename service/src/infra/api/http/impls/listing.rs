//! Listing [`Api`] implementations.
//!
//! [`Api`]: crate::infra::Api

use common::{
    operations::{By, Select},
    Slug,
};
use tracerr::Traced;

use crate::{
    infra::{
        api::{
            self,
            http::{Auth, Http},
        },
        Api,
    },
    read::listing::{list, Detail},
};

use super::{append_filter, append_page};

impl Api<Select<By<list::Page, list::Selector>>> for Http {
    type Ok = list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let mut url = self.endpoint("listings")?;
        {
            let mut query = url.query_pairs_mut();
            append_page(&mut query, &selector.page);
            append_filter(&mut query, &selector.filter);
            _ = query.append_pair("sort", &selector.sort.to_string());
        }

        self.perform(self.client.get(url), Auth::Public).await
    }
}

impl Api<Select<By<Option<Detail>, Slug>>> for Http {
    type Ok = Option<Detail>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Detail>, Slug>>,
    ) -> Result<Self::Ok, Self::Err> {
        let slug = by.into_inner();
        let url = self.endpoint(&format!("listings/{slug}"))?;
        match self.perform(self.client.get(url), Auth::Public).await {
            Ok(detail) => Ok(Some(detail)),
            Err(e) if e.as_ref().is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
