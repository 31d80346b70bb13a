//! Location [`Api`] implementations.
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
    read::location::{Resolved, Selector, Tree},
};

impl Api<Select<By<Tree, ()>>> for Http {
    type Ok = Tree;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Tree, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint("locations/tree")?;
        self.perform(self.client.get(url), Auth::Public).await
    }
}

impl Api<Select<By<Option<Resolved>, Selector>>> for Http {
    type Ok = Option<Resolved>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Resolved>, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let mut url = self.endpoint("locations/resolve")?;
        {
            let mut query = url.query_pairs_mut();
            _ = query.append_pair("district", selector.district.as_ref());
            if let Some(settlement) = &selector.settlement {
                _ = query.append_pair("settlement", settlement.as_ref());
            }
        }

        match self.perform(self.client.get(url), Auth::Public).await {
            Ok(resolved) => Ok(Some(resolved)),
            Err(e) if e.as_ref().is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
