//! [`settlement`] registration [`Api`] implementation.
//!
//! [`Api`]: crate::infra::Api

use common::operations::Resolve;
use tracerr::Traced;

use crate::{
    domain::settlement,
    infra::{
        api::{
            self,
            http::{Auth, Http},
        },
        Api,
    },
    read,
};

impl Api<Resolve<settlement::Draft>> for Http {
    type Ok = read::location::Location;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Resolve(draft): Resolve<settlement::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint("settlements/resolve")?;
        self.perform(self.client.post(url).json(&draft), Auth::Session)
            .await
    }
}
