//! [`Lead`] submission [`Api`] implementation.
//!
//! [`Api`]: crate::infra::Api

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::Lead,
    infra::{
        api::{
            self,
            http::{Auth, Http},
        },
        Api,
    },
};

impl Api<Insert<Lead>> for Http {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(lead): Insert<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint("leads")?;
        self.perform::<serde_json::Value>(
            self.client.post(url).json(&lead),
            Auth::Public,
        )
        .await
        .map(drop)
    }
}
