//! Site settings [`Api`] implementation.
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
    read::settings::Settings,
};

impl Api<Select<By<Settings, ()>>> for Http {
    type Ok = Settings;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Settings, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint("settings")?;
        self.perform(self.client.get(url), Auth::Public).await
    }
}
