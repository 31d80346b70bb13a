//! Operator session [`Api`] implementations.
//!
//! [`Api`]: crate::infra::Api

use common::operations::{By, Insert, Select};
use secrecy::ExposeSecret as _;
use serde::Deserialize;
use tracerr::Traced;

use crate::{
    domain::user::session,
    infra::{
        api::{
            self,
            http::{Auth, Http},
        },
        Api,
    },
    read,
};

/// Response of the sign-in endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    /// Issued bearer [`session::Token`].
    access_token: session::Token,
}

impl Api<Insert<session::Credentials>> for Http {
    type Ok = session::Token;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(creds): Insert<session::Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint("auth/login")?;
        let form = [
            ("username", creds.username.to_string()),
            ("password", creds.password.expose_secret().to_string()),
        ];
        self.perform::<TokenResponse>(
            self.client.post(url).form(&form),
            Auth::Public,
        )
        .await
        .map(|resp| resp.access_token)
    }
}

impl Api<Select<By<read::user::User, ()>>> for Http {
    type Ok = read::user::User;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::user::User, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self.endpoint("auth/me")?;
        self.perform(self.client.get(url), Auth::Session).await
    }
}
