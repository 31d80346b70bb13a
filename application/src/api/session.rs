//! Operator session handlers.

use axum::{Extension, Form, Json};
use http::StatusCode;
use secrecy::SecretBox;
use serde::Deserialize;
use service::{
    command::{self, create_session},
    domain::user::{self, session, Password, Username},
    query, read, Command as _,
};
use tracerr::Traced;

use crate::{AsError as _, Error, Service};

/// Form payload of a sign-in request.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Sign-in name of the operator.
    pub username: String,

    /// Password of the operator.
    pub password: String,
}

impl TryFrom<Credentials> for session::Credentials {
    type Error = Traced<create_session::ExecutionError>;

    /// Malformed credentials are reported the same way wrong ones are, so
    /// the sign-in form leaks nothing about the account format.
    fn try_from(creds: Credentials) -> Result<Self, Self::Error> {
        let wrong =
            || tracerr::new!(create_session::ExecutionError::WrongCredentials);
        Ok(Self {
            username: Username::new(creds.username).ok_or_else(wrong)?,
            password: SecretBox::new(Box::new(
                Password::new(creds.password).ok_or_else(wrong)?,
            )),
        })
    }
}

/// `POST /api/session`
///
/// Exchanges operator credentials for a bearer session, establishing it
/// process-wide.
pub async fn create(
    Extension(service): Extension<Service>,
    Form(creds): Form<Credentials>,
) -> Result<Json<user::Session>, Error> {
    let creds = session::Credentials::try_from(creds)
        .map_err(|e| e.into_error())?;
    service
        .execute(command::CreateSession(creds))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}

/// `DELETE /api/session`
///
/// Signs the operator out, wiping the established session.
pub async fn destroy(
    Extension(service): Extension<Service>,
) -> StatusCode {
    match service.execute(command::DestroySession).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => match e {},
    }
}

/// `GET /api/session/me`
///
/// Serves the profile of the operator behind the established session.
pub async fn me(
    Extension(service): Extension<Service>,
) -> Result<Json<read::user::User>, Error> {
    service
        .execute(query::user::Me::by(()))
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}
