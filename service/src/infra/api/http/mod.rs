//! HTTP [`Api`] gateway implementation.

mod impls;

use std::time::Duration;

use derive_more::{Display, Error as StdError, From};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{domain::user::session, infra::api};
#[cfg(doc)]
use crate::infra::Api;

/// Configuration of an [`Http`] gateway.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base [`Url`] the catalog API is reachable at.
    ///
    /// Must end with a trailing slash for endpoint paths to resolve under
    /// it.
    pub base: Url,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// HTTP gateway to the remote catalog API.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base [`Url`] requests are routed under.
    base: Url,

    /// Operator session authorized requests are signed with.
    session: session::Store,
}

impl Http {
    /// Creates a new [`Http`] gateway out of the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(
        conf: &Config,
        session: session::Store,
    ) -> Result<Self, Traced<api::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self { client, base: conf.base.clone(), session })
    }

    /// Builds the full [`Url`] of the provided endpoint `path`.
    fn endpoint(&self, path: &str) -> Result<Url, Traced<api::Error>> {
        self.base
            .join(path)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }

    /// Performs the provided request, decoding its JSON response.
    ///
    /// A [`StatusCode::UNAUTHORIZED`] response to an [`Auth::Session`]
    /// request destroys the stored operator session: its token is no good
    /// anymore, and every following authorized request would fail the same
    /// way.
    async fn perform<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        auth: Auth,
    ) -> Result<T, Traced<api::Error>> {
        let req = match auth {
            Auth::Public => req,
            Auth::Session => {
                let token = self
                    .session
                    .token()
                    .await
                    .ok_or_else(|| tracerr::new!(Error::NoSession))
                    .map_err(tracerr::map_from)?;
                req.bearer_auth(token)
            }
        };

        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            if matches!(auth, Auth::Session) {
                log::warn!("catalog API rejected the operator session");
                self.session.destroy().await;
            }
            return Err(tracerr::new!(Error::Unauthorized))
                .map_err(tracerr::map_from);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(tracerr::new!(Error::NotFound))
                .map_err(tracerr::map_from);
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(tracerr::new!(Error::Status { status, message }))
                .map_err(tracerr::map_from);
        }

        resp.json()
            .await
            .map_err(|e| tracerr::new!(Error::Decode(e)))
            .map_err(tracerr::map_from)
    }
}

/// Authorization mode of a single request.
#[derive(Clone, Copy, Debug)]
enum Auth {
    /// Request of the public catalog, sent as is.
    Public,

    /// Request of the back-office, signed with the operator session token.
    Session,
}

/// [`Http`] gateway error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to reach the catalog API at all.
    #[display("failed to reach the catalog API: {_0}")]
    #[from]
    Transport(reqwest::Error),

    /// Response payload cannot be decoded.
    #[display("malformed catalog API response: {_0}")]
    Decode(reqwest::Error),

    /// Endpoint [`Url`] cannot be built.
    #[display("malformed endpoint URL: {_0}")]
    #[from]
    Endpoint(url::ParseError),

    /// No operator session to sign the request with.
    #[display("no operator session established")]
    NoSession,

    /// The catalog API rejected the operator session token.
    #[display("operator session rejected by the catalog API")]
    Unauthorized,

    /// Requested entity doesn't exist.
    #[display("requested entity doesn't exist")]
    NotFound,

    /// Catalog API responded with an unexpected status.
    #[display("catalog API responded with {status}: {message}")]
    Status {
        /// Received [`StatusCode`].
        status: StatusCode,

        /// Received response body.
        message: String,
    },
}
