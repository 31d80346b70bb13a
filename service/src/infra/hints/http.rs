//! HTTP [`Hints`] gateway implementation.

use std::time::Duration;

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError, From};
use reqwest::{header, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use url::Url;

use crate::{
    domain::settlement,
    infra::{hints, Hints},
};

/// Configuration of an [`Http`] gateway.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base [`Url`] the suggestions provider is reachable at.
    ///
    /// Must end with a trailing slash for endpoint paths to resolve under
    /// it.
    pub base: Url,

    /// API key the provider authorizes requests with.
    pub token: SecretString,

    /// Number of suggestions to request.
    pub count: u32,

    /// KLADR IDs of the regions to narrow suggestions down to.
    pub regions: Vec<String>,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// HTTP gateway to a DaData-compatible address suggestions provider.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base [`Url`] requests are routed under.
    base: Url,

    /// API key requests are signed with.
    token: SecretString,

    /// Number of suggestions to request.
    count: u32,

    /// Region filter sent along with every lookup.
    regions: Vec<Region>,
}

impl Http {
    /// Creates a new [`Http`] gateway out of the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be initialized.
    pub fn new(conf: &Config) -> Result<Self, Traced<hints::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            client,
            base: conf.base.clone(),
            token: conf.token.clone(),
            count: conf.count,
            regions: conf
                .regions
                .iter()
                .map(|id| Region { kladr_id: id.clone() })
                .collect(),
        })
    }
}

impl Hints<Select<By<Vec<settlement::Suggestion>, settlement::Query>>>
    for Http
{
    type Ok = Vec<settlement::Suggestion>;
    type Err = Traced<hints::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<settlement::Suggestion>, settlement::Query>>,
    ) -> Result<Self::Ok, Self::Err> {
        let query = by.into_inner();
        let url = self
            .base
            .join("suggest/address")
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let resp = self
            .client
            .post(url)
            .header(
                header::AUTHORIZATION,
                format!("Token {}", self.token.expose_secret()),
            )
            .json(&Payload {
                query: query.as_ref(),
                count: self.count,
                from_bound: Bound { value: "city" },
                to_bound: Bound { value: "settlement" },
                locations: &self.regions,
            })
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(tracerr::new!(Error::Status { status, message }))
                .map_err(tracerr::map_from);
        }

        resp.json::<Response>()
            .await
            .map(|r| r.suggestions)
            .map_err(|e| tracerr::new!(Error::Decode(e)))
            .map_err(tracerr::map_from)
    }
}

/// Body of an address suggestions lookup.
#[derive(Debug, Serialize)]
struct Payload<'r> {
    /// Raw search input.
    query: &'r str,

    /// Number of suggestions to return.
    count: u32,

    /// Coarsest address granularity to suggest.
    from_bound: Bound,

    /// Finest address granularity to suggest.
    to_bound: Bound,

    /// Regions to narrow suggestions down to.
    locations: &'r [Region],
}

/// Granularity bound of an address suggestions lookup.
#[derive(Clone, Copy, Debug, Serialize)]
struct Bound {
    /// Name of the granularity level.
    value: &'static str,
}

/// Region filter entry of an address suggestions lookup.
#[derive(Clone, Debug, Serialize)]
struct Region {
    /// KLADR ID of the region.
    kladr_id: String,
}

/// Response of an address suggestions lookup.
#[derive(Debug, Deserialize)]
struct Response {
    /// Returned [`settlement::Suggestion`]s.
    #[serde(default)]
    suggestions: Vec<settlement::Suggestion>,
}

/// [`Http`] gateway error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to reach the suggestions provider at all.
    #[display("failed to reach the suggestions provider: {_0}")]
    #[from]
    Transport(reqwest::Error),

    /// Response payload cannot be decoded.
    #[display("malformed suggestions response: {_0}")]
    Decode(reqwest::Error),

    /// Endpoint [`Url`] cannot be built.
    #[display("malformed endpoint URL: {_0}")]
    #[from]
    Endpoint(url::ParseError),

    /// Suggestions provider responded with an unexpected status.
    #[display("suggestions provider responded with {status}: {message}")]
    Status {
        /// Received [`StatusCode`].
        status: StatusCode,

        /// Received response body.
        message: String,
    },
}
