//! Abstraction over a settlement suggestions provider.

pub mod http;

use derive_more::{Display, Error as StdError, From};

pub use self::http::Http;

/// Operation gateway to a settlement suggestions provider.
pub use common::Handler as Hints;

/// Possible errors of [`Hints`] operations.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to perform an HTTP request.
    #[display("HTTP request failed: {_0}")]
    Http(http::Error),
}
