//! Catalog API gateway definitions.

pub mod http;

use derive_more::{Display, Error as StdError, From};

pub use self::http::Http;

/// Operation gateway to the remote catalog API.
pub use common::Handler as Api;

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Http`] gateway error.
    Http(http::Error),
}

impl Error {
    /// Indicates whether this error is the catalog API rejecting the
    /// operator's session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Http(e) => matches!(e, http::Error::Unauthorized),
        }
    }

    /// Indicates whether this error is the catalog API reporting the
    /// requested entity as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Http(e) => matches!(e, http::Error::NotFound),
        }
    }
}
