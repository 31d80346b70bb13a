//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::{
    command::{create_session, resolve_settlement, submit_lead},
    infra::{api, hints},
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// REST API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// Wire shape of an [`Error`] response body.
#[derive(Debug, Serialize)]
struct Body {
    /// [`Error`] code.
    code: Code,

    /// [`Error`] message.
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let Self {
            code,
            status_code,
            backtrace,
            message,
        } = self;

        if let Some(trace) = &backtrace {
            tracing::debug!("[{code}]: {message}\n{trace}");
        }

        (status_code, Json(Body { code, message })).into_response()
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for api::Error {
    fn try_as_error(&self) -> Option<Error> {
        let Self::Http(e) = self;
        match e {
            api::http::Error::NoSession | api::http::Error::Unauthorized => {
                Some(Error {
                    code: "UNAUTHORIZED",
                    status_code: http::StatusCode::UNAUTHORIZED,
                    message: "Operator session is missing or expired"
                        .to_owned(),
                    backtrace: None,
                })
            }
            api::http::Error::NotFound => Some(Error {
                code: "NOT_FOUND",
                status_code: http::StatusCode::NOT_FOUND,
                message: "Requested entity doesn't exist".to_owned(),
                backtrace: None,
            }),
            api::http::Error::Transport(_)
            | api::http::Error::Decode(_)
            | api::http::Error::Endpoint(_)
            | api::http::Error::Status { .. } => None,
        }
    }
}

impl AsError for hints::Error {
    fn try_as_error(&self) -> Option<Error> {
        let Self::Http(_) = self;
        Some(Error {
            code: "SUGGESTIONS_UNAVAILABLE",
            status_code: http::StatusCode::BAD_GATEWAY,
            message: "Address suggestions are unavailable right now"
                .to_owned(),
            backtrace: None,
        })
    }
}

impl AsError for create_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::WrongCredentials => Some(Error {
                code: "WRONG_CREDENTIALS",
                status_code: http::StatusCode::UNAUTHORIZED,
                message: "Wrong operator credentials".to_owned(),
                backtrace: None,
            }),
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for resolve_settlement::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::NoSettlementName => Some(Error {
                code: "NO_SETTLEMENT_NAME",
                status_code: http::StatusCode::UNPROCESSABLE_ENTITY,
                message: "Suggestion names neither a settlement nor a city"
                    .to_owned(),
                backtrace: None,
            }),
            Self::Api(e) => e.try_as_error(),
        }
    }
}

impl AsError for submit_lead::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        let (code, message) = match self {
            Self::Bait => {
                ("REJECTED_SUBMISSION", "Submission looks automated")
            }
            Self::InvalidName => ("INVALID_NAME", "Visitor name is invalid"),
            Self::InvalidPhone => {
                ("INVALID_PHONE", "Contact phone is not a dialable number")
            }
            Self::InvalidComment => ("INVALID_COMMENT", "Comment is invalid"),
            Self::Api(e) => return e.try_as_error(),
        };
        Some(Error {
            code,
            status_code: http::StatusCode::UNPROCESSABLE_ENTITY,
            message: message.to_owned(),
            backtrace: None,
        })
    }
}
