//! Lead submission handler.

use axum::{Extension, Form};
use http::StatusCode;
use serde::Deserialize;
use service::{
    command::{self, submit_lead},
    domain::lead,
    Command as _,
};
use tracing as log;

use crate::{AsError as _, Error, Service};

/// Form payload of a callback request.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Submission {
    /// Name the visitor introduced themselves with.
    pub name: String,

    /// Contact phone of the visitor.
    pub phone: String,

    /// Free-form comment of the visitor.
    pub comment: String,

    /// Hidden honeypot field.
    pub email_confirm: String,

    /// Hidden honeypot field.
    pub last_name: String,
}

impl From<Submission> for lead::Draft {
    fn from(s: Submission) -> Self {
        Self {
            name: s.name,
            phone: s.phone,
            comment: s.comment,
            email_confirm: s.email_confirm,
            last_name: s.last_name,
        }
    }
}

/// `POST /api/leads`
///
/// Validates and forwards a callback request form.
///
/// A submission tripping the honeypot fields is answered exactly like an
/// accepted one, so the bot filling it learns nothing.
pub async fn submit(
    Extension(service): Extension<Service>,
    Form(submission): Form<Submission>,
) -> Result<StatusCode, Error> {
    match service.execute(command::SubmitLead(submission.into())).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) if matches!(e.as_ref(), submit_lead::ExecutionError::Bait) => {
            log::info!("honeypot submission dropped");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(e.into_error()),
    }
}
