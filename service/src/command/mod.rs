//! [`Command`] definition.

pub mod create_session;
pub mod destroy_session;
pub mod resolve_settlement;
pub mod submit_lead;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_session::CreateSession, destroy_session::DestroySession,
    resolve_settlement::ResolveSettlement, submit_lead::SubmitLead,
};
