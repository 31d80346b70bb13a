//! Infrastructure layer.

pub mod api;
pub mod hints;

pub use self::{api::Api, hints::Hints};
