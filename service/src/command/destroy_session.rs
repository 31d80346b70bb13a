//! [`Command`] for destroying the established [`Session`].

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::user::{session, Session};
use crate::Service;

use super::Command;

/// [`Command`] signing the operator out.
///
/// Teardown is purely local: the [`Session`] is wiped from the
/// [`session::Store`] along with its persisted mirror, no catalog API call
/// is involved.
#[derive(Clone, Copy, Debug)]
pub struct DestroySession;

impl<A, S> Command<DestroySession> for Service<A, S> {
    type Ok = ();
    type Err = Infallible;

    async fn execute(&self, _: DestroySession) -> Result<Self::Ok, Self::Err> {
        self.session().destroy().await;
        Ok(())
    }
}
