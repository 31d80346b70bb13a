//! [`Command`] for establishing a [`Session`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::user::{session, Session},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] exchanging operator [`session::Credentials`] for a
/// [`Session`].
///
/// The issued [`Session`] replaces whatever is held by the
/// [`session::Store`], so every following authorized operation is signed
/// with it.
#[derive(Debug, From)]
pub struct CreateSession(pub session::Credentials);

impl<A, S> Command<CreateSession> for Service<A, S>
where
    A: Api<
        Insert<session::Credentials>,
        Ok = session::Token,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreateSession(creds): CreateSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let token = match self.api().execute(Insert(creds)).await {
            Err(e) if e.as_ref().is_unauthorized() => {
                Err(tracerr::new!(E::WrongCredentials))
            }
            res => res.map_err(tracerr::map_from_and_wrap!(=> E)),
        }?;

        let session = Session {
            token,
            established_at: DateTime::now().coerce(),
        };
        self.session().establish(session.clone()).await;

        Ok(session)
    }
}

/// Error of [`CreateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Provided [`session::Credentials`] are wrong.
    #[display("wrong operator credentials")]
    WrongCredentials,
}
