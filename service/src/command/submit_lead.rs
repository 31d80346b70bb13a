//! [`Command`] for submitting a [`Lead`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::lead::{self, Lead},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] validating a callback form submission and posting it to the
/// catalog.
///
/// A [`lead::Draft`] tripping the honeypot fields or failing field
/// validation never leaves the process.
#[derive(Clone, Debug, From)]
pub struct SubmitLead(pub lead::Draft);

impl<A, S> Command<SubmitLead> for Service<A, S>
where
    A: Api<Insert<Lead>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SubmitLead(draft): SubmitLead,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        if draft.is_bait() {
            return Err(tracerr::new!(E::Bait));
        }

        let name = lead::Name::new(draft.name)
            .ok_or_else(|| tracerr::new!(E::InvalidName))?;
        let phone = lead::Phone::new(&draft.phone)
            .ok_or_else(|| tracerr::new!(E::InvalidPhone))?;
        let comment = if draft.comment.trim().is_empty() {
            None
        } else {
            Some(
                lead::Comment::new(draft.comment)
                    .ok_or_else(|| tracerr::new!(E::InvalidComment))?,
            )
        };

        self.api()
            .execute(Insert(Lead {
                name,
                phone,
                comment,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SubmitLead`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Hidden form fields were filled in, marking the submission as
    /// automated.
    #[display("submission looks automated")]
    Bait,

    /// Name field is empty or malformed.
    #[display("invalid visitor name")]
    InvalidName,

    /// Phone field doesn't contain a dialable number.
    #[display("invalid contact phone")]
    InvalidPhone,

    /// Comment field is malformed.
    #[display("invalid comment")]
    InvalidComment,
}

#[cfg(test)]
mod spec {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use common::operations::{By, Insert, Select};
    use tracerr::Traced;

    use crate::{
        domain::{lead, user::session},
        infra::{api, Api},
        read::settings::Settings,
        Command as _, Config, Service,
    };

    use super::{ExecutionError, SubmitLead};

    /// In-memory stand-in for the catalog API counting accepted leads.
    #[derive(Clone, Debug, Default)]
    struct Gateway {
        accepted: Arc<AtomicUsize>,
    }

    impl Api<Insert<lead::Lead>> for Gateway {
        type Ok = ();
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Insert(_): Insert<lead::Lead>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.accepted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl Api<Select<By<Settings, ()>>> for Gateway {
        type Ok = Settings;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Select(_): Select<By<Settings, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(Settings::default())
        }
    }

    /// Stand-in for the suggestions gateway, never reached by these tests.
    #[derive(Clone, Copy, Debug)]
    struct Quiet;

    fn service(gateway: Gateway) -> Service<Gateway, Quiet> {
        let path = std::env::temp_dir()
            .join(format!("session-{}.json", uuid::Uuid::new_v4()));
        Service::new(
            Config::default(),
            gateway,
            Quiet,
            session::Store::open(path),
        )
        .0
    }

    fn draft() -> lead::Draft {
        lead::Draft {
            name: "Иван".into(),
            phone: "+7 912 345-67-89".into(),
            comment: "Интересует участок у моря".into(),
            ..lead::Draft::default()
        }
    }

    #[tokio::test]
    async fn posts_valid_submission() {
        let gateway = Gateway::default();
        let svc = service(gateway.clone());

        svc.execute(SubmitLead(draft())).await.unwrap();

        assert_eq!(gateway.accepted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn bait_submission_never_leaves_the_process() {
        let gateway = Gateway::default();
        let svc = service(gateway.clone());

        let bait = lead::Draft {
            email_confirm: "ivan@example.com".into(),
            ..draft()
        };
        let err = svc.execute(SubmitLead(bait)).await.unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::Bait));
        assert_eq!(gateway.accepted.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn undialable_phone_is_rejected() {
        let gateway = Gateway::default();
        let svc = service(gateway.clone());

        let bad = lead::Draft {
            phone: "123".into(),
            ..draft()
        };
        let err = svc.execute(SubmitLead(bad)).await.unwrap_err();

        assert!(matches!(err.into_inner(), ExecutionError::InvalidPhone));
        assert_eq!(gateway.accepted.load(Ordering::SeqCst), 0);
    }
}
