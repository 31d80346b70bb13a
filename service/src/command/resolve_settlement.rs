//! [`Command`] for resolving a settlement [`Suggestion`].

use common::operations::Resolve;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::settlement::{self, Suggestion},
    infra::{api, Api},
    read, Service,
};

use super::Command;

/// [`Command`] turning a picked address [`Suggestion`] into a canonical
/// settlement [`Location`] record.
///
/// The catalog API finds the record by the suggested name, or creates it if
/// the settlement isn't known yet. A [`Suggestion`] naming neither a
/// settlement nor a city is rejected before any call is made.
///
/// [`Location`]: read::location::Location
#[derive(Clone, Debug, From)]
pub struct ResolveSettlement(pub Suggestion);

impl<A, S> Command<ResolveSettlement> for Service<A, S>
where
    A: Api<
        Resolve<settlement::Draft>,
        Ok = read::location::Location,
        Err = Traced<api::Error>,
    >,
{
    type Ok = read::location::Location;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ResolveSettlement(suggestion): ResolveSettlement,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let draft = suggestion
            .draft()
            .ok_or_else(|| tracerr::new!(E::NoSettlementName))?;

        self.api()
            .execute(Resolve(draft))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ResolveSettlement`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// Picked [`Suggestion`] names neither a settlement nor a city.
    #[display("suggestion names neither a settlement nor a city")]
    NoSettlementName,
}

#[cfg(test)]
mod spec {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use common::operations::{By, Resolve, Select};
    use tracerr::Traced;

    use crate::{
        domain::{
            settlement::{self, Address, Suggestion},
            user::session,
        },
        infra::{api, Api},
        read::{self, settings::Settings},
        Command as _, Config, Service,
    };

    use super::{ExecutionError, ResolveSettlement};

    /// In-memory stand-in for the catalog API counting resolution calls.
    #[derive(Clone, Debug, Default)]
    struct Gateway {
        resolved: Arc<AtomicUsize>,
    }

    impl Api<Resolve<settlement::Draft>> for Gateway {
        type Ok = read::location::Location;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Resolve(draft): Resolve<settlement::Draft>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.resolved.fetch_add(1, Ordering::SeqCst);
            Ok(read::location::Location {
                id: 42.into(),
                name: draft.name.to_string(),
                slug: "yantarnyy".parse().unwrap(),
            })
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

    fn suggestion(settlement: Option<&str>) -> Suggestion {
        Suggestion {
            value: "Калининградская обл".into(),
            data: Address {
                settlement: settlement.map(Into::into),
                ..Address::default()
            },
        }
    }

    #[tokio::test]
    async fn resolves_named_settlement() {
        let gateway = Gateway::default();
        let svc = service(gateway.clone());

        let location = svc
            .execute(ResolveSettlement(suggestion(Some("Янтарный"))))
            .await
            .unwrap();

        assert_eq!(location.name, "Янтарный");
        assert_eq!(gateway.resolved.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn nameless_suggestion_is_rejected_without_a_call() {
        let gateway = Gateway::default();
        let svc = service(gateway.clone());

        let err = svc
            .execute(ResolveSettlement(suggestion(None)))
            .await
            .unwrap_err();

        assert!(matches!(
            err.into_inner(),
            ExecutionError::NoSettlementName,
        ));
        assert_eq!(gateway.resolved.load(Ordering::SeqCst), 0);
    }
}
