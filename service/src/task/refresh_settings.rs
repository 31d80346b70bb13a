//! [`RefreshSettings`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Perform, Select, Start};
use smart_default::SmartDefault;
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::{api, Api},
    read::settings::Settings,
    Service,
};

use super::Task;

/// Configuration for the [`RefreshSettings`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Interval between [`Settings`] refreshes.
    #[default(time::Duration::from_secs(300))]
    pub interval: time::Duration,
}

/// [`Task`] keeping the process-wide site [`Settings`] snapshot fresh, so
/// request handling never waits on the catalog API for them.
#[derive(Clone, Copy, Debug)]
pub struct RefreshSettings<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<A, S> Task<Start<By<RefreshSettings<Self>, Config>>> for Service<A, S>
where
    RefreshSettings<Service<A, S>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<RefreshSettings<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = RefreshSettings {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::RefreshSettings` failed: {e}");
            });
        }
    }
}

impl<A, S> Task<Perform<()>> for RefreshSettings<Service<A, S>>
where
    A: Api<Select<By<Settings, ()>>, Ok = Settings, Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let settings = self
            .service
            .api()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        self.service.publish_settings(settings);
        Ok(())
    }
}

/// Error of [`RefreshSettings`] execution.
pub type ExecutionError = Traced<api::Error>;
