//! Service contains the business logic of the application.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod flight;
pub mod geo;
pub mod infra;
pub mod query;
pub mod read;
pub mod suggest;
pub mod task;
pub mod viewport;

use std::sync::Arc;

use common::operations::{By, Start};
use derive_more::{Debug, Display, Error};
use tokio::sync::watch;

use self::domain::user::session;
#[cfg(doc)]
use self::infra::{Api, Hints};

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// [`viewport::Loader`] configuration.
    pub viewport: viewport::Config,

    /// [`suggest::Loader`] configuration.
    pub suggest: suggest::Config,

    /// [`task::RefreshSettings`] configuration.
    pub refresh_settings: task::refresh_settings::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<A, S> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Api`] gateway of this [`Service`].
    api: A,

    /// [`Hints`] gateway of this [`Service`].
    suggest: S,

    /// Operator [`session::Store`] of this [`Service`].
    session: session::Store,

    /// Cached site [`Settings`] snapshot.
    ///
    /// [`Settings`]: read::settings::Settings
    settings: Arc<watch::Sender<Option<read::settings::Settings>>>,
}

impl<A, S> Service<A, S> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(
        config: Config,
        api: A,
        suggest: S,
        session: session::Store,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::RefreshSettings<Self>,
                        task::refresh_settings::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let (settings, _) = watch::channel(None);
        let this = Service {
            config,
            api,
            suggest,
            session,
            settings: Arc::new(settings),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().refresh_settings))).await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the [`Api`] gateway of this [`Service`].
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns the [`Hints`] gateway of this [`Service`].
    #[must_use]
    pub fn suggest(&self) -> &S {
        &self.suggest
    }

    /// Returns the operator [`session::Store`] of this [`Service`].
    #[must_use]
    pub fn session(&self) -> &session::Store {
        &self.session
    }

    /// Returns the currently cached site [`Settings`] snapshot, if any has
    /// been fetched already.
    ///
    /// [`Settings`]: read::settings::Settings
    #[must_use]
    pub fn settings(&self) -> Option<read::settings::Settings> {
        self.settings.borrow().clone()
    }

    /// Replaces the cached site [`Settings`] snapshot.
    ///
    /// [`Settings`]: read::settings::Settings
    pub(crate) fn publish_settings(&self, settings: read::settings::Settings) {
        _ = self.settings.send_replace(Some(settings));
    }
}

/// Shortcut for the error of starting a [`Task`].
type TaskStartError<Svc, T, Args> = <Svc as Task<Start<By<T, Args>>>>::Err;

/// Error of starting a [`Service`].
#[derive(Debug, Display, Error)]
pub enum StartupError<Svc>
where
    Svc: Task<
        Start<
            By<task::RefreshSettings<Svc>, task::refresh_settings::Config>,
        >,
    >,
{
    /// [`task::RefreshSettings`] failed to start.
    RefreshSettingsTask(
        TaskStartError<
            Svc,
            task::RefreshSettings<Svc>,
            task::refresh_settings::Config,
        >,
    ),
}
