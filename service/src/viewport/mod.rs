//! Debounced loading of the map viewport.

use std::{future::Future, sync::Arc, time::Duration};

use common::geo::{Representation, Zoom};
use serde::Serialize;
use smart_default::SmartDefault;
use tokio::sync::watch;
use tracerr::Traced;
use tracing as log;

use crate::{
    flight::{Flight, Phase},
    infra::api,
    read::viewport::{Cluster, Page, Plot, Selector},
};

/// Configuration of a [`Loader`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Time a requested viewport must stay unchanged before its loading
    /// actually starts.
    #[default(Duration::from_millis(300))]
    pub debounce: Duration,
}

/// Displayed contents of a map viewport.
///
/// At most one marker kind is ever displayed: clusters below the clustering
/// threshold of [`Zoom`], individual plots at it and above.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// Nothing to display.
    #[default]
    Empty,

    /// Aggregated [`Cluster`] markers of a coarsely zoomed viewport.
    Clusters {
        /// [`Zoom`] level this [`View`] was built for.
        zoom: Zoom,

        /// Displayed [`Cluster`] markers.
        clusters: Vec<Cluster>,

        /// Total number of published plots within the viewport.
        total: u64,
    },

    /// Individual [`Plot`] markers of a detailed viewport.
    Plots {
        /// [`Zoom`] level this [`View`] was built for.
        zoom: Zoom,

        /// Displayed [`Plot`] markers.
        plots: Vec<Plot>,

        /// Total number of published plots within the viewport.
        total: u64,
    },
}

impl View {
    /// [`Zoom`] level this [`View`] was built for, if any.
    #[must_use]
    pub fn zoom(&self) -> Option<Zoom> {
        match self {
            Self::Empty => None,
            Self::Clusters { zoom, .. } | Self::Plots { zoom, .. } => {
                Some(*zoom)
            }
        }
    }

    /// [`Cluster`] markers this [`View`] displays.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        match self {
            Self::Clusters { clusters, .. } => clusters,
            Self::Empty | Self::Plots { .. } => &[],
        }
    }

    /// [`Plot`] markers this [`View`] displays.
    #[must_use]
    pub fn plots(&self) -> &[Plot] {
        match self {
            Self::Plots { plots, .. } => plots,
            Self::Empty | Self::Clusters { .. } => &[],
        }
    }

    /// Total number of published plots within the viewport.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self {
            Self::Empty => 0,
            Self::Clusters { total, .. } | Self::Plots { total, .. } => *total,
        }
    }
}

impl From<Page> for View {
    /// Keeps the marker list matching the [`Zoom`] the [`Page`] was built
    /// for, dropping the other one.
    fn from(page: Page) -> Self {
        match page.zoom.representation() {
            Representation::Clusters => Self::Clusters {
                zoom: page.zoom,
                clusters: page.clusters,
                total: page.total,
            },
            Representation::Plots => Self::Plots {
                zoom: page.zoom,
                plots: page.plots,
                total: page.total,
            },
        }
    }
}

/// Debounced loader of map viewport contents.
///
/// Only the latest requested [`Selector`] is ever loaded: re-requesting
/// while a previous load is pending supersedes it silently, leaving the
/// displayed [`View`] untouched. A failed load, on the other hand, wipes the
/// [`View`], since whatever it displays no longer matches the viewport.
#[derive(Debug)]
pub struct Loader<F> {
    /// Callback fetching a viewport [`Page`].
    fetch: F,

    /// Configuration of this [`Loader`].
    config: Config,

    /// Scheduler of the pending load.
    flight: Flight,

    /// Currently displayed [`View`].
    view: Arc<watch::Sender<View>>,
}

impl<F, Fut> Loader<F>
where
    F: Fn(Selector) -> Fut,
    Fut: Future<Output = Result<Page, Traced<api::Error>>> + Send + 'static,
{
    /// Creates a new idle [`Loader`] fetching viewport [`Page`]s with the
    /// provided callback.
    #[must_use]
    pub fn new(config: Config, fetch: F) -> Self {
        let (view, _) = watch::channel(View::default());
        Self {
            fetch,
            config,
            flight: Flight::new(),
            view: Arc::new(view),
        }
    }

    /// Subscribes to changes of the displayed [`View`].
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.view.subscribe()
    }

    /// Returns the currently displayed [`View`].
    #[must_use]
    pub fn view(&self) -> View {
        self.view.borrow().clone()
    }

    /// Returns the [`Phase`] of the pending load.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.flight.phase()
    }

    /// Requests the viewport described by the `selector` to be loaded,
    /// superseding any pending load.
    ///
    /// The load starts once the configured debounce delay passes with no
    /// newer request arriving.
    ///
    /// # Panics
    ///
    /// If called outside a [`tokio`] runtime.
    pub fn request(&self, selector: Selector) {
        let view = Arc::clone(&self.view);
        self.flight.launch(
            self.config.debounce,
            (self.fetch)(selector),
            move |res| match res {
                Ok(page) => {
                    _ = view.send_replace(View::from(page));
                }
                Err(e) => {
                    log::warn!("viewport loading failed: {e}");
                    _ = view.send_replace(View::Empty);
                }
            },
        );
    }

    /// Cancels the pending load, if any, keeping the displayed [`View`]
    /// intact.
    pub fn cancel(&self) {
        self.flight.cancel();
    }
}

#[cfg(test)]
mod spec {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc, Mutex,
        },
        time::Duration,
    };

    use common::geo::{Bounds, Point, Zoom};
    use futures::{future::BoxFuture, FutureExt as _};
    use tokio::time;
    use tracerr::Traced;

    use crate::{
        infra::api::{self, http},
        read::{
            listing::list::Filter,
            viewport::{Cluster, Page, Plot, Selector},
        },
    };

    use super::{Config, Loader, Phase, View};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn sel(zoom: u8) -> Selector {
        Selector {
            bounds: Bounds::new(54.8, 54.6, 20.6, 20.3).unwrap(),
            zoom: Zoom::new(zoom).unwrap(),
            filter: Filter::default(),
        }
    }

    /// [`Page`] with both marker lists populated, so the test observes which
    /// one the [`View`] keeps.
    fn page(zoom: Zoom) -> Page {
        Page {
            zoom,
            clusters: vec![Cluster {
                center: Point { lat: 54.7, lon: 20.45 },
                count: 8,
                bounds: None,
                price_range: None,
            }],
            plots: vec![Plot {
                id: 7.into(),
                cadastral_number: None,
                area: Some("600".parse().unwrap()),
                price: Some("250000".parse().unwrap()),
                status: crate::domain::listing::Status::Active,
                polygon: vec![
                    Point { lat: 54.69, lon: 20.49 },
                    Point { lat: 54.69, lon: 20.51 },
                    Point { lat: 54.71, lon: 20.51 },
                    Point { lat: 54.71, lon: 20.49 },
                ],
                listing_id: Some(7.into()),
            }],
            total: 8,
        }
    }

    /// [`Loader`] over a fake fetch that records each [`Selector`] it
    /// actually starts loading, `takes` long, and fails while `fail` is
    /// raised.
    fn loader(
        takes: Duration,
        fail: Arc<AtomicBool>,
        seen: Arc<Mutex<Vec<Selector>>>,
    ) -> Loader<
        impl Fn(Selector) -> BoxFuture<'static, Result<Page, Traced<api::Error>>>,
    > {
        Loader::new(Config::default(), move |s: Selector| {
            let fail = Arc::clone(&fail);
            let seen = Arc::clone(&seen);
            async move {
                seen.lock().unwrap().push(s.clone());
                time::sleep(takes).await;
                if fail.load(Ordering::SeqCst) {
                    Err(tracerr::new!(api::Error::Http(
                        http::Error::NoSession
                    )))
                } else {
                    Ok(page(s.zoom))
                }
            }
            .boxed()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn debounces_rapid_requests() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let l = loader(ms(0), Arc::default(), Arc::clone(&seen));

        l.request(sel(12));
        assert_eq!(l.phase(), Phase::Scheduled);
        time::sleep(ms(100)).await;
        l.request(sel(15));
        time::sleep(ms(500)).await;

        assert_eq!(l.phase(), Phase::Idle);
        assert_eq!(seen.lock().unwrap().as_slice(), &[sel(15)]);
        assert_eq!(l.view().zoom(), Some(Zoom::new(15).unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn supersedes_load_in_flight() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let l = loader(ms(500), Arc::default(), Arc::clone(&seen));

        l.request(sel(12));
        time::sleep(ms(400)).await;
        assert_eq!(l.phase(), Phase::InFlight);
        l.request(sel(15));
        time::sleep(ms(1500)).await;

        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(l.view().zoom(), Some(Zoom::new(15).unwrap()));
        assert!(l.view().clusters().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_keeps_the_view_intact() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let l = loader(ms(0), Arc::default(), Arc::clone(&seen));

        l.request(sel(12));
        time::sleep(ms(500)).await;
        assert_eq!(l.view().zoom(), Some(Zoom::new(12).unwrap()));

        l.request(sel(15));
        l.cancel();
        time::sleep(ms(500)).await;

        assert_eq!(seen.lock().unwrap().as_slice(), &[sel(12)]);
        assert_eq!(l.view().zoom(), Some(Zoom::new(12).unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_load_wipes_the_view() {
        let fail = Arc::new(AtomicBool::new(false));
        let l = loader(ms(0), Arc::clone(&fail), Arc::default());

        l.request(sel(12));
        time::sleep(ms(500)).await;
        assert!(!l.view().clusters().is_empty());

        fail.store(true, Ordering::SeqCst);
        l.request(sel(12));
        time::sleep(ms(500)).await;

        assert!(matches!(l.view(), View::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn coarse_zoom_displays_only_clusters() {
        let l = loader(ms(0), Arc::default(), Arc::default());

        l.request(sel(12));
        time::sleep(ms(500)).await;

        let view = l.view();
        assert!(matches!(view, View::Clusters { .. }));
        assert_eq!(view.clusters().len(), 1);
        assert!(view.plots().is_empty());
        assert_eq!(view.total(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn detailed_zoom_displays_only_plots() {
        let l = loader(ms(0), Arc::default(), Arc::default());

        l.request(sel(15));
        time::sleep(ms(500)).await;

        let view = l.view();
        assert!(matches!(view, View::Plots { .. }));
        assert_eq!(view.plots().len(), 1);
        assert!(view.clusters().is_empty());
    }
}
