//! Debounced lookup of settlement suggestions.

use std::{future::Future, sync::Arc, time::Duration};

use smart_default::SmartDefault;
use tokio::sync::watch;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::settlement::{Query, Suggestion},
    flight::Flight,
    infra::hints,
};

/// Configuration of a [`Loader`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Time the search input must stay unchanged before a lookup actually
    /// fires.
    #[default(Duration::from_millis(500))]
    pub debounce: Duration,
}

/// Debounced loader of settlement [`Suggestion`]s behind a typeahead field.
///
/// Input shorter than [`Query::MIN_LEN`] characters clears the displayed
/// [`Suggestion`]s without firing a lookup. Re-typing while a lookup is
/// pending supersedes it silently, so a stale response never lands over a
/// fresher one.
#[derive(Debug)]
pub struct Loader<F> {
    /// Callback looking [`Suggestion`]s up.
    fetch: F,

    /// Configuration of this [`Loader`].
    config: Config,

    /// Scheduler of the pending lookup.
    flight: Flight,

    /// Currently displayed [`Suggestion`]s.
    out: Arc<watch::Sender<Vec<Suggestion>>>,
}

impl<F, Fut> Loader<F>
where
    F: Fn(Query) -> Fut,
    Fut: Future<Output = Result<Vec<Suggestion>, Traced<hints::Error>>>
        + Send
        + 'static,
{
    /// Creates a new idle [`Loader`] looking [`Suggestion`]s up with the
    /// provided callback.
    #[must_use]
    pub fn new(config: Config, fetch: F) -> Self {
        let (out, _) = watch::channel(Vec::new());
        Self {
            fetch,
            config,
            flight: Flight::new(),
            out: Arc::new(out),
        }
    }

    /// Subscribes to changes of the displayed [`Suggestion`]s.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Suggestion>> {
        self.out.subscribe()
    }

    /// Returns the currently displayed [`Suggestion`]s.
    #[must_use]
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.out.borrow().clone()
    }

    /// Feeds the next state of the search input into this [`Loader`],
    /// superseding any pending lookup.
    ///
    /// A lookup fires once the configured debounce delay passes with the
    /// input staying unchanged. Input too short to look up clears the
    /// displayed [`Suggestion`]s right away.
    ///
    /// # Panics
    ///
    /// If called outside a [`tokio`] runtime.
    pub fn input(&self, raw: impl AsRef<str>) {
        let Some(query) = Query::new(raw) else {
            self.flight.cancel();
            _ = self.out.send_replace(Vec::new());
            return;
        };
        let out = Arc::clone(&self.out);
        self.flight.launch(
            self.config.debounce,
            (self.fetch)(query),
            move |res| match res {
                Ok(suggestions) => {
                    _ = out.send_replace(suggestions);
                }
                Err(e) => {
                    log::warn!("settlement lookup failed: {e}");
                    _ = out.send_replace(Vec::new());
                }
            },
        );
    }

    /// Cancels the pending lookup, if any, keeping the displayed
    /// [`Suggestion`]s intact.
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

    use futures::{future::BoxFuture, FutureExt as _};
    use reqwest::StatusCode;
    use tokio::time;
    use tracerr::Traced;

    use crate::{
        domain::settlement::{Address, Query, Suggestion},
        infra::hints,
    };

    use super::{Config, Loader};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn suggestion(name: &str) -> Suggestion {
        Suggestion {
            value: format!("Калининградская обл, пос {name}"),
            data: Address {
                settlement: Some(name.to_owned()),
                ..Address::default()
            },
        }
    }

    /// [`Loader`] over a fake lookup that records each [`Query`] it
    /// actually starts, `takes` long, and fails while `fail` is raised.
    fn loader(
        takes: Duration,
        fail: Arc<AtomicBool>,
        seen: Arc<Mutex<Vec<Query>>>,
    ) -> Loader<
        impl Fn(
            Query,
        )
            -> BoxFuture<'static, Result<Vec<Suggestion>, Traced<hints::Error>>>,
    > {
        Loader::new(Config::default(), move |q: Query| {
            let fail = Arc::clone(&fail);
            let seen = Arc::clone(&seen);
            async move {
                seen.lock().unwrap().push(q.clone());
                time::sleep(takes).await;
                if fail.load(Ordering::SeqCst) {
                    Err(tracerr::new!(hints::Error::Http(
                        hints::http::Error::Status {
                            status: StatusCode::BAD_GATEWAY,
                            message: String::new(),
                        }
                    )))
                } else {
                    Ok(vec![suggestion(q.as_ref())])
                }
            }
            .boxed()
        })
    }

    fn names(suggestions: &[Suggestion]) -> Vec<String> {
        suggestions
            .iter()
            .filter_map(|s| s.name().map(|n| n.to_string()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn debounces_keystrokes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let l = loader(ms(0), Arc::default(), Arc::clone(&seen));

        l.input("зелено");
        time::sleep(ms(200)).await;
        l.input("зеленоградск");
        time::sleep(ms(700)).await;

        assert_eq!(
            seen.lock()
                .unwrap()
                .iter()
                .map(|q| q.to_string())
                .collect::<Vec<_>>(),
            ["зеленоградск"],
        );
        assert_eq!(names(&l.suggestions()), ["зеленоградск"]);
    }

    #[tokio::test(start_paused = true)]
    async fn short_input_clears_suggestions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let l = loader(ms(0), Arc::default(), Arc::clone(&seen));

        l.input("янтарный");
        time::sleep(ms(700)).await;
        assert_eq!(l.suggestions().len(), 1);

        l.input("я");
        assert!(l.suggestions().is_empty());
        time::sleep(ms(700)).await;
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_lookup_never_lands() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let l = loader(ms(600), Arc::default(), Arc::clone(&seen));

        l.input("светло");
        time::sleep(ms(600)).await;
        l.input("светлогорск");
        time::sleep(ms(2000)).await;

        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(names(&l.suggestions()), ["светлогорск"]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_lookup_clears_suggestions() {
        let fail = Arc::new(AtomicBool::new(false));
        let l = loader(ms(0), Arc::clone(&fail), Arc::default());

        l.input("янтарный");
        time::sleep(ms(700)).await;
        assert_eq!(l.suggestions().len(), 1);

        fail.store(true, Ordering::SeqCst);
        l.input("янтарный поселок");
        time::sleep(ms(700)).await;

        assert!(l.suggestions().is_empty());
    }
}
