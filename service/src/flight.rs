//! Debounced single-flight scheduling.

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{task::AbortHandle, time};

/// Lifecycle phase of a [`Flight`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Phase {
    /// Nothing is scheduled or running.
    #[default]
    Idle,

    /// A job is waiting out its quiescence delay.
    Scheduled,

    /// A job is executing.
    InFlight,
}

/// Scheduler running at most one delayed job at a time.
///
/// Launching a job supersedes the previous one in whatever phase it is: a
/// job waiting out its delay is descheduled before it fires, while a job
/// already executing is aborted mid-air. A superseded or cancelled job never
/// reaches its `apply` step, so no outcome of it is ever observed.
#[derive(Debug, Default)]
pub struct Flight {
    /// State of the currently tracked job, shared with the job itself.
    state: Arc<Mutex<State>>,
}

impl Flight {
    /// Creates a new idle [`Flight`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current [`Phase`] of this [`Flight`].
    #[must_use]
    pub fn phase(&self) -> Phase {
        lock(&self.state).phase
    }

    /// Schedules the `job` to run after the `delay`, superseding the
    /// previously launched one.
    ///
    /// Once the `job` completes, its output is handed over to `apply`,
    /// unless this launch has been superseded or cancelled by then. `apply`
    /// runs under the internal lock and so must not call back into this
    /// [`Flight`].
    ///
    /// # Panics
    ///
    /// If called outside a [`tokio`] runtime.
    pub fn launch<Fut, T>(
        &self,
        delay: Duration,
        job: Fut,
        apply: impl FnOnce(T) + Send + 'static,
    ) where
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let mut state = lock(&self.state);
        state.supersede();
        state.phase = Phase::Scheduled;
        let epoch = state.epoch;

        let shared = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            {
                let mut state = lock(&shared);
                if state.epoch != epoch {
                    return;
                }
                state.phase = Phase::InFlight;
            }

            let out = job.await;

            // No `.await` points from here on, so aborting cannot tear the
            // `apply` step: either the whole tail runs, or none of it.
            let mut state = lock(&shared);
            if state.epoch != epoch {
                return;
            }
            state.phase = Phase::Idle;
            state.abort = None;
            apply(out);
        });
        state.abort = Some(task.abort_handle());
    }

    /// Cancels the tracked job, whether scheduled or in flight.
    pub fn cancel(&self) {
        lock(&self.state).supersede();
    }
}

impl Drop for Flight {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// State of the job tracked by a [`Flight`].
#[derive(Debug, Default)]
struct State {
    /// [`Phase`] the tracked job is in.
    phase: Phase,

    /// Monotonic launch counter, fencing stale jobs off the state.
    epoch: u64,

    /// Handle aborting the tracked job's [`tokio::task`].
    abort: Option<AbortHandle>,
}

impl State {
    /// Supersedes the tracked job, aborting it if it's still alive.
    fn supersede(&mut self) {
        self.epoch += 1;
        self.phase = Phase::Idle;
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }
}

/// Locks the provided `state`, disregarding poisoning.
fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod spec {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use tokio::time;

    use super::{Flight, Phase};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Spawns a job onto the `flight` that completes after `takes` and
    /// records `tag` into `applied`.
    fn launch(
        flight: &Flight,
        delay: Duration,
        takes: Duration,
        tag: u8,
        applied: &Arc<Mutex<Vec<u8>>>,
    ) {
        let applied = Arc::clone(applied);
        flight.launch(
            delay,
            async move {
                time::sleep(takes).await;
                tag
            },
            move |tag| applied.lock().unwrap().push(tag),
        );
    }

    #[tokio::test(start_paused = true)]
    async fn walks_through_phases() {
        let flight = Flight::new();
        let applied = Arc::new(Mutex::new(Vec::new()));
        assert_eq!(flight.phase(), Phase::Idle);

        launch(&flight, ms(300), ms(100), 1, &applied);
        assert_eq!(flight.phase(), Phase::Scheduled);

        time::sleep(ms(50)).await;
        assert_eq!(flight.phase(), Phase::Scheduled);

        time::sleep(ms(300)).await;
        assert_eq!(flight.phase(), Phase::InFlight);

        time::sleep(ms(100)).await;
        assert_eq!(flight.phase(), Phase::Idle);
        assert_eq!(*applied.lock().unwrap(), [1]);
    }

    #[tokio::test(start_paused = true)]
    async fn relaunch_deschedules_waiting_job() {
        let flight = Flight::new();
        let applied = Arc::new(Mutex::new(Vec::new()));

        launch(&flight, ms(300), ms(0), 1, &applied);
        time::sleep(ms(100)).await;
        launch(&flight, ms(300), ms(0), 2, &applied);

        time::sleep(ms(500)).await;
        assert_eq!(*applied.lock().unwrap(), [2]);
        assert_eq!(flight.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn relaunch_aborts_job_in_flight() {
        let flight = Flight::new();
        let applied = Arc::new(Mutex::new(Vec::new()));

        launch(&flight, ms(300), ms(1000), 1, &applied);
        time::sleep(ms(400)).await;
        assert_eq!(flight.phase(), Phase::InFlight);

        launch(&flight, ms(300), ms(100), 2, &applied);
        time::sleep(ms(2000)).await;

        assert_eq!(*applied.lock().unwrap(), [2]);
        assert_eq!(flight.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_silent_in_any_phase() {
        let flight = Flight::new();
        let applied = Arc::new(Mutex::new(Vec::new()));

        launch(&flight, ms(300), ms(100), 1, &applied);
        flight.cancel();
        assert_eq!(flight.phase(), Phase::Idle);

        launch(&flight, ms(300), ms(1000), 2, &applied);
        time::sleep(ms(400)).await;
        assert_eq!(flight.phase(), Phase::InFlight);
        flight.cancel();
        assert_eq!(flight.phase(), Phase::Idle);

        time::sleep(ms(5000)).await;
        assert!(applied.lock().unwrap().is_empty());
    }
}
