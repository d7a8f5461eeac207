//! Orchestration of the fetch life cycle.
//!
//! [`RefreshController`] owns the three pieces of state shared between the
//! UI, the auto-refresh schedule, and the background fetch task:
//!
//! - a tagged [`FetchState`] behind one mutex, which makes single-flight a
//!   structural guarantee: a new task can only be spawned while the slot is
//!   `Idle`, and the previous task's handle is joined first;
//! - an `auto_refresh_enabled` flag read by the schedule on every tick;
//! - a [`CancellationToken`] that marks shutdown and aborts in-flight
//!   network calls.
//!
//! Everything else (`RefreshRequest`, `LiveData`) moves by value across the
//! task boundary and needs no locking.

use crate::fetcher::{FetchLive, LiveData, RefreshRequest};
use crate::ui::{PanelWidgets, UiContext, UiDispatcher};
use crate::video_id::extract_video_id;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Interval used when the interval field is left empty.
const DEFAULT_INTERVAL_MINUTES: f64 = 1.0;

/// What a call to [`RefreshController::trigger_refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A background fetch task was spawned.
    Started,
    /// A fetch was already in flight; nothing was spawned.
    Busy,
    /// Input validation failed; nothing was spawned.
    Rejected,
}

/// Whether a fetch cycle is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    Idle,
    InFlight,
}

/// The single-flight slot: the tagged state plus the handle of the most
/// recently spawned fetch task. The handle stays in the slot after the task
/// finishes so the next spawn (or shutdown) can join it.
struct FetchSlot {
    state: FetchState,
    task: Option<JoinHandle<()>>,
}

/// Drives fetch cycles: manual triggers, the auto-refresh schedule, and
/// shutdown sequencing.
///
/// The host UI calls [`trigger_refresh`](Self::trigger_refresh) from its
/// refresh button, [`start_auto_refresh`](Self::start_auto_refresh) /
/// [`stop_auto_refresh`](Self::stop_auto_refresh) from its toggle, and
/// [`shutdown`](Self::shutdown) when the panel closes. Every failure path
/// ends in a status message and a return to idle; nothing here is fatal.
pub struct RefreshController<F, C> {
    inner: Arc<Inner<F, C>>,
}

struct Inner<F, C> {
    fetcher: F,
    dispatcher: UiDispatcher<C>,
    slot: tokio::sync::Mutex<FetchSlot>,
    auto_refresh_enabled: AtomicBool,
    shutdown: CancellationToken,
    /// Handle of the running auto-refresh schedule, if any.
    schedule: Mutex<Option<JoinHandle<()>>>,
}

impl<F: FetchLive, C: UiContext> RefreshController<F, C> {
    pub fn new(fetcher: F, dispatcher: UiDispatcher<C>) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                dispatcher,
                slot: tokio::sync::Mutex::new(FetchSlot {
                    state: FetchState::Idle,
                    task: None,
                }),
                auto_refresh_enabled: AtomicBool::new(false),
                shutdown: CancellationToken::new(),
                schedule: Mutex::new(None),
            }),
        }
    }

    /// Starts one fetch cycle unless one is already in flight.
    ///
    /// Reads the URL and API key fields, validates them, and spawns the
    /// background task. Validation failures report a status message and
    /// leave the controller idle without spawning anything.
    pub async fn trigger_refresh(&self) -> RefreshOutcome {
        Inner::trigger_refresh(&self.inner).await
    }

    /// Installs the auto-refresh schedule and immediately triggers a fetch.
    ///
    /// The interval field is parsed as a real number of minutes; an empty
    /// field falls back to one minute. Returns `false` (with a status
    /// message, no schedule, and the flag left off) if the field does not
    /// parse or is not a positive finite number.
    pub async fn start_auto_refresh(&self) -> bool {
        let inner = &self.inner;

        if inner.shutdown.is_cancelled() {
            return false;
        }

        let text = PanelWidgets::field_text(&inner.dispatcher.widgets().interval_field);
        let minutes = if text.is_empty() {
            DEFAULT_INTERVAL_MINUTES
        } else {
            match text.parse::<f64>() {
                Ok(minutes) => minutes,
                Err(_) => {
                    inner
                        .dispatcher
                        .set_status("Invalid refresh interval. Enter minutes.");
                    return false;
                }
            }
        };

        if !minutes.is_finite() || minutes <= 0.0 {
            inner
                .dispatcher
                .set_status("The interval must be greater than zero.");
            return false;
        }

        let interval = Duration::from_millis((minutes * 60_000.0) as u64);

        // Replace any schedule that is already running.
        self.stop_auto_refresh();
        inner.auto_refresh_enabled.store(true, Ordering::SeqCst);

        let weak = Arc::downgrade(inner);
        let handle = tokio::spawn(run_schedule(weak, interval));
        *inner.schedule.lock().unwrap() = Some(handle);

        tracing::debug!(?interval, "auto refresh started");
        self.trigger_refresh().await;
        true
    }

    /// Stops the auto-refresh schedule. Idempotent.
    pub fn stop_auto_refresh(&self) {
        self.inner
            .auto_refresh_enabled
            .store(false, Ordering::SeqCst);
        if let Some(handle) = self.inner.schedule.lock().unwrap().take() {
            handle.abort();
            tracing::debug!("auto refresh stopped");
        }
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.inner.auto_refresh_enabled.load(Ordering::SeqCst)
    }

    /// Tears the controller down: marks shutdown, cancels in-flight network
    /// calls, stops the schedule, and joins the outstanding fetch task.
    ///
    /// Once this begins, no further closure is posted to the UI context; a
    /// result arriving mid-shutdown is discarded silently.
    pub async fn shutdown(&self) {
        self.inner.shutdown.cancel();
        self.stop_auto_refresh();

        // Take the handle out before awaiting it: the task needs the slot
        // lock to mark itself idle.
        let task = { self.inner.slot.lock().await.task.take() };
        if let Some(task) = task {
            let _ = task.await;
        }
        tracing::debug!("refresh controller shut down");
    }

    /// Joins the currently outstanding fetch task, if any.
    #[cfg(test)]
    pub(crate) async fn join_in_flight_fetch(&self) {
        let task = { self.inner.slot.lock().await.task.take() };
        if let Some(task) = task {
            let _ = task.await;
        }
    }
}

impl<F: FetchLive, C: UiContext> Inner<F, C> {
    async fn trigger_refresh(this: &Arc<Self>) -> RefreshOutcome {
        // Once teardown begins nothing may touch the UI or spawn a task
        // that no one would join.
        if this.shutdown.is_cancelled() {
            return RefreshOutcome::Rejected;
        }

        let mut slot = this.slot.lock().await;

        if slot.state == FetchState::InFlight {
            this.dispatcher.set_status("Update already in progress...");
            return RefreshOutcome::Busy;
        }

        let widgets = this.dispatcher.widgets();
        let api_key = PanelWidgets::field_text(&widgets.api_key_field);
        let live_url = PanelWidgets::field_text(&widgets.url_field);

        if api_key.is_empty() || live_url.is_empty() {
            this.dispatcher
                .set_status("Please provide both the live URL and API key.");
            return RefreshOutcome::Rejected;
        }

        let Some(video_id) = extract_video_id(&live_url) else {
            this.dispatcher
                .set_status("Unable to determine the video ID.");
            return RefreshOutcome::Rejected;
        };

        // Join the finished predecessor before spawning its replacement, so
        // exactly one task handle exists at a time. The slot is only ever
        // Idle here, so the await completes without touching the lock again.
        if let Some(task) = slot.task.take() {
            let _ = task.await;
        }

        this.dispatcher.show_fetch_started();

        slot.state = FetchState::InFlight;
        let request = RefreshRequest { api_key, video_id };
        tracing::debug!(video_id = %request.video_id, "spawning fetch task");

        let inner = Arc::clone(this);
        slot.task = Some(tokio::spawn(async move {
            inner.run_fetch(request).await;
        }));

        RefreshOutcome::Started
    }

    /// Body of the background fetch task: run the cycle, degrade errors to a
    /// status message, mark the slot idle, then hand the result to the UI
    /// unless shutdown has begun.
    async fn run_fetch(self: Arc<Self>, request: RefreshRequest) {
        let data = if self.shutdown.is_cancelled() {
            LiveData::default()
        } else {
            match self
                .fetcher
                .fetch(request, self.shutdown.child_token())
                .await
            {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(error = %e, "fetch cycle failed");
                    LiveData {
                        status_text: format!("Error: {e:#}"),
                        ..LiveData::default()
                    }
                }
            }
        };

        self.slot.lock().await.state = FetchState::Idle;

        if self.shutdown.is_cancelled() {
            tracing::debug!("discarding fetch result, controller is shutting down");
            return;
        }

        self.dispatcher.apply(data);
    }
}

/// The auto-refresh schedule: sleep, then trigger, until told to stop.
///
/// Holds only a weak reference so a dropped controller ends the schedule on
/// its next tick rather than being kept alive by it.
async fn run_schedule<F: FetchLive, C: UiContext>(weak: Weak<Inner<F, C>>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;

        let Some(inner) = weak.upgrade() else {
            return;
        };
        if !inner.auto_refresh_enabled.load(Ordering::SeqCst) || inner.shutdown.is_cancelled() {
            tracing::debug!("auto refresh schedule ending");
            return;
        }

        Inner::trigger_refresh(&inner).await;
    }
}
