//! Asynchronous refresh engine for a YouTube Live tablet panel.
//!
//! The panel itself (widgets, layout, the host application embedding it) is
//! external; this crate is the part with actual coordination obligations:
//! turning user-entered text into a validated fetch request, running it on a
//! background task with single-flight semantics, driving an optional
//! auto-refresh schedule, and marshalling the result back onto the UI's
//! single-threaded context even if the panel was torn down mid-flight.
//!
//! Flow: a button press or schedule tick enters
//! [`controller::RefreshController::trigger_refresh`], which resolves the
//! video ID via [`video_id::extract_video_id`], spawns a task running
//! [`fetcher::LiveDataFetcher`] against the two YouTube Data API v3
//! endpoints in [`youtube_api`], and posts the finished
//! [`fetcher::LiveData`] through [`ui::UiDispatcher`].

pub mod controller;
pub mod fetcher;
pub mod ui;
pub mod video_id;
pub mod youtube_api;

/// Upper bound on chat lines fetched and displayed per cycle.
pub const MAX_COMMENTS: usize = 25;

pub use controller::{RefreshController, RefreshOutcome};
pub use fetcher::{FetchLive, LiveData, LiveDataFetcher, RefreshRequest};
pub use ui::{ItemList, Label, PanelWidgets, TextInput, UiContext, UiDispatcher, WidgetRef};
pub use video_id::extract_video_id;
pub use youtube_api::YouTubeClient;
