//! Marshalling results back onto the UI context.
//!
//! The widget toolkit itself lives in the host application; this module only
//! defines the surface the refresh engine consumes: a way to run a closure
//! on the UI's single-threaded context, and validity-checked handles to the
//! few widgets the engine reads or writes. A handle whose widget has been
//! torn down turns the corresponding update into a silent no-op, so a fetch
//! that completes after the panel closed never touches dead UI.

use crate::MAX_COMMENTS;
use crate::fetcher::{LiveData, NO_MESSAGES_PLACEHOLDER};
use std::sync::{Arc, Weak};

/// The UI's single-threaded execution context.
///
/// `execute_later` schedules a closure to run on the UI thread; it must
/// never run the closure on the caller's thread.
pub trait UiContext: Send + Sync + 'static {
    fn execute_later(&self, job: Box<dyn FnOnce() + Send + 'static>);
}

/// A widget that displays a single line of text.
pub trait Label: Send + Sync + 'static {
    fn set_text(&self, text: &str);
}

/// A text-entry widget the user types into.
pub trait TextInput: Send + Sync + 'static {
    fn text(&self) -> String;
}

/// A widget showing an ordered list of entries.
pub trait ItemList: Send + Sync + 'static {
    fn clear(&self);
    /// Appends an entry tagged with its position; `-1` marks placeholders.
    fn add(&self, entry: &str, index: i32);
}

/// Non-owning, validity-checked handle to a widget owned by the UI.
///
/// Wraps a [`Weak`] reference; [`WidgetRef::upgrade`] is the explicit
/// "still alive" query. The engine holds only these handles, so widget
/// lifetimes stay entirely with the host UI.
pub struct WidgetRef<W: ?Sized>(Weak<W>);

impl<W: ?Sized> WidgetRef<W> {
    pub fn new(widget: &Arc<W>) -> Self {
        Self(Arc::downgrade(widget))
    }

    /// Returns the widget if it is still alive.
    pub fn upgrade(&self) -> Option<Arc<W>> {
        self.0.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl<W: ?Sized> Clone for WidgetRef<W> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Handles to the widgets the refresh engine talks to.
#[derive(Clone)]
pub struct PanelWidgets {
    /// Field holding the live URL or bare video ID.
    pub url_field: WidgetRef<dyn TextInput>,
    /// Field holding the API key.
    pub api_key_field: WidgetRef<dyn TextInput>,
    /// Field holding the refresh interval in minutes.
    pub interval_field: WidgetRef<dyn TextInput>,
    /// Status line below the inputs.
    pub status_label: WidgetRef<dyn Label>,
    /// Concurrent-viewers line.
    pub viewers_label: WidgetRef<dyn Label>,
    /// The live chat list.
    pub comments_list: WidgetRef<dyn ItemList>,
}

impl PanelWidgets {
    /// Reads a text field through its handle; a dead field reads as empty.
    pub(crate) fn field_text(field: &WidgetRef<dyn TextInput>) -> String {
        field
            .upgrade()
            .map(|f| f.text().trim().to_string())
            .unwrap_or_default()
    }
}

/// Posts display updates onto the UI context.
///
/// All observable effects are confined to the status label, the viewers
/// label, and the comments list.
pub struct UiDispatcher<C> {
    context: C,
    widgets: PanelWidgets,
}

impl<C: UiContext> UiDispatcher<C> {
    pub fn new(context: C, widgets: PanelWidgets) -> Self {
        Self { context, widgets }
    }

    pub fn widgets(&self) -> &PanelWidgets {
        &self.widgets
    }

    /// Sets the status line.
    pub fn set_status(&self, text: impl Into<String>) {
        let text = text.into();
        let status = self.widgets.status_label.clone();
        self.context.execute_later(Box::new(move || {
            if let Some(label) = status.upgrade() {
                label.set_text(&text);
            }
        }));
    }

    /// Puts the panel into its "fetch running" shape: status says so, the
    /// viewer count is reset, and the list shows a loading placeholder.
    pub fn show_fetch_started(&self) {
        let widgets = self.widgets.clone();
        self.context.execute_later(Box::new(move || {
            if let Some(status) = widgets.status_label.upgrade() {
                status.set_text("Updating...");
            }
            if let Some(viewers) = widgets.viewers_label.upgrade() {
                viewers.set_text("Concurrent viewers: --");
            }
            if let Some(list) = widgets.comments_list.upgrade() {
                list.clear();
                list.add("Loading live chat messages...", -1);
            }
        }));
    }

    /// Applies a completed fetch cycle to the panel.
    pub fn apply(&self, data: LiveData) {
        let widgets = self.widgets.clone();
        self.context.execute_later(Box::new(move || {
            if let Some(status) = widgets.status_label.upgrade() {
                let text = if data.status_text.is_empty() {
                    "Ready"
                } else {
                    &data.status_text
                };
                status.set_text(text);
            }
            if let Some(viewers) = widgets.viewers_label.upgrade() {
                let text = if data.viewers_text.is_empty() {
                    "Concurrent viewers: --"
                } else {
                    &data.viewers_text
                };
                viewers.set_text(text);
            }
            if let Some(list) = widgets.comments_list.upgrade() {
                list.clear();
                if data.comments.is_empty() {
                    list.add(NO_MESSAGES_PLACEHOLDER, -1);
                } else {
                    for (index, entry) in data.comments.iter().take(MAX_COMMENTS).enumerate() {
                        list.add(entry, index as i32);
                    }
                }
            }
        }));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fake widgets and an inline UI context for engine tests.

    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Runs posted closures immediately on the calling thread and counts
    /// them, so tests can assert that nothing was posted after shutdown.
    #[derive(Default)]
    pub struct InlineContext {
        posted: Arc<AtomicUsize>,
    }

    impl InlineContext {
        pub fn post_counter(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.posted)
        }
    }

    impl UiContext for InlineContext {
        fn execute_later(&self, job: Box<dyn FnOnce() + Send + 'static>) {
            self.posted.fetch_add(1, Ordering::SeqCst);
            job();
        }
    }

    #[derive(Default)]
    pub struct FakeLabel {
        pub text: Mutex<String>,
    }

    impl Label for FakeLabel {
        fn set_text(&self, text: &str) {
            *self.text.lock().unwrap() = text.to_string();
        }
    }

    pub struct FakeTextInput {
        pub value: Mutex<String>,
    }

    impl FakeTextInput {
        pub fn new(value: &str) -> Self {
            Self {
                value: Mutex::new(value.to_string()),
            }
        }
    }

    impl TextInput for FakeTextInput {
        fn text(&self) -> String {
            self.value.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    pub struct FakeList {
        pub entries: Mutex<Vec<(String, i32)>>,
    }

    impl ItemList for FakeList {
        fn clear(&self) {
            self.entries.lock().unwrap().clear();
        }

        fn add(&self, entry: &str, index: i32) {
            self.entries.lock().unwrap().push((entry.to_string(), index));
        }
    }

    /// Owns the fake widgets so tests can inspect (or drop) them while the
    /// engine holds only weak handles.
    pub struct FakePanel {
        pub url_field: Arc<FakeTextInput>,
        pub api_key_field: Arc<FakeTextInput>,
        pub interval_field: Arc<FakeTextInput>,
        pub status_label: Arc<FakeLabel>,
        pub viewers_label: Arc<FakeLabel>,
        pub comments_list: Arc<FakeList>,
    }

    impl FakePanel {
        pub fn new(url: &str, api_key: &str, interval: &str) -> Self {
            Self {
                url_field: Arc::new(FakeTextInput::new(url)),
                api_key_field: Arc::new(FakeTextInput::new(api_key)),
                interval_field: Arc::new(FakeTextInput::new(interval)),
                status_label: Arc::new(FakeLabel::default()),
                viewers_label: Arc::new(FakeLabel::default()),
                comments_list: Arc::new(FakeList::default()),
            }
        }

        pub fn widgets(&self) -> PanelWidgets {
            PanelWidgets {
                url_field: WidgetRef::new(&(Arc::clone(&self.url_field) as Arc<dyn TextInput>)),
                api_key_field: WidgetRef::new(
                    &(Arc::clone(&self.api_key_field) as Arc<dyn TextInput>),
                ),
                interval_field: WidgetRef::new(
                    &(Arc::clone(&self.interval_field) as Arc<dyn TextInput>),
                ),
                status_label: WidgetRef::new(&(Arc::clone(&self.status_label) as Arc<dyn Label>)),
                viewers_label: WidgetRef::new(&(Arc::clone(&self.viewers_label) as Arc<dyn Label>)),
                comments_list: WidgetRef::new(
                    &(Arc::clone(&self.comments_list) as Arc<dyn ItemList>),
                ),
            }
        }

        pub fn status(&self) -> String {
            self.status_label.text.lock().unwrap().clone()
        }

        pub fn viewers(&self) -> String {
            self.viewers_label.text.lock().unwrap().clone()
        }

        pub fn list_entries(&self) -> Vec<(String, i32)> {
            self.comments_list.entries.lock().unwrap().clone()
        }
    }
}
