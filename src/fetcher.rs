//! One fetch cycle: metadata, then chat, folded into a [`LiveData`].

use crate::MAX_COMMENTS;
use crate::youtube_api::YouTubeClient;
use crate::youtube_api::chat::LiveChatMessage;
use crate::youtube_api::videos::LiveStreamingDetails;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Placeholder shown when a chat fetch yields no displayable messages.
pub const NO_MESSAGES_PLACEHOLDER: &str = "No live chat messages available.";
/// Placeholder shown when the stream has no active live chat.
const CHAT_INACTIVE_PLACEHOLDER: &str = "Live chat is not active for this stream.";
/// Placeholder shown when the video carries no live-streaming details at all.
const NO_LIVE_DETAILS_PLACEHOLDER: &str = "Live stream does not expose live chat data.";

/// The inputs of one fetch cycle.
///
/// Built once per cycle from validated user input and moved into the
/// background task that consumes it; never shared or mutated.
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    /// YouTube Data API v3 key.
    pub api_key: String,
    /// Canonical 11-character video ID.
    pub video_id: String,
}

/// The outcome of one fetch cycle, ready for display.
///
/// Produced exactly once per completed cycle and handed to the UI by value.
/// `comments` never exceeds [`MAX_COMMENTS`] and, once assembly finishes, is
/// never empty: a placeholder line stands in when no messages are available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveData {
    /// Whether the cycle reached the "last update" stamp.
    ///
    /// Note that "stream not found" leaves this false without being an
    /// error: it is an expected state of a live stream's lifecycle.
    pub success: bool,
    /// Viewer-count line, e.g. `Concurrent viewers: 1532`.
    pub viewers_text: String,
    /// Status line, e.g. `Last update: 18:04:32` or an error description.
    pub status_text: String,
    /// Display lines for the chat list, oldest first.
    pub comments: Vec<String>,
}

/// The seam between [`crate::controller::RefreshController`] and the network.
///
/// Production code uses [`LiveDataFetcher`]; tests substitute stubs to
/// exercise the controller without a remote.
pub trait FetchLive: Send + Sync + 'static {
    /// Runs one fetch cycle for `request`.
    ///
    /// Expected lifecycle states (stream not found, chat inactive) fold into
    /// an `Ok` result with explanatory text; only transport and decoding
    /// failures surface as errors.
    fn fetch(
        &self,
        request: RefreshRequest,
        cancel: CancellationToken,
    ) -> impl Future<Output = eyre::Result<LiveData>> + Send;
}

/// Fetches live metadata and chat through the [`YouTubeClient`].
#[derive(Debug, Clone, Default)]
pub struct LiveDataFetcher {
    client: YouTubeClient,
}

impl LiveDataFetcher {
    pub fn new(client: YouTubeClient) -> Self {
        Self { client }
    }

    /// Runs one fetch cycle: video metadata first, then (if an active chat
    /// exists) one bounded page of chat messages.
    #[instrument(skip(self, request, cancel), fields(video_id = %request.video_id))]
    async fn download_live_data(
        &self,
        request: RefreshRequest,
        cancel: CancellationToken,
    ) -> eyre::Result<LiveData> {
        let videos = self
            .client
            .get_video_live_details(&request.api_key, &request.video_id, &cancel)
            .await?;

        let Some(video) = videos.items.into_iter().next() else {
            return Ok(LiveData {
                status_text: "Live stream not found.".to_string(),
                ..LiveData::default()
            });
        };

        let (mut data, chat_id) = live_data_from_details(video.live_streaming_details);

        if let Some(chat_id) = chat_id {
            let chat = self
                .client
                .list_live_chat_messages(&request.api_key, &chat_id, &cancel)
                .await?;
            data.comments = compose_comment_lines(&chat.items);
        }

        finish_live_data(&mut data);
        Ok(data)
    }
}

impl FetchLive for LiveDataFetcher {
    fn fetch(
        &self,
        request: RefreshRequest,
        cancel: CancellationToken,
    ) -> impl Future<Output = eyre::Result<LiveData>> + Send {
        self.download_live_data(request, cancel)
    }
}

/// Folds the optional live-streaming details into a partial [`LiveData`],
/// returning the active chat ID if chat messages still need to be fetched.
///
/// A video without live-streaming details and a stream without an active
/// chat are expected states, reported through explanatory text.
fn live_data_from_details(
    details: Option<LiveStreamingDetails>,
) -> (LiveData, Option<String>) {
    let mut data = LiveData::default();

    let Some(details) = details else {
        data.viewers_text = "Concurrent viewers: unavailable".to_string();
        data.comments.push(NO_LIVE_DETAILS_PLACEHOLDER.to_string());
        return (data, None);
    };

    data.viewers_text = match details.concurrent_viewers {
        Some(viewers) => format!("Concurrent viewers: {viewers}"),
        None => "Concurrent viewers: n/a".to_string(),
    };

    if details.active_live_chat_id.is_none() {
        data.comments.push(CHAT_INACTIVE_PLACEHOLDER.to_string());
    }

    (data, details.active_live_chat_id)
}

/// Composes display lines (`<author>: <text>`) from raw chat messages.
///
/// Messages without displayable text are skipped; a missing author falls
/// back to "Unknown". At most [`MAX_COMMENTS`] lines are collected.
fn compose_comment_lines(messages: &[LiveChatMessage]) -> Vec<String> {
    let mut lines = Vec::new();
    for message in messages {
        let text = message
            .snippet
            .as_ref()
            .and_then(|s| s.display_message.as_deref())
            .unwrap_or_default();
        if text.is_empty() {
            continue;
        }
        let author = message
            .author_details
            .as_ref()
            .and_then(|a| a.display_name.as_deref())
            .unwrap_or("Unknown");
        lines.push(format!("{author}: {text}"));
        if lines.len() >= MAX_COMMENTS {
            break;
        }
    }
    lines
}

/// Stamps a completed cycle: guarantee a non-empty comment list and record
/// the local wall-clock time of the update.
fn finish_live_data(data: &mut LiveData) {
    if data.comments.is_empty() {
        data.comments.push(NO_MESSAGES_PLACEHOLDER.to_string());
    }
    data.status_text = format!("Last update: {}", format_timestamp());
    data.success = true;
}

/// Local wall-clock time as `HH:MM:SS`.
fn format_timestamp() -> String {
    jiff::Zoned::now().strftime("%H:%M:%S").to_string()
}
