//! Core YouTube API client functionality.

use crate::MAX_COMMENTS;
use crate::youtube_api::chat::LiveChatMessageListResponse;
use crate::youtube_api::videos::VideoListResponse;
use eyre::Context;
use http::Method;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Client for the key-authenticated subset of the YouTube Data API v3.
///
/// Wraps a shared [`reqwest::Client`] and issues GET requests authenticated
/// with an API key passed as the `key` query parameter. The key is supplied
/// per call rather than stored: it is user input that may change between
/// fetch cycles.
///
/// Every request accepts a [`CancellationToken`]; a cancelled token aborts
/// the in-flight HTTP exchange and surfaces as an error from the call, so
/// shutdown never waits on a slow remote.
#[derive(Debug, Clone, Default)]
pub struct YouTubeClient {
    /// HTTP client for API requests.
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a new client around the provided HTTP client.
    ///
    /// Sharing one [`reqwest::Client`] across fetch cycles keeps connection
    /// reuse working between auto-refresh ticks.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Gets the live-streaming details for a single video by its ID.
    ///
    /// Uses the `videos.list` API with `part=liveStreamingDetails`. An
    /// unknown video ID is not an error: the response simply carries an
    /// empty item list, which callers fold into a "not found" result.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, api_key, cancel))]
    pub async fn get_video_live_details(
        &self,
        api_key: &str,
        video_id: &str,
        cancel: &CancellationToken,
    ) -> eyre::Result<VideoListResponse> {
        let url = "https://www.googleapis.com/youtube/v3/videos";
        let query_params = [("part", "liveStreamingDetails"), ("id", video_id)];

        let response = self
            .make_request(Method::GET, url, api_key, &query_params, cancel)
            .await?;

        let videos: VideoListResponse = response
            .json()
            .await
            .context("parse YouTube videos API response as JSON")?;

        tracing::debug!(
            video_id,
            returned_items = videos.items.len(),
            "fetched video live details"
        );

        Ok(videos)
    }

    /// Lists up to [`MAX_COMMENTS`] messages from an active live chat.
    ///
    /// Uses the `liveChatMessages.list` API with `part=snippet,authorDetails`.
    /// Only a single page is requested; the panel shows a bounded window of
    /// recent chat, not the full history.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/live/docs/liveChatMessages/list>
    #[instrument(skip(self, api_key, cancel))]
    pub async fn list_live_chat_messages(
        &self,
        api_key: &str,
        live_chat_id: &str,
        cancel: &CancellationToken,
    ) -> eyre::Result<LiveChatMessageListResponse> {
        let url = "https://www.googleapis.com/youtube/v3/liveChat/messages";
        let max_results = MAX_COMMENTS.to_string();
        let query_params = [
            ("part", "snippet,authorDetails"),
            ("maxResults", max_results.as_str()),
            ("liveChatId", live_chat_id),
        ];

        let response = self
            .make_request(Method::GET, url, api_key, &query_params, cancel)
            .await?;

        let messages: LiveChatMessageListResponse = response
            .json()
            .await
            .context("parse YouTube live chat API response as JSON")?;

        tracing::debug!(
            live_chat_id,
            returned_items = messages.items.len(),
            "fetched live chat messages"
        );

        Ok(messages)
    }

    /// Makes a key-authenticated HTTP request to the YouTube API with common
    /// error handling.
    ///
    /// Consolidates the shared logic across the API calls:
    /// - query parameter assembly, including the `key` credential
    /// - racing the exchange against the cancellation token
    /// - status code validation with the error body folded into the report
    ///
    /// # Returns
    ///
    /// The raw [`reqwest::Response`] for method-specific JSON parsing.
    #[instrument(skip(self, api_key, query_params, cancel), level = tracing::Level::TRACE)]
    async fn make_request(
        &self,
        method: Method,
        url: &str,
        api_key: &str,
        query_params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> eyre::Result<reqwest::Response> {
        let request = self
            .client
            .request(method.clone(), url)
            .query(query_params)
            .query(&[("key", api_key)]);

        let response = tokio::select! {
            response = request.send() => {
                response.with_context(|| format!("send {} request to YouTube API: {}", method, url))?
            }
            () = cancel.cancelled() => {
                return Err(eyre::eyre!("request to {} cancelled by shutdown", url));
            }
        };

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} request failed with status {}: {}",
                method,
                status_code,
                error_text
            ));
        }

        Ok(response)
    }
}
