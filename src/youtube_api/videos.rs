//! YouTube Videos API types.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `videos.list` API call.
///
/// Contains the [`Video`] resources that match the request criteria. An
/// unknown or deleted video ID yields an empty `items` list rather than an
/// HTTP error.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// A list of videos that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Video>,
}

/// A `video` resource represents a YouTube video.
///
/// Only the live-streaming portion is requested here (`part=liveStreamingDetails`).
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    /// Metadata about a live video broadcast.
    ///
    /// Absent for regular uploads that were never live.
    #[serde(rename = "liveStreamingDetails")]
    pub live_streaming_details: Option<LiveStreamingDetails>,
}

/// Metadata about a live video broadcast.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#liveStreamingDetails>
#[derive(Debug, Serialize, Deserialize)]
pub struct LiveStreamingDetails {
    /// The number of viewers currently watching the broadcast.
    ///
    /// The API serializes this count as a JSON string. Only present while
    /// the broadcast is live and the owner has made viewer counts visible.
    #[serde(rename = "concurrentViewers")]
    pub concurrent_viewers: Option<String>,
    /// The ID of the currently active live chat attached to this video.
    ///
    /// Absent once the broadcast ends or if chat is disabled.
    #[serde(rename = "activeLiveChatId")]
    pub active_live_chat_id: Option<String>,
}
