//! Key-authenticated YouTube Data API v3 client.
//!
//! This module covers exactly the two endpoints the live panel consumes:
//!
//! - [`client::YouTubeClient::get_video_live_details`] — `videos.list` with
//!   `part=liveStreamingDetails`, which reports whether a video is (or was)
//!   a live broadcast, its concurrent viewer count, and the ID of its
//!   active live chat.
//! - [`client::YouTubeClient::list_live_chat_messages`] — one bounded page
//!   of `liveChatMessages.list`, used to show a window of recent chat.
//!
//! Requests are authenticated with a plain API key (`key` query parameter);
//! none of the OAuth-only surface of the API is reachable from here.

pub mod chat;
pub mod client;
pub mod videos;

// Re-export main types for convenience
pub use chat::{LiveChatMessage, LiveChatMessageAuthor, LiveChatMessageListResponse};
pub use client::YouTubeClient;
pub use videos::{LiveStreamingDetails, Video, VideoListResponse};
