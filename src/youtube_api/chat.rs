//! YouTube Live Chat API types.

use serde::{Deserialize, Serialize};

/// Response structure for the `liveChatMessages.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/live/docs/liveChatMessages/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct LiveChatMessageListResponse {
    /// A list of live chat messages, oldest first.
    #[serde(default)]
    pub items: Vec<LiveChatMessage>,
}

/// A `liveChatMessage` resource represents one message in a live chat.
///
/// See: <https://developers.google.com/youtube/v3/live/docs/liveChatMessages#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct LiveChatMessage {
    /// The ID that YouTube assigns to uniquely identify the message.
    pub id: String,
    /// Details about the message.
    pub snippet: Option<LiveChatMessageSnippet>,
    /// Details about the message author.
    #[serde(rename = "authorDetails")]
    pub author_details: Option<LiveChatMessageAuthor>,
}

/// Details about a live chat message.
#[derive(Debug, Serialize, Deserialize)]
pub struct LiveChatMessageSnippet {
    /// The message text ready for display.
    ///
    /// Absent for event-type messages (deletions, bans) that carry no
    /// displayable text.
    #[serde(rename = "displayMessage")]
    pub display_message: Option<String>,
}

/// Details about the author of a live chat message.
#[derive(Debug, Serialize, Deserialize)]
pub struct LiveChatMessageAuthor {
    /// The channel's display name.
    ///
    /// Not guaranteed by the API; callers fall back to a generic author.
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}
