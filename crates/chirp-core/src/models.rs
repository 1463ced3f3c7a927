use serde::{Deserialize, Serialize};

/// Maximum number of characters allowed in a message or reply body.
pub const MAX_BODY_CHARS: usize = 300;

/// Number of messages shown by the dashboard when no count is given.
pub const DEFAULT_RECENT_COUNT: usize = 10;

/// Event type recorded when a message is posted.
pub const EVENT_CREATE: &str = "create";
/// Event type recorded when a reply is posted.
pub const EVENT_REPLY: &str = "reply";

/// A single entry in the activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// What happened, e.g. [`EVENT_CREATE`] or [`EVENT_REPLY`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Username that triggered the event.
    pub user: String,
    /// Local wall-clock time, `%Y-%m-%d %H:%M:%S`.
    #[serde(default)]
    pub timestamp: String,
}

/// A reply attached to a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub author: String,
    #[serde(default)]
    pub timestamp: String,
    /// Reply text; stored under `"reply"`.
    #[serde(rename = "reply", default)]
    pub body: String,
}

/// A top-level post together with its replies in posting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// 1-based sequential identifier.
    pub id: u64,
    pub author: String,
    #[serde(default)]
    pub timestamp: String,
    /// Message text; stored under `"message"`.
    #[serde(rename = "message", default)]
    pub body: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Message {
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }
}

/// Result of asking for the most recent messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentMessages {
    /// The store holds no messages at all.
    Empty,
    /// The requested tail of the store, oldest first.
    Messages(Vec<Message>),
}

/// Aggregate statistics shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// User with the most recorded events, if any.
    pub most_active_user: Option<String>,
    /// Message with the most replies, if any.
    pub most_replied_message: Option<Message>,
    /// Number of distinct users across the event log.
    pub unique_visitors: usize,
    /// Total number of events in the log.
    pub total_events: usize,
    /// Total number of messages in the store.
    pub total_messages: usize,
}

/// Count characters the way users see them (Unicode scalar values, not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
