//! Posts, replies and the recent-messages feed.

use std::rc::Rc;

use chirp_core::error::{FeedError, Result};
use chirp_core::models::{
    char_len, Message, RecentMessages, Reply, EVENT_CREATE, EVENT_REPLY, MAX_BODY_CHARS,
};
use chirp_core::time_utils::now_timestamp;
use tracing::debug;

use crate::events::EventLog;
use crate::store::{load_collection, update_collection, Storage, MESSAGES};

/// Message store backed by the `messages` collection.
///
/// Each successful post or reply is recorded in the [`EventLog`].
pub struct MessageStore {
    storage: Rc<dyn Storage>,
    events: Rc<EventLog>,
}

impl MessageStore {
    pub fn new(storage: Rc<dyn Storage>, events: Rc<EventLog>) -> Self {
        Self { storage, events }
    }

    /// Publish a new message by `author`.
    ///
    /// The id is the current message count plus one. Messages are never
    /// deleted, so this stays unique.
    pub fn post_message(&self, author: &str, body: &str) -> Result<Message> {
        check_length("Message", body)?;

        let message = update_collection(&*self.storage, MESSAGES, |messages: &mut Vec<Message>| {
            let message = Message {
                id: messages.len() as u64 + 1,
                author: author.to_string(),
                timestamp: now_timestamp(),
                body: body.to_string(),
                replies: Vec::new(),
            };
            messages.push(message.clone());
            Ok(message)
        })?;

        debug!(id = message.id, author, "message posted");
        self.events.record_event(EVENT_CREATE, author)?;
        Ok(message)
    }

    /// Append a reply by `author` to message `message_id`.
    pub fn post_reply(&self, message_id: u64, author: &str, body: &str) -> Result<Reply> {
        check_length("Reply", body)?;

        let reply = update_collection(&*self.storage, MESSAGES, |messages: &mut Vec<Message>| {
            let target = messages
                .iter_mut()
                .find(|m| m.id == message_id)
                .ok_or(FeedError::MessageNotFound(message_id))?;

            let reply = Reply {
                author: author.to_string(),
                timestamp: now_timestamp(),
                body: body.to_string(),
            };
            target.replies.push(reply.clone());
            Ok(reply)
        })?;

        debug!(message_id, author, "reply posted");
        self.events.record_event(EVENT_REPLY, author)?;
        Ok(reply)
    }

    /// The last `count` messages, oldest first, with their replies.
    pub fn list_recent(&self, count: usize) -> Result<RecentMessages> {
        let messages = self.all()?;
        if messages.is_empty() {
            return Ok(RecentMessages::Empty);
        }

        let start = messages.len().saturating_sub(count);
        Ok(RecentMessages::Messages(messages[start..].to_vec()))
    }

    /// Look up a single message by id.
    pub fn get(&self, message_id: u64) -> Result<Option<Message>> {
        Ok(self.all()?.into_iter().find(|m| m.id == message_id))
    }

    /// Every message in storage order.
    pub fn all(&self) -> Result<Vec<Message>> {
        load_collection(&*self.storage, MESSAGES)
    }
}

fn check_length(field: &'static str, body: &str) -> Result<()> {
    let actual = char_len(body);
    if actual > MAX_BODY_CHARS {
        return Err(FeedError::Validation {
            field,
            limit: MAX_BODY_CHARS,
            actual,
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
