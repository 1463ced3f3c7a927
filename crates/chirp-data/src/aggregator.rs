//! Usage statistics derived from the event log and the message store.
//!
//! The slice-level functions hold the rules; [`Aggregator`] loads the
//! collections and applies them.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use chirp_core::error::Result;
use chirp_core::models::{Event, FeedStats, Message};

use crate::store::{load_collection, Storage, EVENTS, MESSAGES};

// ── Pure rules ────────────────────────────────────────────────────────────────

/// User with the most events.
///
/// Ties go to the user whose first event comes earliest in the log.
pub fn most_active(events: &[Event]) -> Option<String> {
    // user -> (position of first event, count)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, event) in events.iter().enumerate() {
        counts.entry(event.user.as_str()).or_insert((idx, 0)).1 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (first_a, count_a)), (_, (first_b, count_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(user, _)| user.to_string())
}

/// Message with the most replies; ties go to the earliest in storage order.
pub fn most_replied(messages: &[Message]) -> Option<&Message> {
    messages.iter().fold(None, |best: Option<&Message>, msg| match best {
        Some(b) if b.reply_count() >= msg.reply_count() => Some(b),
        _ => Some(msg),
    })
}

/// Number of distinct users in `events`.
pub fn unique_users(events: &[Event]) -> usize {
    events
        .iter()
        .map(|e| e.user.as_str())
        .collect::<HashSet<_>>()
        .len()
}

// ── Aggregator ────────────────────────────────────────────────────────────────

/// Reads the `events` and `messages` collections on every call.
pub struct Aggregator {
    storage: Rc<dyn Storage>,
}

impl Aggregator {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// `None` when the event log is empty.
    pub fn most_active_user(&self) -> Result<Option<String>> {
        Ok(most_active(&self.events()?))
    }

    /// `None` when the message store is missing or empty.
    pub fn most_replied_message(&self) -> Result<Option<Message>> {
        Ok(most_replied(&self.messages()?).cloned())
    }

    pub fn unique_visitor_count(&self) -> Result<usize> {
        Ok(unique_users(&self.events()?))
    }

    /// Every statistic from one load of each collection.
    pub fn snapshot(&self) -> Result<FeedStats> {
        let events = self.events()?;
        let messages = self.messages()?;

        Ok(FeedStats {
            most_active_user: most_active(&events),
            most_replied_message: most_replied(&messages).cloned(),
            unique_visitors: unique_users(&events),
            total_events: events.len(),
            total_messages: messages.len(),
        })
    }

    fn events(&self) -> Result<Vec<Event>> {
        load_collection(&*self.storage, EVENTS)
    }

    fn messages(&self) -> Result<Vec<Message>> {
        load_collection(&*self.storage, MESSAGES)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
