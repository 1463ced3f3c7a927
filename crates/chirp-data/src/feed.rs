//! One handle over every feed operation, sharing a single storage backend.

use std::rc::Rc;

use chirp_core::error::Result;
use chirp_core::models::{Event, FeedStats, Message, RecentMessages, Reply};

use crate::aggregator::Aggregator;
use crate::events::{EventListener, EventLog};
use crate::messages::MessageStore;
use crate::store::Storage;
use crate::users::UserManager;

// ── FeedBuilder ───────────────────────────────────────────────────────────────

/// Collects listeners before the event log is shared.
pub struct FeedBuilder {
    storage: Rc<dyn Storage>,
    listeners: Vec<Box<dyn EventListener>>,
}

impl FeedBuilder {
    pub fn with_listener(mut self, listener: impl EventListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn build(self) -> Feed {
        let mut log = EventLog::new(Rc::clone(&self.storage));
        for listener in self.listeners {
            log.register(listener);
        }
        let events = Rc::new(log);

        Feed {
            messages: MessageStore::new(Rc::clone(&self.storage), Rc::clone(&events)),
            users: UserManager::new(Rc::clone(&self.storage)),
            stats: Aggregator::new(Rc::clone(&self.storage)),
            events,
        }
    }
}

// ── Feed ──────────────────────────────────────────────────────────────────────

pub struct Feed {
    events: Rc<EventLog>,
    messages: MessageStore,
    users: UserManager,
    stats: Aggregator,
}

impl Feed {
    pub fn builder(storage: Rc<dyn Storage>) -> FeedBuilder {
        FeedBuilder {
            storage,
            listeners: Vec::new(),
        }
    }

    /// A feed with no listeners.
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self::builder(storage).build()
    }

    // Users

    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        self.users.register(username, password)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        self.users.login(username, password)
    }

    // Messages

    pub fn post_message(&self, author: &str, body: &str) -> Result<Message> {
        self.messages.post_message(author, body)
    }

    pub fn post_reply(&self, message_id: u64, author: &str, body: &str) -> Result<Reply> {
        self.messages.post_reply(message_id, author, body)
    }

    pub fn list_recent(&self, count: usize) -> Result<RecentMessages> {
        self.messages.list_recent(count)
    }

    pub fn message(&self, message_id: u64) -> Result<Option<Message>> {
        self.messages.get(message_id)
    }

    // Events and statistics

    pub fn record_event(&self, kind: &str, user: &str) -> Result<Event> {
        self.events.record_event(kind, user)
    }

    pub fn events(&self) -> Result<Vec<Event>> {
        self.events.events()
    }

    pub fn most_active_user(&self) -> Result<Option<String>> {
        self.stats.most_active_user()
    }

    pub fn most_replied_message(&self) -> Result<Option<Message>> {
        self.stats.most_replied_message()
    }

    pub fn unique_visitor_count(&self) -> Result<usize> {
        self.stats.unique_visitor_count()
    }

    pub fn stats(&self) -> Result<FeedStats> {
        self.stats.snapshot()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use chirp_core::error::FeedError;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use tempfile::TempDir;

    struct Counter(Rc<RefCell<usize>>);

    impl EventListener for Counter {
        fn on_event(&self, _event: &Event) {
            *self.0.borrow_mut() += 1;
        }
    }

    fn memory_feed() -> Feed {
        Feed::new(Rc::new(MemoryStore::new()))
    }

    #[test]
    fn test_builder_wires_listeners() {
        let hits = Rc::new(RefCell::new(0));
        let feed = Feed::builder(Rc::new(MemoryStore::new()))
            .with_listener(Counter(Rc::clone(&hits)))
            .with_listener(Counter(Rc::clone(&hits)))
            .build();

        feed.post_message("alice", "hello").unwrap();
        feed.post_reply(1, "bob", "hi").unwrap();
        assert_eq!(*hits.borrow(), 4);
    }

    #[test]
    fn test_unique_visitors_match_distinct_users() {
        let feed = memory_feed();
        let users = ["a", "b", "a", "c", "b", "a", "d"];
        for user in users {
            feed.record_event("create", user).unwrap();
        }

        let distinct: HashSet<&str> = users.into_iter().collect();
        assert_eq!(feed.unique_visitor_count().unwrap(), distinct.len());
    }

    #[test]
    fn test_most_active_user_a3_b2_c1() {
        let feed = memory_feed();
        for user in ["B", "A", "C", "A", "B", "A"] {
            feed.record_event("create", user).unwrap();
        }
        assert_eq!(feed.most_active_user().unwrap(), Some("A".to_string()));
    }

    #[test]
    fn test_full_session_flow() {
        let feed = memory_feed();
        feed.register("alice", "pw").unwrap();
        feed.register("bob", "pw").unwrap();
        assert!(matches!(
            feed.register("alice", "other"),
            Err(FeedError::DuplicateUser(_))
        ));

        let alice = feed.login("alice", "pw").unwrap();
        let bob = feed.login("bob", "pw").unwrap();

        feed.post_message(&alice, "first").unwrap();
        feed.post_message(&bob, "second").unwrap();
        feed.post_reply(2, &alice, "nice").unwrap();
        feed.post_reply(2, &bob, "thanks").unwrap();
        feed.post_reply(1, &bob, "hello").unwrap();

        let stats = feed.stats().unwrap();
        assert_eq!(stats.most_active_user.as_deref(), Some("bob"));
        assert_eq!(stats.most_replied_message.map(|m| m.id), Some(2));
        assert_eq!(stats.unique_visitors, 2);
        assert_eq!(stats.total_events, 5);
        assert_eq!(stats.total_messages, 2);
        assert_eq!(feed.events().unwrap().len(), 5);
        assert_eq!(feed.message(1).unwrap().unwrap().replies.len(), 1);
    }

    #[test]
    fn test_state_survives_reopen_on_disk() {
        let dir = TempDir::new().unwrap();
        {
            let feed = Feed::new(Rc::new(JsonFileStore::new(dir.path())));
            feed.register("alice", "pw").unwrap();
            feed.post_message("alice", "persisted").unwrap();
        }

        let feed = Feed::new(Rc::new(JsonFileStore::new(dir.path())));
        assert_eq!(feed.login("alice", "pw").unwrap(), "alice");
        assert_eq!(feed.most_active_user().unwrap().as_deref(), Some("alice"));
        match feed.list_recent(10).unwrap() {
            RecentMessages::Messages(msgs) => assert_eq!(msgs[0].body, "persisted"),
            RecentMessages::Empty => panic!("expected a message"),
        }
    }
}
