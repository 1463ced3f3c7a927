//! Plain-text rendering of messages and statistics.

use chirp_core::models::{FeedStats, Message, RecentMessages};

/// Shown when the store has no messages.
pub const EMPTY_FEED: &str = "No messages available.";

/// `[ID: n] author - timestamp: body`, followed by indented replies.
pub fn render_message(message: &Message) -> String {
    let mut out = format!(
        "[ID: {}] {} - {}: {}\n",
        message.id, message.author, message.timestamp, message.body
    );
    if !message.replies.is_empty() {
        out.push_str("Replies:\n");
        for reply in &message.replies {
            out.push_str(&format!(
                "\t{} - {}: {}\n",
                reply.author, reply.timestamp, reply.body
            ));
        }
    }
    out
}

/// Every message separated by a blank line, or [`EMPTY_FEED`].
pub fn render_recent(recent: &RecentMessages) -> String {
    match recent {
        RecentMessages::Empty => format!("{EMPTY_FEED}\n"),
        RecentMessages::Messages(messages) => messages
            .iter()
            .map(|m| format!("{}\n", render_message(m)))
            .collect(),
    }
}

pub fn render_stats(stats: &FeedStats) -> String {
    let most_active = stats.most_active_user.as_deref().unwrap_or("-");
    let most_replied = match &stats.most_replied_message {
        Some(m) => format!(
            "#{} by {} ({} {})",
            m.id,
            m.author,
            m.reply_count(),
            if m.reply_count() == 1 { "reply" } else { "replies" }
        ),
        None => "-".to_string(),
    };

    format!(
        "Statistics\n\
         \x20 Most active user:     {most_active}\n\
         \x20 Most replied message: {most_replied}\n\
         \x20 Unique visitors:      {}\n\
         \x20 Events recorded:      {}\n\
         \x20 Messages posted:      {}\n",
        stats.unique_visitors, stats.total_events, stats.total_messages
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_core::models::Reply;

    fn message(replies: Vec<Reply>) -> Message {
        Message {
            id: 7,
            author: "alice".into(),
            timestamp: "2024-01-15 10:00:00".into(),
            body: "hello world".into(),
            replies,
        }
    }

    #[test]
    fn test_render_message_without_replies() {
        assert_eq!(
            render_message(&message(Vec::new())),
            "[ID: 7] alice - 2024-01-15 10:00:00: hello world\n"
        );
    }

    #[test]
    fn test_render_message_with_replies() {
        let text = render_message(&message(vec![Reply {
            author: "bob".into(),
            timestamp: "2024-01-15 10:01:00".into(),
            body: "hi!".into(),
        }]));
        assert_eq!(
            text,
            "[ID: 7] alice - 2024-01-15 10:00:00: hello world\n\
             Replies:\n\
             \tbob - 2024-01-15 10:01:00: hi!\n"
        );
    }

    #[test]
    fn test_render_recent_empty() {
        assert_eq!(render_recent(&RecentMessages::Empty), "No messages available.\n");
    }

    #[test]
    fn test_render_recent_separates_messages() {
        let recent = RecentMessages::Messages(vec![message(Vec::new()), message(Vec::new())]);
        let text = render_recent(&recent);
        assert_eq!(text.matches("[ID: 7]").count(), 2);
        assert!(text.ends_with("hello world\n\n"));
    }

    #[test]
    fn test_render_stats_empty() {
        let text = render_stats(&FeedStats::default());
        assert!(text.contains("Most active user:     -"));
        assert!(text.contains("Most replied message: -"));
        assert!(text.contains("Unique visitors:      0"));
    }

    #[test]
    fn test_render_stats_populated() {
        let stats = FeedStats {
            most_active_user: Some("bob".into()),
            most_replied_message: Some(message(vec![Reply {
                author: "carol".into(),
                timestamp: String::new(),
                body: "x".into(),
            }])),
            unique_visitors: 3,
            total_events: 9,
            total_messages: 4,
        };
        let text = render_stats(&stats);
        assert!(text.starts_with("Statistics\n  Most active user:     bob\n"));
        assert!(text.contains("#7 by alice (1 reply)"));
        assert!(text.contains("Events recorded:      9"));
        assert!(text.contains("Messages posted:      4"));
    }
}
