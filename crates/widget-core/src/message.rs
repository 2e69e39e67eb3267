//! Conversation messages and the append-only transcript.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Bot,
    User,
}

/// One chat message. Held in memory only; never persisted across mounts.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user message stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
        }
    }

    /// Create a bot message stamped now.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only, lock-guarded message sequence.
///
/// Every mutation takes the write lock and appends to the live list, never
/// to a captured snapshot. That is what keeps render order equal to send
/// order when several async completions race: a stale completion can delay
/// its own append, but it can never overwrite someone else's.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: RwLock<Vec<Message>>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the transcript.
    pub async fn push(&self, message: Message) {
        self.messages.write().await.push(message);
    }

    /// Snapshot the current messages, in append order.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// Number of messages appended so far.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    /// True when no messages have been appended.
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_push_preserves_order() {
        let transcript = Transcript::new();
        transcript.push(Message::user("first")).await;
        transcript.push(Message::bot("second")).await;
        transcript.push(Message::user("third")).await;

        let messages = transcript.snapshot().await;
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn test_concurrent_appends_never_lost() {
        let transcript = Arc::new(Transcript::new());

        let mut handles = Vec::new();
        for i in 0..50 {
            let t = transcript.clone();
            handles.push(tokio::spawn(async move {
                t.push(Message::user(format!("msg-{}", i))).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(transcript.len().await, 50);
    }

    #[tokio::test]
    async fn test_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty().await);
        transcript.push(Message::bot("hello")).await;
        assert!(!transcript.is_empty().await);
    }
}
