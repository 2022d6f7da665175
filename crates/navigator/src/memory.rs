use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::message::Message;

/// In-memory store of conversation threads keyed by thread id.
///
/// A fresh store is created with each agent, so replacing the agent also
/// starts every thread over.
#[derive(Debug, Default)]
pub struct ConversationMemory {
    threads: Mutex<HashMap<String, Vec<Message>>>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the history for a thread, empty if the thread has no turns yet
    pub fn get(&self, thread_id: &str) -> Vec<Message> {
        self.threads
            .lock()
            .unwrap()
            .get(thread_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Append one message to a thread
    pub fn push(&self, thread_id: &str, message: Message) {
        self.threads
            .lock()
            .unwrap()
            .entry(thread_id.to_string())
            .or_default()
            .push(message);
    }

    /// Append a slice of messages to a thread
    pub fn extend(&self, thread_id: &str, messages: &[Message]) {
        self.threads
            .lock()
            .unwrap()
            .entry(thread_id.to_string())
            .or_default()
            .extend_from_slice(messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_thread_is_empty() {
        let memory = ConversationMemory::new();
        assert!(memory.get("trip-planning").is_empty());
    }

    #[test]
    fn test_push_and_get() {
        let memory = ConversationMemory::new();
        memory.push("trip-planning", Message::user().with_text("Hi"));
        memory.push("trip-planning", Message::assistant().with_text("Hello!"));

        let history = memory.get("trip-planning");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content[0].as_text(), Some("Hi"));
        assert_eq!(history[1].content[0].as_text(), Some("Hello!"));
    }

    #[test]
    fn test_extend_preserves_order() {
        let memory = ConversationMemory::new();
        memory.push("trip-planning", Message::user().with_text("first"));
        memory.extend(
            "trip-planning",
            &[
                Message::assistant().with_text("second"),
                Message::user().with_text("third"),
            ],
        );

        let history = memory.get("trip-planning");
        let texts: Vec<_> = history
            .iter()
            .map(|m| m.content[0].as_text().unwrap())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_threads_are_isolated() {
        let memory = ConversationMemory::new();
        memory.push("trip-planning", Message::user().with_text("Hi"));

        assert_eq!(memory.get("trip-planning").len(), 1);
        assert!(memory.get("somewhere-else").is_empty());
    }
}
