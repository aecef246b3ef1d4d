//! Input envelope delivered by the host.
//!
//! The engine treats the event as read-only: only the content of the last
//! message is scanned for command blocks, and the chat id is threaded into
//! chat-metadata updates.

use serde::{Deserialize, Serialize};

/// One conversation message as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author role, when the host supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Message text.
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    /// Message with content only.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            role: None,
            content: content.into(),
        }
    }
}

/// Event payload: the ordered conversation plus contextual identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, rename = "chatId", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

/// Input event envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub payload: EventPayload,
}

impl Event {
    /// Content of the most recent message, if the conversation is non-empty.
    pub fn last_message_content(&self) -> Option<&str> {
        self.payload
            .messages
            .last()
            .map(|message| message.content.as_str())
    }

    /// Number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.payload.messages.len()
    }
}
