//! Shared test fixtures for crates that depend on `courier-contract`.
//!
//! Gated behind the `test-support` cargo feature so production builds are
//! unaffected. Enable via
//! `[dev-dependencies] courier-contract = { ..., features = ["test-support"] }`.

use crate::error::{DispatchError, HostError};
use crate::event::{ChatMessage, Event, EventPayload};
use crate::host::{ChatUpdate, Gateway, HostServices, PageCapture, ScriptRuntime, SearchHit};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// Event with a single message.
pub fn message_event(content: &str) -> Event {
    conversation_event(content, 1)
}

/// Event whose conversation has `message_count` messages, the last carrying
/// `content`.
pub fn conversation_event(content: &str, message_count: usize) -> Event {
    let mut messages: Vec<ChatMessage> = (1..message_count)
        .map(|index| ChatMessage::new(format!("earlier message {index}")))
        .collect();
    messages.push(ChatMessage::new(content));
    Event {
        payload: EventPayload {
            messages,
            chat_id: Some("chat-test".to_string()),
        },
    }
}

/// Scriptable [`HostServices`] double with call recorders.
#[derive(Default)]
pub struct MockHost {
    pub search_hits: Vec<SearchHit>,
    pub page: PageCapture,
    pub fail_encrypt: bool,
    pub encrypted: Mutex<Vec<String>>,
    pub chat_updates: Mutex<Vec<ChatUpdate>>,
    pub search_queries: Mutex<Vec<String>>,
    pub page_requests: Mutex<Vec<String>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.search_hits = hits;
        self
    }

    pub fn with_page(mut self, page: PageCapture) -> Self {
        self.page = page;
        self
    }

    pub fn failing_encrypt(mut self) -> Self {
        self.fail_encrypt = true;
        self
    }
}

#[async_trait]
impl HostServices for MockHost {
    async fn encrypt(&self, plaintext: &str) -> Result<String, HostError> {
        if self.fail_encrypt {
            return Err(HostError::capability("encrypt", "key service offline"));
        }
        self.encrypted.lock().unwrap().push(plaintext.to_string());
        Ok(format!("enc({plaintext})"))
    }

    async fn update_chat(&self, update: ChatUpdate) -> Result<Value, HostError> {
        self.chat_updates.lock().unwrap().push(update);
        Ok(serde_json::json!({"ok": true}))
    }

    async fn google_search(&self, query: &str) -> Result<Vec<SearchHit>, HostError> {
        self.search_queries.lock().unwrap().push(query.to_string());
        Ok(self.search_hits.clone())
    }

    async fn webpage_to_text(&self, url: &str) -> Result<PageCapture, HostError> {
        self.page_requests.lock().unwrap().push(url.to_string());
        Ok(self.page.clone())
    }
}

/// Recording [`Gateway`] double.
pub struct RecordingGateway {
    pub write_status: u16,
    pub fail_writes: bool,
    pub search_hits: Vec<SearchHit>,
    pub writes: Mutex<Vec<(String, String)>>,
    pub notifications: Mutex<Vec<(Value, String)>>,
    pub searches: Mutex<Vec<(String, String, String)>>,
}

impl Default for RecordingGateway {
    fn default() -> Self {
        Self {
            write_status: 200,
            fail_writes: false,
            search_hits: Vec::new(),
            writes: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_write_status(mut self, status: u16) -> Self {
        self.write_status = status;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn with_search_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.search_hits = hits;
        self
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn write_file(&self, path: &str, content: &str) -> Result<u16, DispatchError> {
        if self.fail_writes {
            return Err(DispatchError::transport("connection reset by peer"));
        }
        self.writes
            .lock()
            .unwrap()
            .push((path.to_string(), content.to_string()));
        Ok(self.write_status)
    }

    async fn notify_job(&self, post_id: &Value, message: &str) -> Result<(), DispatchError> {
        self.notifications
            .lock()
            .unwrap()
            .push((post_id.clone(), message.to_string()));
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        key: &str,
        engine_id: &str,
    ) -> Result<Vec<SearchHit>, DispatchError> {
        self.searches.lock().unwrap().push((
            query.to_string(),
            key.to_string(),
            engine_id.to_string(),
        ));
        Ok(self.search_hits.clone())
    }
}

/// [`ScriptRuntime`] double returning a canned value.
pub struct CannedScripts {
    pub value: Value,
    pub fail: Option<String>,
    pub sources: Mutex<Vec<String>>,
}

impl CannedScripts {
    pub fn returning(value: Value) -> Self {
        Self {
            value,
            fail: None,
            sources: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            value: Value::Null,
            fail: Some(message.into()),
            sources: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ScriptRuntime for CannedScripts {
    async fn run(&self, source: &str) -> Result<Value, DispatchError> {
        self.sources.lock().unwrap().push(source.to_string());
        match &self.fail {
            Some(message) => Err(DispatchError::Script(message.clone())),
            None => Ok(self.value.clone()),
        }
    }
}
