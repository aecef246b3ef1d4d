//! Capability seams between the engine and its side-effecting backends.
//!
//! The engine never talks to the network or spawns processes directly; it
//! calls these traits. Hosts provide [`HostServices`]; the engine crate
//! ships default [`Gateway`] and [`ScriptRuntime`] implementations that can
//! be swapped out for tests or alternative runtimes.

use crate::error::{DispatchError, HostError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Chat-metadata update sent after a job finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUpdate {
    pub action: String,
    /// Encrypted title text.
    pub title: String,
    #[serde(rename = "chatIcon")]
    pub chat_icon: String,
    #[serde(rename = "chatId", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

impl ChatUpdate {
    /// The `updateChat` action with the given title, status icon and chat id.
    pub fn status(
        title: impl Into<String>,
        chat_icon: impl Into<String>,
        chat_id: Option<String>,
    ) -> Self {
        Self {
            action: "updateChat".to_string(),
            title: title.into(),
            chat_icon: chat_icon.into(),
            chat_id,
        }
    }
}

/// One raw hit as returned by a search backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Page metadata blob; Open Graph tags live under `metatags`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagemap: Option<Value>,
}

impl SearchHit {
    /// The `og:image` URL from the first metatag set, when present.
    pub fn open_graph_image(&self) -> Option<String> {
        self.pagemap
            .as_ref()?
            .get("metatags")?
            .get(0)?
            .get("og:image")?
            .as_str()
            .map(str::to_string)
    }
}

/// One search result as surfaced to the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SearchItem {
    /// Project a raw hit onto the model-facing shape.
    pub fn from_hit(hit: &SearchHit) -> Self {
        Self {
            title: hit.title.clone(),
            link: hit.link.clone(),
            snippet: hit.snippet.clone(),
            image: hit.open_graph_image(),
        }
    }
}

/// Extracted text capture of a web page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageCapture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Any additional fields the capture backend returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageCapture {
    /// Cap the extracted text at `max` characters.
    pub fn truncate_content(&mut self, max: usize) {
        if let Some(content) = self.content.as_mut() {
            if let Some((index, _)) = content.char_indices().nth(max) {
                content.truncate(index);
            }
        }
    }
}

/// Services only the host can provide.
#[async_trait]
pub trait HostServices: Send + Sync {
    /// Encrypt human-readable text for storage in chat metadata.
    async fn encrypt(&self, plaintext: &str) -> Result<String, HostError>;

    /// Apply a chat-metadata update.
    async fn update_chat(&self, update: ChatUpdate) -> Result<Value, HostError>;

    /// Delegated web search, used when no search key is configured.
    async fn google_search(&self, query: &str) -> Result<Vec<SearchHit>, HostError>;

    /// Fetch a page and extract its text.
    async fn webpage_to_text(&self, url: &str) -> Result<PageCapture, HostError>;
}

/// Isolated script execution.
///
/// Implementations evaluate the source in a capability-restricted context
/// (scoped module/exports object, restricted `require`, console — never
/// ambient host access), invoke the exported `handler` with no arguments and
/// return its awaited result. A throw anywhere in that chain is a hard
/// failure.
#[async_trait]
pub trait ScriptRuntime: Send + Sync {
    async fn run(&self, source: &str) -> Result<Value, DispatchError>;
}

/// Remote endpoints the engine calls directly.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Submit a file write; returns the endpoint's HTTP status code.
    async fn write_file(&self, path: &str, content: &str) -> Result<u16, DispatchError>;

    /// Notify the callback endpoint that a job finished for `post_id`.
    async fn notify_job(&self, post_id: &Value, message: &str) -> Result<(), DispatchError>;

    /// Direct web search with resolved credentials.
    async fn search(
        &self,
        query: &str,
        key: &str,
        engine_id: &str,
    ) -> Result<Vec<SearchHit>, DispatchError>;
}

/// Host stub for detached runs: every capability reports itself unavailable.
///
/// Lets the engine run where only the gateway-backed commands make sense
/// (e.g. the stdin/stdout shim); any command needing a platform service
/// surfaces a hard failure instead of a panic.
pub struct UnavailableHost;

#[async_trait]
impl HostServices for UnavailableHost {
    async fn encrypt(&self, _plaintext: &str) -> Result<String, HostError> {
        Err(HostError::Unavailable("encrypt".into()))
    }

    async fn update_chat(&self, _update: ChatUpdate) -> Result<Value, HostError> {
        Err(HostError::Unavailable("chats".into()))
    }

    async fn google_search(&self, _query: &str) -> Result<Vec<SearchHit>, HostError> {
        Err(HostError::Unavailable("googleSearch".into()))
    }

    async fn webpage_to_text(&self, _url: &str) -> Result<PageCapture, HostError> {
        Err(HostError::Unavailable("webpageToText".into()))
    }
}
