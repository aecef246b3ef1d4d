//! Dispatch configuration.
//!
//! Secret-bearing values default to their `{{secrets.*}}` placeholder form;
//! the host resolves them before or at call time and the engine treats them
//! as opaque strings either way. An unresolved placeholder is detectable and
//! switches the engine onto delegated (host-provided) code paths.

use serde::{Deserialize, Serialize};

/// Unresolved placeholder for the callback base URL.
pub const BASE_URL_PLACEHOLDER: &str = "{{secrets.wpUrl}}";
/// Unresolved placeholder for the API-key header value.
pub const API_KEY_PLACEHOLDER: &str = "{{secrets.wpapiKey}}";
/// Unresolved placeholder for the web-search API key.
pub const SEARCH_KEY_PLACEHOLDER: &str = "{{secrets.googlesearch_api_key}}";
/// Unresolved placeholder for the web-search engine id.
pub const SEARCH_ENGINE_PLACEHOLDER: &str = "{{secrets.googlesearch_engine_id}}";

/// Conversation length beyond which auto re-invocation is disabled.
pub const DEFAULT_SELF_INVOKE_BUDGET: usize = 50;

/// Engine configuration, resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Base URL of the callback service (file writes, job notifications).
    pub base_url: String,
    /// Value sent as the `WP-API-KEY` header on callback-service requests.
    pub api_key: String,
    /// Web-search API key; placeholder when the host has none configured.
    pub search_api_key: String,
    /// Web-search engine id.
    pub search_engine_id: String,
    /// Message-count threshold for the exceeded continuation flag.
    pub self_invoke_budget: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL_PLACEHOLDER.to_string(),
            api_key: API_KEY_PLACEHOLDER.to_string(),
            search_api_key: SEARCH_KEY_PLACEHOLDER.to_string(),
            search_engine_id: SEARCH_ENGINE_PLACEHOLDER.to_string(),
            self_invoke_budget: DEFAULT_SELF_INVOKE_BUDGET,
        }
    }
}

impl DispatchConfig {
    /// True when the search key was actually resolved by the host, i.e. the
    /// configured value no longer contains the placeholder marker.
    pub fn has_search_credentials(&self) -> bool {
        !self.search_api_key.contains("secrets.googlesearch_api_key")
    }

    /// True when the conversation is over the self-invoke budget.
    pub fn exceeds_self_invoke_budget(&self, message_count: usize) -> bool {
        message_count > self.self_invoke_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unresolved() {
        let config = DispatchConfig::default();
        assert!(!config.has_search_credentials());
        assert_eq!(config.base_url, BASE_URL_PLACEHOLDER);
        assert_eq!(config.self_invoke_budget, 50);
    }

    #[test]
    fn resolved_search_key_enables_direct_search() {
        let config = DispatchConfig {
            search_api_key: "AIza-real-key".into(),
            ..DispatchConfig::default()
        };
        assert!(config.has_search_credentials());
    }

    #[test]
    fn budget_boundary_is_exclusive() {
        let config = DispatchConfig::default();
        assert!(!config.exceeds_self_invoke_budget(50));
        assert!(config.exceeds_self_invoke_budget(51));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: DispatchConfig =
            serde_json::from_str(r#"{"base_url": "https://example.org"}"#).unwrap();
        assert_eq!(config.base_url, "https://example.org");
        assert_eq!(config.api_key, API_KEY_PLACEHOLDER);
    }
}
