//! Typed command records produced by the normalizer.
//!
//! A `CommandRecord` is created once from a scanner match and consumed once
//! by the executor. The argument of a named command is a [`CommandArg`]: the
//! result of a single explicit JSON parse attempt, kept as parsed JSON on
//! success and as the trimmed raw text otherwise.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command kind token. Serialized names are the wire tokens recognized in
/// model output and echoed back in result records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    WriteFile,
    Javascript,
    GoogleSearch,
    WebpageToText,
    ViewImage,
    MetaAction,
    Suggestion,
    JobCompleted,
    JobFailed,
}

impl CommandKind {
    /// Map a command-name token to its kind. Unknown names yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "googleSearch" => Some(Self::GoogleSearch),
            "webpageToText" => Some(Self::WebpageToText),
            "viewImage" => Some(Self::ViewImage),
            "metaAction" => Some(Self::MetaAction),
            "suggestion" => Some(Self::Suggestion),
            "jobCompleted" => Some(Self::JobCompleted),
            "jobFailed" => Some(Self::JobFailed),
            _ => None,
        }
    }
}

/// Argument of a named command: parsed JSON when the raw text is valid JSON
/// after one layer of quote stripping, the trimmed raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandArg {
    Json(Value),
    Text(String),
}

impl CommandArg {
    /// Parse a raw argument capture.
    ///
    /// Strips exactly one pair of surrounding double quotes, then attempts a
    /// JSON parse of the unquoted text. Parse failure is not an error: the
    /// trimmed text is kept verbatim. Deterministic — the same raw text
    /// always produces the same argument.
    pub fn parse(raw: &str) -> Self {
        let unquoted = raw
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(raw);
        match serde_json::from_str::<Value>(unquoted) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(unquoted.trim().to_string()),
        }
    }

    /// True when the argument is exactly the given text token.
    pub fn is_token(&self, token: &str) -> bool {
        match self {
            Self::Text(text) => text == token,
            Self::Json(Value::String(text)) => text == token,
            Self::Json(_) => false,
        }
    }

    /// The argument rendered as a query/URL string.
    pub fn to_query(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Json(Value::String(text)) => text.clone(),
            Self::Json(value) => value.to_string(),
        }
    }

    /// Field lookup for object-shaped arguments.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Json(value) => value.get(key),
            Self::Text(_) => None,
        }
    }

    /// The argument as a JSON value (text becomes a JSON string).
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// One normalized command, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandRecord {
    WriteFile {
        path: String,
        language: String,
        content: String,
    },
    Javascript {
        content: String,
    },
    GoogleSearch(CommandArg),
    WebpageToText(CommandArg),
    ViewImage(CommandArg),
    MetaAction(CommandArg),
    Suggestion(CommandArg),
    JobCompleted(CommandArg),
    JobFailed(CommandArg),
}

impl CommandRecord {
    /// Kind tag of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::WriteFile { .. } => CommandKind::WriteFile,
            Self::Javascript { .. } => CommandKind::Javascript,
            Self::GoogleSearch(_) => CommandKind::GoogleSearch,
            Self::WebpageToText(_) => CommandKind::WebpageToText,
            Self::ViewImage(_) => CommandKind::ViewImage,
            Self::MetaAction(_) => CommandKind::MetaAction,
            Self::Suggestion(_) => CommandKind::Suggestion,
            Self::JobCompleted(_) => CommandKind::JobCompleted,
            Self::JobFailed(_) => CommandKind::JobFailed,
        }
    }

    /// Build an argument-carrying command for a named-command kind.
    ///
    /// Returns `None` for kinds that do not take a single argument
    /// (`WriteFile`, `Javascript`).
    pub fn from_named(kind: CommandKind, arg: CommandArg) -> Option<Self> {
        match kind {
            CommandKind::GoogleSearch => Some(Self::GoogleSearch(arg)),
            CommandKind::WebpageToText => Some(Self::WebpageToText(arg)),
            CommandKind::ViewImage => Some(Self::ViewImage(arg)),
            CommandKind::MetaAction => Some(Self::MetaAction(arg)),
            CommandKind::Suggestion => Some(Self::Suggestion(arg)),
            CommandKind::JobCompleted => Some(Self::JobCompleted(arg)),
            CommandKind::JobFailed => Some(Self::JobFailed(arg)),
            CommandKind::WriteFile | CommandKind::Javascript => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_tokens_serialize_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&CommandKind::WriteFile).unwrap(),
            "\"writeFile\""
        );
        assert_eq!(
            serde_json::to_string(&CommandKind::GoogleSearch).unwrap(),
            "\"googleSearch\""
        );
        assert_eq!(
            serde_json::to_string(&CommandKind::WebpageToText).unwrap(),
            "\"webpageToText\""
        );
        assert_eq!(
            serde_json::to_string(&CommandKind::JobCompleted).unwrap(),
            "\"jobCompleted\""
        );
    }

    #[test]
    fn from_token_is_case_sensitive_and_closed() {
        assert_eq!(
            CommandKind::from_token("googleSearch"),
            Some(CommandKind::GoogleSearch)
        );
        assert_eq!(CommandKind::from_token("googlesearch"), None);
        assert_eq!(CommandKind::from_token("writeFile"), None);
        assert_eq!(CommandKind::from_token("shutdown"), None);
    }

    #[test]
    fn arg_parse_keeps_plain_text() {
        assert_eq!(
            CommandArg::parse("weather today"),
            CommandArg::Text("weather today".into())
        );
    }

    #[test]
    fn arg_parse_strips_one_quote_layer() {
        assert_eq!(
            CommandArg::parse("\"weather today\""),
            CommandArg::Text("weather today".into())
        );
    }

    #[test]
    fn arg_parse_accepts_json_objects() {
        assert_eq!(
            CommandArg::parse(r#"{"post_id": 7, "message": "done"}"#),
            CommandArg::Json(json!({"post_id": 7, "message": "done"}))
        );
    }

    #[test]
    fn arg_parse_accepts_json_scalars() {
        assert_eq!(CommandArg::parse("42"), CommandArg::Json(json!(42)));
        assert_eq!(CommandArg::parse("true"), CommandArg::Json(json!(true)));
    }

    #[test]
    fn arg_parse_trims_unparseable_text() {
        assert_eq!(
            CommandArg::parse("  https://example.com  "),
            CommandArg::Text("https://example.com".into())
        );
    }

    #[test]
    fn arg_parse_is_deterministic() {
        let raw = r#""execute_and_callback""#;
        assert_eq!(CommandArg::parse(raw), CommandArg::parse(raw));
    }

    #[test]
    fn is_token_matches_text_and_json_strings() {
        assert!(CommandArg::Text("execute_and_wait".into()).is_token("execute_and_wait"));
        assert!(CommandArg::Json(json!("execute_and_wait")).is_token("execute_and_wait"));
        assert!(!CommandArg::Json(json!({"a": 1})).is_token("execute_and_wait"));
        assert!(!CommandArg::Text("other".into()).is_token("execute_and_wait"));
    }

    #[test]
    fn to_query_unwraps_strings() {
        assert_eq!(CommandArg::parse("plain query").to_query(), "plain query");
        assert_eq!(CommandArg::Json(json!("quoted")).to_query(), "quoted");
        assert_eq!(CommandArg::Json(json!(5)).to_query(), "5");
    }

    #[test]
    fn field_reads_object_arguments_only() {
        let arg = CommandArg::parse(r#"{"post_id": 3}"#);
        assert_eq!(arg.field("post_id"), Some(&json!(3)));
        assert!(arg.field("missing").is_none());
        assert!(CommandArg::Text("x".into()).field("post_id").is_none());
    }

    #[test]
    fn from_named_rejects_block_kinds() {
        let arg = CommandArg::Text("x".into());
        assert!(CommandRecord::from_named(CommandKind::WriteFile, arg.clone()).is_none());
        assert!(CommandRecord::from_named(CommandKind::Javascript, arg.clone()).is_none());
        assert_eq!(
            CommandRecord::from_named(CommandKind::ViewImage, arg).map(|c| c.kind()),
            Some(CommandKind::ViewImage)
        );
    }
}
