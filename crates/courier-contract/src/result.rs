//! Result records and response envelopes.
//!
//! One `ResultRecord` is appended per executed command, in processing order;
//! the collection forms the audit trail returned to the caller. The final
//! `Response` is either the bare `CONTINUE` marker (nothing in the text
//! matched the grammar) or an envelope merged with the continuation
//! directive.

use crate::command::CommandKind;
use crate::directive::ContinuationDirective;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Success message for an all-green batch.
pub const ALL_COMPLETED: &str = "All operations completed successfully";
/// Error message for a batch with at least one failed record.
pub const SOME_FAILED: &str = "Some operations failed";
/// Error message when scanner matches normalized into no commands.
pub const NO_COMMANDS: &str = "No valid blocks or commands found";

/// Outcome of one processed command. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultRecord {
    /// Successful record with a data payload.
    pub fn success(kind: CommandKind, data: Value) -> Self {
        Self {
            kind,
            path: None,
            language: None,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed record whose payload describes the failure.
    pub fn soft_error(kind: CommandKind, data: Value) -> Self {
        Self {
            kind,
            path: None,
            language: None,
            success: false,
            data: Some(data),
            error: None,
        }
    }

    /// Record for a file write, successful iff the endpoint said OK.
    pub fn write(path: impl Into<String>, language: impl Into<String>, ok: bool) -> Self {
        Self {
            kind: CommandKind::WriteFile,
            path: Some(path.into()),
            language: Some(language.into()),
            success: ok,
            data: None,
            error: None,
        }
    }

    /// Rejection record for a write-file block containing elision comments.
    pub fn lazy_rejection(path: impl Into<String>) -> Self {
        let path = path.into();
        let error = format!(
            "Lazy comment detected in writeFile block, please provide complete source code for path: {path}"
        );
        Self {
            kind: CommandKind::WriteFile,
            path: Some(path),
            language: None,
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Body of a data envelope: a message on success, an error note on partial
/// failure, always the full result trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<ResultRecord>,
}

/// Response envelope merged with the continuation directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(rename = "_meta_actions")]
    pub meta_actions: ContinuationDirective,
}

impl Envelope {
    /// Every command in the batch succeeded.
    pub fn success(results: Vec<ResultRecord>, meta_actions: ContinuationDirective) -> Self {
        Self {
            data: Some(EnvelopeBody {
                message: Some(ALL_COMPLETED.to_string()),
                error: None,
                results,
            }),
            error: None,
            meta_actions,
        }
    }

    /// At least one command in the batch failed.
    pub fn failed(results: Vec<ResultRecord>, meta_actions: ContinuationDirective) -> Self {
        Self {
            data: Some(EnvelopeBody {
                message: None,
                error: Some(SOME_FAILED.to_string()),
                results,
            }),
            error: None,
            meta_actions,
        }
    }

    /// The scanner matched but normalization yielded no commands.
    pub fn no_commands(meta_actions: ContinuationDirective) -> Self {
        Self {
            data: None,
            error: Some(Value::String(NO_COMMANDS.to_string())),
            meta_actions,
        }
    }

    /// A hard failure aborted the batch; `payload` is the surfaced error.
    pub fn fault(payload: Value, meta_actions: ContinuationDirective) -> Self {
        Self {
            data: None,
            error: Some(payload),
            meta_actions,
        }
    }

    /// Result trail, empty for commandless and fault envelopes.
    pub fn results(&self) -> &[ResultRecord] {
        self.data.as_ref().map_or(&[], |body| &body.results)
    }
}

/// Marker kind for the continue signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContinueKind {
    #[serde(rename = "CONTINUE")]
    Continue,
}

/// The `{"type": "CONTINUE"}` marker returned when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinueSignal {
    #[serde(rename = "type")]
    pub kind: ContinueKind,
}

/// Entry-point result: continue marker or a full envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Continue(ContinueSignal),
    Envelope(Envelope),
}

impl Response {
    /// The continue marker: no grammar matched, let the chat proceed.
    pub fn continue_turn() -> Self {
        Self::Continue(ContinueSignal {
            kind: ContinueKind::Continue,
        })
    }

    pub fn envelope(envelope: Envelope) -> Self {
        Self::Envelope(envelope)
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    /// The envelope, when this response carries one.
    pub fn as_envelope(&self) -> Option<&Envelope> {
        match self {
            Self::Envelope(envelope) => Some(envelope),
            Self::Continue(_) => None,
        }
    }
}
