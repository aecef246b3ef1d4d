//! Continuation directive: the mutable flag list deciding whether the host
//! should request another model turn after this dispatch.

use serde::{Deserialize, Serialize};

/// Symbolic continuation flags merged into the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetaAction {
    /// Request one more model turn after this dispatch.
    RequestChatModel,
    /// The conversation exceeded the self-invoke budget; automatic
    /// re-invocation is disabled downstream.
    RequestChatModelExceeded,
}

/// Ordered list of [`MetaAction`] flags, scoped to one invocation.
///
/// Seeded by the caller from the conversation length, mutated by
/// `suggestion` and `metaAction` commands while the batch executes, and
/// returned merged into the response as `_meta_actions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationDirective(Vec<MetaAction>);

impl ContinuationDirective {
    /// Empty directive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directive pre-seeded for a new dispatch: the exceeded flag when the
    /// conversation is over budget, the default auto-continue flag otherwise.
    pub fn seeded(exceeded: bool) -> Self {
        if exceeded {
            Self(vec![MetaAction::RequestChatModelExceeded])
        } else {
            Self(vec![MetaAction::RequestChatModel])
        }
    }

    pub fn contains(&self, action: MetaAction) -> bool {
        self.0.contains(&action)
    }

    /// Append a flag (duplicates are the caller's concern, as with the wire
    /// format this mirrors).
    pub fn add(&mut self, action: MetaAction) {
        self.0.push(action);
    }

    /// Remove every occurrence of a flag.
    pub fn remove(&mut self, action: MetaAction) {
        self.0.retain(|existing| *existing != action);
    }

    /// Replace the whole directive with exactly one flag.
    pub fn reset_to(&mut self, action: MetaAction) {
        self.0 = vec![action];
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[MetaAction] {
        &self.0
    }
}
