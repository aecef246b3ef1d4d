//! Mutable state scoped to one dispatch invocation.

use courier_contract::{ContinuationDirective, DispatchConfig, Event};

/// Per-invocation state threaded through normalization and execution.
///
/// Created at the start of a dispatch call, discarded at the end; there is
/// no cross-invocation shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchState {
    /// Continuation flags merged into the response envelope.
    pub directive: ContinuationDirective,
    /// Latched by the exceeded budget or a `suggestion` command; once set,
    /// nothing re-enables automatic re-invocation.
    pub auto_callback_disabled: bool,
    /// Chat id from the event, for chat-metadata updates.
    pub chat_id: Option<String>,
}

impl DispatchState {
    /// Seed state for an incoming event: over-budget conversations get the
    /// exceeded flag and lose automatic re-invocation.
    pub fn seeded(config: &DispatchConfig, event: &Event) -> Self {
        let exceeded = config.exceeds_self_invoke_budget(event.message_count());
        Self {
            directive: ContinuationDirective::seeded(exceeded),
            auto_callback_disabled: exceeded,
            chat_id: event.payload.chat_id.clone(),
        }
    }
}
