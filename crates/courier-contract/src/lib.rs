//! Data model and capability contracts for the courier dispatch engine.
//!
//! The engine crate depends on these types only; host integrations implement
//! the capability traits in [`host`] and hand them to the dispatcher.

pub mod command;
pub mod config;
pub mod directive;
pub mod error;
pub mod event;
pub mod host;
pub mod result;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use command::{CommandArg, CommandKind, CommandRecord};
pub use config::DispatchConfig;
pub use directive::{ContinuationDirective, MetaAction};
pub use error::{DispatchError, HostError};
pub use event::{ChatMessage, Event, EventPayload};
pub use host::{
    ChatUpdate, Gateway, HostServices, PageCapture, ScriptRuntime, SearchHit, SearchItem,
    UnavailableHost,
};
pub use result::{
    Envelope, EnvelopeBody, Response, ResultRecord, ALL_COMPLETED, NO_COMMANDS, SOME_FAILED,
};
