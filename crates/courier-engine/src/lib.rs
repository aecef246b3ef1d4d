//! Action-extraction-and-dispatch engine.
//!
//! Pipeline: raw model text → [`scanner`] → [`normalize`] → [`ordering`] →
//! [`executor`] (with the [`lazy`] guard) → [`continuation`] → response
//! envelope. [`dispatch::Dispatcher`] wires the stages together; backends
//! are reached through the capability traits in [`courier_contract`], with
//! default implementations in [`gateway`] and [`script`].

pub use courier_contract as contract;

pub mod continuation;
pub mod dispatch;
pub mod executor;
pub mod gateway;
pub mod lazy;
pub mod normalize;
pub mod ordering;
pub mod scanner;
pub mod script;
pub mod state;

pub use dispatch::Dispatcher;
pub use state::DispatchState;
