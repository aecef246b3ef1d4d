//! Dispatch entry point.

use crate::executor::Executor;
use crate::gateway::HttpGateway;
use crate::script::NodeSandbox;
use crate::state::DispatchState;
use crate::{continuation, normalize, ordering, scanner};
use courier_contract::{
    DispatchConfig, DispatchError, Envelope, Event, Gateway, HostServices, Response, ScriptRuntime,
};
use std::sync::Arc;

/// Wires the pipeline stages over a fixed backend set.
///
/// `handle` never returns an error: hard failures are converted into error
/// envelopes at this boundary, so the caller always receives a structured
/// response.
pub struct Dispatcher {
    config: DispatchConfig,
    host: Arc<dyn HostServices>,
    scripts: Arc<dyn ScriptRuntime>,
    gateway: Arc<dyn Gateway>,
}

impl Dispatcher {
    /// Dispatcher with the default backends: the HTTP gateway and the node
    /// subprocess sandbox.
    pub fn new(
        config: DispatchConfig,
        host: Arc<dyn HostServices>,
    ) -> Result<Self, DispatchError> {
        let gateway = HttpGateway::new(&config)?;
        Ok(Self::with_backends(
            config,
            host,
            Arc::new(NodeSandbox::new()),
            Arc::new(gateway),
        ))
    }

    /// Dispatcher with fully injected backends.
    pub fn with_backends(
        config: DispatchConfig,
        host: Arc<dyn HostServices>,
        scripts: Arc<dyn ScriptRuntime>,
        gateway: Arc<dyn Gateway>,
    ) -> Self {
        Self {
            config,
            host,
            scripts,
            gateway,
        }
    }

    /// Process one event: scan the last message, execute what it contains,
    /// and fold the outcome into a response envelope.
    pub async fn handle(&self, event: &Event) -> Response {
        let Some(text) = event.last_message_content() else {
            return Response::continue_turn();
        };

        let matches = scanner::scan(text);
        if matches.is_empty() {
            return Response::continue_turn();
        }

        let mut state = DispatchState::seeded(&self.config, event);
        let commands = normalize::normalize(matches, &mut state);
        let commands = ordering::hoist_callback_directive(commands);
        if commands.is_empty() {
            return Response::envelope(Envelope::no_commands(state.directive));
        }

        tracing::debug!(commands = commands.len(), "dispatching command batch");
        let executor = Executor::new(
            &self.config,
            self.host.as_ref(),
            self.scripts.as_ref(),
            self.gateway.as_ref(),
        );
        match executor.run(&commands, &mut state).await {
            Ok(results) => Response::envelope(continuation::finalize(results, &mut state)),
            Err(error) => {
                tracing::warn!(error = %error, "command batch aborted");
                Response::envelope(continuation::fault(&error, &mut state))
            }
        }
    }
}
