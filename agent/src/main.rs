//! Host shim: reads one event as JSON on stdin, dispatches it, prints the
//! response envelope as JSON on stdout.

use clap::Parser;
use courier_contract::{config, DispatchConfig, Event, UnavailableHost};
use courier_engine::script::NodeSandbox;
use courier_engine::Dispatcher;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "courier-agent")]
struct Args {
    #[arg(long, env = "COURIER_BASE_URL", default_value = config::BASE_URL_PLACEHOLDER)]
    base_url: String,

    #[arg(long, env = "COURIER_API_KEY", default_value = config::API_KEY_PLACEHOLDER)]
    api_key: String,

    #[arg(long, env = "COURIER_SEARCH_API_KEY", default_value = config::SEARCH_KEY_PLACEHOLDER)]
    search_api_key: String,

    #[arg(long, env = "COURIER_SEARCH_ENGINE_ID", default_value = config::SEARCH_ENGINE_PLACEHOLDER)]
    search_engine_id: String,

    /// Script interpreter used for inline javascript blocks.
    #[arg(long, env = "COURIER_NODE_BIN", default_value = "node")]
    node_bin: String,

    /// Conversation length beyond which auto re-invocation is disabled.
    #[arg(long, env = "COURIER_SELF_INVOKE_BUDGET", default_value_t = config::DEFAULT_SELF_INVOKE_BUDGET)]
    self_invoke_budget: usize,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = DispatchConfig {
        base_url: args.base_url,
        api_key: args.api_key,
        search_api_key: args.search_api_key,
        search_engine_id: args.search_engine_id,
        self_invoke_budget: args.self_invoke_budget,
    };

    let gateway = courier_engine::gateway::HttpGateway::new(&config)
        .expect("failed to build HTTP gateway");
    let dispatcher = Dispatcher::with_backends(
        config,
        Arc::new(UnavailableHost),
        Arc::new(NodeSandbox::with_program(args.node_bin)),
        Arc::new(gateway),
    );

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .expect("failed to read event from stdin");
    let event: Event = serde_json::from_str(&input).expect("event is not valid JSON");

    let response = dispatcher.handle(&event).await;
    println!(
        "{}",
        serde_json::to_string(&response).expect("response serializes")
    );
}
