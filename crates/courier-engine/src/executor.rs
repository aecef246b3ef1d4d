//! Sequential command executor.
//!
//! Commands run strictly in order; later commands may depend on the side
//! effects or directive changes of earlier ones. `metaAction`,
//! `jobCompleted` and `jobFailed` are terminal: nothing after them in the
//! batch executes. Soft failures become `success: false` records and the
//! batch continues; any backend `Err` aborts the loop and propagates to the
//! dispatch boundary.

use crate::lazy;
use crate::ordering::{EXECUTE_AND_CALLBACK, EXECUTE_AND_WAIT};
use crate::state::DispatchState;
use courier_contract::config::{API_KEY_PLACEHOLDER, BASE_URL_PLACEHOLDER};
use courier_contract::{
    ChatUpdate, CommandKind, CommandRecord, DispatchConfig, DispatchError, Gateway, HostServices,
    MetaAction, ResultRecord, ScriptRuntime, SearchItem,
};
use futures::TryFutureExt;
use serde_json::{json, Value};

/// Maximum characters of extracted page text handed back to the model.
const PAGE_TEXT_LIMIT: usize = 5000;

/// Marker whose presence suppresses the appended export binding.
const EXPORT_MARKER: &str = "module.exports";

/// Substitute the secret placeholders in the block content and ensure the
/// script exports a `handler`.
///
/// When the configuration is unresolved the replacement value is the literal
/// placeholder itself, so the substitution is idempotent; when the host
/// resolved the secrets this is where they are interpolated.
pub(crate) fn prepare_script_source(content: &str, config: &DispatchConfig) -> String {
    let mut source = content
        .replace(API_KEY_PLACEHOLDER, &config.api_key)
        .replace(BASE_URL_PLACEHOLDER, &config.base_url);
    if !source.contains(EXPORT_MARKER) {
        source.push_str("\nmodule.exports = { handler };");
    }
    source
}

/// JS-style presence check for the optional post identifier.
fn has_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

/// Executes one normalized command batch against the backends.
pub struct Executor<'a> {
    config: &'a DispatchConfig,
    host: &'a dyn HostServices,
    scripts: &'a dyn ScriptRuntime,
    gateway: &'a dyn Gateway,
}

impl<'a> Executor<'a> {
    pub fn new(
        config: &'a DispatchConfig,
        host: &'a dyn HostServices,
        scripts: &'a dyn ScriptRuntime,
        gateway: &'a dyn Gateway,
    ) -> Self {
        Self {
            config,
            host,
            scripts,
            gateway,
        }
    }

    /// Run the batch, appending one result per executed command.
    pub async fn run(
        &self,
        commands: &[CommandRecord],
        state: &mut DispatchState,
    ) -> Result<Vec<ResultRecord>, DispatchError> {
        let mut results = Vec::with_capacity(commands.len());
        let mut stopped = false;

        for command in commands {
            if stopped {
                break;
            }
            match command {
                CommandRecord::WriteFile {
                    path,
                    language,
                    content,
                } => {
                    if lazy::detect_lazy_output(content) {
                        tracing::debug!(path = %path, "rejecting write-file block with elided content");
                        results.push(ResultRecord::lazy_rejection(path.clone()));
                        continue;
                    }
                    let status = self.gateway.write_file(path, content).await?;
                    results.push(ResultRecord::write(
                        path.clone(),
                        language.clone(),
                        status == 200,
                    ));
                }

                CommandRecord::Javascript { content } => {
                    let source = prepare_script_source(content, self.config);
                    let value = self.scripts.run(&source).await?;
                    let record = if value.get("error").is_none() {
                        ResultRecord::success(CommandKind::Javascript, value)
                    } else {
                        ResultRecord::soft_error(CommandKind::Javascript, value)
                    };
                    results.push(record);
                }

                CommandRecord::GoogleSearch(arg) => {
                    let query = arg.to_query();
                    let hits = if self.config.has_search_credentials() {
                        self.gateway
                            .search(
                                &query,
                                &self.config.search_api_key,
                                &self.config.search_engine_id,
                            )
                            .await?
                    } else {
                        self.host.google_search(&query).await?
                    };
                    if hits.is_empty() {
                        results.push(ResultRecord::soft_error(
                            CommandKind::GoogleSearch,
                            json!({"error": "No results found"}),
                        ));
                    } else {
                        let items: Vec<SearchItem> = hits.iter().map(SearchItem::from_hit).collect();
                        results.push(ResultRecord::success(
                            CommandKind::GoogleSearch,
                            serde_json::to_value(items).unwrap_or(Value::Null),
                        ));
                    }
                }

                CommandRecord::WebpageToText(arg) => {
                    let url = arg.to_query();
                    let mut page = self.host.webpage_to_text(&url).await?;
                    page.truncate_content(PAGE_TEXT_LIMIT);
                    if page.url.is_some() {
                        results.push(ResultRecord::success(
                            CommandKind::WebpageToText,
                            serde_json::to_value(&page).unwrap_or(Value::Null),
                        ));
                    } else {
                        results.push(ResultRecord::soft_error(
                            CommandKind::WebpageToText,
                            json!({"error": "Unable to read website"}),
                        ));
                    }
                }

                CommandRecord::ViewImage(arg) => {
                    let url = arg.to_query();
                    results.push(ResultRecord::success(
                        CommandKind::ViewImage,
                        json!([
                            {"type": "text", "text": format!("Image URL: {url}")},
                            {"type": "image_url", "image_url": {"url": url}},
                        ]),
                    ));
                }

                CommandRecord::MetaAction(arg) => {
                    stopped = true;
                    if arg.is_token(EXECUTE_AND_CALLBACK) {
                        if !state.auto_callback_disabled
                            && !state.directive.contains(MetaAction::RequestChatModel)
                        {
                            state.directive.add(MetaAction::RequestChatModel);
                        }
                    } else if arg.is_token(EXECUTE_AND_WAIT) {
                        state.directive.remove(MetaAction::RequestChatModel);
                    }
                    results.push(ResultRecord::success(CommandKind::MetaAction, arg.to_value()));
                }

                // Takes effect during normalization; nothing to execute or
                // record here.
                CommandRecord::Suggestion(_) => {}

                CommandRecord::JobCompleted(arg) | CommandRecord::JobFailed(arg) => {
                    stopped = true;
                    let kind = command.kind();
                    let chat_icon = if kind == CommandKind::JobCompleted {
                        "🟢"
                    } else {
                        "🔴"
                    };
                    let message = arg
                        .field("message")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    let post_id = arg.field("post_id").filter(|value| has_value(value)).cloned();

                    let encrypted = self.host.encrypt(&message).await?;
                    let update = ChatUpdate::status(encrypted, chat_icon, state.chat_id.clone());
                    let chat = self.host.update_chat(update).map_err(DispatchError::from);

                    match post_id {
                        Some(post_id) => {
                            futures::try_join!(chat, self.gateway.notify_job(&post_id, &message))?;
                        }
                        None => {
                            chat.await?;
                        }
                    }
                    results.push(ResultRecord::success(kind, arg.to_value()));
                }
            }
        }

        Ok(results)
    }
}
