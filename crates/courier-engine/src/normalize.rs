//! Raw scanner matches → typed command records.

use crate::scanner::BlockMatch;
use crate::state::DispatchState;
use courier_contract::{CommandArg, CommandKind, CommandRecord, MetaAction};

/// Normalize a scanned match sequence, preserving order.
///
/// Matches that yield no identifiable command are dropped silently. The
/// `suggestion` command takes effect here, during normalization: it removes
/// any pending auto re-invoke flag and latches the disabled state, so the
/// effect applies even when a later stage stops before reaching it.
pub fn normalize(matches: Vec<BlockMatch>, state: &mut DispatchState) -> Vec<CommandRecord> {
    matches
        .into_iter()
        .filter_map(|matched| normalize_match(matched, state))
        .collect()
}

fn normalize_match(matched: BlockMatch, state: &mut DispatchState) -> Option<CommandRecord> {
    match matched {
        BlockMatch::WriteFile {
            path,
            language,
            content,
        } => {
            let path = path.trim();
            let language = language.trim();
            let content = content.trim();
            if path.is_empty() || language.is_empty() || content.is_empty() {
                return None;
            }
            Some(CommandRecord::WriteFile {
                path: path.to_string(),
                language: language.to_string(),
                content: content.to_string(),
            })
        }
        BlockMatch::Script { content } => {
            let content = content.trim();
            if content.is_empty() {
                return None;
            }
            Some(CommandRecord::Javascript {
                content: content.to_string(),
            })
        }
        BlockMatch::Named { name, arg } => {
            let kind = CommandKind::from_token(&name)?;
            if kind == CommandKind::Suggestion {
                state.directive.remove(MetaAction::RequestChatModel);
                state.auto_callback_disabled = true;
            }
            CommandRecord::from_named(kind, CommandArg::parse(&arg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner;
    use courier_contract::testing::message_event;
    use courier_contract::DispatchConfig;
    use serde_json::json;

    fn fresh_state() -> DispatchState {
        DispatchState::seeded(&DispatchConfig::default(), &message_event("x"))
    }

    #[test]
    fn write_file_fields_are_trimmed() {
        let matches = vec![BlockMatch::WriteFile {
            path: "a.js".into(),
            language: "javascript".into(),
            content: "console.log(1)\n".into(),
        }];
        let commands = normalize(matches, &mut fresh_state());
        assert_eq!(
            commands,
            vec![CommandRecord::WriteFile {
                path: "a.js".into(),
                language: "javascript".into(),
                content: "console.log(1)".into(),
            }]
        );
    }

    #[test]
    fn empty_write_file_content_drops_silently() {
        let matches = vec![BlockMatch::WriteFile {
            path: "a.js".into(),
            language: "javascript".into(),
            content: "   ".into(),
        }];
        assert!(normalize(matches, &mut fresh_state()).is_empty());
    }

    #[test]
    fn empty_script_drops_silently() {
        let matches = vec![BlockMatch::Script { content: " ".into() }];
        assert!(normalize(matches, &mut fresh_state()).is_empty());
    }

    #[test]
    fn named_argument_is_parsed_once() {
        let matches = vec![BlockMatch::Named {
            name: "jobCompleted".into(),
            arg: r#"{"post_id": 9, "message": "done"}"#.into(),
        }];
        let commands = normalize(matches, &mut fresh_state());
        assert_eq!(
            commands,
            vec![CommandRecord::JobCompleted(CommandArg::Json(
                json!({"post_id": 9, "message": "done"})
            ))]
        );
    }

    #[test]
    fn quoted_argument_loses_one_quote_layer() {
        let matches = vec![BlockMatch::Named {
            name: "googleSearch".into(),
            arg: "\"weather today\"".into(),
        }];
        let commands = normalize(matches, &mut fresh_state());
        assert_eq!(
            commands,
            vec![CommandRecord::GoogleSearch(CommandArg::Text(
                "weather today".into()
            ))]
        );
    }

    #[test]
    fn suggestion_disables_auto_callback_and_clears_pending_flag() {
        let mut state = fresh_state();
        assert!(state.directive.contains(MetaAction::RequestChatModel));

        let matches = vec![BlockMatch::Named {
            name: "suggestion".into(),
            arg: "try restarting".into(),
        }];
        let commands = normalize(matches, &mut state);

        assert_eq!(commands.len(), 1);
        assert!(state.auto_callback_disabled);
        assert!(!state.directive.contains(MetaAction::RequestChatModel));
    }

    #[test]
    fn renormalizing_the_same_raw_text_is_idempotent() {
        let text = r#"/googleSearch("weather today") metaAction(execute_and_callback)"#;
        let first = normalize(scanner::scan(text), &mut fresh_state());
        let second = normalize(scanner::scan(text), &mut fresh_state());
        assert_eq!(first, second);
    }
}
