//! Ordering policy for the continuation meta-action.
//!
//! A model may restate `metaAction(execute_and_callback)` several times
//! mid-stream; only the final statement of intent governs continuation, and
//! it must run last so its directive change is not overwritten by later
//! commands.

use courier_contract::CommandRecord;

/// Meta-action token requesting another model turn after execution.
pub const EXECUTE_AND_CALLBACK: &str = "execute_and_callback";
/// Meta-action token suppressing the automatic follow-up turn.
pub const EXECUTE_AND_WAIT: &str = "execute_and_wait";

fn is_callback_directive(command: &CommandRecord) -> bool {
    matches!(command, CommandRecord::MetaAction(arg) if arg.is_token(EXECUTE_AND_CALLBACK))
}

/// Collapse every `metaAction(execute_and_callback)` occurrence down to the
/// last one, moved to the end. All other commands keep their relative order.
pub fn hoist_callback_directive(commands: Vec<CommandRecord>) -> Vec<CommandRecord> {
    let mut kept = Vec::with_capacity(commands.len());
    let mut last_callback = None;
    for command in commands {
        if is_callback_directive(&command) {
            last_callback = Some(command);
        } else {
            kept.push(command);
        }
    }
    kept.extend(last_callback);
    kept
}
