//! Aggregate outcome and continuation handling.

use crate::state::DispatchState;
use courier_contract::{DispatchError, Envelope, MetaAction, ResultRecord};

/// Fold the result trail into the final envelope.
///
/// On any failed record, automatic re-invocation (unless disabled) is forced
/// to exactly one follow-up turn by resetting the directive.
pub fn finalize(results: Vec<ResultRecord>, state: &mut DispatchState) -> Envelope {
    let all_successful = results.iter().all(|record| record.success);
    if all_successful {
        Envelope::success(results, state.directive.clone())
    } else {
        if !state.auto_callback_disabled {
            state.directive.reset_to(MetaAction::RequestChatModel);
        }
        Envelope::failed(results, state.directive.clone())
    }
}

/// Convert a hard failure into the error envelope, forcing one follow-up
/// turn unless auto-callback was already disabled.
pub fn fault(error: &DispatchError, state: &mut DispatchState) -> Envelope {
    if !state.auto_callback_disabled {
        state.directive.reset_to(MetaAction::RequestChatModel);
    }
    Envelope::fault(error.payload(), state.directive.clone())
}
