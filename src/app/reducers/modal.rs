//! Confirmation sub-reducer: parks a destructive action until y/n.

use std::time::Instant;

use crate::app::action::Action;
use crate::app::confirm::ConfirmRequest;
use crate::app::effect::Effect;
use crate::app::reducer::reduce;
use crate::app::state::AppState;

/// Asks before running `on_confirm`, unless confirmation is turned off in
/// which case the action runs right away.
pub fn request_confirmation(
    state: &mut AppState,
    prompt: String,
    on_confirm: Action,
    now: Instant,
) -> Vec<Effect> {
    if state.settings().confirm_destructive {
        state.confirm = Some(ConfirmRequest::new(prompt, on_confirm));
        vec![]
    } else {
        reduce(state, on_confirm, now)
    }
}

/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_modal(state: &mut AppState, action: &Action, now: Instant) -> Option<Vec<Effect>> {
    match action {
        Action::ConfirmAccept => {
            let request = state.confirm.take()?;
            Some(reduce(state, request.on_confirm, now))
        }
        Action::ConfirmDecline => {
            if state.confirm.take().is_some() {
                state.messages.set_success_at("Cancelled", now);
            }
            Some(vec![])
        }
        _ => None,
    }
}
