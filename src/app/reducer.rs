//! Pure reducer: state transitions only, no I/O.
//!
//! # Purity Rules
//!
//! The reducer MUST NOT:
//! - Call `Instant::now()` (time is passed as `now` parameter)
//! - Perform I/O operations
//! - Spawn async tasks
//!
//! This keeps the reducer testable without mocking time or I/O.

use std::time::Instant;

use crate::app::action::Action;
use crate::app::effect::Effect;
use crate::app::reducers::{
    reduce_connection, reduce_editing, reduce_modal, reduce_navigation, reduce_query,
};
use crate::app::state::AppState;

pub fn reduce(state: &mut AppState, action: Action, now: Instant) -> Vec<Effect> {
    // Mark dirty for all state-changing actions (except None and Render)
    let should_mark_dirty = !matches!(action, Action::None | Action::Render);

    let effects = reduce_inner(state, action, now);

    if should_mark_dirty {
        state.mark_dirty();
    }

    effects
}

fn reduce_inner(state: &mut AppState, action: Action, now: Instant) -> Vec<Effect> {
    if let Some(effects) = reduce_modal(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_connection(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_navigation(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_editing(state, &action, now) {
        return effects;
    }
    if let Some(effects) = reduce_query(state, &action, now) {
        return effects;
    }

    match action {
        Action::Resize(w, h) => {
            state.terminal_width = w;
            state.terminal_height = h;
            state.sync_table_viewport();
            vec![]
        }
        Action::Render => {
            state.clear_expired_timers(now);
            state.clear_dirty();
            vec![Effect::Render]
        }
        // every live handle is closed before the loop exits
        Action::Interrupt | Action::Quit => {
            state.should_quit = true;
            vec![Effect::CloseAll]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigFile;

    fn create_test_state() -> AppState {
        AppState::new(ConfigFile::default())
    }

    #[test]
    fn quit_closes_all_connections() {
        let mut state = create_test_state();

        let effects = reduce(&mut state, Action::Quit, Instant::now());

        assert!(state.should_quit);
        assert_eq!(effects, vec![Effect::CloseAll]);
    }

    #[test]
    fn interrupt_quits_even_while_confirming() {
        let mut state = create_test_state();
        state.confirm = Some(crate::app::confirm::ConfirmRequest::new(
            "Delete this row? (y/n)",
            Action::Quit,
        ));

        let effects = reduce(&mut state, Action::Interrupt, Instant::now());

        assert!(state.should_quit);
        assert_eq!(effects, vec![Effect::CloseAll]);
    }

    #[test]
    fn resize_updates_table_viewport() {
        let mut state = create_test_state();

        reduce(&mut state, Action::Resize(200, 50), Instant::now());

        assert_eq!(state.terminal_width, 200);
        assert_eq!(state.table.visible_rows(), 44);
    }

    #[test]
    fn render_clears_dirty_flag() {
        let mut state = create_test_state();
        assert!(state.render_dirty);

        let effects = reduce(&mut state, Action::Render, Instant::now());

        assert!(!state.render_dirty);
        assert_eq!(effects, vec![Effect::Render]);
    }

    #[test]
    fn state_changing_action_marks_dirty() {
        let mut state = create_test_state();
        state.clear_dirty();

        reduce(&mut state, Action::HomeSelectNext, Instant::now());

        assert!(state.render_dirty);
    }
}
