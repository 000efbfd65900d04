//! When the main loop has to wake up without input: spinner frames while a
//! load is in flight, and notice expiry.

use std::time::{Duration, Instant};

use crate::app::state::AppState;

/// One spinner frame
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(150);

/// `None` means nothing animates and the loop may block on input.
pub fn next_animation_deadline(state: &AppState, now: Instant) -> Option<Instant> {
    let spinner = state
        .messages
        .loading
        .as_ref()
        .map(|_| now + SPINNER_INTERVAL);

    [spinner, state.messages.expires_at]
        .into_iter()
        .flatten()
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigFile;

    fn create_test_state() -> AppState {
        AppState::new(ConfigFile::default())
    }

    #[test]
    fn idle_state_blocks_on_input() {
        let state = create_test_state();

        assert!(next_animation_deadline(&state, Instant::now()).is_none());
    }

    #[test]
    fn loading_ticks_the_spinner() {
        let mut state = create_test_state();
        state.messages.start_loading("Connecting to dev...");
        let now = Instant::now();

        assert_eq!(
            next_animation_deadline(&state, now),
            Some(now + SPINNER_INTERVAL)
        );
    }

    #[test]
    fn notice_expiry_wakes_the_loop() {
        let mut state = create_test_state();
        let now = Instant::now();
        state.messages.set_success_at("Row deleted", now);

        assert_eq!(
            next_animation_deadline(&state, now),
            Some(now + Duration::from_secs(3))
        );
    }

    #[test]
    fn earliest_deadline_wins() {
        let mut state = create_test_state();
        let now = Instant::now();
        state.messages.start_loading("Loading users...");
        state.messages.expires_at = Some(now + Duration::from_millis(50));

        assert_eq!(
            next_animation_deadline(&state, now),
            Some(now + Duration::from_millis(50))
        );
    }
}
