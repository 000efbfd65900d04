use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// The single transient status notice, plus the "loading" indicator that
/// stays up until the matching completion arrives.
#[derive(Debug, Clone, Default)]
pub struct MessageState {
    pub notice: Option<Notice>,
    pub expires_at: Option<Instant>,
    pub loading: Option<String>,
}

impl MessageState {
    pub const ERROR_TIMEOUT: Duration = Duration::from_secs(5);
    pub const SUCCESS_TIMEOUT: Duration = Duration::from_secs(3);

    pub fn set_error_at(&mut self, msg: impl Into<String>, now: Instant) {
        self.set_at(NoticeKind::Error, msg.into(), now + Self::ERROR_TIMEOUT);
    }

    pub fn set_success_at(&mut self, msg: impl Into<String>, now: Instant) {
        self.set_at(NoticeKind::Success, msg.into(), now + Self::SUCCESS_TIMEOUT);
    }

    fn set_at(&mut self, kind: NoticeKind, text: String, expires_at: Instant) {
        self.notice = Some(Notice { kind, text });
        self.expires_at = Some(expires_at);
    }

    pub fn clear_expired_at(&mut self, now: Instant) {
        if let Some(expires) = self.expires_at
            && expires <= now
        {
            self.notice = None;
            self.expires_at = None;
        }
    }

    pub fn start_loading(&mut self, label: impl Into<String>) {
        self.loading = Some(label.into());
    }

    pub fn stop_loading(&mut self) {
        self.loading = None;
    }

    pub fn text(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    pub fn is_error(&self) -> bool {
        self.notice
            .as_ref()
            .is_some_and(|n| n.kind == NoticeKind::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_replaces_success() {
        let now = Instant::now();
        let mut state = MessageState::default();
        state.set_success_at("Saved", now);

        state.set_error_at("Boom", now);

        assert_eq!(state.text(), Some("Boom"));
        assert!(state.is_error());
    }

    #[test]
    fn errors_outlive_successes() {
        let now = Instant::now();
        let mut error = MessageState::default();
        let mut success = MessageState::default();

        error.set_error_at("e", now);
        success.set_success_at("s", now);

        assert_eq!(error.expires_at, Some(now + Duration::from_secs(5)));
        assert_eq!(success.expires_at, Some(now + Duration::from_secs(3)));
    }

    #[test]
    fn clear_expired_at_removes_expired_notice() {
        let now = Instant::now();
        let mut state = MessageState::default();
        state.set_success_at("done", now);

        state.clear_expired_at(now + MessageState::SUCCESS_TIMEOUT);

        assert!(state.notice.is_none());
        assert!(state.expires_at.is_none());
    }

    #[test]
    fn clear_expired_at_keeps_fresh_notice() {
        let now = Instant::now();
        let mut state = MessageState::default();
        state.set_error_at("Error", now);

        state.clear_expired_at(now + Duration::from_secs(1));

        assert_eq!(state.text(), Some("Error"));
    }

    #[test]
    fn loading_is_independent_of_notice_expiry() {
        let now = Instant::now();
        let mut state = MessageState::default();
        state.start_loading("Loading users...");
        state.set_error_at("x", now);

        state.clear_expired_at(now + Duration::from_secs(60));

        assert_eq!(state.loading.as_deref(), Some("Loading users..."));
        state.stop_loading();
        assert!(state.loading.is_none());
    }
}
