use crate::app::action::Action;

/// A destructive action parked until the user answers y/n.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest {
    pub prompt: String,
    pub on_confirm: Action,
}

impl ConfirmRequest {
    pub fn new(prompt: impl Into<String>, on_confirm: Action) -> Self {
        Self {
            prompt: prompt.into(),
            on_confirm,
        }
    }
}
