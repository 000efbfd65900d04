use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::app::keybindings::KeyBinding;
use crate::ui::components::atoms::key_text;
use crate::ui::theme::Theme;

/// Format: "key1 desc1  key2 desc2  ..."
pub fn hint_line(bindings: &[KeyBinding]) -> Line<'static> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in bindings.iter().map(KeyBinding::as_hint).enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(key_text(key));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Theme::TEXT_SECONDARY),
        ));
    }

    Line::from(spans)
}
