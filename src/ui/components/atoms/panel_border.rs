use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::ui::theme::Theme;

/// Panel block with focus-aware border styling. Panels taking text input
/// get their own border color.
pub fn panel_block(title: &str, focused: bool, input: bool) -> Block<'static> {
    let color = match (focused, input) {
        (true, true) => Theme::INPUT_BORDER,
        (true, false) => Theme::FOCUS_BORDER,
        _ => Theme::UNFOCUS_BORDER,
    };

    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}
