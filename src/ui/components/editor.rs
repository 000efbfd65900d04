use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::atoms::panel_block;
use crate::app::screen::Panel;
use crate::app::state::AppState;
use crate::ui::theme::Theme;

pub struct Editor;

impl Editor {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.panel == Panel::Editor;
        let typing = focused && state.input_focused;
        let editor = &state.editor;

        let title = if editor.history.is_empty() {
            "SQL".to_string()
        } else {
            format!("SQL [{} in history]", editor.history.len())
        };
        let block = panel_block(&title, focused, typing);
        let inner = block.inner(area);

        let (row, col) = editor.cursor_position();
        let scroll = (row as u16).saturating_sub(inner.height.saturating_sub(1));

        let content = if editor.content.is_empty() && !typing {
            Paragraph::new(Line::styled(
                "Press Enter to write SQL, Ctrl+E to run",
                Style::default().fg(Theme::TEXT_MUTED),
            ))
        } else {
            Paragraph::new(editor.content.as_str())
                .style(Style::default().fg(Theme::TEXT_PRIMARY))
                .scroll((scroll, 0))
        };
        frame.render_widget(content.block(block), area);

        if typing && inner.width > 0 && inner.height > 0 {
            let x = inner.x + (col as u16).min(inner.width - 1);
            let y = inner.y + (row as u16).saturating_sub(scroll);
            frame.set_cursor_position((x, y));
        }
    }
}
