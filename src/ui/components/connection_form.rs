use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::overlay::centered_rect;
use crate::app::connection_form::{ConnectionForm, FormField};
use crate::ui::theme::Theme;

const LABEL_WIDTH: usize = 10;

pub struct ConnectionFormView;

impl ConnectionFormView {
    pub fn render(frame: &mut Frame, parent: Rect, form: &ConnectionForm) {
        let fields = FormField::all();
        let height = fields.len() as u16 + 2;
        let area = centered_rect(parent, Constraint::Length(60), Constraint::Length(height));

        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", form.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::INPUT_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = fields
            .iter()
            .map(|&field| {
                let active = field == form.field;
                let label_style = if active {
                    Style::default()
                        .fg(Theme::TEXT_ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Theme::TEXT_SECONDARY)
                };
                Line::from(vec![
                    Span::styled(if active { "> " } else { "  " }, label_style),
                    Span::styled(
                        format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                        label_style,
                    ),
                    Span::styled(
                        form.display_value(field),
                        Style::default().fg(Theme::TEXT_PRIMARY),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(row) = fields.iter().position(|&f| f == form.field) {
            let typed = form.display_value(form.field).chars().count();
            let x = inner.x + (2 + LABEL_WIDTH + typed) as u16;
            frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y + row as u16));
        }
    }
}
