use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::overlay::centered_rect;
use crate::app::confirm::ConfirmRequest;
use crate::ui::theme::Theme;

pub struct ConfirmPrompt;

impl ConfirmPrompt {
    pub fn render(frame: &mut Frame, request: &ConfirmRequest) {
        let width = (request.prompt.chars().count() as u16 + 6).clamp(30, 70);
        let area = centered_rect(frame.area(), Constraint::Length(width), Constraint::Length(5));
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::STATUS_ERROR))
            .style(Style::default().bg(Theme::MODAL_BG));

        let body = Paragraph::new(vec![
            Line::raw(""),
            Line::styled(
                request.prompt.clone(),
                Style::default()
                    .fg(Theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(body, area);
    }
}
