use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::atoms::panel_block;
use super::connection_form::ConnectionFormView;
use crate::app::state::AppState;
use crate::ui::theme::Theme;

pub struct HomeScreen;

impl HomeScreen {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = panel_block("Connections", state.home.form.is_none(), false);
        let connections = &state.config.connections;

        if connections.is_empty() {
            let empty = Paragraph::new(Line::from(vec![
                Span::styled("No connections. Press ", Style::default().fg(Theme::TEXT_MUTED)),
                Span::styled("c", Style::default().fg(Theme::TEXT_ACCENT)),
                Span::styled(" to add one.", Style::default().fg(Theme::TEXT_MUTED)),
            ]))
            .block(block);
            frame.render_widget(empty, area);
        } else {
            let name_width = connections
                .iter()
                .map(|c| c.name.chars().count())
                .max()
                .unwrap_or(0);

            let items: Vec<ListItem> = connections
                .iter()
                .map(|profile| {
                    let connected = state.sidebar.is_connected(&profile.name);
                    let mut spans = vec![
                        Span::styled(
                            if connected { "● " } else { "  " },
                            Style::default().fg(Theme::CONNECTED),
                        ),
                        Span::styled(
                            format!("{:<width$}  ", profile.name, width = name_width),
                            Style::default().fg(Theme::TEXT_PRIMARY),
                        ),
                        Span::styled(
                            profile.endpoint(),
                            Style::default().fg(Theme::TEXT_SECONDARY),
                        ),
                    ];
                    if profile.readonly {
                        spans.push(Span::styled(" [ro]", Style::default().fg(Theme::READONLY)));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut list_state = ListState::default().with_selected(Some(state.home.selected));
            frame.render_stateful_widget(list, area, &mut list_state);
        }

        if let Some(form) = &state.home.form {
            ConnectionFormView::render(frame, area, form);
        }
    }
}
