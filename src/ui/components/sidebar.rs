use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState};

use super::atoms::panel_block;
use crate::app::screen::Panel;
use crate::app::sidebar::SidebarItem;
use crate::app::state::AppState;
use crate::ui::theme::Theme;

pub struct Sidebar;

impl Sidebar {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let sidebar = &state.sidebar;
        let focused = state.panel == Panel::Sidebar;

        let title = if sidebar.filtering || !sidebar.filter.is_empty() {
            format!("Tables /{}", sidebar.filter)
        } else {
            "Tables".to_string()
        };
        let block = panel_block(&title, focused, focused && state.input_focused);

        let items: Vec<ListItem> = sidebar
            .items()
            .into_iter()
            .map(|item| {
                let style = match item {
                    SidebarItem::Connection(n) if sidebar.nodes[n].connected => {
                        Style::default().fg(Theme::CONNECTED)
                    }
                    SidebarItem::Connection(_) => Style::default().fg(Theme::TEXT_SECONDARY),
                    SidebarItem::Table(..) => Style::default().fg(Theme::TEXT_PRIMARY),
                };
                ListItem::new(Line::styled(sidebar.label(item), style))
            })
            .collect();

        let highlight = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        let mut list_state = ListState::default().with_selected(Some(sidebar.cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
