use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::atoms::spinner_char;
use super::molecules::hint_line;
use crate::app::keybindings::{
    CELL_EDIT_KEYS, CONFIRM_KEYS, EDITOR_INPUT_KEYS, EDITOR_KEYS, FILTER_KEYS, FORM_KEYS,
    HOME_KEYS, INSERT_KEYS, KeyBinding, SIDEBAR_KEYS, TABLE_KEYS,
};
use crate::app::message_state::NoticeKind;
use crate::app::screen::{Panel, Screen};
use crate::app::state::AppState;
use crate::ui::theme::Theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState, time_ms: u128) {
        let [context_area, hint_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        frame.render_widget(Paragraph::new(Self::context_line(state, time_ms)), context_area);
        frame.render_widget(Paragraph::new(hint_line(Self::hints(state))), hint_area);
    }

    fn context_line(state: &AppState, time_ms: u128) -> Line<'static> {
        let mut spans = vec![Span::styled(
            state.status_context(),
            Style::default()
                .fg(Theme::TEXT_ACCENT)
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(loading) = &state.messages.loading {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} {}", spinner_char(time_ms), loading),
                Style::default().fg(Theme::STATUS_LOADING),
            ));
        } else if let Some(notice) = &state.messages.notice {
            let color = match notice.kind {
                NoticeKind::Error => Theme::STATUS_ERROR,
                NoticeKind::Success => Theme::STATUS_SUCCESS,
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(notice.text.clone(), Style::default().fg(color)));
        }

        Line::from(spans)
    }

    fn hints(state: &AppState) -> &'static [KeyBinding] {
        if state.confirm.is_some() {
            return CONFIRM_KEYS;
        }
        match state.screen {
            Screen::Home if state.home.form.is_some() => FORM_KEYS,
            Screen::Home => HOME_KEYS,
            Screen::Browse => match (state.panel, state.input_focused) {
                (Panel::Sidebar, true) => FILTER_KEYS,
                (Panel::Sidebar, false) => SIDEBAR_KEYS,
                (Panel::Table, true) if state.table.inserting().is_some() => INSERT_KEYS,
                (Panel::Table, true) => CELL_EDIT_KEYS,
                (Panel::Table, false) => TABLE_KEYS,
                (Panel::Editor, true) => EDITOR_INPUT_KEYS,
                (Panel::Editor, false) => EDITOR_KEYS,
            },
        }
    }
}
