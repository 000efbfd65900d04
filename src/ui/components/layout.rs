use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::confirm_prompt::ConfirmPrompt;
use super::data_table::DataTable;
use super::editor::Editor;
use super::home::HomeScreen;
use super::sidebar::Sidebar;
use super::status_bar::StatusBar;
use crate::app::layout::{STATUS_ROWS, compute_browse_layout};
use crate::app::screen::Screen;
use crate::app::state::AppState;

pub struct MainLayout;

impl MainLayout {
    /// `time_ms` drives the spinner; `None` reads the wall clock.
    pub fn render(frame: &mut Frame, state: &AppState, time_ms: Option<u128>) {
        let area = frame.area();
        let time_ms = time_ms.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0)
        });

        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_ROWS)]).areas(area);

        match state.screen {
            Screen::Home => HomeScreen::render(frame, main_area, state),
            Screen::Browse => {
                let layout = compute_browse_layout(area.width, area.height, state.editor_visible);
                let [sidebar_area, right_area] = Layout::horizontal([
                    Constraint::Length(layout.sidebar_width),
                    Constraint::Min(0),
                ])
                .areas(main_area);
                let [table_area, editor_area] = Layout::vertical([
                    Constraint::Length(layout.table_height),
                    Constraint::Length(layout.editor_height),
                ])
                .areas(right_area);

                Sidebar::render(frame, sidebar_area, state);
                DataTable::render(frame, table_area, state);
                if state.editor_visible {
                    Editor::render(frame, editor_area, state);
                }
            }
        }

        StatusBar::render(frame, status_area, state, time_ms);

        if let Some(request) = &state.confirm {
            ConfirmPrompt::render(frame, request);
        }
    }
}
