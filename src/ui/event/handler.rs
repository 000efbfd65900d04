use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::action::Action;
use crate::app::editor::CursorMove;
use crate::app::screen::{Panel, Screen};
use crate::app::state::AppState;

use super::Event;

pub fn handle_event(event: Event, state: &AppState) -> Action {
    match event {
        Event::Init => Action::Render,
        Event::Resize(w, h) => Action::Resize(w, h),
        Event::Key(key) => handle_key_event(key, state),
    }
}

/// Exactly one handler sees each key. Ctrl+C is the only binding that
/// bypasses the screen, panel and focus routing.
fn handle_key_event(key: KeyEvent, state: &AppState) -> Action {
    if let (KeyCode::Char('c'), m) = (key.code, key.modifiers)
        && m.contains(KeyModifiers::CONTROL)
    {
        return Action::Interrupt;
    }

    if state.confirm.is_some() {
        return handle_confirm_keys(key);
    }

    match state.screen {
        Screen::Home if state.home.form.is_some() => handle_form_keys(key),
        Screen::Home => handle_home_keys(key),
        Screen::Browse if state.input_focused => match state.panel {
            Panel::Sidebar => handle_filter_keys(key),
            Panel::Table if state.table.inserting().is_some() => handle_insert_keys(key),
            Panel::Table => handle_cell_edit_keys(key),
            Panel::Editor => handle_editor_input_keys(key),
        },
        Screen::Browse => handle_browse_keys(key, state.panel),
    }
}

fn handle_confirm_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmAccept,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmDecline,
        _ => Action::None,
    }
}

fn handle_home_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Down | KeyCode::Char('j') => Action::HomeSelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::HomeSelectPrevious,
        KeyCode::Char('g') | KeyCode::Home => Action::HomeSelectFirst,
        KeyCode::Char('G') | KeyCode::End => Action::HomeSelectLast,
        KeyCode::Enter => Action::HomeConnect,
        KeyCode::Char('c') => Action::OpenCreateForm,
        KeyCode::Char('e') => Action::OpenEditForm,
        KeyCode::Char('d') => Action::RequestDeleteConnection,
        _ => Action::None,
    }
}

fn handle_form_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::FormCancel,
        KeyCode::Enter => Action::FormSubmit,
        KeyCode::BackTab | KeyCode::Up => Action::FormPrevField,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Action::FormPrevField,
        KeyCode::Tab | KeyCode::Down => Action::FormNextField,
        KeyCode::Backspace => Action::FormBackspace,
        KeyCode::Char(c) => Action::FormInput(c),
        _ => Action::None,
    }
}

fn handle_browse_keys(key: KeyEvent, panel: Panel) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::BackTab, _) => return Action::PrevPanel,
        (KeyCode::Tab, m) if m.contains(KeyModifiers::SHIFT) => return Action::PrevPanel,
        (KeyCode::Tab, _) => return Action::NextPanel,
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return Action::GoHome,
        (KeyCode::Char('e'), m) if !m.contains(KeyModifiers::CONTROL) => return Action::ToggleEditor,
        (KeyCode::Char('/'), _) => return Action::StartFilter,
        _ => {}
    }

    match panel {
        Panel::Sidebar => handle_sidebar_keys(key),
        Panel::Table => handle_table_keys(key),
        Panel::Editor => handle_editor_nav_keys(key),
    }
}

fn handle_sidebar_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Char('g') | KeyCode::Home => Action::MoveFirst,
        KeyCode::Char('G') | KeyCode::End => Action::MoveLast,
        KeyCode::Enter => Action::Activate,
        KeyCode::Char('x') => Action::DisconnectSelected,
        _ => Action::None,
    }
}

fn handle_table_keys(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('d'), m) if m.contains(KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::MoveDown,
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::MoveUp,
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::MoveFirst,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::MoveLast,
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Action::ScrollLeft,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Action::ScrollRight,
        (KeyCode::Char('n'), _) | (KeyCode::PageDown, _) => Action::NextPage,
        (KeyCode::Char('p'), _) | (KeyCode::PageUp, _) => Action::PrevPage,
        (KeyCode::Enter, _) => Action::Activate,
        (KeyCode::Char('o'), _) => Action::StartInsert,
        (KeyCode::Char('d'), _) => Action::RequestDeleteRow,
        _ => Action::None,
    }
}

/// Editor panel without focus: enter starts typing, ctrl-e still runs.
fn handle_editor_nav_keys(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => Action::ExecuteEditor,
        (KeyCode::Enter, _) | (KeyCode::Char('i'), _) => Action::Activate,
        _ => Action::None,
    }
}

fn handle_filter_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Unfocus,
        KeyCode::Enter => Action::FilterApply,
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::None,
    }
}

fn handle_cell_edit_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Unfocus,
        KeyCode::Enter => Action::CellSubmit,
        KeyCode::BackTab => Action::CellPrevColumn,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Action::CellPrevColumn,
        KeyCode::Tab => Action::CellNextColumn,
        KeyCode::Backspace => Action::CellBackspace,
        KeyCode::Char(c) => Action::CellInput(c),
        _ => Action::None,
    }
}

fn handle_insert_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Unfocus,
        KeyCode::Enter => Action::InsertAdvance,
        KeyCode::BackTab => Action::InsertPrevField,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Action::InsertPrevField,
        KeyCode::Tab => Action::InsertNextField,
        KeyCode::Backspace => Action::InsertBackspace,
        KeyCode::Char(c) => Action::InsertInput(c),
        _ => Action::None,
    }
}

fn handle_editor_input_keys(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => Action::ExecuteEditor,
        (KeyCode::Char('p'), m) if m.contains(KeyModifiers::CONTROL) => Action::EditorHistoryPrev,
        (KeyCode::Char('n'), m) if m.contains(KeyModifiers::CONTROL) => Action::EditorHistoryNext,
        (KeyCode::Esc, _) => Action::Unfocus,
        (KeyCode::Left, _) => Action::EditorMove(CursorMove::Left),
        (KeyCode::Right, _) => Action::EditorMove(CursorMove::Right),
        (KeyCode::Up, _) => Action::EditorMove(CursorMove::Up),
        (KeyCode::Down, _) => Action::EditorMove(CursorMove::Down),
        (KeyCode::Home, _) => Action::EditorMove(CursorMove::Home),
        (KeyCode::End, _) => Action::EditorMove(CursorMove::End),
        (KeyCode::Backspace, _) => Action::EditorBackspace,
        (KeyCode::Delete, _) => Action::EditorDelete,
        (KeyCode::Enter, _) => Action::EditorNewline,
        (KeyCode::Tab, _) => Action::EditorTab,
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => Action::EditorInput(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::confirm::ConfirmRequest;
    use crate::app::connection_form::ConnectionForm;
    use crate::domain::ConfigFile;
    use rstest::rstest;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn home_state() -> AppState {
        AppState::new(ConfigFile::default())
    }

    fn browse_state(panel: Panel, input_focused: bool) -> AppState {
        let mut state = home_state();
        state.screen = Screen::Browse;
        state.panel = panel;
        state.input_focused = input_focused;
        state
    }

    mod global {
        use super::*;

        #[test]
        fn ctrl_c_interrupts_even_while_confirming() {
            let mut state = browse_state(Panel::Editor, true);
            state.confirm = Some(ConfirmRequest::new("Delete this row? (y/n)", Action::None));

            assert_eq!(handle_event(ctrl('c'), &state), Action::Interrupt);
        }

        #[test]
        fn resize_and_init_pass_through() {
            let state = home_state();

            assert_eq!(handle_event(Event::Resize(100, 30), &state), Action::Resize(100, 30));
            assert_eq!(handle_event(Event::Init, &state), Action::Render);
        }
    }

    mod confirming {
        use super::*;

        #[rstest]
        #[case(KeyCode::Char('y'), Action::ConfirmAccept)]
        #[case(KeyCode::Char('Y'), Action::ConfirmAccept)]
        #[case(KeyCode::Char('n'), Action::ConfirmDecline)]
        #[case(KeyCode::Esc, Action::ConfirmDecline)]
        #[case(KeyCode::Char('q'), Action::None)]
        #[case(KeyCode::Char('j'), Action::None)]
        fn confirm_prompt_swallows_other_keys(#[case] code: KeyCode, #[case] expected: Action) {
            let mut state = home_state();
            state.confirm = Some(ConfirmRequest::new("Delete?", Action::Quit));

            assert_eq!(handle_event(key(code), &state), expected);
        }
    }

    mod home {
        use super::*;

        #[rstest]
        #[case(KeyCode::Char('j'), Action::HomeSelectNext)]
        #[case(KeyCode::Char('k'), Action::HomeSelectPrevious)]
        #[case(KeyCode::Char('g'), Action::HomeSelectFirst)]
        #[case(KeyCode::Char('G'), Action::HomeSelectLast)]
        #[case(KeyCode::Enter, Action::HomeConnect)]
        #[case(KeyCode::Char('c'), Action::OpenCreateForm)]
        #[case(KeyCode::Char('e'), Action::OpenEditForm)]
        #[case(KeyCode::Char('d'), Action::RequestDeleteConnection)]
        #[case(KeyCode::Char('q'), Action::Quit)]
        fn list_keys(#[case] code: KeyCode, #[case] expected: Action) {
            assert_eq!(handle_event(key(code), &home_state()), expected);
        }

        #[rstest]
        #[case(KeyCode::Char('q'), Action::FormInput('q'))]
        #[case(KeyCode::Tab, Action::FormNextField)]
        #[case(KeyCode::BackTab, Action::FormPrevField)]
        #[case(KeyCode::Down, Action::FormNextField)]
        #[case(KeyCode::Up, Action::FormPrevField)]
        #[case(KeyCode::Enter, Action::FormSubmit)]
        #[case(KeyCode::Esc, Action::FormCancel)]
        #[case(KeyCode::Backspace, Action::FormBackspace)]
        fn form_keys_are_text_input(#[case] code: KeyCode, #[case] expected: Action) {
            let mut state = home_state();
            state.home.form = Some(ConnectionForm::create());

            assert_eq!(handle_event(key(code), &state), expected);
        }
    }

    mod browse {
        use super::*;

        #[rstest]
        #[case(Panel::Sidebar, KeyCode::Tab, Action::NextPanel)]
        #[case(Panel::Table, KeyCode::BackTab, Action::PrevPanel)]
        #[case(Panel::Table, KeyCode::Char('q'), Action::GoHome)]
        #[case(Panel::Sidebar, KeyCode::Esc, Action::GoHome)]
        #[case(Panel::Table, KeyCode::Char('e'), Action::ToggleEditor)]
        #[case(Panel::Table, KeyCode::Char('/'), Action::StartFilter)]
        fn global_browse_keys(#[case] panel: Panel, #[case] code: KeyCode, #[case] expected: Action) {
            assert_eq!(handle_event(key(code), &browse_state(panel, false)), expected);
        }

        #[rstest]
        #[case(Panel::Sidebar, KeyCode::Enter, Action::Activate)]
        #[case(Panel::Sidebar, KeyCode::Char('x'), Action::DisconnectSelected)]
        #[case(Panel::Sidebar, KeyCode::Char('d'), Action::None)]
        #[case(Panel::Table, KeyCode::Char('d'), Action::RequestDeleteRow)]
        #[case(Panel::Table, KeyCode::Char('o'), Action::StartInsert)]
        #[case(Panel::Table, KeyCode::Char('l'), Action::ScrollRight)]
        #[case(Panel::Table, KeyCode::Char('h'), Action::ScrollLeft)]
        #[case(Panel::Table, KeyCode::Char('n'), Action::NextPage)]
        #[case(Panel::Table, KeyCode::Char('p'), Action::PrevPage)]
        #[case(Panel::Editor, KeyCode::Enter, Action::Activate)]
        fn panel_keys(#[case] panel: Panel, #[case] code: KeyCode, #[case] expected: Action) {
            assert_eq!(handle_event(key(code), &browse_state(panel, false)), expected);
        }

        #[test]
        fn ctrl_d_pages_half_down_in_table() {
            let state = browse_state(Panel::Table, false);

            assert_eq!(handle_event(ctrl('d'), &state), Action::HalfPageDown);
            assert_eq!(handle_event(ctrl('u'), &state), Action::HalfPageUp);
        }
    }

    mod focused {
        use super::*;

        #[rstest]
        #[case(KeyCode::Char('q'), Action::EditorInput('q'))]
        #[case(KeyCode::Char('e'), Action::EditorInput('e'))]
        #[case(KeyCode::Tab, Action::EditorTab)]
        #[case(KeyCode::Enter, Action::EditorNewline)]
        #[case(KeyCode::Esc, Action::Unfocus)]
        #[case(KeyCode::Home, Action::EditorMove(CursorMove::Home))]
        fn editor_takes_text(#[case] code: KeyCode, #[case] expected: Action) {
            assert_eq!(handle_event(key(code), &browse_state(Panel::Editor, true)), expected);
        }

        #[rstest]
        #[case('e', Action::ExecuteEditor)]
        #[case('p', Action::EditorHistoryPrev)]
        #[case('n', Action::EditorHistoryNext)]
        fn editor_control_keys(#[case] c: char, #[case] expected: Action) {
            assert_eq!(handle_event(ctrl(c), &browse_state(Panel::Editor, true)), expected);
        }

        #[test]
        fn sidebar_focus_is_the_filter() {
            let state = browse_state(Panel::Sidebar, true);

            assert_eq!(handle_event(key(KeyCode::Char('x')), &state), Action::FilterInput('x'));
            assert_eq!(handle_event(key(KeyCode::Enter), &state), Action::FilterApply);
        }

        #[test]
        fn table_focus_without_insert_is_cell_edit() {
            let state = browse_state(Panel::Table, true);

            assert_eq!(handle_event(key(KeyCode::Char('d')), &state), Action::CellInput('d'));
            assert_eq!(handle_event(key(KeyCode::Tab), &state), Action::CellNextColumn);
            assert_eq!(handle_event(key(KeyCode::Enter), &state), Action::CellSubmit);
        }
    }
}
