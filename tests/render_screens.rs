mod harness;

use std::time::Instant;

use harness::fixtures::{browse_state, home_state};
use harness::{create_test_terminal, render_to_string};

use ezpg::app::action::Action;
use ezpg::app::confirm::ConfirmRequest;
use ezpg::app::connection_form::ConnectionForm;
use ezpg::app::reducer::reduce;
use ezpg::app::screen::Panel;
use ezpg::app::state::AppState;
use ezpg::domain::ConfigFile;

mod home {
    use super::*;

    #[test]
    fn lists_connections_with_markers() {
        let mut terminal = create_test_terminal();
        let mut state = home_state();
        state.sidebar.mark_connected("dev");

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("Connections"));
        assert!(output.contains("● dev"));
        assert!(output.contains("localhost:5432/shop"));
        assert!(output.contains("db.internal:5432/shop [ro]"));
        assert!(output.contains("Enter Connect"));
        assert!(output.contains("ezpg"));
    }

    #[test]
    fn empty_config_shows_how_to_add() {
        let mut terminal = create_test_terminal();
        let state = AppState::new(ConfigFile::default());

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("No connections. Press c to add one."));
    }

    #[test]
    fn connection_form_masks_password() {
        let mut terminal = create_test_terminal();
        let mut state = home_state();
        let mut form = ConnectionForm::create();
        for c in "local".chars() {
            form.push_char(c);
        }
        for _ in 0..4 {
            form.next_field();
        }
        for c in "secret".chars() {
            form.push_char(c);
        }
        state.home.form = Some(form);

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("New Connection"));
        assert!(output.contains("local"));
        assert!(output.contains("******"));
        assert!(!output.contains("secret"));
        assert!(output.contains("Esc Cancel"));
    }

    #[test]
    fn delete_prompt_overlays_the_list() {
        let mut terminal = create_test_terminal();
        let mut state = home_state();

        reduce(&mut state, Action::RequestDeleteConnection, Instant::now());
        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("Delete connection \"dev\"? (y/n)"));
        assert!(output.contains("y Confirm"));
    }
}

mod browse {
    use super::*;

    #[test]
    fn table_panel_shows_header_rows_and_info_line() {
        let mut terminal = create_test_terminal();
        let state = browse_state();

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("public.users"));
        assert!(output.contains("id"));
        assert!(output.contains("alice@example.com"));
        assert!(output.contains("bob"));
        assert!(output.contains("rows 1-2  page 1  cols 1-3/3"));
        assert!(output.contains("dev > public.users"));
    }

    #[test]
    fn sidebar_lists_tables_under_connection() {
        let mut terminal = create_test_terminal();
        let state = browse_state();

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("● ▾ dev"));
        assert!(output.contains("    users"));
        assert!(output.contains("    audit.events"));
        assert!(output.contains("○   prod"));
    }

    #[test]
    fn loading_shows_spinner_and_label() {
        let mut terminal = create_test_terminal();
        let mut state = browse_state();
        state.messages.start_loading("Loading page...");

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("◐ Loading page..."));
    }

    #[test]
    fn error_notice_replaces_nothing_but_the_message_slot() {
        let mut terminal = create_test_terminal();
        let mut state = browse_state();
        state
            .messages
            .set_error_at("Query error: relation \"nope\" does not exist", Instant::now());

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("dev > public.users  Query error: relation \"nope\""));
    }

    #[test]
    fn cell_edit_shows_typed_value() {
        let mut terminal = create_test_terminal();
        let mut state = browse_state();
        let now = Instant::now();

        reduce(&mut state, Action::Activate, now);
        reduce(&mut state, Action::CellInput('0'), now);
        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("edit id: 10"));
        assert!(output.contains("Enter Save"));
    }

    #[test]
    fn insert_walks_columns() {
        let mut terminal = create_test_terminal();
        let mut state = browse_state();
        let now = Instant::now();

        reduce(&mut state, Action::StartInsert, now);
        reduce(&mut state, Action::InsertNextField, now);
        for c in "carol".chars() {
            reduce(&mut state, Action::InsertInput(c), now);
        }
        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("insert name (2/3): carol"));
    }

    #[test]
    fn editor_panel_renders_buffer() {
        let mut terminal = create_test_terminal();
        let mut state = browse_state();
        let now = Instant::now();

        reduce(&mut state, Action::ToggleEditor, now);
        for c in "SELECT 1".chars() {
            reduce(&mut state, Action::EditorInput(c), now);
        }
        let output = render_to_string(&mut terminal, &state);

        assert_eq!(state.panel, Panel::Editor);
        assert!(output.contains("SQL"));
        assert!(output.contains("SELECT 1"));
        assert!(output.contains("^E Run"));
    }

    #[test]
    fn row_delete_confirmation_is_drawn() {
        let mut terminal = create_test_terminal();
        let mut state = browse_state();
        state.confirm = Some(ConfirmRequest::new("Delete this row? (y/n)", Action::None));

        let output = render_to_string(&mut terminal, &state);

        assert!(output.contains("Delete this row? (y/n)"));
        assert!(output.contains("n/Esc Cancel"));
    }
}
