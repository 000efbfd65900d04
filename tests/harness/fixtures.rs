use std::time::Duration;

use ezpg::app::screen::{Panel, Screen};
use ezpg::app::state::AppState;
use ezpg::domain::{ConfigFile, ConnectionProfile, QueryResult, ResultSource, TableInfo};

use super::{TEST_HEIGHT, TEST_WIDTH};

pub fn sample_config() -> ConfigFile {
    ConfigFile {
        connections: vec![
            ConnectionProfile {
                name: "dev".to_string(),
                host: "localhost".to_string(),
                user: "app".to_string(),
                database: "shop".to_string(),
                ..Default::default()
            },
            ConnectionProfile {
                name: "prod".to_string(),
                host: "db.internal".to_string(),
                database: "shop".to_string(),
                readonly: true,
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

pub fn home_state() -> AppState {
    let mut state = AppState::new(sample_config());
    state.terminal_width = TEST_WIDTH;
    state.terminal_height = TEST_HEIGHT;
    state
}

pub fn users_result() -> QueryResult {
    QueryResult::new(
        vec!["id".to_string(), "name".to_string(), "email".to_string()],
        vec![
            vec![
                "1".to_string(),
                "alice".to_string(),
                "alice@example.com".to_string(),
            ],
            vec!["2".to_string(), "bob".to_string(), "NULL".to_string()],
        ],
        Duration::from_millis(4),
        ResultSource::Table {
            connection: "dev".to_string(),
            schema: "public".to_string(),
            table: "users".to_string(),
        },
    )
}

/// Connected to `dev` with `public.users` open in the table panel.
pub fn browse_state() -> AppState {
    let mut state = home_state();
    state.screen = Screen::Browse;
    state.panel = Panel::Table;
    state.active_connection = Some("dev".to_string());
    state.sidebar.load_tables(
        "dev",
        vec![
            TableInfo::new("public", "users"),
            TableInfo::new("audit", "events"),
        ],
    );
    let page_size = state.settings().page_size();
    state.table.reset_paging(page_size);
    state.table.set_result(users_result());
    state.sync_table_viewport();
    state
}
