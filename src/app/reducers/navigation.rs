//! Navigation sub-reducer: panels, cursors, paging, sidebar activation.

use std::time::Instant;

use crate::app::action::Action;
use crate::app::effect::Effect;
use crate::app::reducers::connection::connect;
use crate::app::reducers::editing::begin_edit;
use crate::app::screen::{Panel, Screen};
use crate::app::sidebar::SidebarItem;
use crate::app::state::AppState;
use crate::app::table_view::PageRequest;
use crate::domain::TableInfo;

/// Loads the first page of a table, plus its columns when the primary key
/// is not cached yet. Both are issued together.
pub fn open_table(state: &mut AppState, connection: &str, table: &TableInfo) -> Vec<Effect> {
    let page_size = state.settings().page_size();
    state.table.cancel_pending();
    state.table.reset_paging(page_size);
    state.panel = Panel::Table;
    state.input_focused = false;
    state.active_connection = Some(connection.to_string());
    state
        .messages
        .start_loading(format!("Loading {}...", table.display_name()));

    let mut effects = vec![request_page(
        state,
        PageRequest {
            connection: connection.to_string(),
            schema: table.schema.clone(),
            table: table.name.clone(),
            offset: 0,
        },
    )];
    if !state
        .pk_cache
        .contains(connection, &table.schema, &table.name)
    {
        effects.push(Effect::LoadColumns {
            connection: connection.to_string(),
            schema: table.schema.clone(),
            table: table.name.clone(),
        });
    }
    effects
}

/// Re-reads the current page of the active table. Query results have
/// nothing to reload.
pub fn reload_page(state: &mut AppState) -> Vec<Effect> {
    let Some((connection, schema, table)) = state.table.table_source() else {
        return vec![];
    };
    let request = PageRequest {
        connection: connection.to_string(),
        schema: schema.to_string(),
        table: table.to_string(),
        offset: state.table.offset(),
    };
    vec![request_page(state, request)]
}

/// Records `request` as the only page load whose completion will be applied.
fn request_page(state: &mut AppState, request: PageRequest) -> Effect {
    let effect = Effect::LoadTableData {
        connection: request.connection.clone(),
        schema: request.schema.clone(),
        table: request.table.clone(),
        limit: state.table.page_size,
        offset: request.offset,
    };
    state.table.requested = Some(request);
    effect
}

fn activate_sidebar(state: &mut AppState) -> Vec<Effect> {
    match state.sidebar.selected() {
        Some(SidebarItem::Connection(n)) => {
            let Some(node) = state.sidebar.node(n) else {
                return vec![];
            };
            let name = node.name.clone();
            if !node.connected {
                connect(state, name)
            } else if node.expanded {
                state.sidebar.collapse(&name);
                vec![]
            } else {
                state.messages.start_loading("Loading tables...");
                vec![Effect::LoadTables { name }]
            }
        }
        Some(SidebarItem::Table(n, t)) => {
            let Some((node, table)) = state.sidebar.table(n, t) else {
                return vec![];
            };
            let (connection, table) = (node.name.clone(), table.clone());
            open_table(state, &connection, &table)
        }
        None => vec![],
    }
}

fn selected_connection_name(state: &AppState) -> Option<String> {
    let n = match state.sidebar.selected()? {
        SidebarItem::Connection(n) | SidebarItem::Table(n, _) => n,
    };
    state.sidebar.node(n).map(|node| node.name.clone())
}

/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_navigation(
    state: &mut AppState,
    action: &Action,
    now: Instant,
) -> Option<Vec<Effect>> {
    match action {
        Action::GoHome => {
            state.screen = Screen::Home;
            state.input_focused = false;
            state.table.cancel_pending();
            state.sidebar.clear_filter();
            Some(vec![])
        }
        Action::NextPanel => {
            state.panel = state.panel.next(state.editor_visible);
            state.input_focused = false;
            Some(vec![])
        }
        Action::PrevPanel => {
            state.panel = state.panel.prev(state.editor_visible);
            state.input_focused = false;
            Some(vec![])
        }
        Action::ToggleEditor => {
            state.editor_visible = !state.editor_visible;
            if state.editor_visible {
                state.panel = Panel::Editor;
                state.input_focused = true;
            } else if state.panel == Panel::Editor {
                state.panel = Panel::Table;
                state.input_focused = false;
            }
            state.sync_table_viewport();
            Some(vec![])
        }
        Action::Activate => match state.panel {
            Panel::Sidebar => Some(activate_sidebar(state)),
            Panel::Table => Some(begin_edit(state, now)),
            Panel::Editor => {
                state.input_focused = true;
                Some(vec![])
            }
        },

        Action::MoveDown | Action::MoveUp | Action::MoveFirst | Action::MoveLast => {
            match state.panel {
                Panel::Sidebar => match action {
                    Action::MoveDown => state.sidebar.move_by(1),
                    Action::MoveUp => state.sidebar.move_by(-1),
                    Action::MoveFirst => state.sidebar.select_first(),
                    _ => state.sidebar.select_last(),
                },
                Panel::Table => match action {
                    Action::MoveDown => state.table.move_cursor(1),
                    Action::MoveUp => state.table.move_cursor(-1),
                    Action::MoveFirst => state.table.cursor_first(),
                    _ => state.table.cursor_last(),
                },
                Panel::Editor => {}
            }
            Some(vec![])
        }
        Action::HalfPageDown => {
            let delta = state.table.half_page();
            state.table.move_cursor(delta);
            Some(vec![])
        }
        Action::HalfPageUp => {
            let delta = state.table.half_page();
            state.table.move_cursor(-delta);
            Some(vec![])
        }
        Action::ScrollRight => {
            state.table.scroll_right();
            Some(vec![])
        }
        Action::ScrollLeft => {
            state.table.scroll_left();
            Some(vec![])
        }
        Action::NextPage | Action::PrevPage => {
            if state.table.table_source().is_none() {
                return Some(vec![]);
            }
            let moved = if matches!(action, Action::NextPage) {
                state.table.next_page()
            } else {
                state.table.prev_page()
            };
            if !moved {
                return Some(vec![]);
            }
            state.table.cancel_pending();
            state.messages.start_loading("Loading page...");
            Some(reload_page(state))
        }

        Action::StartFilter => {
            state.panel = Panel::Sidebar;
            state.sidebar.start_filter();
            state.input_focused = true;
            Some(vec![])
        }
        Action::DisconnectSelected => {
            let name = selected_connection_name(state)?;
            if !state.sidebar.is_connected(&name) {
                return Some(vec![]);
            }
            Some(vec![Effect::Disconnect { name }])
        }
        _ => None,
    }
}
