//! Editing sub-reducer: cell edits, row inserts and deletes, the sidebar
//! filter and the SQL editor buffer. Everything that consumes typed text.

use std::time::Instant;

use crate::app::action::{Action, MutationKind, PendingMutation};
use crate::app::effect::Effect;
use crate::app::mutation::{MutationError, MutationQuery, TableTarget};
use crate::app::reducers::request_confirmation;
use crate::app::screen::Panel;
use crate::app::state::AppState;
use crate::app::table_view::InsertStep;

const QUERY_RESULT_READONLY: &str = "Cannot modify query results";
const CONNECTION_READONLY: &str = "Connection is read-only";

/// Connection of the displayed table, if its rows may be changed.
fn writable_connection(state: &AppState) -> Result<String, &'static str> {
    if state.table.is_query_result() {
        return Err(QUERY_RESULT_READONLY);
    }
    let Some((connection, _, _)) = state.table.table_source() else {
        return Err("No table selected");
    };
    if state.is_readonly(connection) {
        return Err(CONNECTION_READONLY);
    }
    Ok(connection.to_string())
}

fn synthesize(
    state: &AppState,
    build: impl FnOnce(&TableTarget<'_>) -> Result<MutationQuery, MutationError>,
) -> Option<Result<MutationQuery, MutationError>> {
    let (connection, schema, table) = state.table.table_source()?;
    let target = TableTarget {
        schema,
        table,
        columns: state.table.columns(),
        primary_keys: state.pk_cache.keys_or_empty(connection, schema, table),
        null_display: &state.settings().null_display,
    };
    Some(build(&target))
}

fn submit(
    state: &mut AppState,
    kind: MutationKind,
    built: Option<Result<MutationQuery, MutationError>>,
    now: Instant,
) -> Vec<Effect> {
    let connection = match writable_connection(state) {
        Ok(connection) => connection,
        Err(msg) => {
            state.messages.set_error_at(msg, now);
            return vec![];
        }
    };
    match built {
        Some(Ok(query)) => dispatch_mutation(
            state,
            PendingMutation {
                connection,
                kind,
                query,
            },
        ),
        Some(Err(e)) => {
            state
                .messages
                .set_error_at(format!("{}: {}", kind.failure_prefix(), e), now);
            vec![]
        }
        None => vec![],
    }
}

/// The pending edit or insert stays on screen until the outcome arrives.
fn dispatch_mutation(state: &mut AppState, mutation: PendingMutation) -> Vec<Effect> {
    state.input_focused = false;
    state.messages.start_loading("Saving...");
    vec![Effect::Mutate(mutation)]
}

/// Starts editing the first column of the cursor row.
pub fn begin_edit(state: &mut AppState, now: Instant) -> Vec<Effect> {
    if let Err(msg) = writable_connection(state) {
        state.messages.set_error_at(msg, now);
        return vec![];
    }
    if state.table.start_edit() {
        state.input_focused = true;
    }
    vec![]
}

fn submit_edit(state: &mut AppState, now: Instant) -> Vec<Effect> {
    let Some(edit) = state.table.editing().cloned() else {
        return vec![];
    };
    let Some(row) = state.table.rows().get(edit.row).cloned() else {
        return vec![];
    };
    if row.get(edit.column) == Some(&edit.value) {
        state.table.cancel_pending();
        state.input_focused = false;
        return vec![];
    }
    let built = synthesize(state, |target| {
        target.update(&row, edit.column, &edit.value)
    });
    submit(state, MutationKind::Update, built, now)
}

fn submit_insert(state: &mut AppState, now: Instant) -> Vec<Effect> {
    let Some(insert) = state.table.inserting().cloned() else {
        return vec![];
    };
    let built = synthesize(state, |target| target.insert(&insert.values));
    submit(state, MutationKind::Insert, built, now)
}

fn request_delete_row(state: &mut AppState, now: Instant) -> Vec<Effect> {
    let connection = match writable_connection(state) {
        Ok(connection) => connection,
        Err(msg) => {
            state.messages.set_error_at(msg, now);
            return vec![];
        }
    };
    let Some(row) = state.table.selected_row().cloned() else {
        return vec![];
    };
    match synthesize(state, |target| target.delete(&row)) {
        Some(Ok(query)) => {
            let on_confirm = Action::SubmitMutation(PendingMutation {
                connection,
                kind: MutationKind::Delete,
                query,
            });
            request_confirmation(state, "Delete this row? (y/n)".to_string(), on_confirm, now)
        }
        Some(Err(e)) => {
            state
                .messages
                .set_error_at(format!("Delete failed: {}", e), now);
            vec![]
        }
        None => vec![],
    }
}

fn execute_editor(state: &mut AppState, now: Instant) -> Vec<Effect> {
    let Some(connection) = state.active_connection.clone() else {
        state.messages.set_error_at("No active connection", now);
        return vec![];
    };
    let sql = state.editor.content.trim().to_string();
    if sql.is_empty() {
        return vec![];
    }
    state.editor.history.push(sql.clone());
    state.messages.start_loading("Executing query...");
    vec![Effect::ExecuteQuery { connection, sql }]
}

/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_editing(state: &mut AppState, action: &Action, now: Instant) -> Option<Vec<Effect>> {
    match action {
        Action::StartInsert => {
            if let Err(msg) = writable_connection(state) {
                state.messages.set_error_at(msg, now);
                return Some(vec![]);
            }
            if state.table.start_insert() {
                state.panel = Panel::Table;
                state.input_focused = true;
            }
            Some(vec![])
        }
        Action::RequestDeleteRow => Some(request_delete_row(state, now)),
        Action::SubmitMutation(mutation) => Some(dispatch_mutation(state, mutation.clone())),

        Action::Unfocus => {
            match state.panel {
                Panel::Sidebar => state.sidebar.clear_filter(),
                Panel::Table => state.table.cancel_pending(),
                Panel::Editor => {}
            }
            state.input_focused = false;
            Some(vec![])
        }

        Action::FilterInput(c) => {
            state.sidebar.push_filter(*c);
            Some(vec![])
        }
        Action::FilterBackspace => {
            state.sidebar.pop_filter();
            Some(vec![])
        }
        Action::FilterApply => {
            state.sidebar.apply_filter();
            state.input_focused = false;
            Some(vec![])
        }

        Action::CellInput(c) | Action::InsertInput(c) => {
            state.table.push_char(*c);
            Some(vec![])
        }
        Action::CellBackspace | Action::InsertBackspace => {
            state.table.pop_char();
            Some(vec![])
        }
        Action::CellNextColumn => {
            state.table.edit_step_column(true);
            Some(vec![])
        }
        Action::CellPrevColumn => {
            state.table.edit_step_column(false);
            Some(vec![])
        }
        Action::CellSubmit => Some(submit_edit(state, now)),
        Action::InsertNextField => {
            state.table.insert_next_field();
            Some(vec![])
        }
        Action::InsertPrevField => {
            state.table.insert_prev_field();
            Some(vec![])
        }
        Action::InsertAdvance => match state.table.insert_next_field() {
            InsertStep::Moved => Some(vec![]),
            InsertStep::Complete => Some(submit_insert(state, now)),
        },

        Action::EditorInput(c) => {
            state.editor.insert_char(*c);
            Some(vec![])
        }
        Action::EditorBackspace => {
            state.editor.backspace();
            Some(vec![])
        }
        Action::EditorDelete => {
            state.editor.delete();
            Some(vec![])
        }
        Action::EditorNewline => {
            state.editor.insert_char('\n');
            Some(vec![])
        }
        Action::EditorTab => {
            let spaces = " ".repeat(state.settings().tab_size());
            state.editor.insert_str(&spaces);
            Some(vec![])
        }
        Action::EditorMove(movement) => {
            state.editor.move_cursor(*movement);
            Some(vec![])
        }
        Action::EditorHistoryPrev => {
            state.editor.history_prev();
            Some(vec![])
        }
        Action::EditorHistoryNext => {
            state.editor.history_next();
            Some(vec![])
        }
        Action::ExecuteEditor => Some(execute_editor(state, now)),
        _ => None,
    }
}
