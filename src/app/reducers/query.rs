//! Query sub-reducer: reconciles data, column and mutation completions.

use std::time::Instant;

use crate::app::action::Action;
use crate::app::effect::Effect;
use crate::app::reducers::navigation::reload_page;
use crate::app::state::AppState;
use crate::domain::column::primary_key_names;

/// Returns Some(effects) if action was handled, None otherwise.
pub fn reduce_query(state: &mut AppState, action: &Action, now: Instant) -> Option<Vec<Effect>> {
    match action {
        // prefetch: no notice on success
        Action::ColumnsLoaded {
            connection,
            schema,
            table,
            columns,
        } => {
            state
                .pk_cache
                .insert(connection, schema, table, primary_key_names(columns));
            Some(vec![])
        }
        Action::ColumnsFailed { error, .. } => {
            state
                .messages
                .set_error_at(format!("Load columns failed: {}", error), now);
            Some(vec![])
        }

        Action::TableDataLoaded { request, result } => {
            if !state.table.is_awaited(request) {
                return Some(vec![]);
            }
            state.table.requested = None;
            state.messages.stop_loading();
            state.table.set_result(result.as_ref().clone());
            Some(vec![])
        }
        Action::TableDataFailed { request, error } => {
            if !state.table.is_awaited(request) {
                return Some(vec![]);
            }
            state.table.requested = None;
            state.messages.stop_loading();
            state
                .messages
                .set_error_at(format!("Load data failed: {}", error), now);
            Some(vec![])
        }

        Action::QueryCompleted(result) => {
            state.messages.stop_loading();
            state.messages.set_success_at(result.summary(), now);
            if result.has_columns() {
                state.table.requested = None;
                state.table.cancel_pending();
                state.table.set_result(result.as_ref().clone());
            }
            Some(vec![])
        }
        Action::QueryFailed { error } => {
            state.messages.stop_loading();
            state
                .messages
                .set_error_at(format!("Query error: {}", error), now);
            Some(vec![])
        }

        Action::MutationApplied { kind, .. } => {
            state.messages.stop_loading();
            state.table.cancel_pending();
            state.input_focused = false;
            state.messages.set_success_at(kind.done_message(), now);
            Some(reload_page(state))
        }
        Action::MutationFailed { kind, error } => {
            state.messages.stop_loading();
            state.table.cancel_pending();
            state.input_focused = false;
            state
                .messages
                .set_error_at(format!("{}: {}", kind.failure_prefix(), error), now);
            Some(vec![])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::app::action::MutationKind;
    use crate::app::reducer::reduce;
    use crate::app::table_view::PageRequest;
    use crate::domain::{ColumnInfo, ConfigFile, QueryResult, ResultSource};

    fn users_source() -> ResultSource {
        ResultSource::Table {
            connection: "dev".to_string(),
            schema: "public".to_string(),
            table: "users".to_string(),
        }
    }

    fn users_page(rows: usize) -> QueryResult {
        QueryResult::new(
            vec!["id".to_string()],
            (0..rows).map(|i| vec![i.to_string()]).collect(),
            Duration::from_millis(4),
            users_source(),
        )
    }

    fn users_request(offset: usize) -> PageRequest {
        PageRequest {
            connection: "dev".to_string(),
            schema: "public".to_string(),
            table: "users".to_string(),
            offset,
        }
    }

    fn create_test_state() -> AppState {
        let mut state = AppState::new(ConfigFile::default());
        state.table.reset_paging(100);
        state.sync_table_viewport();
        state
    }

    fn column(name: &str, is_primary: bool) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            data_type: "integer".to_string(),
            is_nullable: !is_primary,
            is_primary,
        }
    }

    mod columns {
        use super::*;

        #[test]
        fn loaded_columns_fill_primary_key_cache_silently() {
            let mut state = create_test_state();

            reduce(
                &mut state,
                Action::ColumnsLoaded {
                    connection: "dev".to_string(),
                    schema: "public".to_string(),
                    table: "users".to_string(),
                    columns: vec![column("id", true), column("org", false)],
                },
                Instant::now(),
            );

            assert_eq!(
                state.pk_cache.get("dev", "public", "users"),
                Some(&["id".to_string()][..])
            );
            assert!(state.messages.text().is_none());
        }

        #[test]
        fn table_without_key_caches_empty_set() {
            let mut state = create_test_state();

            reduce(
                &mut state,
                Action::ColumnsLoaded {
                    connection: "dev".to_string(),
                    schema: "public".to_string(),
                    table: "logs".to_string(),
                    columns: vec![column("line", false)],
                },
                Instant::now(),
            );

            assert!(state.pk_cache.contains("dev", "public", "logs"));
            assert!(state.pk_cache.keys_or_empty("dev", "public", "logs").is_empty());
        }
    }

    mod data {
        use super::*;

        #[test]
        fn loaded_page_replaces_result_and_clears_loading() {
            let mut state = create_test_state();
            state.table.requested = Some(users_request(0));
            state.messages.start_loading("Loading users...");

            reduce(
                &mut state,
                Action::TableDataLoaded {
                    request: users_request(0),
                    result: Box::new(users_page(3)),
                },
                Instant::now(),
            );

            assert!(state.messages.loading.is_none());
            assert_eq!(state.table.row_count(), 3);
            assert_eq!(state.table.table_source(), Some(("dev", "public", "users")));
            assert!(state.table.requested.is_none());
        }

        #[test]
        fn page_from_superseded_table_is_dropped() {
            let mut state = create_test_state();
            state.table.requested = Some(PageRequest {
                table: "orders".to_string(),
                ..users_request(0)
            });
            state.messages.start_loading("Loading public.orders...");

            reduce(
                &mut state,
                Action::TableDataLoaded {
                    request: users_request(0),
                    result: Box::new(users_page(3)),
                },
                Instant::now(),
            );

            assert!(state.table.result.is_none());
            assert!(state.messages.loading.is_some());
        }

        #[test]
        fn page_from_superseded_offset_is_dropped() {
            let mut state = create_test_state();
            state.table.set_result(users_page(100));
            state.table.requested = Some(users_request(100));

            reduce(
                &mut state,
                Action::TableDataLoaded {
                    request: users_request(0),
                    result: Box::new(users_page(7)),
                },
                Instant::now(),
            );

            assert_eq!(state.table.row_count(), 100);
            assert_eq!(state.table.requested, Some(users_request(100)));
        }

        #[test]
        fn stale_failure_is_ignored() {
            let mut state = create_test_state();
            state.table.requested = Some(users_request(100));

            reduce(
                &mut state,
                Action::TableDataFailed {
                    request: users_request(0),
                    error: "timed out after 30s".to_string(),
                },
                Instant::now(),
            );

            assert!(state.messages.text().is_none());
        }

        #[test]
        fn failure_keeps_previous_result() {
            let mut state = create_test_state();
            state.table.set_result(users_page(2));
            state.table.requested = Some(users_request(0));
            state.messages.start_loading("Loading page...");

            reduce(
                &mut state,
                Action::TableDataFailed {
                    request: users_request(0),
                    error: "timed out after 30s".to_string(),
                },
                Instant::now(),
            );

            assert_eq!(state.table.row_count(), 2);
            assert!(state.messages.loading.is_none());
            assert!(state.messages.is_error());
            assert_eq!(
                state.messages.text(),
                Some("Load data failed: timed out after 30s")
            );
        }

        #[test]
        fn statement_without_columns_only_reports_tag() {
            let mut state = create_test_state();
            state.table.set_result(users_page(2));
            let result = QueryResult::new(
                vec![],
                vec![],
                Duration::from_millis(1),
                ResultSource::Query {
                    connection: "dev".to_string(),
                },
            )
            .with_command_tag("3 rows affected");

            reduce(
                &mut state,
                Action::QueryCompleted(Box::new(result)),
                Instant::now(),
            );

            assert_eq!(state.messages.text(), Some("3 rows affected"));
            assert_eq!(state.table.row_count(), 2);
            assert!(!state.table.is_query_result());
        }

        #[test]
        fn query_failure_is_reported() {
            let mut state = create_test_state();

            reduce(
                &mut state,
                Action::QueryFailed {
                    error: "syntax error at or near \"SELEC\"".to_string(),
                },
                Instant::now(),
            );

            assert_eq!(
                state.messages.text(),
                Some("Query error: syntax error at or near \"SELEC\"")
            );
        }
    }

    mod mutations {
        use super::*;

        #[test]
        fn applied_clears_pending_and_reloads_current_page() {
            let mut state = create_test_state();
            state.table.set_result(users_page(100));
            state.table.next_page();
            state.table.set_result(users_page(100));
            state.table.start_insert();

            let effects = reduce(
                &mut state,
                Action::MutationApplied {
                    kind: MutationKind::Insert,
                    rows_affected: 1,
                },
                Instant::now(),
            );

            assert!(state.table.pending.is_none());
            assert_eq!(state.messages.text(), Some("Row inserted"));
            assert_eq!(
                effects,
                vec![Effect::LoadTableData {
                    connection: "dev".to_string(),
                    schema: "public".to_string(),
                    table: "users".to_string(),
                    limit: 100,
                    offset: 100,
                }]
            );
        }

        #[test]
        fn failure_clears_pending_and_reports() {
            let mut state = create_test_state();
            state.table.set_result(users_page(1));
            state.table.start_edit();

            let effects = reduce(
                &mut state,
                Action::MutationFailed {
                    kind: MutationKind::Update,
                    error: "duplicate key value".to_string(),
                },
                Instant::now(),
            );

            assert!(effects.is_empty());
            assert!(state.table.pending.is_none());
            assert_eq!(
                state.messages.text(),
                Some("Update failed: duplicate key value")
            );
        }
    }
}
