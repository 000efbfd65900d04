use std::time::Duration;

/// Where a result set came from. Only table pages can be edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    Table {
        connection: String,
        schema: String,
        table: String,
    },
    Query {
        connection: String,
    },
}

impl ResultSource {
    pub fn connection(&self) -> &str {
        match self {
            Self::Table { connection, .. } | Self::Query { connection } => connection,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table { .. })
    }
}

/// Rows are rectangular: every row has `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub elapsed: Duration,
    /// Set for statements that return no row description.
    pub command_tag: Option<String>,
    pub source: ResultSource,
}

impl QueryResult {
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        elapsed: Duration,
        source: ResultSource,
    ) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect::<Vec<_>>();
        Self {
            row_count: rows.len(),
            columns,
            rows,
            elapsed,
            command_tag: None,
            source,
        }
    }

    pub fn with_command_tag(mut self, tag: impl Into<String>) -> Self {
        self.command_tag = Some(tag.into());
        self
    }

    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Status line for an executed query: the command tag, or `N rows (Xms)`
    pub fn summary(&self) -> String {
        match &self.command_tag {
            Some(tag) => tag.clone(),
            None => format!("{} rows ({}ms)", self.row_count, self.elapsed.as_millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_source() -> ResultSource {
        ResultSource::Query {
            connection: "dev".to_string(),
        }
    }

    #[test]
    fn new_pads_and_truncates_rows_to_column_count() {
        let result = QueryResult::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec!["1".to_string()],
                vec!["1".to_string(), "2".to_string(), "3".to_string()],
            ],
            Duration::ZERO,
            query_source(),
        );
        assert!(result.rows.iter().all(|r| r.len() == 2));
        assert_eq!(result.row_count, 2);
    }

    #[test]
    fn summary_prefers_command_tag() {
        let result = QueryResult::new(vec![], vec![], Duration::ZERO, query_source())
            .with_command_tag("3 rows affected");
        assert_eq!(result.summary(), "3 rows affected");
    }

    #[test]
    fn summary_reports_rows_and_elapsed() {
        let result = QueryResult::new(
            vec!["n".to_string()],
            vec![vec!["1".to_string()]],
            Duration::from_millis(12),
            query_source(),
        );
        assert_eq!(result.summary(), "1 rows (12ms)");
    }

    #[test]
    fn only_table_sources_are_tables() {
        let table = ResultSource::Table {
            connection: "dev".to_string(),
            schema: "public".to_string(),
            table: "users".to_string(),
        };
        assert!(table.is_table());
        assert!(!query_source().is_table());
        assert_eq!(table.connection(), "dev");
    }
}
