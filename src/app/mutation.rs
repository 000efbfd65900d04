//! SQL synthesis for row mutations and table paging.
//!
//! Identifiers are always quoted and values always travel as bound
//! parameters (`$1`, `$2`, ...). The only value that is ever spelled out in
//! the statement text is `NULL`, when a cell matches the null sentinel.

use std::fmt::Write as _;

/// Quote identifier (PostgreSQL style): doubles embedded quotes and wraps in quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

pub fn select_page_sql(schema: &str, table: &str, limit: usize, offset: usize) -> String {
    format!(
        "SELECT * FROM {} LIMIT {} OFFSET {}",
        qualified_table(schema, table),
        limit,
        offset
    )
}

/// A statement plus its positional arguments, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationQuery {
    pub sql: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error("no values provided")]
    NoValues,
    #[error("row has {row} values but table has {columns} columns")]
    RowShape { row: usize, columns: usize },
    #[error("column index {0} out of range")]
    ColumnOutOfRange(usize),
}

/// The table a mutation applies to, with everything needed to identify a row.
#[derive(Debug, Clone, Copy)]
pub struct TableTarget<'a> {
    pub schema: &'a str,
    pub table: &'a str,
    pub columns: &'a [String],
    /// Cached primary key columns; empty means "match on every column".
    pub primary_keys: &'a [String],
    pub null_display: &'a str,
}

impl TableTarget<'_> {
    fn qualified(&self) -> String {
        qualified_table(self.schema, self.table)
    }

    fn check_row(&self, row: &[String]) -> Result<(), MutationError> {
        if row.len() == self.columns.len() {
            Ok(())
        } else {
            Err(MutationError::RowShape {
                row: row.len(),
                columns: self.columns.len(),
            })
        }
    }

    /// Column indexes used to identify a row. Key columns missing from the
    /// result are skipped; with none left, every column is matched.
    fn identification_columns(&self) -> Vec<usize> {
        let keys: Vec<usize> = self
            .primary_keys
            .iter()
            .filter_map(|pk| self.columns.iter().position(|c| c == pk))
            .collect();
        if keys.is_empty() {
            (0..self.columns.len()).collect()
        } else {
            keys
        }
    }

    /// Builds the WHERE predicate for `row`, appending bound values to `args`.
    fn predicate(&self, row: &[String], args: &mut Vec<String>) -> String {
        let mut clauses = Vec::new();
        for idx in self.identification_columns() {
            let column = quote_ident(&self.columns[idx]);
            let value = &row[idx];
            if value == self.null_display {
                clauses.push(format!("{} IS NULL", column));
            } else {
                args.push(value.clone());
                clauses.push(format!("{} = ${}", column, args.len()));
            }
        }
        clauses.join(" AND ")
    }

    /// Deletes at most one physical row, even when the predicate matches duplicates.
    pub fn delete(&self, row: &[String]) -> Result<MutationQuery, MutationError> {
        self.check_row(row)?;
        let mut args = Vec::new();
        let predicate = self.predicate(row, &mut args);
        let table = self.qualified();
        Ok(MutationQuery {
            sql: format!(
                "DELETE FROM {table} WHERE ctid = (SELECT ctid FROM {table} WHERE {predicate} LIMIT 1)"
            ),
            args,
        })
    }

    /// Sets one column. The predicate uses the row as it was before the edit.
    pub fn update(
        &self,
        row: &[String],
        column_index: usize,
        new_value: &str,
    ) -> Result<MutationQuery, MutationError> {
        self.check_row(row)?;
        let column = self
            .columns
            .get(column_index)
            .ok_or(MutationError::ColumnOutOfRange(column_index))?;

        let mut args = Vec::new();
        let value_expr = if new_value == self.null_display {
            "NULL".to_string()
        } else {
            args.push(new_value.to_string());
            "$1".to_string()
        };
        let predicate = self.predicate(row, &mut args);

        Ok(MutationQuery {
            sql: format!(
                "UPDATE {} SET {} = {} WHERE {}",
                self.qualified(),
                quote_ident(column),
                value_expr,
                predicate
            ),
            args,
        })
    }

    /// Empty and null-sentinel values are left out so column defaults apply.
    pub fn insert(&self, values: &[String]) -> Result<MutationQuery, MutationError> {
        self.check_row(values)?;
        let mut names = Vec::new();
        let mut placeholders = String::new();
        let mut args = Vec::new();

        for (column, value) in self.columns.iter().zip(values) {
            if value.is_empty() || value == self.null_display {
                continue;
            }
            args.push(value.clone());
            names.push(quote_ident(column));
            if !placeholders.is_empty() {
                placeholders.push_str(", ");
            }
            let _ = write!(placeholders, "${}", args.len());
        }

        if args.is_empty() {
            return Err(MutationError::NoValues);
        }

        Ok(MutationQuery {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.qualified(),
                names.join(", "),
                placeholders
            ),
            args,
        })
    }
}
