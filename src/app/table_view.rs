//! Result table state: row cursor, column window, paging and the
//! in-progress cell edit or row insert.

use crate::app::viewport::{self, ColumnWindow};
use crate::domain::{QueryResult, ResultSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    pub row: usize,
    pub column: usize,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInsert {
    pub values: Vec<String>,
    pub field: usize,
}

/// At most one change is composed at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Edit(PendingEdit),
    Insert(PendingInsert),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStep {
    Moved,
    /// Advanced past the last column: ready to submit.
    Complete,
}

/// One page load of a table. Completions for anything but the latest
/// request are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub connection: String,
    pub schema: String,
    pub table: String,
    pub offset: usize,
}

impl PageRequest {
    pub fn source(&self) -> ResultSource {
        ResultSource::Table {
            connection: self.connection.clone(),
            schema: self.schema.clone(),
            table: self.table.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableViewState {
    pub result: Option<QueryResult>,
    /// Latest page load still allowed to land.
    pub requested: Option<PageRequest>,
    pub cursor: usize,
    pub scroll: usize,
    pub col_offset: usize,
    pub page: usize,
    pub page_size: usize,
    pub pending: Option<PendingChange>,
    pub window: ColumnWindow,
    ideal_widths: Vec<u16>,
    viewport_width: u16,
    viewport_rows: usize,
}

impl TableViewState {
    pub fn table_source(&self) -> Option<(&str, &str, &str)> {
        match self.result.as_ref().map(|r| &r.source) {
            Some(ResultSource::Table {
                connection,
                schema,
                table,
            }) => Some((connection.as_str(), schema.as_str(), table.as_str())),
            _ => None,
        }
    }

    pub fn is_query_result(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|r| !r.source.is_table())
    }

    pub fn columns(&self) -> &[String] {
        self.result
            .as_ref()
            .map(|r| r.columns.as_slice())
            .unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        self.result
            .as_ref()
            .map(|r| r.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn selected_row(&self) -> Option<&Vec<String>> {
        self.rows().get(self.cursor)
    }

    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }

    pub fn is_awaited(&self, request: &PageRequest) -> bool {
        self.requested.as_ref() == Some(request)
    }

    pub fn visible_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Replaces the result set. Reloading the same source keeps the cursor
    /// and column offset (clamped); a different source starts over.
    pub fn set_result(&mut self, result: QueryResult) {
        let same_source = self
            .result
            .as_ref()
            .is_some_and(|current| current.source == result.source);
        if !same_source {
            self.cursor = 0;
            self.scroll = 0;
            self.col_offset = 0;
        }
        self.ideal_widths = viewport::ideal_column_widths(&result.columns, &result.rows);
        self.result = Some(result);
        self.cursor = self.cursor.min(self.row_count().saturating_sub(1));
        self.relayout();
    }

    /// Starts a fresh table source at page zero.
    pub fn reset_paging(&mut self, page_size: usize) {
        self.page = 0;
        self.page_size = page_size;
    }

    pub fn resize(&mut self, width: u16, rows: usize) {
        self.viewport_width = width;
        self.viewport_rows = rows;
        self.relayout();
    }

    fn relayout(&mut self) {
        self.col_offset = viewport::clamp_offset(self.ideal_widths.len(), self.col_offset);
        self.window = viewport::fit_columns(&self.ideal_widths, self.col_offset, self.viewport_width);
        self.keep_cursor_visible();
    }

    fn keep_cursor_visible(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.viewport_rows > 0 && self.cursor >= self.scroll + self.viewport_rows {
            self.scroll = self.cursor + 1 - self.viewport_rows;
        }
        let max_scroll = self.row_count().saturating_sub(self.viewport_rows.max(1));
        self.scroll = self.scroll.min(max_scroll);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.row_count().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.keep_cursor_visible();
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
        self.keep_cursor_visible();
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.row_count().saturating_sub(1);
        self.keep_cursor_visible();
    }

    pub fn half_page(&self) -> isize {
        (self.viewport_rows / 2).max(1) as isize
    }

    pub fn scroll_right(&mut self) {
        self.col_offset = viewport::next_column_offset(self.ideal_widths.len(), self.col_offset);
        self.relayout();
    }

    pub fn scroll_left(&mut self) {
        self.col_offset = viewport::prev_column_offset(self.col_offset);
        self.relayout();
    }

    fn reveal_column(&mut self, column: usize) {
        self.col_offset = viewport::offset_to_reveal(
            &self.ideal_widths,
            self.col_offset,
            self.viewport_width,
            column,
        );
        self.relayout();
    }

    /// A short page means there is nothing after it.
    pub fn has_next_page(&self) -> bool {
        self.page_size > 0 && self.row_count() >= self.page_size
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.page += 1;
        self.cursor = 0;
        self.scroll = 0;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        self.cursor = 0;
        self.scroll = 0;
        true
    }

    pub fn editing(&self) -> Option<&PendingEdit> {
        match &self.pending {
            Some(PendingChange::Edit(edit)) => Some(edit),
            _ => None,
        }
    }

    pub fn inserting(&self) -> Option<&PendingInsert> {
        match &self.pending {
            Some(PendingChange::Insert(insert)) => Some(insert),
            _ => None,
        }
    }

    /// Edits the first column of the cursor row.
    pub fn start_edit(&mut self) -> bool {
        let Some(value) = self.selected_row().and_then(|row| row.first()).cloned() else {
            return false;
        };
        self.pending = Some(PendingChange::Edit(PendingEdit {
            row: self.cursor,
            column: 0,
            value,
        }));
        self.reveal_column(0);
        true
    }

    /// Moves the edit to another column, wrapping at both ends. Unsaved
    /// text in the previous column is dropped.
    pub fn edit_step_column(&mut self, forward: bool) {
        let count = self.columns().len();
        let Some(PendingChange::Edit(edit)) = &self.pending else {
            return;
        };
        if count == 0 {
            return;
        }
        let column = if forward {
            (edit.column + 1) % count
        } else {
            (edit.column + count - 1) % count
        };
        let row = edit.row;
        let value = self
            .rows()
            .get(row)
            .and_then(|r| r.get(column))
            .cloned()
            .unwrap_or_default();
        self.pending = Some(PendingChange::Edit(PendingEdit { row, column, value }));
        self.reveal_column(column);
    }

    pub fn start_insert(&mut self) -> bool {
        let count = self.columns().len();
        if count == 0 {
            return false;
        }
        self.pending = Some(PendingChange::Insert(PendingInsert {
            values: vec![String::new(); count],
            field: 0,
        }));
        self.reveal_column(0);
        true
    }

    /// Linear fill: never wraps.
    pub fn insert_next_field(&mut self) -> InsertStep {
        let Some(PendingChange::Insert(insert)) = &mut self.pending else {
            return InsertStep::Complete;
        };
        if insert.field + 1 < insert.values.len() {
            insert.field += 1;
            let field = insert.field;
            self.reveal_column(field);
            InsertStep::Moved
        } else {
            InsertStep::Complete
        }
    }

    pub fn insert_prev_field(&mut self) {
        if let Some(PendingChange::Insert(insert)) = &mut self.pending {
            insert.field = insert.field.saturating_sub(1);
            let field = insert.field;
            self.reveal_column(field);
        }
    }

    fn pending_text(&mut self) -> Option<&mut String> {
        match &mut self.pending {
            Some(PendingChange::Edit(edit)) => Some(&mut edit.value),
            Some(PendingChange::Insert(insert)) => insert.values.get_mut(insert.field),
            None => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.pending_text() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.pending_text() {
            text.pop();
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// `rows a-b  page n  cols c-d/total`
    pub fn info_line(&self) -> String {
        let Some(result) = &self.result else {
            return String::new();
        };
        let rows = if result.rows.is_empty() {
            "no rows".to_string()
        } else {
            let first = self.offset() + 1;
            format!("rows {}-{}", first, first + result.rows.len() - 1)
        };
        let mut parts = vec![rows];
        if result.source.is_table() {
            parts.push(format!("page {}", self.page + 1));
        }
        if let (Some(first), Some(last)) = (self.window.first(), self.window.last()) {
            parts.push(format!(
                "cols {}-{}/{}",
                first + 1,
                last + 1,
                result.columns.len()
            ));
        }
        parts.join("  ")
    }
}
