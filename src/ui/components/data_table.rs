use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::atoms::panel_block;
use super::text_utils::fit_cell;
use crate::app::screen::Panel;
use crate::app::state::AppState;
use crate::app::table_view::TableViewState;
use crate::domain::ResultSource;
use crate::ui::theme::Theme;

const SEPARATOR: &str = "│";

pub struct DataTable;

impl DataTable {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let table = &state.table;
        let focused = state.panel == Panel::Table;
        let block = panel_block(&Self::title(table), focused, focused && state.input_focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(result) = &table.result else {
            let hint = Paragraph::new(Line::styled(
                "Select a table from the sidebar",
                Style::default().fg(Theme::TEXT_MUTED),
            ));
            frame.render_widget(hint, inner);
            return;
        };

        let [header_area, body_area, info_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(Self::header_line(table)), header_area);

        let null_display = state.settings().null_display.as_str();
        let lines: Vec<Line> = result
            .rows
            .iter()
            .enumerate()
            .skip(table.scroll)
            .take(body_area.height as usize)
            .map(|(idx, row)| Self::row_line(table, idx, row, null_display))
            .collect();
        frame.render_widget(Paragraph::new(lines), body_area);

        frame.render_widget(
            Paragraph::new(Line::styled(
                Self::info_text(table),
                Style::default().fg(Theme::TEXT_SECONDARY),
            )),
            info_area,
        );
    }

    fn title(table: &TableViewState) -> String {
        match table.result.as_ref().map(|r| &r.source) {
            Some(ResultSource::Table { schema, table: name, .. }) => format!("{}.{}", schema, name),
            Some(ResultSource::Query { .. }) => "Query result".to_string(),
            None => "Data".to_string(),
        }
    }

    fn header_line(table: &TableViewState) -> Line<'static> {
        let columns = table.columns();
        let insert_field = table.inserting().map(|insert| insert.field);
        let mut spans = Vec::new();

        for (&col, &width) in table.window.indices.iter().zip(&table.window.widths) {
            let name = columns.get(col).map(String::as_str).unwrap_or("");
            let mut style = Style::default()
                .bg(Theme::TABLE_HEADER_BG)
                .add_modifier(Modifier::BOLD);
            if insert_field == Some(col) {
                style = style.fg(Theme::INPUT_BORDER);
            }
            spans.push(Span::styled(format!(" {} ", fit_cell(name, width as usize)), style));
            spans.push(Span::styled(SEPARATOR, Style::default().fg(Theme::TEXT_MUTED)));
        }
        Line::from(spans)
    }

    /// The cursor cell is the edited column while editing, else the
    /// leftmost visible one.
    fn row_line(
        table: &TableViewState,
        idx: usize,
        row: &[String],
        null_display: &str,
    ) -> Line<'static> {
        let is_cursor_row = idx == table.cursor;
        let edit = table.editing().filter(|edit| edit.row == idx);
        let cursor_col = edit.map(|e| e.column).or(table.window.first());

        let row_style = if is_cursor_row {
            Style::default().bg(Theme::CURSOR_ROW_BG)
        } else {
            Style::default()
        };

        let mut spans = Vec::new();
        for (&col, &width) in table.window.indices.iter().zip(&table.window.widths) {
            let value = match edit {
                Some(edit) if edit.column == col => edit.value.as_str(),
                _ => row.get(col).map(String::as_str).unwrap_or(""),
            };

            let mut style = row_style;
            if value == null_display && edit.is_none_or(|e| e.column != col) {
                style = style.fg(Theme::NULL_FG);
            }
            if is_cursor_row && cursor_col == Some(col) {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(format!(" {} ", fit_cell(value, width as usize)), style));
            spans.push(Span::styled(SEPARATOR, row_style.fg(Theme::TEXT_MUTED)));
        }
        Line::from(spans)
    }

    fn info_text(table: &TableViewState) -> String {
        let columns = table.columns();
        if let Some(insert) = table.inserting() {
            let name = columns.get(insert.field).map(String::as_str).unwrap_or("");
            let value = insert.values.get(insert.field).map(String::as_str).unwrap_or("");
            return format!(
                "insert {} ({}/{}): {}",
                name,
                insert.field + 1,
                insert.values.len(),
                value
            );
        }
        if let Some(edit) = table.editing() {
            let name = columns.get(edit.column).map(String::as_str).unwrap_or("");
            return format!("edit {}: {}", name, edit.value);
        }
        table.info_line()
    }
}
