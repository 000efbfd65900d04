//! Free-form SQL editor buffer and its execution history.

use std::collections::VecDeque;

use crate::app::reducers::helpers::{char_count, char_to_byte_index};

pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Executed queries, oldest first. `position` is `None` while the user is
/// not walking the history.
#[derive(Debug, Clone, Default)]
pub struct QueryHistory {
    entries: VecDeque<String>,
    position: Option<usize>,
}

impl QueryHistory {
    /// Consecutive duplicates collapse into one entry.
    pub fn push(&mut self, query: String) {
        self.position = None;
        if self.entries.back() == Some(&query) {
            return;
        }
        if self.entries.len() == MAX_HISTORY {
            self.entries.pop_front();
        }
        self.entries.push_back(query);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn older(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = match self.position {
            None => self.entries.len() - 1,
            Some(idx) => idx.saturating_sub(1),
        };
        self.position = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    /// `Some("")` once the walk steps past the newest entry.
    pub fn newer(&mut self) -> Option<&str> {
        let idx = self.position?;
        if idx + 1 >= self.entries.len() {
            self.position = None;
            return Some("");
        }
        self.position = Some(idx + 1);
        self.entries.get(idx + 1).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub content: String,
    /// Char index into `content`.
    pub cursor: usize,
    pub history: QueryHistory,
}

impl EditorState {
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cursor = char_count(&self.content);
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = char_to_byte_index(&self.content, self.cursor);
        self.content.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let byte_idx = char_to_byte_index(&self.content, self.cursor);
        self.content.insert_str(byte_idx, s);
        self.cursor += char_count(s);
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = char_to_byte_index(&self.content, self.cursor);
            self.content.remove(byte_idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < char_count(&self.content) {
            let byte_idx = char_to_byte_index(&self.content, self.cursor);
            self.content.remove(byte_idx);
        }
    }

    /// (start char index, char length) of every line
    fn line_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = 0;
        for line in self.content.split('\n') {
            let len = line.chars().count();
            spans.push((start, len));
            start += len + 1;
        }
        spans
    }

    /// Zero-based (line, column) of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        for (i, (start, len)) in self.line_spans().iter().enumerate() {
            if self.cursor >= *start && self.cursor <= start + len {
                return (i, self.cursor - start);
            }
        }
        (0, self.cursor)
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let lines = self.line_spans();
        let total = char_count(&self.content);
        let (line, col) = self.cursor_position();

        self.cursor = match movement {
            CursorMove::Left => self.cursor.saturating_sub(1),
            CursorMove::Right => (self.cursor + 1).min(total),
            CursorMove::Home => lines.get(line).map_or(0, |(s, _)| *s),
            CursorMove::End => lines.get(line).map_or(total, |(s, l)| s + l),
            CursorMove::Up => match line.checked_sub(1).and_then(|l| lines.get(l)) {
                Some((start, len)) => start + col.min(*len),
                None => self.cursor,
            },
            CursorMove::Down => match lines.get(line + 1) {
                Some((start, len)) => start + col.min(*len),
                None => self.cursor,
            },
        };
    }

    pub fn history_prev(&mut self) {
        if let Some(query) = self.history.older().map(str::to_string) {
            self.set_content(&query);
        }
    }

    pub fn history_next(&mut self) {
        if let Some(query) = self.history.newer().map(str::to_string) {
            self.set_content(&query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn editor(content: &str, cursor: usize) -> EditorState {
        EditorState {
            content: content.to_string(),
            cursor,
            ..Default::default()
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn insert_char_at_cursor() {
            let mut e = editor("SELCT", 3);
            e.insert_char('E');
            assert_eq!(e.content, "SELECT");
            assert_eq!(e.cursor, 4);
        }

        #[test]
        fn backspace_at_start_is_noop() {
            let mut e = editor("abc", 0);
            e.backspace();
            assert_eq!(e.content, "abc");
        }

        #[test]
        fn delete_removes_char_under_cursor() {
            let mut e = editor("abc", 1);
            e.delete();
            assert_eq!(e.content, "ac");
            assert_eq!(e.cursor, 1);
        }

        #[test]
        fn handles_multibyte_chars() {
            let mut e = editor("日本", 1);
            e.insert_char('x');
            e.backspace();
            e.backspace();
            assert_eq!(e.content, "本");
            assert_eq!(e.cursor, 0);
        }

        #[test]
        fn insert_str_advances_by_chars() {
            let mut e = editor("", 0);
            e.insert_str("    ");
            assert_eq!(e.cursor, 4);
        }
    }

    mod cursor {
        use super::*;

        #[rstest]
        #[case(CursorMove::Left, 5, 4)]
        #[case(CursorMove::Right, 9, 9)]
        #[case(CursorMove::Home, 6, 4)]
        #[case(CursorMove::End, 5, 9)]
        #[case(CursorMove::Up, 6, 2)]
        #[case(CursorMove::Up, 1, 1)]
        #[case(CursorMove::Down, 2, 6)]
        #[case(CursorMove::Down, 7, 7)]
        fn moves_within_lines(
            #[case] movement: CursorMove,
            #[case] from: usize,
            #[case] expected: usize,
        ) {
            // "abc" spans 0..=3, "defgh" spans 4..=9
            let mut e = editor("abc\ndefgh", from);
            e.move_cursor(movement);
            assert_eq!(e.cursor, expected);
        }

        #[test]
        fn up_clamps_to_shorter_line() {
            let mut e = editor("ab\ncdefg", 8);
            e.move_cursor(CursorMove::Up);
            assert_eq!(e.cursor, 2);
        }

        #[test]
        fn cursor_position_reports_line_and_column() {
            assert_eq!(editor("abc\ndefgh", 6).cursor_position(), (1, 2));
        }
    }

    mod history {
        use super::*;

        #[test]
        fn skips_consecutive_duplicates() {
            let mut h = QueryHistory::default();
            h.push("a".to_string());
            h.push("a".to_string());
            h.push("b".to_string());
            h.push("a".to_string());
            assert_eq!(h.len(), 3);
        }

        #[test]
        fn keeps_at_most_max_entries() {
            let mut h = QueryHistory::default();
            for i in 0..(MAX_HISTORY + 5) {
                h.push(format!("q{i}"));
            }
            assert_eq!(h.len(), MAX_HISTORY);
            assert_eq!(h.older(), Some("q104"));
        }

        #[test]
        fn walks_back_and_forward() {
            let mut e = EditorState::default();
            e.history.push("first".to_string());
            e.history.push("second".to_string());

            e.history_prev();
            assert_eq!(e.content, "second");
            e.history_prev();
            assert_eq!(e.content, "first");
            e.history_prev();
            assert_eq!(e.content, "first");
            e.history_next();
            assert_eq!(e.content, "second");
            assert_eq!(e.cursor, 6);
        }

        #[test]
        fn next_past_newest_clears_buffer() {
            let mut e = EditorState::default();
            e.history.push("only".to_string());
            e.history_prev();
            e.history_next();
            assert_eq!(e.content, "");
            assert_eq!(e.cursor, 0);
        }

        #[test]
        fn next_without_walking_keeps_buffer() {
            let mut e = editor("draft", 5);
            e.history.push("old".to_string());
            e.history_next();
            assert_eq!(e.content, "draft");
        }
    }
}
