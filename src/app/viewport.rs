//! Horizontal column windowing for result tables.
//!
//! Pure functions only: the table view re-derives its window from scratch
//! whenever the terminal size, the data, or the column offset changes.

use unicode_width::UnicodeWidthStr;

pub const MIN_COL_WIDTH: u16 = 4;
pub const MAX_COL_WIDTH: u16 = 40;
/// Left pad, right pad and the column separator.
pub const CELL_OVERHEAD: u16 = 3;
pub const WIDTH_SAMPLE_ROWS: usize = 50;

/// Display width of a cell as rendered on a single line.
pub fn cell_width(value: &str) -> usize {
    match value.find(['\n', '\r']) {
        Some(end) => value[..end].width() + 1,
        None => value.width(),
    }
}

/// Header width and the first `WIDTH_SAMPLE_ROWS` rows, clamped to
/// `MIN_COL_WIDTH..=MAX_COL_WIDTH`.
pub fn ideal_column_widths(columns: &[String], rows: &[Vec<String>]) -> Vec<u16> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let sampled = rows
                .iter()
                .take(WIDTH_SAMPLE_ROWS)
                .filter_map(|row| row.get(idx))
                .map(|cell| cell_width(cell))
                .max()
                .unwrap_or(0);
            let widest = sampled.max(header.width());
            widest.clamp(MIN_COL_WIDTH as usize, MAX_COL_WIDTH as usize) as u16
        })
        .collect()
}

/// The columns visible for a given offset, with their final widths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnWindow {
    pub offset: usize,
    pub indices: Vec<usize>,
    pub widths: Vec<u16>,
}

impl ColumnWindow {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    pub fn contains(&self, column: usize) -> bool {
        self.indices.contains(&column)
    }

    pub fn width_of(&self, column: usize) -> Option<u16> {
        self.indices
            .iter()
            .position(|&i| i == column)
            .map(|pos| self.widths[pos])
    }
}

pub fn clamp_offset(column_count: usize, offset: usize) -> usize {
    offset.min(column_count.saturating_sub(1))
}

/// Greedy left-to-right fit starting at `offset`.
///
/// Always yields at least one column when there are any, even if it alone
/// is wider than `available_width`. Leftover space is split evenly.
pub fn fit_columns(ideal_widths: &[u16], offset: usize, available_width: u16) -> ColumnWindow {
    if ideal_widths.is_empty() {
        return ColumnWindow::default();
    }

    let offset = clamp_offset(ideal_widths.len(), offset);
    let mut indices = Vec::new();
    let mut widths = Vec::new();
    let mut used: u32 = 0;

    for (i, &width) in ideal_widths.iter().enumerate().skip(offset) {
        let needed = u32::from(width) + u32::from(CELL_OVERHEAD);
        if used + needed > u32::from(available_width) && !indices.is_empty() {
            break;
        }
        used += needed;
        indices.push(i);
        widths.push(width);
    }

    let leftover = u32::from(available_width).saturating_sub(used);
    let extra = (leftover / indices.len() as u32) as u16;
    if extra > 0 {
        for width in &mut widths {
            *width += extra;
        }
    }

    ColumnWindow {
        offset,
        indices,
        widths,
    }
}

pub fn next_column_offset(column_count: usize, offset: usize) -> usize {
    if offset + 1 < column_count {
        offset + 1
    } else {
        offset
    }
}

pub fn prev_column_offset(offset: usize) -> usize {
    offset.saturating_sub(1)
}

/// Smallest change to `offset` that brings `target` into the window.
pub fn offset_to_reveal(
    ideal_widths: &[u16],
    offset: usize,
    available_width: u16,
    target: usize,
) -> usize {
    if target >= ideal_widths.len() {
        return clamp_offset(ideal_widths.len(), offset);
    }
    if target < offset {
        return target;
    }
    let mut offset = offset;
    while offset < target && !fit_columns(ideal_widths, offset, available_width).contains(target)
    {
        offset += 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    mod ideal_widths {
        use super::*;

        #[test]
        fn header_sets_the_floor() {
            let columns = strings(&["description"]);
            let rows = vec![strings(&["ab"])];
            assert_eq!(ideal_column_widths(&columns, &rows), vec![11]);
        }

        #[test]
        fn clamps_to_min_and_max() {
            let columns = strings(&["a", "b"]);
            let rows = vec![strings(&["x", &"y".repeat(200)])];
            assert_eq!(
                ideal_column_widths(&columns, &rows),
                vec![MIN_COL_WIDTH, MAX_COL_WIDTH]
            );
        }

        #[test]
        fn only_samples_leading_rows() {
            let columns = strings(&["c"]);
            let mut rows = vec![strings(&["12345"]); WIDTH_SAMPLE_ROWS];
            rows.push(strings(&["this one is far too late to count"]));
            assert_eq!(ideal_column_widths(&columns, &rows), vec![5]);
        }

        #[test]
        fn counts_wide_characters() {
            let columns = strings(&["n"]);
            let rows = vec![strings(&["日本語の名前"])];
            assert_eq!(ideal_column_widths(&columns, &rows), vec![12]);
        }

        #[test]
        fn multi_line_cell_measures_first_line() {
            assert_eq!(cell_width("abc\ndefghijk"), 4);
        }
    }

    mod fit {
        use super::*;

        #[test]
        fn empty_input_yields_empty_window() {
            assert!(fit_columns(&[], 0, 80).is_empty());
        }

        #[test]
        fn takes_columns_until_next_would_overflow() {
            // each column needs 10 + 3
            let window = fit_columns(&[10, 10, 10, 10], 0, 40);
            assert_eq!(window.indices, vec![0, 1, 2]);
        }

        #[test]
        fn distributes_leftover_evenly() {
            // 3 * 13 = 39 used, 1 left over: 1 / 3 == 0
            assert_eq!(fit_columns(&[10, 10, 10, 10], 0, 40).widths, vec![10, 10, 10]);
            // 2 * 13 = 26 used, 14 left over: 7 each
            assert_eq!(fit_columns(&[10, 10], 0, 40).widths, vec![17, 17]);
        }

        #[test]
        fn starts_at_offset() {
            let window = fit_columns(&[10, 10, 10, 10], 2, 40);
            assert_eq!(window.offset, 2);
            assert_eq!(window.indices, vec![2, 3]);
        }

        #[rstest]
        #[case(&[40], 10)]
        #[case(&[40, 4], 20)]
        #[case(&[4], 0)]
        fn always_shows_at_least_one_column(#[case] widths: &[u16], #[case] available: u16) {
            let window = fit_columns(widths, 0, available);
            assert_eq!(window.indices, vec![0]);
            assert_eq!(window.widths, vec![widths[0]]);
        }

        #[test]
        fn clamps_offset_past_the_end() {
            let window = fit_columns(&[10, 10], 9, 80);
            assert_eq!(window.offset, 1);
            assert_eq!(window.indices, vec![1]);
        }

        #[test]
        fn width_of_reports_final_width() {
            let window = fit_columns(&[10, 10], 0, 40);
            assert_eq!(window.width_of(1), Some(17));
            assert_eq!(window.width_of(5), None);
        }
    }

    mod scrolling {
        use super::*;

        #[rstest]
        #[case(5, 0, 1)]
        #[case(5, 3, 4)]
        #[case(5, 4, 4)]
        #[case(1, 0, 0)]
        #[case(0, 0, 0)]
        fn next_stops_at_last_column(
            #[case] count: usize,
            #[case] offset: usize,
            #[case] expected: usize,
        ) {
            assert_eq!(next_column_offset(count, offset), expected);
        }

        #[rstest]
        #[case(0, 0)]
        #[case(1, 0)]
        #[case(4, 3)]
        fn prev_never_goes_negative(#[case] offset: usize, #[case] expected: usize) {
            assert_eq!(prev_column_offset(offset), expected);
        }

        #[test]
        fn reveal_moves_left_to_target() {
            assert_eq!(offset_to_reveal(&[10; 6], 4, 40, 1), 1);
        }

        #[test]
        fn reveal_moves_right_just_enough() {
            // window of 3 columns: target 4 needs offset 2
            assert_eq!(offset_to_reveal(&[10; 6], 0, 40, 4), 2);
        }

        #[test]
        fn reveal_keeps_offset_when_visible() {
            assert_eq!(offset_to_reveal(&[10; 6], 1, 40, 2), 1);
        }
    }
}
