use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::viewport::cell_width;

const ELLIPSIS: char = '…';

/// First line of `value`, cut to `width` display columns with a trailing
/// ellipsis when it does not fit, then right-padded to exactly `width`.
/// Multi-line values always end in the ellipsis.
pub fn fit_cell(value: &str, width: usize) -> String {
    let line = match value.find(['\n', '\r']) {
        Some(end) => &value[..end],
        None => value,
    };
    let multiline = line.len() < value.len();

    let mut out = String::new();
    let mut used = 0;
    if cell_width(value) > width {
        let budget = width.saturating_sub(1);
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            out.push(c);
            used += w;
        }
        if width > 0 {
            out.push(ELLIPSIS);
            used += 1;
        }
    } else {
        out.push_str(line);
        used = line.width();
        if multiline {
            out.push(ELLIPSIS);
            used += 1;
        }
    }

    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
