/// Context line + key hints
pub const STATUS_ROWS: u16 = 2;
pub const MAX_SIDEBAR_WIDTH: u16 = 30;
/// Top and bottom (or left and right) border
pub const BORDER: u16 = 2;
/// Header row + info line inside the table panel
pub const TABLE_CHROME_ROWS: u16 = 2;

/// Sizes of the Browse screen, shared by the reducer and the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowseLayout {
    pub sidebar_width: u16,
    pub main_width: u16,
    pub table_height: u16,
    pub editor_height: u16,
}

impl BrowseLayout {
    /// Width available to table cells, inside the borders.
    pub fn table_inner_width(&self) -> u16 {
        self.main_width.saturating_sub(BORDER)
    }

    /// Data rows that fit under the header.
    pub fn table_visible_rows(&self) -> usize {
        self.table_height
            .saturating_sub(BORDER + TABLE_CHROME_ROWS)
            .into()
    }
}

pub fn compute_browse_layout(width: u16, height: u16, editor_visible: bool) -> BrowseLayout {
    let sidebar_width = MAX_SIDEBAR_WIDTH.min(width / 3);
    let main_width = width.saturating_sub(sidebar_width);
    let available = height.saturating_sub(STATUS_ROWS);

    let editor_height = if editor_visible { available / 3 } else { 0 };

    BrowseLayout {
        sidebar_width,
        main_width,
        table_height: available - editor_height,
        editor_height,
    }
}
