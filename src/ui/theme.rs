use ratatui::style::Color;

/// Application color theme constants
pub struct Theme;

impl Theme {
    pub const FOCUS_BORDER: Color = Color::Cyan;
    pub const UNFOCUS_BORDER: Color = Color::DarkGray;
    pub const INPUT_BORDER: Color = Color::Yellow;

    pub const TEXT_PRIMARY: Color = Color::White;
    pub const TEXT_SECONDARY: Color = Color::Gray;
    pub const TEXT_MUTED: Color = Color::DarkGray;
    pub const TEXT_ACCENT: Color = Color::Cyan;

    pub const STATUS_ERROR: Color = Color::Red;
    pub const STATUS_SUCCESS: Color = Color::Green;
    pub const STATUS_LOADING: Color = Color::Yellow;

    pub const CONNECTED: Color = Color::Green;
    pub const READONLY: Color = Color::Magenta;

    pub const MODAL_BG: Color = Color::Rgb(0x15, 0x19, 0x26);
    pub const TABLE_HEADER_BG: Color = Color::Rgb(0x2a, 0x2a, 0x2e);
    pub const CURSOR_ROW_BG: Color = Color::Rgb(0x31, 0x32, 0x44);
    pub const NULL_FG: Color = Color::DarkGray;
}
