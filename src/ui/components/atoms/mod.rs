mod key_chip;
mod panel_border;
mod spinner;

pub use key_chip::key_text;
pub use panel_border::panel_block;
pub use spinner::spinner_char;
