//! Key hints shown in the status bar, one table per input context.

#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub key: &'static str,
    pub desc: &'static str,
}

impl KeyBinding {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }

    pub const fn as_hint(&self) -> (&'static str, &'static str) {
        (self.key, self.desc)
    }
}

pub const HOME_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Enter", "Connect"),
    KeyBinding::new("c", "New"),
    KeyBinding::new("e", "Edit"),
    KeyBinding::new("d", "Delete"),
    KeyBinding::new("j/k", "Move"),
    KeyBinding::new("q", "Quit"),
];

pub const FORM_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Tab/S-Tab", "Field"),
    KeyBinding::new("Enter", "Save"),
    KeyBinding::new("Esc", "Cancel"),
];

pub const CONFIRM_KEYS: &[KeyBinding] = &[
    KeyBinding::new("y", "Confirm"),
    KeyBinding::new("n/Esc", "Cancel"),
];

pub const SIDEBAR_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Enter", "Open"),
    KeyBinding::new("x", "Disconnect"),
    KeyBinding::new("/", "Filter"),
    KeyBinding::new("e", "Editor"),
    KeyBinding::new("Tab", "Panel"),
    KeyBinding::new("q", "Home"),
];

pub const FILTER_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Enter", "Apply"),
    KeyBinding::new("Esc", "Clear"),
];

pub const TABLE_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Enter", "Edit"),
    KeyBinding::new("o", "Insert"),
    KeyBinding::new("d", "Delete"),
    KeyBinding::new("h/l", "Columns"),
    KeyBinding::new("n/p", "Page"),
    KeyBinding::new("Tab", "Panel"),
    KeyBinding::new("q", "Home"),
];

pub const CELL_EDIT_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Enter", "Save"),
    KeyBinding::new("Tab/S-Tab", "Column"),
    KeyBinding::new("Esc", "Cancel"),
];

pub const INSERT_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Enter", "Next/Save"),
    KeyBinding::new("Tab/S-Tab", "Field"),
    KeyBinding::new("Esc", "Cancel"),
];

pub const EDITOR_KEYS: &[KeyBinding] = &[
    KeyBinding::new("Enter", "Type"),
    KeyBinding::new("^E", "Run"),
    KeyBinding::new("e", "Hide"),
    KeyBinding::new("Tab", "Panel"),
    KeyBinding::new("q", "Home"),
];

pub const EDITOR_INPUT_KEYS: &[KeyBinding] = &[
    KeyBinding::new("^E", "Run"),
    KeyBinding::new("^P/^N", "History"),
    KeyBinding::new("Esc", "Done"),
];
