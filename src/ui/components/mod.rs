pub mod atoms;
pub mod confirm_prompt;
pub mod connection_form;
pub mod data_table;
pub mod editor;
pub mod home;
pub mod layout;
pub mod molecules;
pub mod overlay;
pub mod sidebar;
pub mod status_bar;
pub mod text_utils;
