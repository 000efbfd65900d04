pub mod action;
pub mod confirm;
pub mod connection_form;
pub mod editor;
pub mod effect;
pub mod effect_runner;
pub mod keybindings;
pub mod layout;
pub mod message_state;
pub mod mutation;
pub mod pk_cache;
pub mod ports;
pub mod reducer;
pub mod reducers;
pub mod render_schedule;
pub mod screen;
pub mod sidebar;
pub mod state;
pub mod table_view;
pub mod viewport;
