use std::time::Instant;

use crate::app::confirm::ConfirmRequest;
use crate::app::connection_form::ConnectionForm;
use crate::app::editor::EditorState;
use crate::app::layout::{BrowseLayout, compute_browse_layout};
use crate::app::message_state::MessageState;
use crate::app::pk_cache::PrimaryKeyCache;
use crate::app::screen::{Panel, Screen};
use crate::app::sidebar::SidebarState;
use crate::app::table_view::TableViewState;
use crate::domain::{ConfigFile, ConnectionProfile, ResultSource, Settings};

pub const APP_NAME: &str = "ezpg";

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub selected: usize,
    pub form: Option<ConnectionForm>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub panel: Panel,
    /// Keystrokes are text input rather than navigation.
    pub input_focused: bool,
    pub editor_visible: bool,
    pub confirm: Option<ConfirmRequest>,

    pub config: ConfigFile,
    pub home: HomeState,
    pub sidebar: SidebarState,
    pub table: TableViewState,
    pub editor: EditorState,
    pub pk_cache: PrimaryKeyCache,
    pub messages: MessageState,
    pub active_connection: Option<String>,

    pub terminal_width: u16,
    pub terminal_height: u16,
    pub render_dirty: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: ConfigFile) -> Self {
        let mut state = Self {
            screen: Screen::Home,
            panel: Panel::Sidebar,
            input_focused: false,
            editor_visible: false,
            confirm: None,
            config,
            home: HomeState::default(),
            sidebar: SidebarState::default(),
            table: TableViewState::default(),
            editor: EditorState::default(),
            pk_cache: PrimaryKeyCache::default(),
            messages: MessageState::default(),
            active_connection: None,
            terminal_width: 80,
            terminal_height: 24,
            render_dirty: true,
            should_quit: false,
        };
        state.sync_connections();
        state
    }

    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    /// Re-derives the sidebar nodes and the home cursor from the config.
    pub fn sync_connections(&mut self) {
        self.sidebar
            .sync_connections(self.config.connections.iter().map(|c| c.name.as_str()));
        let len = self.config.connections.len();
        self.home.selected = self.home.selected.min(len.saturating_sub(1));
    }

    pub fn selected_profile(&self) -> Option<&ConnectionProfile> {
        self.config.connections.get(self.home.selected)
    }

    pub fn is_readonly(&self, connection: &str) -> bool {
        self.config.find(connection).is_some_and(|p| p.readonly)
    }

    pub fn browse_layout(&self) -> BrowseLayout {
        compute_browse_layout(self.terminal_width, self.terminal_height, self.editor_visible)
    }

    /// Feeds the current table panel size into the column window.
    pub fn sync_table_viewport(&mut self) {
        let layout = self.browse_layout();
        self.table
            .resize(layout.table_inner_width(), layout.table_visible_rows());
    }

    /// `connection > schema.table`, `connection > query`, or the app name.
    pub fn status_context(&self) -> String {
        match self.table.result.as_ref().map(|r| &r.source) {
            Some(ResultSource::Table {
                connection,
                schema,
                table,
            }) => format!("{} > {}.{}", connection, schema, table),
            Some(ResultSource::Query { connection }) => format!("{} > query", connection),
            None => match &self.active_connection {
                Some(name) => name.clone(),
                None => APP_NAME.to_string(),
            },
        }
    }

    pub fn mark_dirty(&mut self) {
        self.render_dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.render_dirty = false;
    }

    pub fn clear_expired_timers(&mut self, now: Instant) {
        self.messages.clear_expired_at(now);
    }
}
