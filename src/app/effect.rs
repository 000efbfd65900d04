//! Side effects returned by the reducer, executed by EffectRunner.

use std::time::Duration;

use crate::app::action::{Action, PendingMutation};
use crate::domain::{ConfigFile, ConnectionProfile};

/// Metadata and row mutations
pub const SHORT_TIMEOUT: Duration = Duration::from_secs(10);
/// Table pages and free-form queries
pub const LONG_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render,

    Connect {
        name: String,
    },
    Disconnect {
        name: String,
    },
    LoadTables {
        name: String,
    },
    LoadColumns {
        connection: String,
        schema: String,
        table: String,
    },
    LoadTableData {
        connection: String,
        schema: String,
        table: String,
        limit: usize,
        offset: usize,
    },
    ExecuteQuery {
        connection: String,
        sql: String,
    },
    Mutate(PendingMutation),

    RegisterConnection(ConnectionProfile),
    UpdateConnection {
        old_name: String,
        profile: ConnectionProfile,
    },
    RemoveConnection {
        name: String,
    },
    SaveConfig {
        config: Box<ConfigFile>,
        notice: String,
    },
    CloseAll,

    /// Ensures ordering: e.g., UpdateConnection must finish before SaveConfig
    Sequence(Vec<Effect>),
    DispatchActions(Vec<Action>),
}

impl Effect {
    /// Deadline for effects that talk to the database.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Effect::Connect { .. }
            | Effect::LoadTables { .. }
            | Effect::LoadColumns { .. }
            | Effect::Mutate(_) => Some(SHORT_TIMEOUT),
            Effect::LoadTableData { .. } | Effect::ExecuteQuery { .. } => Some(LONG_TIMEOUT),
            _ => None,
        }
    }
}
