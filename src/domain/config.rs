use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::connection::{ConnectionProfile, DEFAULT_PORT};

pub const DEFAULT_LIMIT: usize = 100;
pub const DEFAULT_TAB_SIZE: usize = 4;
pub const DEFAULT_NULL_DISPLAY: &str = "NULL";

/// User-tunable behavior. Numbers are kept signed so that a zero or negative
/// value in the file falls back to the default instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_limit: i64,
    pub confirm_destructive: bool,
    pub editor_tab_size: i64,
    pub null_display: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT as i64,
            confirm_destructive: true,
            editor_tab_size: DEFAULT_TAB_SIZE as i64,
            null_display: DEFAULT_NULL_DISPLAY.to_string(),
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        if self.default_limit <= 0 {
            self.default_limit = DEFAULT_LIMIT as i64;
        }
        if self.editor_tab_size <= 0 {
            self.editor_tab_size = DEFAULT_TAB_SIZE as i64;
        }
        if self.null_display.is_empty() {
            self.null_display = DEFAULT_NULL_DISPLAY.to_string();
        }
    }

    pub fn page_size(&self) -> usize {
        usize::try_from(self.default_limit)
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }

    pub fn tab_size(&self) -> usize {
        usize::try_from(self.editor_tab_size)
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_TAB_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("connection[{index}] must have a name")]
    MissingName { index: usize },
    #[error("duplicate connection name \"{0}\"")]
    DuplicateName(String),
    #[error("connection \"{0}\" must have either url or host")]
    MissingTarget(String),
}

/// The whole persisted document: `[[connections]]` plus `[settings]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub connections: Vec<ConnectionProfile>,
    pub settings: Settings,
}

impl ConfigFile {
    pub fn normalize(&mut self) {
        self.settings.normalize();
        for conn in &mut self.connections {
            if conn.port == 0 {
                conn.port = DEFAULT_PORT;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut seen = HashSet::new();
        for (index, conn) in self.connections.iter().enumerate() {
            if conn.name.trim().is_empty() {
                return Err(ConfigValidationError::MissingName { index });
            }
            if !seen.insert(conn.name.as_str()) {
                return Err(ConfigValidationError::DuplicateName(conn.name.clone()));
            }
            if !conn.has_target() {
                return Err(ConfigValidationError::MissingTarget(conn.name.clone()));
            }
        }
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&ConnectionProfile> {
        self.connections.iter().find(|c| c.name == name)
    }
}
