use std::fs;
use std::path::{Path, PathBuf};

use crate::app::ports::config_store::{ConfigError, ConfigStore};
use crate::domain::ConfigFile;

const CONFIG_DIR_NAME: &str = "ezpg";
const CONFIG_FILE_NAME: &str = "config.toml";

pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    /// Uses `path` when given, else `<config dir>/ezpg/config.toml`.
    pub fn new(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path,
            None => default_config_path()?,
        };
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<ConfigFile, ConfigError> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        let mut config: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        config.normalize();
        config.validate().map_err(|source| ConfigError::Invalid {
            path: self.path.clone(),
            source,
        })?;

        Ok(config)
    }

    fn save(&self, config: &ConfigFile) -> Result<(), ConfigError> {
        let write_error = |message: String| ConfigError::Write {
            path: self.path.clone(),
            message,
        };

        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
            && !dir.exists()
        {
            fs::create_dir_all(dir).map_err(|e| write_error(e.to_string()))?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| write_error(e.to_string()))?;
        let content_with_header = format!(
            "# ezpg configuration\n# WARNING: Passwords are stored in plain text\n\n{}",
            content
        );

        fs::write(&self.path, content_with_header).map_err(|e| write_error(e.to_string()))?;
        set_file_permissions(&self.path).map_err(|e| write_error(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }
}

fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
