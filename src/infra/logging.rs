//! File logging. The terminal belongs to the TUI, so records go to
//! `<cache dir>/ezpg/ezpg.log` instead of stderr.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

const LOG_DIR_NAME: &str = "ezpg";
const LOG_FILE_NAME: &str = "ezpg.log";

pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// `RUST_LOG` overrides the default `info` filter. Logging stays off when
/// the file cannot be opened.
pub fn init(path: Option<&Path>) -> Option<PathBuf> {
    let path = path.map(Path::to_path_buf).or_else(default_log_path)?;
    let file = open_log_file(&path).ok()?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .ok()?;
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_log_file_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join(LOG_FILE_NAME);

        open_log_file(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        assert!(open_log_file(&blocker.join(LOG_FILE_NAME)).is_err());
    }
}
