pub mod config_store;
pub mod connection_manager;
pub mod db_error;
pub mod metadata;
pub mod query_executor;
pub mod renderer;

pub use config_store::{ConfigError, ConfigStore};
pub use connection_manager::ConnectionManager;
pub use db_error::DbError;
pub use metadata::MetadataProvider;
pub use query_executor::QueryExecutor;
pub use renderer::Renderer;
