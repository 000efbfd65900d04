pub mod config_store;
pub mod postgres;

pub use config_store::TomlConfigStore;
pub use postgres::PostgresAdapter;
