pub mod column;
pub mod config;
pub mod connection;
pub mod query_result;
pub mod table;

pub use column::ColumnInfo;
pub use config::{ConfigFile, ConfigValidationError, Settings};
pub use connection::{ConnectionProfile, SslMode};
pub use query_result::{QueryResult, ResultSource};
pub use table::TableInfo;
