use async_trait::async_trait;

use crate::domain::{ColumnInfo, TableInfo};

use super::DbError;

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// User tables, ordered by schema then name.
    async fn list_tables(&self, connection: &str) -> Result<Vec<TableInfo>, DbError>;

    /// Columns in ordinal order, with primary key membership.
    async fn list_columns(
        &self,
        connection: &str,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnInfo>, DbError>;
}
