use async_trait::async_trait;

use crate::app::mutation::MutationQuery;
use crate::domain::QueryResult;

use super::DbError;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute_preview(
        &self,
        connection: &str,
        schema: &str,
        table: &str,
        limit: usize,
        offset: usize,
    ) -> Result<QueryResult, DbError>;

    /// Free-form SQL, passed through unmodified.
    async fn execute_adhoc(&self, connection: &str, sql: &str) -> Result<QueryResult, DbError>;

    /// Returns the number of affected rows.
    async fn execute_write(&self, connection: &str, query: &MutationQuery) -> Result<u64, DbError>;
}
