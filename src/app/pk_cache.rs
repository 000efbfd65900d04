use std::collections::HashMap;

/// Primary key columns per `"schema.table"`, kept separately per connection.
///
/// Entries are never evicted during a session; reconnecting drops the
/// connection's entries.
#[derive(Debug, Clone, Default)]
pub struct PrimaryKeyCache {
    entries: HashMap<String, HashMap<String, Vec<String>>>,
}

impl PrimaryKeyCache {
    fn key(schema: &str, table: &str) -> String {
        format!("{}.{}", schema, table)
    }

    pub fn insert(&mut self, connection: &str, schema: &str, table: &str, keys: Vec<String>) {
        self.entries
            .entry(connection.to_string())
            .or_default()
            .insert(Self::key(schema, table), keys);
    }

    pub fn get(&self, connection: &str, schema: &str, table: &str) -> Option<&[String]> {
        self.entries
            .get(connection)
            .and_then(|tables| tables.get(&Self::key(schema, table)))
            .map(Vec::as_slice)
    }

    pub fn contains(&self, connection: &str, schema: &str, table: &str) -> bool {
        self.get(connection, schema, table).is_some()
    }

    /// Cached keys, or empty when nothing is known (full-row match).
    pub fn keys_or_empty(&self, connection: &str, schema: &str, table: &str) -> &[String] {
        self.get(connection, schema, table).unwrap_or(&[])
    }

    pub fn invalidate_connection(&mut self, connection: &str) {
        self.entries.remove(connection);
    }
}
