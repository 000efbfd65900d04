use async_trait::async_trait;

use crate::domain::ConnectionProfile;

use super::DbError;

/// Owns the live connection handles, at most one per profile name.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    /// Idempotent: connecting an already connected name succeeds without
    /// opening a second handle.
    async fn connect(&self, name: &str) -> Result<(), DbError>;

    async fn disconnect(&self, name: &str) -> Result<(), DbError>;

    async fn register(&self, profile: ConnectionProfile);

    /// Closes the handle of `old_name` before re-keying the profile.
    async fn update(&self, old_name: &str, profile: ConnectionProfile);

    async fn remove(&self, name: &str);

    async fn close_all(&self);
}
