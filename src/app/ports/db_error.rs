use std::time::Duration;

/// Failures of any database-facing port. Rendered to a string once it
/// reaches the reducer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbError {
    #[error("unknown connection \"{0}\"")]
    UnknownConnection(String),
    #[error("not connected to \"{0}\"")]
    NotConnected(String),
    #[error("{name}: {message}")]
    ConnectionFailed { name: String, message: String },
    #[error("{0}")]
    QueryFailed(String),
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_as_status_text() {
        assert_eq!(
            DbError::NotConnected("dev".to_string()).to_string(),
            "not connected to \"dev\""
        );
        assert_eq!(
            DbError::Timeout(Duration::from_secs(30)).to_string(),
            "timed out after 30s"
        );
    }
}
