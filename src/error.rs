use thiserror::Error;

/// Failure reported by an [`crate::source::ActivitySource`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no activity is tracked for account {0}")]
    UnknownAccount(String),
    #[error("activity source unavailable: {0}")]
    Unavailable(String),
    #[error("IO error reading activity: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed activity data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("could not load activity for {handle}: {source}")]
    Upstream {
        handle: String,
        #[source]
        source: FetchError,
    },
    // Deliberately generic: the underlying error stays reachable through
    // `source()` for logs but is never shown to callers.
    #[error("failed to serialize heatmap output")]
    Serialization(#[from] serde_json::Error),
}
