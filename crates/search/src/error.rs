//! Error types for count execution

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Failure reported by a [`Transport`](crate::Transport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The cluster answered with a non-success status
    #[error("cluster responded with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The response body was not a count result
    #[error("malformed count response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Anything else a custom transport wants to report
    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by [`SearchClient`](crate::SearchClient) and
/// [`ProxyCountRequest`](crate::ProxyCountRequest).
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The remote count failed; never retried
    #[error("Fail to execute {description}")]
    Execution {
        /// Description of the attempted request
        description: String,
        /// Original transport failure
        #[source]
        source: TransportError,
    },

    /// The call shape is intentionally not supported; nothing was sent
    #[error("{operation}: {reason}")]
    Unsupported {
        /// Operation that was refused
        operation: &'static str,
        /// Why it was refused
        reason: &'static str,
    },

    /// The runtime used for blocking could not be built
    #[error("failed to build blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Transport configuration is invalid
    #[error("invalid transport configuration: {0}")]
    Config(String),
}

impl SearchError {
    pub(crate) fn unsupported(operation: &'static str, reason: &'static str) -> Self {
        Self::Unsupported { operation, reason }
    }

    /// Whether this is a refused call shape rather than a runtime failure.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Description of the failed request, for execution failures.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Execution { description, .. } => Some(description),
            _ => None,
        }
    }
}
