//! SDK error types.
//!
//! [`PullError`] is the single error type returned by every fallible
//! operation in the SDK.  The taxonomy is flat: a pull either fails
//! before the network (missing secret, bad configuration) or at an
//! endpoint (non-success status, transport error).  There is no retry
//! path, so no transient/permanent distinction is modelled.

/// Error type for all pull operations.
#[derive(Debug, thiserror::Error)]
pub enum PullError {
    /// A required secret is absent from the environment file.
    #[error("missing secret `{key}` in `{path}`")]
    MissingSecret { key: String, path: String },

    /// The environment file could not be read or parsed.
    #[error("environment file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// Invalid or missing configuration (e.g. a key that cannot form a header).
    #[error("configuration error: {0}")]
    Config(String),

    /// The token endpoint answered 2xx but did not issue a usable token.
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// An endpoint answered with a non-success HTTP status.
    #[error("`{endpoint}` returned status {status}")]
    UnexpectedStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The HTTP call failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Dataframe construction error.
    #[error("dataframe error: {0}")]
    Frame(#[from] polars::error::PolarsError),

    /// Generic I/O error (snapshot read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PullError {
    /// The numeric HTTP status carried by this error, when it has one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_surfaces_the_code() {
        let err = PullError::UnexpectedStatus {
            endpoint: "/api/v2/tickets".into(),
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert_eq!(err.status(), Some(reqwest::StatusCode::FORBIDDEN));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn missing_secret_names_key_and_path() {
        let err = PullError::MissingSecret {
            key: "QUEUE_OAUTH_CLIENT_ID".into(),
            path: ".env".into(),
        };
        assert!(err.status().is_none());
        let msg = err.to_string();
        assert!(msg.contains("QUEUE_OAUTH_CLIENT_ID"));
        assert!(msg.contains(".env"));
    }
}
