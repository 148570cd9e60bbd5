//! Error types for ORRERY operations

use thiserror::Error;

/// Upstream provider errors.
///
/// Covers a single fetch attempt's transport, HTTP, or deserialization
/// failure. These never reach the API caller directly; the retrieval layer
/// absorbs them inside its retry loop.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Transport failure talking to upstream: {message}")]
    Transport { message: String },

    #[error("Upstream responded with status {status}: {message}")]
    BadStatus { status: u16, message: String },

    #[error("Invalid upstream response body: {reason}")]
    InvalidBody { reason: String },
}

/// Cache store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend failure: {reason}")]
    Backend { reason: String },
}

/// Retrieval orchestration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Upstream did not respond successfully within {attempts} attempts")]
    Timeout { attempts: u32 },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all ORRERY errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrreryError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for ORRERY operations.
pub type OrreryResult<T> = Result<T, OrreryError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display_bad_status() {
        let err = UpstreamError::BadStatus {
            status: 500,
            message: "internal error".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("500"));
        assert!(msg.contains("internal error"));
    }

    #[test]
    fn test_upstream_error_display_transport() {
        let err = UpstreamError::Transport {
            message: "connection refused".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Transport failure"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_retrieval_error_display_timeout() {
        let err = RetrievalError::Timeout { attempts: 6 };
        let msg = format!("{}", err);
        assert!(msg.contains("6 attempts"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "upstream_base_url".to_string(),
            value: "bad".to_string(),
            reason: "must be a url".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("upstream_base_url"));
        assert!(msg.contains("bad"));
        assert!(msg.contains("must be a url"));
    }

    #[test]
    fn test_orrery_error_from_variants() {
        let upstream = OrreryError::from(UpstreamError::InvalidBody {
            reason: "truncated".to_string(),
        });
        assert!(matches!(upstream, OrreryError::Upstream(_)));

        let cache = OrreryError::from(CacheError::Backend {
            reason: "poisoned".to_string(),
        });
        assert!(matches!(cache, OrreryError::Cache(_)));

        let retrieval = OrreryError::from(RetrievalError::Timeout { attempts: 6 });
        assert!(matches!(retrieval, OrreryError::Retrieval(_)));

        let config = OrreryError::from(ConfigError::MissingRequired {
            field: "upstream_base_url".to_string(),
        });
        assert!(matches!(config, OrreryError::Config(_)));
    }
}
