//! Error types for the pkscout core library.
//!
//! Uses `thiserror` for public API error types. Transport and decode
//! failures are surfaced to the caller as diagnosable errors; local parse
//! failures (a malformed date year, a bad numeric token) are recovered in
//! place by the scorer and classifier and never reach this taxonomy.

/// Top-level error type for the pkscout libraries.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the external search and detail transports.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {message}")]
    Request { message: String },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("response decode failed: {message}")]
    Decode { message: String },
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {message}")]
    Invalid { message: String },

    #[error("configuration parse error: {message}")]
    ParseError { message: String },
}

/// A type alias for results using the top-level `ScoutError`.
pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_transport() {
        let err = ScoutError::Transport(TransportError::Request {
            message: "connection refused".into(),
        });
        assert_eq!(
            err.to_string(),
            "Transport error: request failed: connection refused"
        );
    }

    #[test]
    fn test_error_display_decode() {
        let err = ScoutError::Transport(TransportError::Decode {
            message: "missing esearchresult.idlist".into(),
        });
        assert_eq!(
            err.to_string(),
            "Transport error: response decode failed: missing esearchresult.idlist"
        );
    }

    #[test]
    fn test_error_display_config() {
        let err = ScoutError::Config(ConfigError::Invalid {
            message: "fraction_percent must be 1..=100".into(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid configuration: fraction_percent must be 1..=100"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScoutError = io_err.into();
        assert!(matches!(err, ScoutError::Io(_)));
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ScoutError = serde_err.into();
        assert!(matches!(err, ScoutError::Serialization(_)));
    }
}
