//! Error types for lrumemo

use std::fmt;

/// Result type alias for cache construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the cache itself
///
/// Failures of the wrapped producer are not represented here; `get` hands
/// them back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cache was configured with an unusable parameter (e.g. zero capacity)
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let err = Error::InvalidConfiguration("capacity must be greater than 0".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: capacity must be greater than 0"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(Error::InvalidConfiguration("bad".to_string()));
        assert!(err.source().is_none());
    }
}
