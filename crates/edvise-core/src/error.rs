//! Error types for Edvise.
//!
//! Every fallible operation in the workspace returns [`Result`]. The taxonomy
//! is deliberately small: a failure is either the caller's input
//! ([`Error::Validation`]), a collaborator's refusal ([`Error::Remote`]), or
//! something nobody planned for ([`Error::Unexpected`]). Callers convert all
//! three into a single user-facing notification; none are fatal.

/// Errors that can occur across Edvise operations.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Caller-supplied data is insufficient. Caught before any remote call.
    #[error("validation error: {message}")]
    Validation {
        /// Field that failed validation, when one can be named
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A remote collaborator (store, storage, auth, email) rejected the
    /// operation.
    #[error("{service} error: {message}")]
    Remote {
        /// Which collaborator reported the failure
        service: &'static str,
        /// The collaborator's message, surfaced verbatim where user-facing
        message: String,
    },

    /// Transport or parse failure, or anything else without a better home.
    #[error("unexpected error: {message}")]
    Unexpected {
        /// Human-readable description
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Edvise operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error naming the offending field.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new remote error for the named collaborator.
    pub fn remote<S: Into<String>>(service: &'static str, message: S) -> Self {
        Error::Remote {
            service,
            message: message.into(),
        }
    }

    /// Creates a new unexpected error.
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Error::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether this error was caught before any remote call.
    ///
    /// Validation errors are the caller's to fix; everything else is worth
    /// re-clicking submit for.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Transport and decode failures are "unexpected" in the taxonomy;
        // remote refusals are mapped from response status by each client.
        Error::Unexpected {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation("name must not be empty");
        assert_eq!(err.to_string(), "validation error: name must not be empty");
        assert!(err.is_validation());
    }

    #[test]
    fn test_validation_error_with_field() {
        let err = Error::validation_field("location", "must not be empty");
        let Error::Validation { field, message } = err else {
            unreachable!("expected Validation variant");
        };
        assert_eq!(field, Some("location".to_string()));
        assert_eq!(message, "must not be empty");
    }

    #[test]
    fn test_remote_error_display() {
        let err = Error::remote("record store", "permission denied");
        assert_eq!(err.to_string(), "record store error: permission denied");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_unexpected_error_display() {
        let err = Error::unexpected("connection reset");
        assert_eq!(err.to_string(), "unexpected error: connection reset");
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: Error = serde_err.into();
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("serialization error"));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
