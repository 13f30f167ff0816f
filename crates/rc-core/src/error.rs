//! Unified error type for reelcast.
//!
//! Every failure is funneled into [`Error`], which carries enough context
//! for HTTP handlers to derive a status code via [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in reelcast.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found, or its backing file is absent.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "asset", "caption").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A `Range` header was malformed or does not fit the resource.
    #[error("Range not satisfiable for resource of {size} bytes")]
    RangeNotSatisfiable {
        /// Total size of the resource, echoed in `Content-Range: bytes */size`.
        size: u64,
    },

    /// Request or configuration data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::RangeNotSatisfiable { .. } => 416,
            Error::Validation(_) => 400,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::RangeNotSatisfiable`].
    pub fn unsatisfiable(size: u64) -> Self {
        Error::RangeNotSatisfiable { size }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = Error::not_found("asset", "abc-123");
        assert_eq!(err.to_string(), "asset not found: abc-123");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn unsatisfiable_display() {
        let err = Error::unsatisfiable(1000);
        assert_eq!(
            err.to_string(),
            "Range not satisfiable for resource of 1000 bytes"
        );
        assert_eq!(err.http_status(), 416);
    }

    #[test]
    fn validation_display() {
        let err = Error::Validation("port is zero".into());
        assert_eq!(err.to_string(), "Validation error: port is zero");
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("unexpected state".into());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.http_status(), 500);
    }
}
