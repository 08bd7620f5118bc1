//! Error types for lintcache
//!
//! All modules use `LintResult<T>` as their return type. The presentation
//! boundary maps errors onto [`ErrorKind`] to pick a response.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lintcache operations
pub type LintResult<T> = Result<T, LintError>;

/// All errors that can occur in lintcache
#[derive(Error, Debug)]
pub enum LintError {
    // Request errors
    #[error("Invalid package path: {0}")]
    BadRequest(String),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Error accessing {host}: {message}")]
    Remote { host: String, message: String },

    // Store errors
    #[error("Stored result for {key} is corrupt: {reason}")]
    Corruption { key: String, reason: String },

    #[error("Failed to persist result for {key}: {reason}")]
    Persist { key: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),

    // Presentation
    #[error("{message}")]
    Presented {
        kind: ErrorKind,
        message: String,
        hint: Option<&'static str>,
    },
}

/// Coarse classification used by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The identifier failed validation
    BadRequest,
    /// The identifier does not resolve to a package
    NotFound,
    /// An upstream host failed
    Remote { host: String },
    /// Anything else; detail stays server-side
    Internal,
}

impl LintError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a remote error for `host`
    pub fn remote(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Classify the error for the response boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Remote { host, .. } => ErrorKind::Remote { host: host.clone() },
            Self::Presented { kind, .. } => kind.clone(),
            _ => ErrorKind::Internal,
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        if let Self::Presented { message, .. } = self {
            return message.clone();
        }
        match self.kind() {
            ErrorKind::BadRequest => "Bad Request".to_string(),
            ErrorKind::NotFound => "Not Found".to_string(),
            ErrorKind::Remote { host } => format!("Error accessing {}.", host),
            ErrorKind::Internal => "Internal Server Error".to_string(),
        }
    }

    /// HTTP status a web front end should answer with
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Remote { .. } | ErrorKind::Internal => 500,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::BadRequest(_) => Some("Paths look like: github.com/owner/repo/dir"),
            Self::Remote { .. } => Some("Try again later with: lintcache refresh <path>"),
            Self::Corruption { .. } => Some("Run: lintcache store remove <path>"),
            Self::ConfigInvalid { .. } => Some("Run: lintcache config init --force"),
            Self::Presented { hint, .. } => *hint,
            _ => None,
        }
    }

    /// Replace the detail with the public message, keeping kind and hint
    pub fn into_presented(self) -> Self {
        if matches!(self, Self::Presented { .. }) {
            return self;
        }
        Self::Presented {
            kind: self.kind(),
            message: self.public_message(),
            hint: self.hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LintError::remote("github.com", "HTTP status 503");
        assert_eq!(err.to_string(), "Error accessing github.com: HTTP status 503");
    }

    #[test]
    fn error_kind_mapping() {
        assert_eq!(
            LintError::BadRequest("x".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(LintError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            LintError::remote("example.com", "down").kind(),
            ErrorKind::Remote {
                host: "example.com".into()
            }
        );
        let corrupt = LintError::Corruption {
            key: "a".into(),
            reason: "bad".into(),
        };
        assert_eq!(corrupt.kind(), ErrorKind::Internal);
    }

    #[test]
    fn internal_errors_do_not_leak() {
        let err = LintError::Persist {
            key: "example.com/a".into(),
            reason: "disk full at /var/secret".into(),
        };
        assert!(!err.public_message().contains("secret"));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn remote_message_names_host() {
        let err = LintError::remote("github.com", "timeout");
        assert_eq!(err.public_message(), "Error accessing github.com.");
        assert_eq!(err.http_status(), 500);
        assert!(err.hint().is_some());
    }

    #[test]
    fn presented_error_hides_detail() {
        let err = LintError::Corruption {
            key: "example.com/a".into(),
            reason: "expected value at line 1".into(),
        }
        .into_presented();

        assert_eq!(err.to_string(), "Internal Server Error");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.hint(), Some("Run: lintcache store remove <path>"));
        assert_eq!(err.into_presented().to_string(), "Internal Server Error");
    }

    #[test]
    fn presented_error_keeps_kind() {
        let err = LintError::NotFound("bogus/pkg".into()).into_presented();
        assert_eq!(err.to_string(), "Not Found");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn http_status_for_client_errors() {
        assert_eq!(LintError::BadRequest("..".into()).http_status(), 400);
        assert_eq!(LintError::NotFound("x".into()).http_status(), 404);
    }
}
