//! Directory operation error types.
//!
//! The three failure stages (dial, bind, modify) are kept distinct for
//! internal logging but always collapse into one opaque message before
//! anything reaches a user, so error variance cannot be used to enumerate
//! accounts or harvest password-guessing feedback.

use thiserror::Error;

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Error from the directory password change transaction.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Could not establish the TLS connection to the directory server.
    #[error("directory dial failed: {message}")]
    Dial {
        message: String,
        #[source]
        source: Option<Source>,
    },

    /// The simple bind as the requesting user was rejected. Covers bad
    /// credentials, locked accounts, and unknown DNs alike.
    #[error("directory bind failed: {message}")]
    Bind {
        message: String,
        #[source]
        source: Option<Source>,
    },

    /// The password-modify extended operation failed after a good bind.
    #[error("password modify failed: {message}")]
    Modify {
        message: String,
        #[source]
        source: Option<Source>,
    },

    /// The client could not be constructed from its configuration.
    #[error("invalid directory configuration: {message}")]
    InvalidConfiguration {
        message: String,
        #[source]
        source: Option<Source>,
    },
}

impl DirectoryError {
    pub fn dial(message: impl Into<String>) -> Self {
        DirectoryError::Dial {
            message: message.into(),
            source: None,
        }
    }

    pub fn dial_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::Dial {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn bind(message: impl Into<String>) -> Self {
        DirectoryError::Bind {
            message: message.into(),
            source: None,
        }
    }

    pub fn bind_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::Bind {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn modify(message: impl Into<String>) -> Self {
        DirectoryError::Modify {
            message: message.into(),
            source: None,
        }
    }

    pub fn modify_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::Modify {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        DirectoryError::InvalidConfiguration {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_configuration_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::InvalidConfiguration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Short tag for structured logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryError::Dial { .. } => "dial",
            DirectoryError::Bind { .. } => "bind",
            DirectoryError::Modify { .. } => "modify",
            DirectoryError::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(DirectoryError::dial("x").kind(), "dial");
        assert_eq!(DirectoryError::bind("x").kind(), "bind");
        assert_eq!(DirectoryError::modify("x").kind(), "modify");
    }

    #[test]
    fn test_display_carries_message() {
        let err = DirectoryError::bind("rc=49 invalidCredentials");
        assert_eq!(
            err.to_string(),
            "directory bind failed: rc=49 invalidCredentials"
        );
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = DirectoryError::dial_with_source("no route", io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
