//! Error types for studycards.
//!
//! Every remote failure is reduced to one of these variants so callers (and
//! tests) can tell failure paths apart without reading log output.

use thiserror::Error;

use crate::card::CardId;

/// The main error type for studycards operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Remote Store Errors ===
    /// The HTTP request could not be sent or its body could not be read.
    ///
    /// The request URL is stripped on conversion since it carries the API key.
    #[error("request failed: {0}")]
    Http(reqwest::Error),

    /// The remote store answered with a status other than 200.
    #[error("{operation} failed with HTTP status {status}")]
    UnexpectedStatus {
        /// The remote operation (list, create, patch, delete).
        operation: &'static str,
        /// The HTTP status code received.
        status: u16,
    },

    /// The remote store answered 200 but the body had the wrong shape.
    #[error("{operation} returned a malformed response: {message}")]
    MalformedResponse {
        /// The remote operation (list, create, patch, delete).
        operation: &'static str,
        /// Description of what was wrong with the body.
        message: String,
    },

    /// A list request succeeded but returned no records.
    #[error("no study cards were returned")]
    NoRecords,

    /// The remote store did not confirm a deletion.
    #[error("deletion of card {id} was not confirmed")]
    DeleteNotConfirmed {
        /// Identifier of the card that was meant to be deleted.
        id: CardId,
    },

    // === View-Model Errors ===
    /// `update` was called while the form is not editing a card.
    #[error("no card is being edited")]
    NotEditing,

    /// A card identifier is not present in the loaded list.
    #[error("card {id} is not in the loaded list")]
    CardNotFound {
        /// The identifier that was looked up.
        id: CardId,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// No API key is configured for the remote store.
    #[error("no API key configured (set remote.api_key or STUDYCARDS_REMOTE__API_KEY)")]
    MissingApiKey,

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for studycards operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a malformed response error for the given operation.
    #[must_use]
    pub fn malformed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            operation,
            message: message.into(),
        }
    }

    /// Check if this error came from talking to the remote store.
    #[must_use]
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::UnexpectedStatus { .. }
                | Self::MalformedResponse { .. }
                | Self::NoRecords
                | Self::DeleteNotConfirmed { .. }
        )
    }

    /// The HTTP status of an `UnexpectedStatus` error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_display() {
        let err = Error::UnexpectedStatus {
            operation: "list",
            status: 422,
        };
        assert_eq!(err.to_string(), "list failed with HTTP status 422");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_malformed_display() {
        let err = Error::malformed("create", "missing field `id`");
        let msg = err.to_string();
        assert!(msg.contains("create"));
        assert!(msg.contains("missing field `id`"));
    }

    #[test]
    fn test_delete_not_confirmed_display() {
        let err = Error::DeleteNotConfirmed {
            id: CardId::from("rec123"),
        };
        assert!(err.to_string().contains("rec123"));
    }

    #[test]
    fn test_is_remote_failure() {
        assert!(Error::NoRecords.is_remote_failure());
        assert!(Error::malformed("patch", "bad").is_remote_failure());
        assert!(!Error::NotEditing.is_remote_failure());
        assert!(!Error::MissingApiKey.is_remote_failure());
    }

    #[test]
    fn test_status_none_for_local_errors() {
        assert_eq!(Error::NotEditing.status(), None);
        assert_eq!(Error::internal("boom").status(), None);
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_card_not_found_display() {
        let err = Error::CardNotFound {
            id: CardId::from("recXYZ"),
        };
        assert_eq!(err.to_string(), "card recXYZ is not in the loaded list");
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "max_records must be between 1 and 100".to_string(),
        };
        assert!(err.to_string().contains("max_records"));
    }
}
