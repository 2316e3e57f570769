//! Error types for store operations.

/// Errors that can occur while talking to a document store backend.
///
/// The HTTP layer collapses all of these into a generic server error;
/// the variants exist for logging and for backends to report precisely
/// what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A primary-id filter could not be parsed into the backend's id
    /// format (for MongoDB, a 24-character hex ObjectId).
    #[error("Malformed document id: {id}")]
    MalformedId {
        /// The id as received from the caller.
        id: String,
    },

    /// Failed to reach or authenticate against the storage backend.
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// A document could not be converted between the wire format and
    /// the backend's native representation.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The backend rejected or failed the operation.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Creates a new `MalformedId` error.
    #[must_use]
    pub fn malformed_id(id: impl Into<String>) -> Self {
        Self::MalformedId { id: id.into() }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Serialization` error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a malformed-id error.
    #[must_use]
    pub fn is_malformed_id(&self) -> bool {
        matches!(self, Self::MalformedId { .. })
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::malformed_id("not-an-oid");
        assert_eq!(err.to_string(), "Malformed document id: not-an-oid");

        let err = StoreError::connection("refused");
        assert_eq!(err.to_string(), "Connection error: refused");

        let err = StoreError::backend("write concern failed");
        assert_eq!(err.to_string(), "Backend error: write concern failed");
    }

    #[test]
    fn test_error_predicates() {
        let err = StoreError::malformed_id("xyz");
        assert!(err.is_malformed_id());
        assert!(!err.is_connection());

        let err = StoreError::connection("timeout");
        assert!(err.is_connection());
        assert!(!err.is_malformed_id());
    }
}
