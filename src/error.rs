//! Error types for pipechat.

use thiserror::Error;

/// Common error type for pipechat.
#[derive(Error, Debug)]
pub enum PipechatError {
    /// A room or user name that cannot serve as a path component.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// The resolved room location exists but is not a directory.
    #[error("room path {0} exists but is not a directory")]
    NamespaceCollision(String),

    /// The room directory could not be created.
    #[error("cannot create room directory {path}: {source}")]
    NamespaceCreateFailed {
        path: String,
        source: std::io::Error,
    },

    /// An object already sits at the mailbox path and is not a FIFO.
    #[error("mailbox {0} exists but is not a FIFO")]
    MailboxTypeConflict(String),

    /// The mailbox FIFO could not be created.
    #[error("cannot create mailbox {path}: {source}")]
    MailboxCreateFailed {
        path: String,
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A /proc file for the requested process could not be read.
    #[error("cannot read {path}: {source}")]
    ProcRead {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for pipechat operations.
pub type Result<T> = std::result::Result<T, PipechatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_display() {
        let err = PipechatError::InvalidName("room name must not be empty".to_string());
        assert_eq!(err.to_string(), "invalid name: room name must not be empty");
    }

    #[test]
    fn test_namespace_collision_display() {
        let err = PipechatError::NamespaceCollision("/tmp/chatroom-lobby".to_string());
        assert_eq!(
            err.to_string(),
            "room path /tmp/chatroom-lobby exists but is not a directory"
        );
    }

    #[test]
    fn test_mailbox_type_conflict_display() {
        let err = PipechatError::MailboxTypeConflict("/tmp/chatroom-lobby/alice".to_string());
        assert_eq!(
            err.to_string(),
            "mailbox /tmp/chatroom-lobby/alice exists but is not a FIFO"
        );
    }

    #[test]
    fn test_mailbox_create_failed_display() {
        let err = PipechatError::MailboxCreateFailed {
            path: "/tmp/chatroom-lobby/alice".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/chatroom-lobby/alice"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PipechatError = io_err.into();
        assert!(matches!(err, PipechatError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = PipechatError::Validation("invalid field list: x".to_string());
        assert_eq!(err.to_string(), "validation error: invalid field list: x");
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(PipechatError::Validation("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
