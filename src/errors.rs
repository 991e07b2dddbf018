//! Filesystem error taxonomy
//!
//! Every public operation fails with one of the variants below. Raw `git2`
//! failures never cross this boundary: path resolution normalizes them to
//! `NotFound`, and operations on a resolved node report the matching
//! kind-mismatch variant instead.

use std::path::PathBuf;

use thiserror::Error;

/// the error type surfaced by [`GitVfs`](crate::GitVfs) operations
#[derive(Debug, Error)]
pub enum VfsError {
    /// the path (or one of its intermediate segments) does not resolve
    #[error("resource not found: {0}")]
    NotFound(String),

    /// a directory operation was requested on a file
    #[error("directory expected: {0}")]
    DirectoryExpected(String),

    /// a file operation was requested on a directory
    #[error("file expected: {0}")]
    FileExpected(String),

    /// a mutating operation was attempted on the read-only projection
    #[error("filesystem is read-only: {0}")]
    ReadOnly(String),

    /// the operation is not available on this resource
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// the location given at construction is not a git repository
    #[error("not a git repository: {0}")]
    InvalidRepository(PathBuf),

    /// invalid UTF-8 in blob content
    #[error("invalid utf-8 in blob: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl VfsError {
    /// check if this error indicates the resource doesn't exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }

    /// check if this error is a directory/file kind mismatch
    pub fn is_kind_mismatch(&self) -> bool {
        matches!(
            self,
            VfsError::DirectoryExpected(_) | VfsError::FileExpected(_)
        )
    }

    /// check if this error comes from the read-only guarantee
    pub fn is_read_only(&self) -> bool {
        matches!(self, VfsError::ReadOnly(_))
    }
}

/// result type alias for filesystem operations
pub type VfsResult<T> = Result<T, VfsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let not_found = VfsError::NotFound("/head/missing".to_string());
        assert!(not_found.is_not_found());
        assert!(!not_found.is_kind_mismatch());

        let mismatch = VfsError::DirectoryExpected("/head/LICENSE".to_string());
        assert!(mismatch.is_kind_mismatch());
        assert!(!mismatch.is_not_found());

        let read_only = VfsError::ReadOnly("/head".to_string());
        assert!(read_only.is_read_only());
        assert!(!read_only.is_not_found());
    }

    #[test]
    fn test_error_messages() {
        let err = VfsError::FileExpected("/head".to_string());
        assert_eq!(err.to_string(), "file expected: /head");

        let err = VfsError::NotFound("/branches/gone".to_string());
        assert_eq!(err.to_string(), "resource not found: /branches/gone");
    }
}
