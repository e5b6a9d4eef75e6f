//! Error types for snapshot generation.

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Fatal conditions that terminate a snapshot run.
///
/// A path that does not resolve to a regular file is not an error; it is
/// recorded as a missing section instead.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// An existing file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// An existing file is not valid UTF-8.
    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: String,
        #[source]
        source: FromUtf8Error,
    },

    /// The destination could not be created, written, or persisted.
    #[error("Failed to write snapshot to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The JSON manifest could not be rendered.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SnapshotError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SnapshotError::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = SnapshotError::Read {
            path: "GtaNav.cpp".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("GtaNav.cpp"));

        let err = SnapshotError::write("out/snapshot.txt", io::Error::other("disk full"));
        assert!(err.to_string().contains("out/snapshot.txt"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_decode_error_message() {
        let source = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err = SnapshotError::Decode {
            path: "blob.bin".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("blob.bin is not valid UTF-8"));
    }
}
