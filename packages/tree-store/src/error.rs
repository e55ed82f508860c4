//! Error types for the tree store.

use crate::Path;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no such entry: {path}")]
    NotFound { path: Path },

    #[error("not a directory: {path}")]
    NotADirectory { path: Path },

    #[error("is a directory: {path}")]
    IsADirectory { path: Path },

    #[error("entry already exists: {path}")]
    AlreadyExists { path: Path },

    #[error("the document root must be a JSON object")]
    RootNotObject,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error at {path}: {source}")]
    Storage {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn error_display_names_the_path() {
        let e = Error::NotFound {
            path: Path::parse("/a/b"),
        };
        assert_eq!(format!("{}", e), "no such entry: /a/b");

        let e = Error::NotADirectory {
            path: Path::parse("/leaf"),
        };
        assert!(format!("{}", e).contains("/leaf"));
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Json(_)));
        assert!(format!("{}", e).starts_with("JSON error"));
    }

    #[test]
    fn storage_error_source() {
        let e = Error::Storage {
            path: "/tmp/doc.json".into(),
            source: std::io::Error::other("disk full"),
        };
        assert!(StdError::source(&e).is_some());
        assert!(format!("{}", e).contains("disk full"));
    }
}
