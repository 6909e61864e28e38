//! All error types for the stringtable crate.
//!
//! These are returned from all fallible operations (reading, writing, encoding detection, etc.).

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported encoding `{0}`")]
    UnsupportedEncoding(String),

    #[error("cannot determine language: {0}")]
    UnknownLanguage(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an I/O error that remembers which file failed.
    pub fn file(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::File {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attaches `path` to a bare I/O error. Other variants pass through untouched.
    pub fn with_path(self, path: impl AsRef<Path>) -> Self {
        match self {
            Error::Io(source) => Error::file(path, source),
            other => other,
        }
    }

    /// The file this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::File { path, .. } => Some(path),
            _ => None,
        }
    }
}
