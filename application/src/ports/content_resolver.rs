//! Content resolver port
//!
//! Turns an opaque, user-selected content handle into the raw bytes and file
//! name of a document ready for upload.

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Opaque reference to user-selected content.
///
/// Only the resolver knows how to interpret it (e.g. as a filesystem path).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHandle(String);

impl ContentHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentHandle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContentHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Path> for ContentHandle {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

/// Raw document ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub media_type: String,
}

impl DocumentContent {
    pub fn new(
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }
}

/// Errors that can occur while resolving a content handle
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Cannot open {0}: not found")]
    NotFound(ContentHandle),

    #[error("Cannot open {handle}: {source}")]
    Io {
        handle: ContentHandle,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves content handles into document bytes
#[async_trait]
pub trait ContentResolver: Send + Sync {
    async fn resolve(&self, handle: &ContentHandle) -> Result<DocumentContent, ResolveError>;
}
