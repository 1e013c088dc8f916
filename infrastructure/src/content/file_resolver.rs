//! Local file system content resolver
//!
//! A content handle is a path. The file is read asynchronously; its final path
//! component becomes the upload file name and its extension picks the media
//! type.

use async_trait::async_trait;
use docchat_application::{ContentHandle, ContentResolver, DocumentContent, ResolveError};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// File name sent when the path has no final component.
const FALLBACK_FILE_NAME: &str = "upload.pdf";

/// Media type sent when the extension is unknown.
const FALLBACK_MEDIA_TYPE: &str = "application/pdf";

/// Resolves handles by reading files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileContentResolver;

impl FileContentResolver {
    pub fn new() -> Self {
        Self
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
    }

    fn media_type(path: &Path) -> String {
        mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(FALLBACK_MEDIA_TYPE)
            .to_string()
    }
}

#[async_trait]
impl ContentResolver for FileContentResolver {
    async fn resolve(&self, handle: &ContentHandle) -> Result<DocumentContent, ResolveError> {
        let path = Path::new(handle.as_str());

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ResolveError::NotFound(handle.clone()),
            _ => ResolveError::Io {
                handle: handle.clone(),
                source: e,
            },
        })?;

        let document = DocumentContent::new(bytes, Self::file_name(path), Self::media_type(path));
        debug!(
            "Read {} ({} bytes, {})",
            path.display(),
            document.bytes.len(),
            document.media_type
        );
        Ok(document)
    }
}
