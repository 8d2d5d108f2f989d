//! Loads files from disk as generation attachments.

use std::path::Path;

use contentai_core::generation::Document;
use contentai_core::{ContentError, Result};

/// Reads `path` and guesses its MIME type from the extension.
pub async fn load_document(path: &Path) -> Result<Document> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ContentError::client(format!("Not a file: {}", path.display())))?;

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        ContentError::client(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(Document {
        file_name,
        mime_type,
        bytes,
    })
}
