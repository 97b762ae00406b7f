//! Document content loading.

use bytes::Bytes;
use casefile_core::{DocumentContent, DocumentHandle};

use crate::types::{BackendError, BackendResult};

/// Read the full content of a document. On-disk documents are read lazily,
/// at the moment they are submitted.
pub async fn read_document(document: &DocumentHandle) -> BackendResult<Bytes> {
    match document.content() {
        DocumentContent::InMemory(bytes) => Ok(bytes.clone()),
        DocumentContent::OnDisk(path) => tokio::fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|e| BackendError::DocumentError {
                message: format!("{}: {}", path.display(), e),
            }),
    }
}
