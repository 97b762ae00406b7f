//! Session Data Model
//!
//! The document the user selected, the analysis payload returned by the
//! remote pipeline, and the generation counter that scopes every request to
//! the session state it was issued against.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

// ============================================================================
// Document Handle
// ============================================================================

/// Where a document's bytes live until submission reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    InMemory(Bytes),
    OnDisk(PathBuf),
}

/// Opaque reference to a user-selected file.
///
/// Replaced wholesale on re-selection; the content is not read until the
/// document is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    name: String,
    media_type: String,
    content: DocumentContent,
}

impl DocumentHandle {
    /// Create a handle over bytes that are already in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let name = name.into();
        let media_type = media_type_for(&name).to_string();
        Self {
            name,
            media_type,
            content: DocumentContent::InMemory(bytes.into()),
        }
    }

    /// Create a handle over a file on disk. The display name is the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| {
                CoreError::validation(format!("Path has no file name: {}", path.display()))
            })?
            .to_string();
        let media_type = media_type_for(&name).to_string();
        Ok(Self {
            name,
            media_type,
            content: DocumentContent::OnDisk(path),
        })
    }

    /// Override the media type inferred from the file extension.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    /// Path of the backing file, if the content is on disk.
    pub fn path(&self) -> Option<&Path> {
        match &self.content {
            DocumentContent::OnDisk(path) => Some(path.as_path()),
            DocumentContent::InMemory(_) => None,
        }
    }
}

/// Infer a media type from a file name's extension.
///
/// Covers the formats the analysis service ingests; anything else is sent as
/// an opaque octet stream.
pub fn media_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Analysis Result
// ============================================================================

/// Output of the remote analysis pipeline for one submitted document.
///
/// Immutable once stored; dependent views receive it behind an `Arc`.
/// `cleaned_data` and `analysis_context` are opaque and passed back to the
/// service verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "null_as_default")]
    pub company_name: String,
    /// Debate statements in speaking order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub debate: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub final_summary: String,
    #[serde(default)]
    pub cleaned_data: Value,
    #[serde(default)]
    pub analysis_context: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

/// The service fills missing pipeline outputs with `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Session Generation
// ============================================================================

/// Logical session identifier, bumped whenever the document, submission or
/// session changes. Completions carrying an older generation are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SessionGeneration(u64);

impl SessionGeneration {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The generation that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for SessionGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen-{}", self.0)
    }
}
