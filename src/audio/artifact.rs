//! The raw audio payload for one recording or upload.

use chrono::{DateTime, Utc};

use crate::defaults;

/// One recording's raw audio bytes plus its declared name and capture time.
///
/// Immutable once created. A session owns at most one artifact at a time
/// and replaces it wholesale on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    bytes: Vec<u8>,
    file_name: String,
    mime_type: String,
    captured_at: DateTime<Utc>,
}

impl AudioArtifact {
    /// Create an artifact from a live microphone capture.
    ///
    /// Synthesizes a `recording_YYYYMMDD_HHMMSS.webm` file name from the
    /// capture timestamp, matching what capture widgets produce.
    pub fn from_capture(bytes: Vec<u8>) -> Self {
        let captured_at = Utc::now();
        let file_name = format!("recording_{}.webm", captured_at.format("%Y%m%d_%H%M%S"));
        Self {
            bytes,
            file_name,
            mime_type: defaults::CAPTURE_MIME_TYPE.to_string(),
            captured_at,
        }
    }

    /// Create an artifact from an uploaded file.
    pub fn from_upload(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            captured_at: Utc::now(),
        }
    }

    /// Raw audio bytes, e.g. for a user-facing download.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// When the artifact was captured or uploaded.
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// True when the payload holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
