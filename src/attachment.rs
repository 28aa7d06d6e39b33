//! Attachment encoder — user file → base64 inline payload + media type.
//!
//! DESIGN
//! ======
//! Validation happens when a file is selected ([`SelectedFile::new`]): size
//! cap, non-empty payload, accepted media category. Encoding happens later,
//! at submission, and only fails if the payload cannot be read.

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::error::ErrorCode;
use crate::labels;
use crate::llm::types::Part;

/// Largest file a user may attach (10 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Media types offered by the upload widget: images, PDF, Word, plain text.
pub const ACCEPTED_MEDIA_TYPES: [&str; 5] = [
    "image/*",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("file too large: {size} bytes exceeds {max}")]
    TooLarge { size: usize, max: usize },
    #[error("unsupported media type: {0}")]
    UnsupportedType(String),
    #[error("file is empty")]
    Empty,
    #[error("file read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid base64 payload: {0}")]
    Decode(String),
}

impl ErrorCode for AttachmentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "E_FILE_TOO_LARGE",
            Self::UnsupportedType(_) => "E_UNSUPPORTED_MEDIA_TYPE",
            Self::Empty => "E_EMPTY_FILE",
            Self::Read(_) => "E_FILE_READ",
            Self::Decode(_) => "E_FILE_DECODE",
        }
    }
}

impl AttachmentError {
    /// Arabic message for the user. Read and decode failures are collapsed
    /// into the calling tool's generic failure text, so they have none here.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::TooLarge { .. } => Some(labels::FILE_TOO_LARGE_MESSAGE),
            Self::UnsupportedType(_) => Some(labels::UNSUPPORTED_FILE_MESSAGE),
            Self::Empty => Some(labels::EMPTY_FILE_MESSAGE),
            Self::Read(_) | Self::Decode(_) => None,
        }
    }
}

// =============================================================================
// MEDIA TYPES
// =============================================================================

/// Strip parameters (`; charset=...`) and normalize case.
fn essence(media_type: &str) -> String {
    media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether `media_type` falls in one of the [`ACCEPTED_MEDIA_TYPES`].
#[must_use]
pub fn is_accepted_media_type(media_type: &str) -> bool {
    let essence = essence(media_type);
    ACCEPTED_MEDIA_TYPES.iter().any(|accepted| match accepted.strip_suffix('*') {
        Some(prefix) => essence.len() > prefix.len() && essence.starts_with(prefix),
        None => essence == *accepted,
    })
}

// =============================================================================
// SELECTED FILE
// =============================================================================

/// A file the user attached to a tool, already checked against the limits.
#[derive(Clone)]
pub struct SelectedFile {
    name: Option<String>,
    media_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Accept a selection, or reject it before it is ever attached.
    ///
    /// # Errors
    ///
    /// [`AttachmentError::TooLarge`] above [`MAX_ATTACHMENT_BYTES`],
    /// [`AttachmentError::Empty`] for a zero-byte file, and
    /// [`AttachmentError::UnsupportedType`] outside [`ACCEPTED_MEDIA_TYPES`].
    pub fn new(name: Option<String>, media_type: &str, bytes: Vec<u8>) -> Result<Self, AttachmentError> {
        if bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(AttachmentError::TooLarge { size: bytes.len(), max: MAX_ATTACHMENT_BYTES });
        }
        if bytes.is_empty() {
            return Err(AttachmentError::Empty);
        }
        if !is_accepted_media_type(media_type) {
            return Err(AttachmentError::UnsupportedType(media_type.to_owned()));
        }
        Ok(Self { name, media_type: essence(media_type), bytes })
    }

    #[must_use]
    pub fn info(&self) -> FileInfo {
        FileInfo { name: self.name.clone(), media_type: self.media_type.clone(), size: self.bytes.len() }
    }

    /// Encode the selected payload for inline transport.
    ///
    /// # Errors
    ///
    /// See [`encode`].
    pub fn encode(&self) -> Result<EncodedAttachment, AttachmentError> {
        encode(self.bytes.as_slice(), &self.media_type)
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// What the UI shows about an attached file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: Option<String>,
    pub media_type: String,
    pub size: usize,
}

// =============================================================================
// ENCODING
// =============================================================================

/// Base64 payload paired with its media type. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAttachment {
    media_type: String,
    data: String,
}

impl EncodedAttachment {
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Standard (padded) base64 text.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    #[must_use]
    pub fn to_part(&self) -> Part {
        Part::InlineData { mime_type: self.media_type.clone(), data: self.data.clone() }
    }
}

/// Read the whole payload from `reader` and base64-encode it.
///
/// Size limits are the caller's precondition and are not rechecked here.
///
/// # Errors
///
/// [`AttachmentError::Read`] if the reader fails, [`AttachmentError::Empty`]
/// for an empty payload, [`AttachmentError::UnsupportedType`] for an
/// unrecognized media type.
pub fn encode(mut reader: impl Read, media_type: &str) -> Result<EncodedAttachment, AttachmentError> {
    if !is_accepted_media_type(media_type) {
        return Err(AttachmentError::UnsupportedType(media_type.to_owned()));
    }
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.is_empty() {
        return Err(AttachmentError::Empty);
    }
    Ok(EncodedAttachment { media_type: essence(media_type), data: STANDARD.encode(&bytes) })
}

/// Recover the original bytes from an encoded attachment.
///
/// # Errors
///
/// [`AttachmentError::Decode`] if the payload is not valid base64.
pub fn decode(attachment: &EncodedAttachment) -> Result<Vec<u8>, AttachmentError> {
    STANDARD
        .decode(attachment.data.as_bytes())
        .map_err(|e| AttachmentError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "attachment_test.rs"]
mod tests;
