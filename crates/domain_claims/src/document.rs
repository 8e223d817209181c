//! Supporting document validation
//!
//! Submissions must carry a supporting document. The validator decides on
//! metadata alone (name, declared content type, byte length) and never
//! reads the file. Rules are checked in order and the first failure wins:
//!
//! 1. a document is present and non-empty
//! 2. it is at most 5 MiB
//! 3. its extension and declared content type are on the allow-list

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Largest accepted document, in bytes (5 MiB)
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Content type browsers send when they cannot tell
const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

struct AllowedType {
    extension: &'static str,
    content_types: &'static [&'static str],
}

const ALLOWED_TYPES: &[AllowedType] = &[
    AllowedType { extension: "pdf", content_types: &["application/pdf"] },
    AllowedType { extension: "doc", content_types: &["application/msword"] },
    AllowedType {
        extension: "docx",
        content_types: &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
    },
    AllowedType { extension: "xls", content_types: &["application/vnd.ms-excel"] },
    AllowedType {
        extension: "xlsx",
        content_types: &["application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"],
    },
    AllowedType { extension: "png", content_types: &["image/png"] },
    AllowedType { extension: "jpg", content_types: &["image/jpeg", "image/pjpeg"] },
    AllowedType { extension: "jpeg", content_types: &["image/jpeg", "image/pjpeg"] },
];

/// Reasons a supporting document is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("A supporting document is required")]
    MissingDocument,

    #[error("File size must not exceed 5MB")]
    TooLarge { length: u64 },

    #[error("Invalid file type. Allowed types: PDF, DOC, DOCX, XLS, XLSX, PNG, JPG, JPEG")]
    InvalidType { file_name: String, content_type: String },
}

/// Metadata of an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub file_name: String,
    pub content_type: String,
    pub length: u64,
}

impl DocumentDescriptor {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, length: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            length,
        }
    }

    /// Lower-cased extension, if the name has one
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Content type without parameters, lower-cased
    fn essence(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

/// A file submitted alongside a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub descriptor: DocumentDescriptor,
    pub content: Vec<u8>,
}

impl UploadedDocument {
    /// Builds an upload whose declared length is the content length
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            descriptor: DocumentDescriptor::new(file_name, content_type, content.len() as u64),
            content,
        }
    }
}

/// Accept/reject decision over document metadata
#[derive(Debug, Clone, Copy)]
pub struct DocumentValidator {
    max_bytes: u64,
}

impl DocumentValidator {
    pub fn new() -> Self {
        Self {
            max_bytes: MAX_DOCUMENT_BYTES,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validates a candidate document
    ///
    /// # Errors
    ///
    /// The first rule the document breaks, as a [`DocumentError`]
    pub fn validate(&self, document: Option<&DocumentDescriptor>) -> Result<(), DocumentError> {
        let document = match document {
            Some(d) if !d.file_name.trim().is_empty() && d.length > 0 => d,
            _ => return Err(DocumentError::MissingDocument),
        };

        if document.length > self.max_bytes {
            return Err(DocumentError::TooLarge {
                length: document.length,
            });
        }

        if !Self::is_allowed_type(document) {
            return Err(DocumentError::InvalidType {
                file_name: document.file_name.clone(),
                content_type: document.content_type.clone(),
            });
        }

        Ok(())
    }

    fn is_allowed_type(document: &DocumentDescriptor) -> bool {
        let Some(extension) = document.extension() else {
            return false;
        };
        let essence = document.essence();

        ALLOWED_TYPES
            .iter()
            .find(|allowed| allowed.extension == extension)
            .is_some_and(|allowed| {
                essence.is_empty()
                    || essence == GENERIC_CONTENT_TYPE
                    || allowed.content_types.contains(&essence.as_str())
            })
    }
}

impl Default for DocumentValidator {
    fn default() -> Self {
        Self::new()
    }
}
