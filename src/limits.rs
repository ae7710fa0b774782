//! Input limits enforced before parsing.
//!
//! Bounds the work a single parse can do through configurable limits on:
//! - Raw model output size
//! - Number of documents
//! - Size of any single document

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Document;

/// Limits on parse inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLimits {
    /// Maximum raw output size in bytes (default: 1MB)
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,

    /// Maximum number of documents (default: 1000)
    #[serde(default = "default_max_documents")]
    pub max_documents: usize,

    /// Maximum size of one document in bytes (default: 10MB)
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

fn default_max_output_bytes() -> usize {
    1024 * 1024
} // 1MB
fn default_max_documents() -> usize {
    1000
}
fn default_max_document_bytes() -> usize {
    10 * 1024 * 1024
} // 10MB

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_output_bytes: default_max_output_bytes(),
            max_documents: default_max_documents(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

impl InputLimits {
    /// Validate raw model output against the size limit
    pub fn validate_output(&self, output: &str) -> Result<(), LimitViolation> {
        let size = output.len();
        if size > self.max_output_bytes {
            return Err(LimitViolation::MaxOutputBytes {
                actual: size,
                limit: self.max_output_bytes,
            });
        }
        Ok(())
    }

    /// Validate the document set against count and size limits
    pub fn validate_documents(&self, docs: &[Document]) -> Result<(), LimitViolation> {
        if docs.len() > self.max_documents {
            return Err(LimitViolation::MaxDocuments {
                actual: docs.len(),
                limit: self.max_documents,
            });
        }

        if let Some(doc) = docs.iter().find(|d| d.text.len() > self.max_document_bytes) {
            return Err(LimitViolation::MaxDocumentBytes {
                doc_id: doc.doc_id.clone(),
                actual: doc.text.len(),
                limit: self.max_document_bytes,
            });
        }

        Ok(())
    }

    /// Validate both the raw output and the document set
    pub fn check(&self, output: &str, docs: &[Document]) -> Result<(), LimitViolation> {
        self.validate_output(output)?;
        self.validate_documents(docs)
    }
}

/// Limit violation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitViolation {
    #[error("Maximum output bytes exceeded: {actual} > {limit}")]
    MaxOutputBytes { actual: usize, limit: usize },

    #[error("Maximum documents exceeded: {actual} > {limit}")]
    MaxDocuments { actual: usize, limit: usize },

    #[error("Document {doc_id} exceeds maximum size: {actual} > {limit}")]
    MaxDocumentBytes {
        doc_id: String,
        actual: usize,
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = InputLimits::default();
        assert_eq!(limits.max_output_bytes, 1024 * 1024);
        assert_eq!(limits.max_documents, 1000);
        assert_eq!(limits.max_document_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_output_validation() {
        let limits = InputLimits {
            max_output_bytes: 100,
            ..Default::default()
        };

        assert!(limits.validate_output("short").is_ok());
        assert!(limits.validate_output(&"x".repeat(100)).is_ok());

        let result = limits.validate_output(&"x".repeat(200));
        assert!(matches!(result, Err(LimitViolation::MaxOutputBytes { .. })));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let limits: InputLimits = serde_yaml::from_str("max_documents: 3").unwrap();
        assert_eq!(limits.max_documents, 3);
        assert_eq!(limits.max_output_bytes, 1024 * 1024);
    }
}
