//! Source documents and the id index built over them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parser::ParseError;

/// A source document supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique key referenced by `Document N` in citation entries
    pub doc_id: String,
    /// Full document text; citation offsets index into this string
    pub text: String,
}

impl Document {
    pub fn new(doc_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            text: text.into(),
        }
    }
}

/// Read-only lookup of documents by id
#[derive(Debug)]
pub struct DocumentIndex<'a> {
    by_id: HashMap<&'a str, &'a Document>,
}

impl<'a> DocumentIndex<'a> {
    /// Index `docs` by `doc_id`, rejecting duplicate ids
    pub fn build(docs: &'a [Document]) -> Result<Self, ParseError> {
        let mut by_id = HashMap::with_capacity(docs.len());
        for doc in docs {
            if by_id.insert(doc.doc_id.as_str(), doc).is_some() {
                return Err(ParseError::DuplicateKey(doc.doc_id.clone()));
            }
        }
        Ok(Self { by_id })
    }

    pub fn get(&self, doc_id: &str) -> Option<&'a Document> {
        self.by_id.get(doc_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup() {
        let docs = vec![Document::new("1", "Dog info"), Document::new("2", "Cat info")];
        let index = DocumentIndex::build(&docs).unwrap();
        assert!(index.get("1").is_some());
        assert_eq!(index.get("2").map(|d| d.text.as_str()), Some("Cat info"));
        assert!(index.get("3").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let docs = vec![Document::new("1", "a"), Document::new("1", "b")];
        let err = DocumentIndex::build(&docs).unwrap_err();
        assert_eq!(err, ParseError::DuplicateKey("1".to_string()));
    }
}
