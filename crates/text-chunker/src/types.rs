use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key/value metadata attached to documents and inherited by their chunks
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// An input text with optional metadata, immutable once created
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// The full text content
    pub content: String,

    /// Arbitrary metadata (source path, page number, ...)
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create a document from plain text with empty metadata
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Builder: attach a metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A bounded-size piece of a document emitted by the splitter
///
/// Chunks from one split call form an ordered sequence; order reflects the
/// original document order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text content
    pub content: String,

    /// Metadata inherited unchanged from the source document
    #[serde(default)]
    pub metadata: Metadata,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(content: String, metadata: Metadata) -> Self {
        Self { content, metadata }
    }

    /// Get the chunk length in Unicode scalar values
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Check whether the chunk carries any metadata
    #[must_use]
    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new("hello world")
            .with_metadata("source", "greeting.txt")
            .with_metadata("page", 1);

        assert_eq!(doc.content, "hello world");
        assert_eq!(
            doc.metadata.get("source"),
            Some(&serde_json::Value::from("greeting.txt"))
        );
        assert_eq!(doc.metadata.get("page"), Some(&serde_json::Value::from(1)));
    }

    #[test]
    fn test_chunk_char_count() {
        let chunk = Chunk::new("héllo".to_string(), Metadata::new());
        assert_eq!(chunk.char_count(), 5);
        assert!(!chunk.has_metadata());
    }

    #[test]
    fn test_chunk_serde_roundtrip() {
        let chunk = Chunk::new(
            "content".to_string(),
            Metadata::from([("source".to_string(), serde_json::Value::from("a.txt"))]),
        );

        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }

    #[test]
    fn test_document_default_metadata_deserializes() {
        let doc: Document = serde_json::from_str(r#"{"content":"text"}"#).unwrap();
        assert!(doc.metadata.is_empty());
    }
}
