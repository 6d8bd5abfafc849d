use serde::{Deserialize, Serialize};

/// Configuration for text chunking behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum chunk size in length-function units (hard limit)
    pub chunk_size: usize,

    /// Trailing content repeated at the start of the next chunk
    ///
    /// Must be strictly smaller than `chunk_size`.
    pub chunk_overlap: usize,

    /// What to do with matched separators
    pub keep_separator: KeepSeparator,

    /// Treat separators as regex patterns instead of literal strings
    pub separator_regex: bool,

    /// Trim whitespace from each merged chunk and drop empty results
    pub strip_whitespace: bool,

    /// Record each chunk's byte offset in the source text under the
    /// `start_index` metadata key (document operations only)
    pub add_start_index: bool,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 4000,
            chunk_overlap: 200,
            keep_separator: KeepSeparator::Start,
            separator_regex: false,
            strip_whitespace: true,
            add_start_index: false,
        }
    }
}

impl ChunkConfig {
    /// Create config with explicit size and overlap, defaults elsewhere
    #[must_use]
    pub fn sized(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            ..Default::default()
        }
    }

    /// Create config optimized for embeddings (smaller, focused chunks)
    #[must_use]
    pub fn for_embeddings() -> Self {
        Self {
            chunk_size: 512,
            chunk_overlap: 64,
            ..Default::default()
        }
    }

    /// Create config optimized for LLM context (larger, comprehensive chunks)
    #[must_use]
    pub fn for_llm_context() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 200,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be > 0".to_string());
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            ));
        }

        Ok(())
    }
}

/// What happens to a matched separator
///
/// Either it is dropped from the fragments and re-inserted when adjacent
/// fragments are merged, or it stays attached to one side of the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeepSeparator {
    /// Drop separators from fragments; merging re-joins with the separator
    Discard,

    /// Keep each separator at the start of the fragment that follows it
    Start,

    /// Keep each separator at the end of the fragment that precedes it
    End,
}

impl Default for KeepSeparator {
    fn default() -> Self {
        Self::Start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ChunkConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_configs_valid() {
        assert!(ChunkConfig::for_embeddings().validate().is_ok());
        assert!(ChunkConfig::for_llm_context().validate().is_ok());
        assert!(ChunkConfig::sized(100, 20).validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        // Invalid: zero size
        let config = ChunkConfig::sized(0, 0);
        assert!(config.validate().is_err());

        // Invalid: overlap equal to size
        let config = ChunkConfig::sized(100, 100);
        assert!(config.validate().is_err());

        // Invalid: overlap above size
        let config = ChunkConfig::sized(100, 150);
        assert!(config.validate().is_err());

        // Valid: overlap strictly below size
        let config = ChunkConfig::sized(100, 99);
        assert!(config.validate().is_ok());

        // Valid: zero overlap
        let config = ChunkConfig::sized(1, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ChunkConfig {
            chunk_size: 300,
            chunk_overlap: 30,
            keep_separator: KeepSeparator::Discard,
            separator_regex: true,
            strip_whitespace: false,
            add_start_index: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: ChunkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
