use crate::error::{ChunkerError, Result};
use std::path::Path;
use tokenizers::Tokenizer;

/// Pluggable measurement used to compare content size against `chunk_size`
///
/// Implementations must be cheap enough to call once per fragment; the
/// chunker never caches measurements.
pub trait LengthMeasure: Send + Sync {
    /// Measure `text` in this measure's unit (characters, tokens, ...)
    fn measure(&self, text: &str) -> usize;
}

/// Character-based measurement (Unicode scalar values)
///
/// The default: consistent across text kinds and requires no collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCount;

impl LengthMeasure for CharCount {
    fn measure(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// Token-based measurement backed by a HuggingFace tokenizer
///
/// Useful when chunk budgets are expressed in model tokens. The tokenizer is
/// an external collaborator; this type only counts (`encode` then length).
pub struct TokenCount {
    tokenizer: Tokenizer,
}

impl TokenCount {
    /// Wrap an already-loaded tokenizer
    #[must_use]
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Load a tokenizer from a `tokenizer.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let tokenizer = Tokenizer::from_file(path.as_ref())
            .map_err(|e| ChunkerError::tokenizer(format!("Tokenizer load failed: {e}")))?;
        Ok(Self::new(tokenizer))
    }
}

impl LengthMeasure for TokenCount {
    fn measure(&self, text: &str) -> usize {
        match self.tokenizer.encode(text, false) {
            Ok(encoding) => encoding.get_ids().len(),
            Err(e) => {
                log::warn!("Token counting failed, falling back to character length: {e}");
                text.chars().count()
            }
        }
    }
}

/// Adapter turning any `Fn(&str) -> usize` into a [`LengthMeasure`]
pub(crate) struct FnMeasure<F>(pub F);

impl<F> LengthMeasure for FnMeasure<F>
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn measure(&self, text: &str) -> usize {
        (self.0)(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_is_scalar_values() {
        assert_eq!(CharCount.measure(""), 0);
        assert_eq!(CharCount.measure("hello"), 5);
        // 5 scalar values, 7 bytes
        assert_eq!(CharCount.measure("héllo"), 5);
    }

    #[test]
    fn test_fn_measure_adapter() {
        let words = FnMeasure(|text: &str| text.split_whitespace().count());
        assert_eq!(words.measure("one two  three"), 3);
        assert_eq!(words.measure(""), 0);
    }

    #[test]
    fn test_token_count_missing_file_is_an_error() {
        let result = TokenCount::from_file("/nonexistent/tokenizer.json");
        assert!(matches!(result, Err(ChunkerError::Tokenizer(_))));
    }
}
