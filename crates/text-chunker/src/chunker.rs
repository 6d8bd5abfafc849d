use crate::config::{ChunkConfig, KeepSeparator};
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::length::{CharCount, FnMeasure, LengthMeasure};
use crate::types::{Chunk, Document, Metadata};
use regex::Regex;
use std::collections::VecDeque;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Default separator priority for plain text: paragraph breaks, line breaks,
/// word breaks, then the hard character cut.
pub const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Metadata key under which document operations record chunk offsets
pub const START_INDEX_KEY: &str = "start_index";

/// Main chunker interface for recursive structure-aware text splitting
///
/// Holds a validated configuration, a compiled separator priority list, and
/// a pluggable length measure. All state is per-call; a `TextChunker` can be
/// shared freely across threads.
pub struct TextChunker {
    config: ChunkConfig,
    separators: Vec<CompiledSeparator>,
    length: Arc<dyn LengthMeasure>,
}

impl TextChunker {
    /// Create a chunker with the plain-text separator defaults
    pub fn new(config: ChunkConfig) -> Result<Self> {
        Self::with_separators(config, DEFAULT_SEPARATORS.map(str::to_owned).to_vec())
    }

    /// Create a chunker with a caller-supplied separator priority list
    ///
    /// Separators are tried in order, most structurally meaningful first.
    /// An empty string entry splits into grapheme clusters and guarantees
    /// the recursion bottoms out.
    pub fn with_separators(config: ChunkConfig, separators: Vec<String>) -> Result<Self> {
        config.validate().map_err(ChunkerError::InvalidConfig)?;
        if separators.is_empty() {
            return Err(ChunkerError::invalid_config(
                "at least one separator is required",
            ));
        }

        let separators = separators
            .into_iter()
            .map(|raw| CompiledSeparator::compile(raw, config.separator_regex))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            separators,
            length: Arc::new(CharCount),
        })
    }

    /// Create a chunker that splits on a single separator only
    ///
    /// Fragments larger than `chunk_size` are emitted whole; there is no
    /// finer separator to fall back on.
    pub fn single_separator(config: ChunkConfig, separator: impl Into<String>) -> Result<Self> {
        Self::with_separators(config, vec![separator.into()])
    }

    /// Create a chunker from the static per-language separator table
    ///
    /// The table entries are regex patterns, so `separator_regex` is implied
    /// regardless of its value in `config`.
    pub fn for_language(config: ChunkConfig, language: Language) -> Result<Self> {
        let config = ChunkConfig {
            separator_regex: true,
            ..config
        };
        Self::with_separators(
            config,
            language.separators().into_iter().map(str::to_owned).collect(),
        )
    }

    /// Builder: replace the length measure (character count by default)
    #[must_use]
    pub fn with_length_measure(mut self, measure: impl LengthMeasure + 'static) -> Self {
        self.length = Arc::new(measure);
        self
    }

    /// Builder: use a plain closure as the length measure
    #[must_use]
    pub fn with_length_fn<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> usize + Send + Sync + 'static,
    {
        self.with_length_measure(FnMeasure(f))
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Split text into chunks no larger than `chunk_size`
    ///
    /// Never fails: pathological input degrades through ever finer
    /// separators down to a grapheme-level cut. Empty input yields an empty
    /// sequence. The one permitted size violation is a fragment that no
    /// remaining separator can subdivide; it is emitted whole and logged.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.split_recursive(text, &self.separators)
    }

    /// Split every document, tagging each chunk with its source metadata
    pub fn split_documents<'a, I>(&self, documents: I) -> Vec<Chunk>
    where
        I: IntoIterator<Item = &'a Document>,
    {
        documents
            .into_iter()
            .flat_map(|doc| self.chunk_document(doc))
            .collect()
    }

    /// Split one document into metadata-tagged chunks
    pub fn chunk_document(&self, document: &Document) -> Vec<Chunk> {
        self.chunk_with_metadata(&document.content, &document.metadata)
    }

    /// Split each text into chunks carrying the metadata at the same index
    ///
    /// Texts without a corresponding metadata entry get empty metadata.
    pub fn create_documents(&self, texts: &[&str], metadatas: &[Metadata]) -> Vec<Chunk> {
        let empty = Metadata::new();
        texts
            .iter()
            .enumerate()
            .flat_map(|(i, text)| {
                self.chunk_with_metadata(text, metadatas.get(i).unwrap_or(&empty))
            })
            .collect()
    }

    fn chunk_with_metadata(&self, text: &str, metadata: &Metadata) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut prev_start: Option<usize> = None;

        for piece in self.split_text(text) {
            let mut meta = metadata.clone();
            if self.config.add_start_index {
                match locate(text, &piece, prev_start) {
                    Some(index) => {
                        meta.insert(
                            START_INDEX_KEY.to_string(),
                            serde_json::Value::from(index as u64),
                        );
                        prev_start = Some(index);
                    }
                    None => {
                        // Possible when a regex separator is re-joined as its
                        // raw pattern; the offset is undefined there.
                        log::debug!("chunk not found in source text, start_index omitted");
                    }
                }
            }
            chunks.push(Chunk::new(piece, meta));
        }

        chunks
    }

    fn split_recursive(&self, text: &str, separators: &[CompiledSeparator]) -> Vec<String> {
        // Pick the first separator that occurs in the text; the empty string
        // always matches. Everything after it is the fallback tail.
        let mut index = separators.len() - 1;
        let mut tail: &[CompiledSeparator] = &[];
        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_hard_cut() {
                index = i;
                tail = &[];
                break;
            }
            if candidate.occurs_in(text) {
                index = i;
                tail = &separators[i + 1..];
                break;
            }
        }
        let separator = &separators[index];

        let fragments = self.split_on_separator(text, separator);

        // With separators retained in the fragments, merging joins with
        // nothing; otherwise the separator is re-inserted between fragments.
        let joiner = match self.config.keep_separator {
            KeepSeparator::Discard => separator.raw.as_str(),
            KeepSeparator::Start | KeepSeparator::End => "",
        };

        let mut final_chunks = Vec::new();
        let mut good: Vec<String> = Vec::new();

        for fragment in fragments {
            let len = self.length.measure(&fragment);
            if len < self.config.chunk_size {
                good.push(fragment);
                continue;
            }

            if !good.is_empty() {
                final_chunks.extend(self.merge_fragments(std::mem::take(&mut good), joiner));
            }

            if tail.is_empty() {
                log::warn!(
                    "Created a chunk of size {len}, which is longer than the configured chunk_size {}",
                    self.config.chunk_size
                );
                final_chunks.push(fragment);
            } else {
                final_chunks.extend(self.split_recursive(&fragment, tail));
            }
        }

        if !good.is_empty() {
            final_chunks.extend(self.merge_fragments(good, joiner));
        }

        final_chunks
    }

    /// Split `text` on one separator, honoring `keep_separator`
    ///
    /// Empty fragments are dropped; the separator text itself is never lost
    /// unless `keep_separator` is `Discard`.
    fn split_on_separator(&self, text: &str, separator: &CompiledSeparator) -> Vec<String> {
        let Some(regex) = separator.regex.as_ref() else {
            // Hard cut: grapheme clusters are the indivisible unit.
            return text.graphemes(true).map(str::to_owned).collect();
        };

        let mut fragments = Vec::new();
        match self.config.keep_separator {
            KeepSeparator::Discard => {
                fragments.extend(regex.split(text).map(str::to_owned));
            }
            KeepSeparator::Start => {
                let mut cut = 0;
                for m in regex.find_iter(text) {
                    fragments.push(text[cut..m.start()].to_owned());
                    cut = m.start();
                }
                fragments.push(text[cut..].to_owned());
            }
            KeepSeparator::End => {
                let mut cut = 0;
                for m in regex.find_iter(text) {
                    fragments.push(text[cut..m.end()].to_owned());
                    cut = m.end();
                }
                fragments.push(text[cut..].to_owned());
            }
        }

        fragments.retain(|fragment| !fragment.is_empty());
        fragments
    }

    /// Greedily pack fragments into chunks of at most `chunk_size`,
    /// retaining a tail of whole fragments as overlap for the next chunk
    ///
    /// The retained tail is never re-split; it seeds the next chunk as an
    /// opaque prefix.
    fn merge_fragments(&self, fragments: Vec<String>, joiner: &str) -> Vec<String> {
        let chunk_size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;
        let joiner_len = self.length.measure(joiner);
        // Joining costs nothing when the buffer is empty.
        let join_cost = |buffer: &VecDeque<String>| if buffer.is_empty() { 0 } else { joiner_len };

        let mut chunks = Vec::new();
        let mut current: VecDeque<String> = VecDeque::new();
        let mut total = 0;

        for fragment in fragments {
            let len = self.length.measure(&fragment);

            if total + len + join_cost(&current) > chunk_size && !current.is_empty() {
                if let Some(chunk) = self.join_fragments(&current, joiner) {
                    chunks.push(chunk);
                }

                // Drop fragments from the front until the retained tail fits
                // inside the overlap budget and leaves room for the incoming
                // fragment.
                while total > overlap
                    || (total > 0 && total + len + join_cost(&current) > chunk_size)
                {
                    let Some(front) = current.pop_front() else {
                        break;
                    };
                    total -= self.length.measure(&front) + join_cost(&current);
                }
            }

            total += len + join_cost(&current);
            current.push_back(fragment);
        }

        if let Some(chunk) = self.join_fragments(&current, joiner) {
            chunks.push(chunk);
        }

        chunks
    }

    fn join_fragments(&self, fragments: &VecDeque<String>, joiner: &str) -> Option<String> {
        let text = fragments
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(joiner);
        let text = if self.config.strip_whitespace {
            text.trim().to_string()
        } else {
            text
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One entry of the separator priority list, compiled once at construction
struct CompiledSeparator {
    raw: String,
    /// `None` for the empty separator (grapheme-level hard cut)
    regex: Option<Regex>,
}

impl CompiledSeparator {
    fn compile(raw: String, is_regex: bool) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Self { raw, regex: None });
        }

        let pattern = if is_regex {
            raw.clone()
        } else {
            regex::escape(&raw)
        };
        let regex = Regex::new(&pattern).map_err(|source| ChunkerError::InvalidSeparator {
            pattern,
            source,
        })?;

        Ok(Self {
            raw,
            regex: Some(regex),
        })
    }

    fn is_hard_cut(&self) -> bool {
        self.regex.is_none()
    }

    fn occurs_in(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(text))
    }
}

/// Find `piece` in `text`, searching past the previous chunk's start so
/// repeated content resolves to monotonically increasing offsets
fn locate(text: &str, piece: &str, prev_start: Option<usize>) -> Option<usize> {
    let mut from = prev_start.map_or(0, |start| start + 1);
    while from < text.len() && !text.is_char_boundary(from) {
        from += 1;
    }
    text.get(from..)?.find(piece).map(|pos| from + pos)
}
