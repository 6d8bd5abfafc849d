//! # Text Chunker
//!
//! Recursive structure-aware text chunking for semantic search and AI
//! context windows.
//!
//! ## Philosophy
//!
//! The chunker walks an ordered list of separators, most structurally
//! meaningful first (paragraph breaks before sentence breaks before word
//! breaks), and only falls back to finer separators for pieces that are
//! still too large. Small adjacent pieces are merged back together up to
//! the size limit, and a configurable tail of each chunk is repeated at the
//! start of the next one so context survives the split boundary.
//!
//! Per-language behavior is data, not code: a language maps to a separator
//! table, and the algorithm never branches on the language again.
//!
//! ## Architecture
//!
//! ```text
//! Input Text / Documents
//!     │
//!     ├──> Separator Selection (first entry that occurs in the text)
//!     │
//!     ├──> Recursive Splitting
//!     │    ├─> Split on the chosen separator (kept per configuration)
//!     │    ├─> Recurse into oversized fragments with finer separators
//!     │    └─> Grapheme-level hard cut as the terminal fallback
//!     │
//!     └──> Greedy Merge
//!          ├─> Pack fragments up to chunk_size
//!          ├─> Carry a fragment tail forward as overlap
//!          └─> Emit ordered chunks (with inherited metadata)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use text_chunker::{ChunkConfig, TextChunker};
//!
//! let config = ChunkConfig::sized(100, 20);
//! let chunker = TextChunker::new(config).expect("valid configuration");
//!
//! let text = "The most intuitive strategy is to split documents based on \
//!             their length.\n\nThis simple yet effective approach ensures \
//!             that each chunk doesn't exceed a specified size limit.";
//!
//! for chunk in chunker.split_text(text) {
//!     assert!(chunk.chars().count() <= 100);
//! }
//! ```

mod chunker;
mod config;
mod error;
mod language;
mod length;
mod types;

pub use chunker::{TextChunker, DEFAULT_SEPARATORS, START_INDEX_KEY};
pub use config::{ChunkConfig, KeepSeparator};
pub use error::{ChunkerError, Result};
pub use language::Language;
pub use length::{CharCount, LengthMeasure, TokenCount};
pub use types::{Chunk, Document, Metadata};
