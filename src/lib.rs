//! Vietnamese text normalization and chunking for speech synthesis.
//!
//! The pipeline rewrites everything a voice model cannot read aloud: numeric
//! expressions (dates, times, currency, phone numbers, measurements) become
//! Vietnamese number words, foreign words become Vietnamese-readable
//! syllables, acronyms expand from lookup tables, and the cleaned text is
//! split into synthesis-sized chunks that never cross a line boundary.
//!
//! Every stage is a pure, deterministic string rewrite. Typical use:
//!
//! ```
//! use vi_tts_norm::{NormalizationPipeline, PipelineOptions, Tables};
//!
//! let pipeline = NormalizationPipeline::new(&Tables::empty(), PipelineOptions::default());
//! let chunks = pipeline.process("Giá 50.000đ, giảm 10%");
//! assert!(!chunks.is_empty());
//! ```

pub mod chunker;
pub mod cleaner;
pub mod detector;
pub mod number;
pub mod numeric;
pub mod pipeline;
pub mod replace;
pub mod synth;
pub mod translit;

pub use chunker::{chunk_text, MAX_CHUNK_LENGTH, MIN_CHUNK_LENGTH};
pub use detector::is_vietnamese_word;
pub use number::number_to_words;
pub use pipeline::{NormalizationPipeline, PipelineOptions};
pub use replace::{ReplacementTable, Tables};
pub use synth::{
    synthesize_chunks, ChunkAudio, RawAudio, SynthesisOptions, Synthesizer,
};
pub use translit::{transliterate_text, transliterate_word};
