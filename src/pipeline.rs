//! Normalization pipeline
//!
//! Ties the stages together in a fixed order: cleanup, unicode, symbols,
//! punctuation, numeric expressions, table replacement, transliteration,
//! acronyms, whitespace. Every stage is a pure string rewrite, so the whole
//! pipeline is deterministic: same tables, same options, same output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunker;
use crate::cleaner;
use crate::numeric;
use crate::replace::{AcronymConverter, Tables, WordReplacementEngine};
use crate::translit;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PipelineOptions {
    /// Rewrite foreign-looking words into Vietnamese-readable syllables.
    pub enable_transliteration: bool,
    /// Emit a trace record with before/after text for every stage.
    pub debug: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            enable_transliteration: true,
            debug: false,
        }
    }
}

/// Text normalizer for Vietnamese speech synthesis. Compiles its replacement
/// rules once at construction; `normalize` and `process` borrow immutably,
/// so one pipeline can serve many callers.
pub struct NormalizationPipeline {
    options: PipelineOptions,
    words: WordReplacementEngine,
    acronyms: AcronymConverter,
}

impl NormalizationPipeline {
    pub fn new(tables: &Tables, options: PipelineOptions) -> Self {
        Self {
            options,
            words: WordReplacementEngine::new(&tables.words),
            acronyms: AcronymConverter::new(&tables.acronyms),
        }
    }

    fn stage<F>(&self, name: &str, input: String, f: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        let output = f(&input);
        if self.options.debug {
            debug!(stage = name, before = %input, after = %output, "normalization stage");
        }
        output
    }

    /// Run the full stage sequence over one piece of text.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = self.stage("clean", text.to_string(), cleaner::clean_for_tts);
        let text = self.stage("unicode", text, cleaner::normalize_unicode);
        let text = self.stage("symbols", text, cleaner::remove_special_chars);
        let text = self.stage("punctuation", text, cleaner::normalize_punctuation);
        let text = self.stage("numeric", text, numeric::convert_numeric_expressions);
        let text = self.stage("words", text, |t| self.words.apply(t));
        let text = if self.options.enable_transliteration {
            self.stage("transliterate", text, translit::transliterate_text)
        } else {
            text
        };
        let text = self.stage("acronyms", text, |t| self.acronyms.apply(t));
        self.stage("whitespace", text, cleaner::clean_whitespace)
    }

    /// Normalize and chunk in one call, ready for synthesis.
    pub fn process(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }
        chunker::chunk_text(&normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replace::ReplacementTable;

    fn pipeline() -> NormalizationPipeline {
        NormalizationPipeline::new(&Tables::empty(), PipelineOptions::default())
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let p = pipeline();
        assert_eq!(p.normalize(""), "");
        assert!(p.process("").is_empty());
        assert!(p.process("   \n ").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let p = pipeline();
        let input = "Giá 50.000đ, giảm 10% 😀";
        assert_eq!(p.normalize(input), p.normalize(input));
    }

    #[test]
    fn test_currency_and_percent_end_to_end() {
        let p = pipeline();
        let out = p.normalize("Giá 50.000đ, giảm 10%");
        assert!(out.contains("năm mươi nghìn đồng"), "{out}");
        assert!(out.contains("mười phần trăm"), "{out}");
        assert!(!out.chars().any(|c| c.is_ascii_digit()), "{out}");
    }

    #[test]
    fn test_word_replacement_applied() {
        let tables = Tables {
            words: ReplacementTable::from_csv("k,v\nhello,heo lô\n"),
            acronyms: ReplacementTable::empty(),
        };
        let p = NormalizationPipeline::new(&tables, PipelineOptions::default());
        let out = p.normalize("hello bạn");
        assert!(out.contains("heo lô"), "{out}");
    }

    #[test]
    fn test_transliteration_toggle() {
        let on = pipeline();
        let off = NormalizationPipeline::new(
            &Tables::empty(),
            PipelineOptions {
                enable_transliteration: false,
                ..Default::default()
            },
        );
        // "computer" fails the Vietnamese shape check and gets rewritten
        // only when the stage is enabled
        assert_ne!(on.normalize("computer"), "computer");
        assert_eq!(off.normalize("computer"), "computer");
    }

    #[test]
    fn test_process_chunks_sentences() {
        let p = NormalizationPipeline::new(
            &Tables::empty(),
            PipelineOptions {
                enable_transliteration: false,
                ..Default::default()
            },
        );
        let chunks = p.process("Xin chào các bạn. Hôm nay trời đẹp");
        assert_eq!(chunks, vec!["Xin chào các bạn.", "Hôm nay trời đẹp."]);
    }

    #[test]
    fn test_date_and_time_end_to_end() {
        let p = pipeline();
        let out = p.normalize("hẹn lúc 15:30 ngày 20/11/2023");
        assert!(out.contains("mười lăm giờ ba mươi phút"), "{out}");
        assert!(out.contains("ngày hai mươi tháng mười một năm"), "{out}");
    }

    #[test]
    fn test_debug_traces_do_not_alter_output() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        let quiet = pipeline();
        let traced = NormalizationPipeline::new(
            &Tables::empty(),
            PipelineOptions {
                debug: true,
                ..Default::default()
            },
        );
        let input = "Giá 50.000đ lúc 15:30";
        assert_eq!(quiet.normalize(input), traced.normalize(input));
    }

    #[test]
    fn test_options_serde_defaults() {
        let options: PipelineOptions = serde_json::from_str("{}").unwrap();
        assert!(options.enable_transliteration);
        assert!(!options.debug);
    }
}
