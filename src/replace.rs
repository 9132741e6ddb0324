// Replacement and acronym tables
//
// Tables come from a CSV-shaped resource, one "key,value" row per entry with
// a header row. Entries are kept sorted longest key first so multi-word
// phrases always win over their single-word substrings. Loading fails soft:
// a missing or unreadable resource yields an empty table and a warning, and
// the replacement stages turn into no-ops.

use std::fs;
use std::path::Path;

use regex::{Captures, Regex};
use tracing::warn;

/// Ordered lowercase-key replacement mapping, longest key first.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    entries: Vec<(String, String)>,
}

impl ReplacementTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse CSV text: first row is a header and is skipped; rows without a
    /// comma or with an empty key/value are skipped; the key is lowercased
    /// and the value keeps everything after the first comma.
    pub fn from_csv(text: &str) -> Self {
        let mut entries: Vec<(String, String)> = text
            .lines()
            .skip(1)
            .filter_map(|line| {
                let line = line.trim();
                let (key, value) = line.split_once(',')?;
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                if key.is_empty() || value.is_empty() {
                    return None;
                }
                Some((key, value))
            })
            .collect();
        entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        Self { entries }
    }

    /// Load a table from a file, soft-failing to an empty table.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_csv(&text),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    %err,
                    "replacement table unavailable, continuing with an empty table"
                );
                Self::empty()
            }
        }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The lookup tables one pipeline run works against. Immutable after load;
/// shareable across pipelines without locking. Reloading means building a
/// fresh `Tables` value.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub words: ReplacementTable,
    pub acronyms: ReplacementTable,
}

impl Tables {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(words_path: &Path, acronyms_path: &Path) -> Self {
        Self {
            words: ReplacementTable::load(words_path),
            acronyms: ReplacementTable::load(acronyms_path),
        }
    }
}

// Whole-word case-insensitive matcher for one table entry. Escaping makes
// dots inside acronym keys match literal dots.
fn compile(key: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(key))).ok()
}

/// Replaces whole words and phrases from a table, longest key first. The
/// replacement's first letter mirrors the case of the matched text's first
/// letter; the remainder is left as the table wrote it.
pub struct WordReplacementEngine {
    rules: Vec<(Regex, String)>,
}

impl WordReplacementEngine {
    pub fn new(table: &ReplacementTable) -> Self {
        let rules = table
            .entries()
            .iter()
            .filter_map(|(key, value)| compile(key).map(|re| (re, value.clone())))
            .collect();
        Self { rules }
    }

    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (re, replacement) in &self.rules {
            text = re
                .replace_all(&text, |caps: &Captures| {
                    let matched_upper = caps[0]
                        .chars()
                        .next()
                        .map_or(false, |c| c.is_uppercase());
                    if matched_upper {
                        uppercase_first(replacement)
                    } else {
                        replacement.clone()
                    }
                })
                .into_owned();
        }
        text
    }
}

/// Replaces known acronyms with their spoken expansions. Same longest-first
/// whole-word policy, but no case adjustment.
pub struct AcronymConverter {
    rules: Vec<(Regex, String)>,
}

impl AcronymConverter {
    pub fn new(table: &ReplacementTable) -> Self {
        let rules = table
            .entries()
            .iter()
            .filter_map(|(key, value)| compile(key).map(|re| (re, value.clone())))
            .collect();
        Self { rules }
    }

    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (re, replacement) in &self.rules {
            text = re.replace_all(&text, replacement.as_str()).into_owned();
        }
        text
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "word,replacement\nhello,heo lô\nhello world,heo lô quơ\nai,ây ai\n";

    #[test]
    fn test_parse_skips_header_and_bad_rows() {
        let table = ReplacementTable::from_csv("k,v\n\nnocomma\n,empty\nok,xong\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0], ("ok".to_string(), "xong".to_string()));
    }

    #[test]
    fn test_longest_key_first() {
        let table = ReplacementTable::from_csv(CSV);
        assert_eq!(table.entries()[0].0, "hello world");
    }

    #[test]
    fn test_longest_match_wins() {
        let table = ReplacementTable::from_csv(CSV);
        let engine = WordReplacementEngine::new(&table);
        assert_eq!(engine.apply("hello world"), "heo lô quơ");
        assert_eq!(engine.apply("hello bạn"), "heo lô bạn");
    }

    #[test]
    fn test_case_mirrored_on_first_letter() {
        let table = ReplacementTable::from_csv(CSV);
        let engine = WordReplacementEngine::new(&table);
        assert_eq!(engine.apply("Hello bạn"), "Heo lô bạn");
    }

    #[test]
    fn test_whole_word_only() {
        let table = ReplacementTable::from_csv(CSV);
        let engine = WordReplacementEngine::new(&table);
        // "ai" must not fire inside "bài"
        assert_eq!(engine.apply("bài hát"), "bài hát");
        assert_eq!(engine.apply("ai đó"), "ây ai đó");
    }

    #[test]
    fn test_acronym_dots_match_literally() {
        let table = ReplacementTable::from_csv("k,v\ntp.hcm,thành phố hồ chí minh\n");
        let engine = AcronymConverter::new(&table);
        assert_eq!(engine.apply("ở TP.HCM nhé"), "ở thành phố hồ chí minh nhé");
        // The dot is not a wildcard
        assert_eq!(engine.apply("tpxhcm"), "tpxhcm");
    }

    #[test]
    fn test_empty_table_is_noop() {
        let engine = WordReplacementEngine::new(&ReplacementTable::empty());
        assert_eq!(engine.apply("hello"), "hello");
    }

    #[test]
    fn test_load_missing_file_soft_fails() {
        let table = ReplacementTable::load(Path::new("/nonexistent/words.csv"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", CSV).unwrap();
        let table = ReplacementTable::load(file.path());
        assert_eq!(table.len(), 3);
    }
}
