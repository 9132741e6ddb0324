// Text cleanup
//
// Unicode canonicalization plus removal/expansion of everything a voice
// cannot speak: URLs, emails, emoji, decorative marks, stray punctuation.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref EMOJI: Regex = Regex::new(concat!(
        "[\\x{1F600}-\\x{1F64F}]|[\\x{1F300}-\\x{1F5FF}]|[\\x{1F680}-\\x{1F6FF}]|",
        "[\\x{1F1E0}-\\x{1F1FF}]|[\\x{2600}-\\x{26FF}]|[\\x{2700}-\\x{27BF}]|",
        "[\\x{1F900}-\\x{1F9FF}]|[\\x{1F018}-\\x{1F270}]|[\\x{238C}-\\x{2454}]|",
        "[\\x{20D0}-\\x{20FF}]|\\x{FE0F}|\\x{200D}"
    ))
    .unwrap();
    static ref DECORATIVE: Regex = Regex::new(r#"[\\()¯"“”]"#).unwrap();
    static ref SPACED_EM_DASH: Regex = Regex::new("\\s—").unwrap();
    static ref LONE_UNDERSCORE: Regex = Regex::new(r"(?-u:\b)_(?-u:\b)").unwrap();
    // Everything outside Basic Latin..Latin Extended-B and Latin Extended
    // Additional cannot be spoken by the voice and is dropped
    static ref NON_LATIN: Regex =
        Regex::new(r"[^\x00-\x{024F}\x{1E00}-\x{1EFF}]").unwrap();

    static ref URL: Regex = Regex::new(r"https?://\S+").unwrap();
    static ref WWW: Regex = Regex::new(r"www\.\S+").unwrap();
    static ref EMAIL: Regex = Regex::new(r"\S+@\S+\.\S+").unwrap();

    static ref CURLY_SINGLE: Regex = Regex::new("[‘’‚‛]").unwrap();
    static ref DASH_VARIANTS: Regex = Regex::new("[–—−]").unwrap();
    static ref DOT_RUNS: Regex = Regex::new(r"\.{3,}").unwrap();
    static ref ELLIPSIS_CHAR: Regex = Regex::new("…").unwrap();
    static ref REPEATED_PUNCT: Regex = Regex::new(r"([!?.]){2,}").unwrap();

    static ref INLINE_WS: Regex = Regex::new(r"[^\S\n]+").unwrap();
}

/// Canonicalize to NFC so diacritics always take their composed form.
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect()
}

// A dash survives only between two digits (date and year ranges); everywhere
// else it reads as a pause and becomes a space.
fn remove_free_dashes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if c != '-' {
                return c;
            }
            let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_digit = chars.get(i + 1).map_or(false, |c| c.is_ascii_digit());
            if prev_digit || next_digit {
                '-'
            } else {
                ' '
            }
        })
        .collect()
}

/// First cleanup pass: emoji, decorations, foreign scripts.
pub fn clean_for_tts(text: &str) -> String {
    let text = EMOJI.replace_all(text, "");
    let text = DECORATIVE.replace_all(&text, "");
    let text = SPACED_EM_DASH.replace_all(&text, ".");
    let text = LONE_UNDERSCORE.replace_all(&text, " ");
    let text = remove_free_dashes(&text);
    let text = NON_LATIN.replace_all(&text, "");
    text.trim().to_string()
}

/// Remove or expand symbols that cannot be spoken. URLs and emails go first,
/// then the leftover marks are expanded or dropped.
pub fn remove_special_chars(text: &str) -> String {
    let text = URL.replace_all(text, "");
    let text = WWW.replace_all(&text, "");
    let text = EMAIL.replace_all(&text, "");

    let text = text.replace('&', " và ");
    let text = text.replace('@', " a còng ");
    let text = text.replace('#', " thăng ");
    let text = text.replace('*', "");
    let text = text.replace('_', " ");
    let text = text.replace('~', "");
    let text = text.replace('`', "");
    text.replace('^', "")
}

/// Normalize punctuation variants: quotes, dashes, ellipses, repeats.
pub fn normalize_punctuation(text: &str) -> String {
    let text = CURLY_SINGLE.replace_all(text, "'");
    let text = DASH_VARIANTS.replace_all(&text, "-");
    let text = DOT_RUNS.replace_all(&text, "...");
    let text = ELLIPSIS_CHAR.replace_all(&text, "...");
    REPEATED_PUNCT.replace_all(&text, "$1").into_owned()
}

/// Collapse whitespace runs to single spaces. Newlines are kept: the chunker
/// never lets a chunk cross a line boundary.
pub fn clean_whitespace(text: &str) -> String {
    let collapsed = INLINE_WS.replace_all(text, " ");
    collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc() {
        // Decomposed e + combining acute composes to a single scalar
        assert_eq!(normalize_unicode("e\u{0301}"), "é");
    }

    #[test]
    fn test_emoji_removed() {
        assert_eq!(clean_for_tts("xin chào 😀"), "xin chào");
    }

    #[test]
    fn test_dash_between_digits_kept() {
        let out = clean_for_tts("1873-1907 và xanh-đỏ");
        assert!(out.contains("1873-1907"));
        assert!(!out.contains("xanh-đỏ"));
    }

    #[test]
    fn test_non_latin_stripped() {
        assert_eq!(clean_for_tts("chào 世界"), "chào");
    }

    #[test]
    fn test_url_and_email_removed() {
        let out = remove_special_chars("xem https://example.com/a nhé");
        assert!(!out.contains("https"));
        let out = remove_special_chars("gửi tới ai@example.com nhé");
        assert!(!out.contains("example.com"));
    }

    #[test]
    fn test_symbol_expansion() {
        assert_eq!(remove_special_chars("A & B"), "A  và  B");
        assert_eq!(remove_special_chars("x*y"), "xy");
    }

    #[test]
    fn test_punctuation_normalized() {
        // Dot runs fold to an ellipsis which the repeat collapse then
        // reduces to a single stop
        assert_eq!(normalize_punctuation("rồi….."), "rồi.");
        assert_eq!(normalize_punctuation("sao??!"), "sao!");
        assert_eq!(normalize_punctuation("à– ừ"), "à- ừ");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(clean_whitespace("a   b\t c"), "a b c");
        assert_eq!(clean_whitespace("  a \n\n b  "), "a\n\nb");
    }
}
