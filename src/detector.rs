// Vietnamese word detection
//
// Heuristic classifier: does a token look like a well-formed Vietnamese
// syllable? A diacritic settles it immediately; f/w/z/j settles it the other
// way; otherwise the token is split into onset / vowel cluster / coda and
// each part is checked against the valid Vietnamese sets.
//
// This is a syllable-shape heuristic, not a dictionary: CVC-shaped English
// words like "man" or "cat" pass. That over-acceptance is intentional and
// load-bearing for the transliteration stage, which must leave such words
// alone.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VN_DIACRITIC: Regex = Regex::new(
        "(?i)[àáảãạăằắẳẵặâầấẩẫậèéẻẽẹêềếểễệìíỉĩịòóỏõọôồốổỗộơờớởỡợùúủũụưừứửữựỳýỷỹỵđ]"
    )
    .unwrap();
    static ref FOREIGN_LETTERS: Regex = Regex::new("(?i)[fwzj]").unwrap();
    // Onset cluster - vowel cluster - coda cluster, over the plain vowels
    static ref SYLLABLE_SHAPE: Regex =
        Regex::new("^([^ueoaiy]*)([ueoaiy]+)([^ueoaiy]*)$").unwrap();
    static ref VALID_ONSETS: HashSet<&'static str> = HashSet::from([
        "b", "c", "d", "đ", "g", "h", "k", "l", "m", "n", "p", "q", "r", "s", "t", "v", "x",
        "ch", "gh", "gi", "kh", "ng", "nh", "ph", "qu", "th", "tr",
    ]);
    static ref VALID_CODAS: HashSet<&'static str> =
        HashSet::from(["p", "t", "c", "m", "n", "ng", "ch", "nh"]);
}

// Double-vowel shapes Vietnamese does not use, with the genuine Vietnamese
// clusters excepted
const INVALID_DIPHTHONGS: [&str; 6] = ["ee", "oo", "ea", "oa", "ae", "ie"];
const DIPHTHONG_EXCEPTIONS: [&str; 4] = ["oa", "oe", "ua", "uy"];

/// Classify a single token as Vietnamese or foreign.
pub fn is_vietnamese_word(word: &str) -> bool {
    let w = word.trim().to_lowercase();
    if w.is_empty() {
        return false;
    }

    if VN_DIACRITIC.is_match(&w) {
        return true;
    }

    if FOREIGN_LETTERS.is_match(&w) {
        return false;
    }

    let caps = match SYLLABLE_SHAPE.captures(&w) {
        Some(c) => c,
        // No vowel at all
        None => return false,
    };
    let (onset, vowel, coda) = (&caps[1], &caps[2], &caps[3]);

    if !onset.is_empty() && !VALID_ONSETS.contains(onset) {
        return false;
    }
    if !coda.is_empty() && !VALID_CODAS.contains(coda) {
        return false;
    }

    if INVALID_DIPHTHONGS.iter().any(|d| vowel.contains(d))
        && !DIPHTHONG_EXCEPTIONS.contains(&vowel)
    {
        return false;
    }

    true
}
