// Phonological transliteration
//
// Approximates foreign (mostly English) words with Vietnamese-readable
// syllables. Three ordered rule tiers: high-priority (initial clusters and
// fixed endings), ending rules (anchored at token end), general
// single-character rules. After the first whole-token pass the intermediate
// result is split into syllables and the full tier set is re-applied per
// syllable, because end-anchored rules must now fire at end-of-syllable.
// The two passes are not equivalent to one; both are required.
//
// This is a heuristic approximation, not a phonetic dictionary. Words the
// detector accepts as Vietnamese are returned unchanged.

use lazy_static::lazy_static;
use regex::Regex;

use crate::detector::is_vietnamese_word;

// Every vowel letter a syllable nucleus can contain, plain and with diacritics
const VOWELS: &str = "aeiouăâêôơưáàảãạắằẳẵặấầẩẫậéèẻẽẹếềểễệíìỉĩịóòỏõọốồổỗộớờởỡợúùủũụứừửữựýỳỷỹỵ";
const SYLLABLE_CODAS: &str = "ptcmngs";
const VALID_FINALS: &str = "ptcmngs";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxz";
const COLLAPSIBLE: &str = "brlptdgmnckxsvfzjwqh";
const VALID_PAIRS: [&str; 9] = ["ch", "th", "ph", "sh", "ng", "tr", "nh", "gh", "kh"];

type Rule = (Regex, &'static str);

fn rules(defs: &[(&str, &'static str)]) -> Vec<Rule> {
    defs.iter()
        .map(|(p, r)| (Regex::new(p).unwrap(), *r))
        .collect()
}

lazy_static! {
    // Tier 1: word-initial consonant clusters and fixed endings.
    // `^str` runs before `^st` (and `^sch` after `^st`) to reproduce the
    // original lookahead ordering with plain patterns.
    static ref HIGH_PRIORITY_RULES: Vec<Rule> = rules(&[
        (r"tion$", "ân"),
        (r"sion$", "ân"),
        (r"age$", "ây"),
        (r"ing$", "ing"),
        (r"ture$", "chờ"),
        (r"cial$", "xô"),
        (r"tial$", "xô"),
        (r"aught", "ót"),
        (r"ought", "ót"),
        (r"ound", "ao"),
        (r"ight", "ai"),
        (r"eigh", "ây"),
        (r"ough", "ao"),
        (r"\bstr", "tr"),
        (r"\bst", "t"),
        (r"\bsch", "c"),
        (r"\bsc|sk", "c"),
        (r"\bsp", "p"),
        (r"\btr", "tr"),
        (r"\bbr", "r"),
        (r"\bcr|pr|gr|dr|fr", "r"),
        (r"\bbl|cl|sl|pl", "l"),
        (r"\bfl", "ph"),
        (r"ck", "c"),
        (r"sh", "s"),
        (r"ch", "ch"),
        (r"th", "th"),
        (r"ph", "ph"),
        (r"wh", "q"),
        (r"qu", "q"),
        (r"kn", "n"),
        (r"wr", "r"),
    ]);

    // Tier 2: rhymes, anchored at the end of the token (or syllable in the
    // second pass).
    static ref ENDING_RULES: Vec<Rule> = rules(&[
        (r"le$", "ồ"),
        (r"ook$", "úc"),
        (r"ood$", "út"),
        (r"ool$", "un"),
        (r"oom$", "um"),
        (r"oon$", "un"),
        (r"oot$", "út"),
        (r"iend$", "en"),
        (r"end$", "en"),
        (r"eau$", "iu"),
        (r"ail$", "ain"),
        (r"ain$", "ain"),
        (r"ait$", "ât"),
        (r"oat$", "ốt"),
        (r"oad$", "ốt"),
        (r"oal$", "ôn"),
        (r"eep$", "íp"),
        (r"eet$", "ít"),
        (r"eel$", "in"),
        (r"atch$", "át"),
        (r"etch$", "éch"),
        (r"itch$", "ích"),
        (r"otch$", "ốt"),
        (r"utch$", "út"),
        (r"edge$", "ét"),
        (r"idge$", "ít"),
        (r"odge$", "ót"),
        (r"udge$", "út"),
        (r"ack$", "ác"),
        (r"eck$", "éc"),
        (r"ick$", "ích"),
        (r"ock$", "óc"),
        (r"uck$", "úc"),
        (r"ash$", "át"),
        (r"esh$", "ét"),
        (r"ish$", "ít"),
        (r"osh$", "ốt"),
        (r"ush$", "út"),
        (r"ath$", "át"),
        (r"eth$", "ét"),
        (r"ith$", "ít"),
        (r"oth$", "ót"),
        (r"uth$", "út"),
        (r"ate$", "ây"),
        (r"ete$", "ét"),
        (r"ite$", "ai"),
        (r"ote$", "ốt"),
        (r"ute$", "út"),
        (r"ade$", "ây"),
        (r"ede$", "ét"),
        (r"ide$", "ai"),
        (r"ode$", "ốt"),
        (r"ude$", "út"),
        (r"ake$", "ây"),
        (r"ame$", "am"),
        (r"ane$", "an"),
        (r"ape$", "ếp"),
        (r"eke$", "ét"),
        (r"eme$", "êm"),
        (r"ene$", "en"),
        (r"ike$", "íc"),
        (r"ime$", "am"),
        (r"ine$", "ai"),
        (r"oke$", "ốc"),
        (r"ome$", "om"),
        (r"one$", "oăn"),
        (r"uke$", "ấc"),
        (r"ume$", "uym"),
        (r"une$", "uyn"),
        (r"ase$", "ây"),
        (r"ise$", "ai"),
        (r"ose$", "âu"),
        (r"all$", "âu"),
        (r"ell$", "eo"),
        (r"ill$", "iu"),
        (r"oll$", "ôn"),
        (r"ull$", "un"),
        (r"ang$", "ang"),
        (r"eng$", "ing"),
        (r"ong$", "ong"),
        (r"ung$", "âng"),
        (r"air$", "e"),
        (r"ear$", "ia"),
        (r"ire$", "ai"),
        (r"ure$", "iu"),
        (r"our$", "ao"),
        (r"ore$", "o"),
        (r"ound$", "ao"),
        (r"ight$", "ai"),
        (r"aught$", "ót"),
        (r"ought$", "ót"),
        (r"eigh$", "ây"),
        (r"ork$", "ót"),
        (r"ee$", "i"),
        (r"ea$", "i"),
        (r"oo$", "u"),
        (r"oa$", "oa"),
        (r"oe$", "oe"),
        (r"ai$", "ai"),
        (r"ay$", "ay"),
        (r"au$", "au"),
        (r"aw$", "â"),
        (r"ei$", "ây"),
        (r"ey$", "ây"),
        (r"oi$", "oi"),
        (r"oy$", "oi"),
        (r"ou$", "u"),
        (r"ow$", "ô"),
        (r"ue$", "ue"),
        (r"ui$", "ui"),
        (r"ie$", "ai"),
        (r"eu$", "iu"),
        (r"ar$", "a"),
        (r"er$", "ơ"),
        (r"ir$", "ơ"),
        (r"or$", "o"),
        (r"ur$", "ơ"),
        (r"al$", "an"),
        (r"el$", "eo"),
        (r"il$", "iu"),
        (r"ol$", "ôn"),
        (r"ul$", "un"),
        (r"ab$", "áp"),
        (r"ad$", "át"),
        (r"ag$", "ác"),
        (r"ak$", "át"),
        (r"ap$", "áp"),
        (r"at$", "át"),
        (r"eb$", "ép"),
        (r"ed$", "ét"),
        (r"eg$", "ét"),
        (r"ek$", "éc"),
        (r"ep$", "ép"),
        (r"et$", "ét"),
        (r"ib$", "íp"),
        (r"id$", "ít"),
        (r"ig$", "íc"),
        (r"ik$", "íc"),
        (r"ip$", "íp"),
        (r"it$", "ít"),
        (r"ob$", "óp"),
        (r"od$", "ót"),
        (r"og$", "óc"),
        (r"ok$", "óc"),
        (r"op$", "óp"),
        (r"ot$", "ót"),
        (r"ub$", "úp"),
        (r"ud$", "út"),
        (r"ug$", "úc"),
        (r"uk$", "úc"),
        (r"up$", "úp"),
        (r"ut$", "út"),
        (r"am$", "am"),
        (r"an$", "an"),
        (r"em$", "em"),
        (r"en$", "en"),
        (r"im$", "im"),
        (r"in$", "in"),
        (r"om$", "om"),
        (r"on$", "on"),
        (r"um$", "âm"),
        (r"un$", "ân"),
        (r"as$", "ẹt"),
        (r"es$", "ẹt"),
        (r"is$", "ít"),
        (r"os$", "ọt"),
        (r"us$", "ợt"),
        (r"aa$", "a"),
        (r"ii$", "i"),
        (r"uu$", "u"),
    ]);

    // Tier 3: single-character substitutions, vowels last.
    static ref GENERAL_RULES: Vec<Rule> = rules(&[
        (r"j", "d"),
        (r"z", "d"),
        (r"w", "u"),
        (r"x", "x"),
        (r"v", "v"),
        (r"f", "ph"),
        (r"s", "x"),
        (r"c", "k"),
        (r"q", "ku"),
        (r"a", "a"),
        (r"e", "e"),
        (r"i", "i"),
        (r"o", "o"),
        (r"u", "u"),
    ]);

    static ref Y_AFTER_CONSONANT: Regex =
        Regex::new("([bcdfghjklmnpqrstvwxz])y").unwrap();
    static ref Y_FINAL: Regex = Regex::new("y$").unwrap();
}

fn is_vowel(ch: char) -> bool {
    VOWELS.contains(ch)
}

fn is_consonant(ch: char) -> bool {
    CONSONANTS.contains(ch)
}

fn apply_rules(mut w: String, tiers: &[&Vec<Rule>]) -> String {
    for tier in tiers {
        for (re, rep) in tier.iter() {
            if re.is_match(&w) {
                w = re.replace_all(&w, *rep).into_owned();
            }
        }
    }
    // y after a consonant, or final y, reads as i
    w = Y_AFTER_CONSONANT.replace_all(&w, "${1}i").into_owned();
    Y_FINAL.replace_all(&w, "i").into_owned()
}

// Split on vowel clusters: optional onset, vowel run, then at most one coda
// letter from SYLLABLE_CODAS when the next character is not a vowel.
// Trailing residue that never reaches a vowel is dropped.
fn split_syllables(w: &str) -> Vec<String> {
    let chars: Vec<char> = w.chars().collect();
    let mut parts = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let start = i;
        while i < chars.len() && !is_vowel(chars[i]) {
            i += 1;
        }
        if i == chars.len() {
            break;
        }
        while i < chars.len() && is_vowel(chars[i]) {
            i += 1;
        }
        if i < chars.len()
            && SYLLABLE_CODAS.contains(chars[i])
            && !(i + 1 < chars.len() && is_vowel(chars[i + 1]))
        {
            i += 1;
        }
        parts.push(chars[start..i].iter().collect());
    }
    parts
}

// Per-syllable cleanup after the second rule pass.
fn postprocess_syllable(p: &str) -> String {
    // Collapse runs of the same consonant letter
    let mut collapsed = String::with_capacity(p.len());
    let mut prev: Option<char> = None;
    for ch in p.chars() {
        if prev == Some(ch) && COLLAPSIBLE.contains(ch) {
            continue;
        }
        collapsed.push(ch);
        prev = Some(ch);
    }

    // Resolve consonant pairs: whitelisted clusters survive, otherwise the
    // first letter of the pair is discarded
    let chars: Vec<char> = collapsed.chars().collect();
    let mut p = String::with_capacity(collapsed.len());
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len() && is_consonant(chars[i]) && is_consonant(chars[i + 1]) {
            let pair: String = chars[i..i + 2].iter().collect();
            if VALID_PAIRS.contains(&pair.as_str()) {
                p.push_str(&pair);
            } else {
                p.push(chars[i + 1]);
            }
            i += 2;
        } else {
            p.push(chars[i]);
            i += 1;
        }
    }

    // Leading c/k is decided by the following vowel
    let starts_cluster = ["ch", "th", "ph", "sh"]
        .iter()
        .any(|c| p.starts_with(c));
    if !starts_cluster && (p.starts_with('k') || p.starts_with('c')) {
        let use_k = matches!(p.chars().nth(1), Some('i') | Some('e') | Some('y'));
        let rest: String = p.chars().skip(1).collect();
        p = format!("{}{}", if use_k { 'k' } else { 'c' }, rest);
    }

    // Invalid final consonant: l weakens to n, anything else is dropped
    let count = p.chars().count();
    if count > 1 {
        let last = p.chars().last().unwrap();
        if !is_vowel(last) && !VALID_FINALS.contains(last) {
            let head: String = p.chars().take(count - 1).collect();
            p = if last == 'l' { format!("{}n", head) } else { head };
        }
    }

    p
}

fn english_to_vietnamese(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let mut w = word.trim().to_lowercase();

    // Leading-letter rewrites run before the first rule pass
    if let Some(rest) = w.strip_prefix('y') {
        w = format!("d{}", rest);
    }
    if let Some(rest) = w.strip_prefix('d') {
        w = format!("đ{}", rest);
    }

    // Pass 1: full tier set over the whole token
    let w = apply_rules(w, &[&HIGH_PRIORITY_RULES, &ENDING_RULES, &GENERAL_RULES]);

    let parts = split_syllables(&w);
    if parts.is_empty() {
        return w;
    }

    // Pass 2: each syllable is treated as a standalone token, so the
    // end-anchored rules now fire at end-of-syllable
    let parts: Vec<String> = parts
        .into_iter()
        .map(|syllable| {
            let mut s = syllable.trim().to_string();
            if s.is_empty() {
                return s;
            }
            if let Some(rest) = s.strip_prefix('y') {
                s = format!("d{}", rest);
            }
            apply_rules(s, &[&HIGH_PRIORITY_RULES, &ENDING_RULES, &GENERAL_RULES])
        })
        .collect();

    let finals: Vec<String> = parts
        .iter()
        .map(|s| postprocess_syllable(s.trim()))
        .filter(|s| !s.is_empty())
        .collect();

    finals.join("-")
}

/// Transliterate a single token. Vietnamese tokens (per the detector) come
/// back unchanged; everything else goes through the rule set.
pub fn transliterate_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if is_vietnamese_word(word) {
        return word.to_string();
    }
    english_to_vietnamese(word)
}

/// Transliterate every foreign alphabetic token of a text, leaving
/// punctuation, digits and mixed tokens (e.g. dotted acronyms) in place.
/// Newlines are preserved; other whitespace runs collapse to single spaces.
pub fn transliterate_text(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.split_whitespace()
                .map(|token| {
                    let core: &str = token
                        .trim_start_matches(|c: char| !c.is_alphabetic())
                        .trim_end_matches(|c: char| !c.is_alphabetic());
                    if core.is_empty() || !core.chars().all(|c| c.is_alphabetic()) {
                        return token.to_string();
                    }
                    token.replace(core, &transliterate_word(core))
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vietnamese_word_unchanged() {
        assert_eq!(transliterate_word("tiếng"), "tiếng");
        assert_eq!(transliterate_word("đẹp"), "đẹp");
    }

    #[test]
    fn test_cvc_shaped_english_unchanged() {
        // The detector accepts these by design
        assert_eq!(transliterate_word("man"), "man");
        assert_eq!(transliterate_word("cat"), "cat");
    }

    #[test]
    fn test_deterministic() {
        let a = transliterate_word("database");
        let b = transliterate_word("database");
        assert_eq!(a, b);
    }

    #[test]
    fn test_leading_d_becomes_dd() {
        let out = transliterate_word("data");
        assert!(out.starts_with('đ'), "got {}", out);
    }

    #[test]
    fn test_output_has_no_foreign_letters() {
        for word in ["software", "jazz", "wifi", "zebra", "friend"] {
            let out = transliterate_word(word);
            for bad in ['f', 'w', 'z', 'j'] {
                assert!(!out.contains(bad), "{} -> {} keeps {}", word, out, bad);
            }
        }
    }

    #[test]
    fn test_syllables_joined_with_dash() {
        let out = transliterate_word("computer");
        assert!(out.contains('-'), "got {}", out);
    }

    #[test]
    fn test_split_syllables() {
        assert_eq!(split_syllables("banana"), vec!["ba", "na", "na"]);
        // Only one coda letter is taken; trailing residue is dropped
        assert_eq!(split_syllables("viting"), vec!["vi", "tin"]);
        assert_eq!(split_syllables("abc"), vec!["a"]);
    }

    #[test]
    fn test_postprocess_collapses_doubles() {
        assert_eq!(postprocess_syllable("happ"), "hap");
    }

    #[test]
    fn test_postprocess_final_l() {
        assert_eq!(postprocess_syllable("bal"), "ban");
    }

    #[test]
    fn test_postprocess_invalid_final_dropped() {
        assert_eq!(postprocess_syllable("bax"), "ba");
    }

    #[test]
    fn test_transliterate_text_skips_mixed_tokens() {
        let out = transliterate_text("xem tp.hcm nhé");
        assert!(out.contains("tp.hcm"));
    }

    #[test]
    fn test_transliterate_text_preserves_digits() {
        assert_eq!(transliterate_text("abc 123"), transliterate_text("abc 123"));
        assert!(transliterate_text("123").contains("123"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(transliterate_word(""), "");
        assert_eq!(transliterate_text(""), "");
    }
}
