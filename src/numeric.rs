// Numeric expression conversion
//
// An ordered family of pattern rewrites that turn digits, dates, times,
// currency, percentages, phone numbers, decimals and measurement units into
// spoken Vietnamese. Stage order is load-bearing: thousand-separator
// stripping must run before currency/decimal handling, and unit conversion
// must run before standalone integers are expanded.
//
// The regex crate has no lookaround; the original patterns that relied on it
// are re-expressed with trailing capture groups or explicit offset checks
// against the haystack. Observable behavior is unchanged.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::number::{number_to_words, read_digits};

lazy_static! {
    static ref YEAR_RANGE: Regex = Regex::new(r"(\d{4})\s*[-–—]\s*(\d{4})").unwrap();

    // Date shapes, most specific first
    static ref DAY_RANGE_NGAY: Regex =
        Regex::new(r"ngày\s+(\d{1,2})\s*[-–—]\s*(\d{1,2})\s*[/-]\s*(\d{1,2})(?:\s*[/-]\s*(\d{4}))?")
            .unwrap();
    static ref DAY_RANGE: Regex =
        Regex::new(r"(\d{1,2})\s*[-–—]\s*(\d{1,2})\s*[/-]\s*(\d{1,2})(?:\s*[/-]\s*(\d{4}))?")
            .unwrap();
    static ref MONTH_RANGE: Regex =
        Regex::new(r"(\d{1,2})\s*[-–—]\s*(\d{1,2})\s*[/-]\s*(\d{4})").unwrap();
    static ref BIRTH_DATE: Regex =
        Regex::new(r"(Sinh|sinh)\s+ngày\s+(\d{1,2})[/-](\d{1,2})[/-](\d{4})").unwrap();
    static ref FULL_DATE: Regex = Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").unwrap();
    static ref MONTH_YEAR: Regex =
        Regex::new(r"(?:tháng\s+)?(\d{1,2})\s*[/-]\s*(\d{4})").unwrap();
    // Trailing group stands in for (?![/-]\d): present means not a bare dd/mm
    static ref DAY_MONTH: Regex =
        Regex::new(r"(\d{1,2})\s*[/-]\s*(\d{1,2})([/-]\d)?").unwrap();
    static ref DAY_THANG_MONTH: Regex = Regex::new(r"(\d+)\s*tháng\s*(\d+)").unwrap();
    static ref THANG_MONTH: Regex = Regex::new(r"tháng\s*(\d+)").unwrap();
    static ref NGAY_DAY: Regex = Regex::new(r"ngày\s*(\d+)").unwrap();

    // Times
    static ref COLON_TIME: Regex = Regex::new(r"(\d{1,2}):(\d{2})(?::(\d{2}))?").unwrap();
    static ref H_TIME_MIN: Regex = Regex::new(r"(?i)(\d{1,2})h(\d{2})([a-zà-ỹ])?").unwrap();
    static ref H_TIME: Regex = Regex::new(r"(?i)(\d{1,2})h([a-zà-ỹ0-9])?").unwrap();
    static ref GIO_PHUT: Regex = Regex::new(r"(\d+)\s*giờ\s*(\d+)\s*phút").unwrap();
    static ref GIO: Regex = Regex::new(r"(\d+)\s*giờ(\s*\d)?").unwrap();

    static ref ORDINAL: Regex =
        Regex::new(r"(?i)(thứ|lần|bước|phần|chương|tập|số)\s*(\d+)").unwrap();

    static ref THOUSAND_GROUPS: Regex = Regex::new(r"\d{1,3}(?:\.\d{3})+").unwrap();

    static ref VND_WORD: Regex =
        Regex::new(r"(?i)(\d+(?:,\d+)?)\s*(?:đồng|vnđ|vnd)\b").unwrap();
    static ref VND_SYMBOL: Regex = Regex::new(r"(?i)(\d+(?:,\d+)?)đ").unwrap();
    static ref USD_PREFIX: Regex = Regex::new(r"\$\s*(\d+(?:,\d+)?)").unwrap();
    static ref USD_SUFFIX: Regex = Regex::new(r"(?i)(\d+(?:,\d+)?)\s*(?:usd|\$)").unwrap();

    static ref PERCENT: Regex = Regex::new(r"(\d+(?:,\d+)?)\s*%").unwrap();

    static ref PHONE_LOCAL: Regex = Regex::new(r"0\d{9,10}").unwrap();
    static ref PHONE_INTL: Regex = Regex::new(r"\+84\d{9,10}").unwrap();

    static ref DECIMAL: Regex = Regex::new(r"(\d+),(\d+)").unwrap();

    static ref STANDALONE: Regex = Regex::new(r"(?-u:\b)[0-9]+(?-u:\b)").unwrap();

    static ref UNIT_RULES: Vec<UnitRule> = build_unit_rules();
}

/// Apply every numeric rewrite stage in the fixed order.
pub fn convert_numeric_expressions(text: &str) -> String {
    let text = convert_year_range(text);
    let text = convert_date(&text);
    let text = convert_time(&text);
    let text = convert_ordinal(&text);
    let text = remove_thousand_separators(&text);
    let text = convert_currency(&text);
    let text = convert_percentage(&text);
    let text = convert_phone_number(&text);
    let text = convert_decimal(&text);
    let text = convert_measurement_units(&text);
    convert_standalone_numbers(&text)
}

/// `1873-1907` -> "một nghìn tám trăm bảy mươi ba đến một nghìn chín trăm lẻ bảy"
pub fn convert_year_range(text: &str) -> String {
    YEAR_RANGE
        .replace_all(text, |c: &Captures| {
            format!("{} đến {}", number_to_words(&c[1]), number_to_words(&c[2]))
        })
        .into_owned()
}

fn in_range(s: &str, lo: u32, hi: u32) -> bool {
    s.parse::<u32>().map_or(false, |v| (lo..=hi).contains(&v))
}

fn valid_day(d: &str) -> bool {
    in_range(d, 1, 31)
}

fn valid_month(m: &str) -> bool {
    in_range(m, 1, 12)
}

fn valid_year(y: &str) -> bool {
    in_range(y, 1000, 9999)
}

/// Convert date expressions. Every numeric field is range-validated before
/// conversion; invalid shapes (e.g. "32/13/2023") pass through untouched for
/// the standalone-number stage.
pub fn convert_date(text: &str) -> String {
    // Day ranges with a "ngày" prefix: ngày dd-dd/mm[/yyyy]
    let text = DAY_RANGE_NGAY.replace_all(text, |c: &Captures| {
        let year = c.get(4).map(|m| m.as_str());
        let valid = valid_day(&c[1])
            && valid_day(&c[2])
            && valid_month(&c[3])
            && year.map_or(true, valid_year);
        if !valid {
            return c[0].to_string();
        }
        let mut out = format!(
            "ngày {} đến {} tháng {}",
            number_to_words(&c[1]),
            number_to_words(&c[2]),
            number_to_words(&c[3])
        );
        if let Some(y) = year {
            out.push_str(&format!(" năm {}", number_to_words(y)));
        }
        out
    });

    // Day ranges without the prefix: dd-dd/mm[/yyyy]
    let text = DAY_RANGE.replace_all(&text, |c: &Captures| {
        let year = c.get(4).map(|m| m.as_str());
        let valid = valid_day(&c[1])
            && valid_day(&c[2])
            && valid_month(&c[3])
            && year.map_or(true, valid_year);
        if !valid {
            return c[0].to_string();
        }
        let mut out = format!(
            "{} đến {} tháng {}",
            number_to_words(&c[1]),
            number_to_words(&c[2]),
            number_to_words(&c[3])
        );
        if let Some(y) = year {
            out.push_str(&format!(" năm {}", number_to_words(y)));
        }
        out
    });

    // Month ranges: mm-mm/yyyy
    let text = MONTH_RANGE.replace_all(&text, |c: &Captures| {
        if valid_month(&c[1]) && valid_month(&c[2]) && valid_year(&c[3]) {
            format!(
                "tháng {} đến tháng {} năm {}",
                number_to_words(&c[1]),
                number_to_words(&c[2]),
                number_to_words(&c[3])
            )
        } else {
            c[0].to_string()
        }
    });

    // "Sinh ngày dd/mm/yyyy" keeps its prefix and avoids a doubled "ngày"
    let text = BIRTH_DATE.replace_all(&text, |c: &Captures| {
        if valid_day(&c[2]) && valid_month(&c[3]) && valid_year(&c[4]) {
            format!(
                "{} ngày {} tháng {} năm {}",
                &c[1],
                number_to_words(&c[2]),
                number_to_words(&c[3]),
                number_to_words(&c[4])
            )
        } else {
            c[0].to_string()
        }
    });

    // dd/mm/yyyy
    let text = FULL_DATE.replace_all(&text, |c: &Captures| {
        if valid_day(&c[1]) && valid_month(&c[2]) && valid_year(&c[3]) {
            format!(
                "ngày {} tháng {} năm {}",
                number_to_words(&c[1]),
                number_to_words(&c[2]),
                number_to_words(&c[3])
            )
        } else {
            c[0].to_string()
        }
    });

    // mm/yyyy, with or without a "tháng" prefix
    let text = MONTH_YEAR.replace_all(&text, |c: &Captures| {
        if valid_month(&c[1]) && valid_year(&c[2]) {
            format!(
                "tháng {} năm {}",
                number_to_words(&c[1]),
                number_to_words(&c[2])
            )
        } else {
            c[0].to_string()
        }
    });

    // dd/mm, only when not followed by another date field
    let text = DAY_MONTH.replace_all(&text, |c: &Captures| {
        if c.get(3).is_some() || !valid_day(&c[1]) || !valid_month(&c[2]) {
            return c[0].to_string();
        }
        format!("{} tháng {}", number_to_words(&c[1]), number_to_words(&c[2]))
    });

    // X tháng Y
    let text = DAY_THANG_MONTH.replace_all(&text, |c: &Captures| {
        if valid_day(&c[1]) && valid_month(&c[2]) {
            format!(
                "ngày {} tháng {}",
                number_to_words(&c[1]),
                number_to_words(&c[2])
            )
        } else {
            c[0].to_string()
        }
    });

    // tháng X
    let text = THANG_MONTH.replace_all(&text, |c: &Captures| {
        if valid_month(&c[1]) {
            format!("tháng {}", number_to_words(&c[1]))
        } else {
            c[0].to_string()
        }
    });

    // ngày X
    NGAY_DAY
        .replace_all(&text, |c: &Captures| {
            if valid_day(&c[1]) {
                format!("ngày {}", number_to_words(&c[1]))
            } else {
                c[0].to_string()
            }
        })
        .into_owned()
}

/// Convert time expressions: HH:MM[:SS], HHhMM, HHh, "X giờ Y phút".
/// Hours are validated 0-23, minutes and seconds 0-59.
pub fn convert_time(text: &str) -> String {
    let text = COLON_TIME.replace_all(text, |c: &Captures| {
        let sec = c.get(3).map(|m| m.as_str());
        let valid = in_range(&c[1], 0, 23)
            && in_range(&c[2], 0, 59)
            && sec.map_or(true, |s| in_range(s, 0, 59));
        if !valid {
            return c[0].to_string();
        }
        let mut out = format!("{} giờ {} phút", number_to_words(&c[1]), number_to_words(&c[2]));
        if let Some(s) = sec {
            out.push_str(&format!(" {} giây", number_to_words(s)));
        }
        out
    });

    // 15h30 -> mười lăm giờ ba mươi; the trailing letter capture rejects
    // things like "15h30p" the way the original's lookahead did
    let text = H_TIME_MIN.replace_all(&text, |c: &Captures| {
        if c.get(3).is_some() || !in_range(&c[1], 0, 23) || !in_range(&c[2], 0, 59) {
            return c[0].to_string();
        }
        format!("{} giờ {}", number_to_words(&c[1]), number_to_words(&c[2]))
    });

    // 8h -> tám giờ
    let text = H_TIME.replace_all(&text, |c: &Captures| {
        if c.get(2).is_some() || !in_range(&c[1], 0, 23) {
            return c[0].to_string();
        }
        format!("{} giờ", number_to_words(&c[1]))
    });

    let text = GIO_PHUT.replace_all(&text, |c: &Captures| {
        if in_range(&c[1], 0, 23) && in_range(&c[2], 0, 59) {
            format!(
                "{} giờ {} phút",
                number_to_words(&c[1]),
                number_to_words(&c[2])
            )
        } else {
            c[0].to_string()
        }
    });

    // X giờ with no trailing number
    GIO.replace_all(&text, |c: &Captures| {
        if c.get(2).is_some() {
            return c[0].to_string();
        }
        format!("{} giờ", number_to_words(&c[1]))
    })
    .into_owned()
}

/// Convert ordinals after ordinal-indicating prefixes: thứ 2 -> thứ hai.
/// 1-10 use the fixed ordinal forms; anything else falls back to the full
/// number expansion.
pub fn convert_ordinal(text: &str) -> String {
    ORDINAL
        .replace_all(text, |c: &Captures| {
            let word = match &c[2] {
                "1" => "nhất".to_string(),
                "2" => "hai".to_string(),
                "3" => "ba".to_string(),
                "4" => "tư".to_string(),
                "5" => "năm".to_string(),
                "6" => "sáu".to_string(),
                "7" => "bảy".to_string(),
                "8" => "tám".to_string(),
                "9" => "chín".to_string(),
                "10" => "mười".to_string(),
                n => number_to_words(n),
            };
            format!("{} {}", &c[1], word)
        })
        .into_owned()
}

/// Strip interior dots used as thousand separators: 50.000 -> 50000.
/// Must run before currency/decimal conversion so grouped numbers are not
/// mistaken for decimals.
pub fn remove_thousand_separators(text: &str) -> String {
    THOUSAND_GROUPS
        .replace_all(text, |c: &Captures| {
            let m = c.get(0).unwrap();
            // Only at a boundary: not when another digit, dot or comma follows
            if let Some(next) = text[m.end()..].chars().next() {
                if next.is_ascii_digit() || next == '.' || next == ',' {
                    return m.as_str().to_string();
                }
            }
            m.as_str().replace('.', "")
        })
        .into_owned()
}

/// Convert currency amounts. Commas inside the matched number are decimal
/// separators at this stage (dots were already stripped) and are removed.
pub fn convert_currency(text: &str) -> String {
    let vnd = |c: &Captures| format!("{} đồng", number_to_words(&c[1].replace(',', "")));
    let usd = |c: &Captures| format!("{} đô la", number_to_words(&c[1].replace(',', "")));

    let text = VND_WORD.replace_all(text, vnd).into_owned();
    // Bare "đ" only when not followed by a letter, so "độ" and friends are safe
    let text = VND_SYMBOL
        .replace_all(&text, |c: &Captures| {
            let end = c.get(0).unwrap().end();
            if text[end..].chars().next().map_or(false, is_letter) {
                return c[0].to_string();
            }
            vnd(c)
        })
        .into_owned();
    let text = USD_PREFIX.replace_all(&text, usd).into_owned();
    USD_SUFFIX.replace_all(&text, usd).into_owned()
}

/// 50% -> năm mươi phần trăm
pub fn convert_percentage(text: &str) -> String {
    PERCENT
        .replace_all(text, |c: &Captures| {
            format!("{} phần trăm", number_to_words(&c[1].replace(',', "")))
        })
        .into_owned()
}

/// Read national-format phone numbers digit by digit.
pub fn convert_phone_number(text: &str) -> String {
    let text = PHONE_LOCAL
        .replace_all(text, |c: &Captures| read_digits(&c[0]))
        .into_owned();
    PHONE_INTL
        .replace_all(&text, |c: &Captures| read_digits(&c[0]))
        .into_owned()
}

/// 7,27 -> bảy phẩy hai mươi bảy
pub fn convert_decimal(text: &str) -> String {
    DECIMAL
        .replace_all(text, |c: &Captures| {
            let end = c.get(0).unwrap().end();
            if let Some(next) = text[end..].chars().next() {
                if next.is_ascii_digit() || next == ',' {
                    return c[0].to_string();
                }
            }
            let frac = c[2].trim_start_matches('0');
            let frac = if frac.is_empty() { "0" } else { frac };
            format!("{} phẩy {}", number_to_words(&c[1]), number_to_words(frac))
        })
        .into_owned()
}

/// Convert remaining bare digit runs to words.
pub fn convert_standalone_numbers(text: &str) -> String {
    STANDALONE
        .replace_all(text, |c: &Captures| number_to_words(&c[0]))
        .into_owned()
}

struct UnitRule {
    spoken: &'static str,
    single_char: bool,
    digit_re: Regex,
    word_re: Regex,
}

// Vietnamese spoken-number vocabulary, used to spot already-converted numbers
// standing before a unit symbol
const NUMBER_WORDS: &str =
    "một|hai|ba|bốn|năm|sáu|bảy|tám|chín|mười|không|trăm|nghìn|triệu|tỷ|lẻ|mốt|tư|lăm|phẩy";

fn build_unit_rules() -> Vec<UnitRule> {
    let mut units: Vec<(&'static str, &'static str)> = vec![
        // Length
        ("m", "mét"),
        ("cm", "xăng-ti-mét"),
        ("mm", "mi-li-mét"),
        ("km", "ki-lô-mét"),
        ("dm", "đề-xi-mét"),
        ("hm", "héc-tô-mét"),
        ("dam", "đề-ca-mét"),
        ("inch", "in"),
        // Mass
        ("kg", "ki-lô-gam"),
        ("g", "gam"),
        ("mg", "mi-li-gam"),
        ("t", "tấn"),
        ("tấn", "tấn"),
        ("yến", "yến"),
        ("lạng", "lạng"),
        // Volume
        ("ml", "mi-li-lít"),
        ("l", "lít"),
        ("lít", "lít"),
        // Area
        ("m²", "mét vuông"),
        ("m2", "mét vuông"),
        ("km²", "ki-lô-mét vuông"),
        ("km2", "ki-lô-mét vuông"),
        ("ha", "héc-ta"),
        ("cm²", "xăng-ti-mét vuông"),
        ("cm2", "xăng-ti-mét vuông"),
        // Cubic volume
        ("m³", "mét khối"),
        ("m3", "mét khối"),
        ("cm³", "xăng-ti-mét khối"),
        ("cm3", "xăng-ti-mét khối"),
        ("km³", "ki-lô-mét khối"),
        ("km3", "ki-lô-mét khối"),
        // Time
        ("s", "giây"),
        ("sec", "giây"),
        ("min", "phút"),
        ("h", "giờ"),
        ("hr", "giờ"),
        ("hrs", "giờ"),
        // Speed
        ("km/h", "ki-lô-mét trên giờ"),
        ("kmh", "ki-lô-mét trên giờ"),
        ("m/s", "mét trên giây"),
        ("ms", "mét trên giây"),
        ("mm/h", "mi-li-mét trên giờ"),
        ("cm/s", "xăng-ti-mét trên giây"),
        // Temperature
        ("°C", "độ C"),
        ("°F", "độ F"),
        ("°K", "độ K"),
        ("°R", "độ R"),
        ("°Re", "độ Re"),
        ("°Ro", "độ Ro"),
        ("°N", "độ N"),
        ("°D", "độ D"),
    ];

    // Longest symbol first so "km/h" is not shadowed by "km" or "m"
    units.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

    units
        .into_iter()
        .map(|(symbol, spoken)| {
            let escaped = regex::escape(symbol);
            UnitRule {
                spoken,
                single_char: symbol.chars().count() == 1,
                digit_re: Regex::new(&format!(r"(?i)(\d+)\s*{}", escaped)).unwrap(),
                word_re: Regex::new(&format!(
                    r"(?i)((?:\b(?:{})\s*)+)\s*{}",
                    NUMBER_WORDS, escaped
                ))
                .unwrap(),
            }
        })
        .collect()
}

fn is_letter(ch: char) -> bool {
    if ch.is_ascii_alphabetic() {
        return true;
    }
    ch.to_lowercase().next().map_or(false, |l| ('à'..='ỹ').contains(&l))
}

// Boundary test standing in for the original lookaheads: a single-letter unit
// must not be followed (even across spaces) by a letter, a multi-letter unit
// must not run straight into a word character.
fn unit_boundary_ok(text: &str, end: usize, single_char: bool) -> bool {
    let tail = &text[end..];
    if single_char {
        !tail
            .chars()
            .skip_while(|c| c.is_whitespace())
            .next()
            .map_or(false, is_letter)
    } else {
        !tail
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
    }
}

/// Replace unit symbols preceded by a number (digits or already-spoken number
/// words) with their spoken names. The numeric part is left in place for the
/// surrounding stages to expand.
pub fn convert_measurement_units(text: &str) -> String {
    let mut text = text.to_string();
    for rule in UNIT_RULES.iter() {
        let replaced = rule
            .digit_re
            .replace_all(&text, |c: &Captures| {
                if !unit_boundary_ok(&text, c.get(0).unwrap().end(), rule.single_char) {
                    return c[0].to_string();
                }
                format!("{} {}", &c[1], rule.spoken)
            })
            .into_owned();
        text = replaced;

        let replaced = rule
            .word_re
            .replace_all(&text, |c: &Captures| {
                if !unit_boundary_ok(&text, c.get(0).unwrap().end(), rule.single_char) {
                    return c[0].to_string();
                }
                format!("{} {}", c[1].trim(), rule.spoken)
            })
            .into_owned();
        text = replaced;
    }
    text
}
