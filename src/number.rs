// Vietnamese number reading
//
// Pure mapping from a decimal digit string to its spoken expansion.
// Total over all inputs: non-numeric strings come back unchanged.

/// Spoken digits 0-9.
pub const DIGITS: [&str; 10] = [
    "không", "một", "hai", "ba", "bốn", "năm", "sáu", "bảy", "tám", "chín",
];

/// Spoken 10-19.
const TEENS: [&str; 10] = [
    "mười",
    "mười một",
    "mười hai",
    "mười ba",
    "mười bốn",
    "mười lăm",
    "mười sáu",
    "mười bảy",
    "mười tám",
    "mười chín",
];

/// Spoken multiples of ten, indexed 2-9.
const TENS: [&str; 10] = [
    "", "", "hai mươi", "ba mươi", "bốn mươi", "năm mươi", "sáu mươi", "bảy mươi", "tám mươi",
    "chín mươi",
];

/// Convert a digit string (optionally signed) to Vietnamese words.
///
/// Leading zeros are stripped ("007" reads like "7"); "0" itself stays the
/// zero word. Numbers at or above one thousand billion are read digit by
/// digit. Anything that is not a digit string is returned unchanged.
pub fn number_to_words(num_str: &str) -> String {
    if let Some(rest) = num_str.strip_prefix('-') {
        if rest.chars().all(|c| c.is_ascii_digit()) && !rest.is_empty() {
            return format!("âm {}", number_to_words(rest));
        }
        return num_str.to_string();
    }

    if !num_str.chars().all(|c| c.is_ascii_digit()) {
        return num_str.to_string();
    }

    let stripped = num_str.trim_start_matches('0');
    let stripped = if stripped.is_empty() { "0" } else { stripped };

    match stripped.parse::<u64>() {
        Ok(n) if n < 1_000_000_000_000 => words(n),
        // Beyond the largest named magnitude: read each digit individually
        _ => read_digits(stripped),
    }
}

/// Read every digit of `s` individually, separated by spaces.
/// Non-digit characters are skipped.
pub fn read_digits(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit())
        .map(|c| DIGITS[c as usize - '0' as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

fn words(n: u64) -> String {
    if n < 10 {
        return DIGITS[n as usize].to_string();
    }
    if n < 20 {
        return TEENS[(n - 10) as usize].to_string();
    }
    if n < 100 {
        let tens = TENS[(n / 10) as usize];
        return match n % 10 {
            0 => tens.to_string(),
            1 => format!("{} mốt", tens),
            4 => format!("{} tư", tens),
            5 => format!("{} lăm", tens),
            u => format!("{} {}", tens, DIGITS[u as usize]),
        };
    }
    if n < 1000 {
        let head = format!("{} trăm", DIGITS[(n / 100) as usize]);
        return match n % 100 {
            0 => head,
            r if r < 10 => format!("{} lẻ {}", head, DIGITS[r as usize]),
            r => format!("{} {}", head, words(r)),
        };
    }

    for (base, name) in [
        (1_000u64, "nghìn"),
        (1_000_000, "triệu"),
        (1_000_000_000, "tỷ"),
    ] {
        if n < base * 1000 {
            let head = format!("{} {}", words(n / base), name);
            let r = n % base;
            return if r == 0 {
                head
            } else if r < 10 {
                // The skipped hundreds and tens groups are read out loud
                format!("{} không trăm lẻ {}", head, DIGITS[r as usize])
            } else if r < 100 {
                format!("{} không trăm {}", head, words(r))
            } else {
                format!("{} {}", head, words(r))
            };
        }
    }

    // Unreachable for n < 10^12, kept total anyway
    read_digits(&n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(number_to_words("0"), "không");
        assert_eq!(number_to_words("000"), "không");
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(number_to_words("5"), "năm");
        assert_eq!(number_to_words("10"), "mười");
        assert_eq!(number_to_words("15"), "mười lăm");
        assert_eq!(number_to_words("23"), "hai mươi ba");
    }

    #[test]
    fn test_irregular_units() {
        assert_eq!(number_to_words("21"), "hai mươi mốt");
        assert_eq!(number_to_words("24"), "hai mươi tư");
        assert_eq!(number_to_words("25"), "hai mươi lăm");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(number_to_words("100"), "một trăm");
        assert_eq!(number_to_words("105"), "một trăm lẻ năm");
        assert_eq!(number_to_words("123"), "một trăm hai mươi ba");
    }

    #[test]
    fn test_thousands_with_gap() {
        assert_eq!(
            number_to_words("2023"),
            "hai nghìn không trăm hai mươi ba"
        );
        assert_eq!(number_to_words("1907"), "một nghìn chín trăm lẻ bảy");
        assert_eq!(number_to_words("5001"), "năm nghìn không trăm lẻ một");
        assert_eq!(number_to_words("50000"), "năm mươi nghìn");
    }

    #[test]
    fn test_millions_billions() {
        assert_eq!(number_to_words("1000000"), "một triệu");
        assert_eq!(
            number_to_words("1000005"),
            "một triệu không trăm lẻ năm"
        );
        assert_eq!(number_to_words("2000000000"), "hai tỷ");
    }

    #[test]
    fn test_negative() {
        assert_eq!(number_to_words("-5"), "âm năm");
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(number_to_words("007"), number_to_words("7"));
    }

    #[test]
    fn test_non_numeric_unchanged() {
        assert_eq!(number_to_words("abc"), "abc");
        assert_eq!(number_to_words("12a"), "12a");
        assert_eq!(number_to_words("-"), "-");
    }

    #[test]
    fn test_very_large_read_digit_by_digit() {
        assert_eq!(
            number_to_words("1000000000000"),
            "một không không không không không không không không không không không không"
        );
    }

    #[test]
    fn test_read_digits() {
        assert_eq!(read_digits("0912"), "không chín một hai");
        assert_eq!(read_digits("+84"), "tám bốn");
    }
}
