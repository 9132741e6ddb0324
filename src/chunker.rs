// Chunking for streaming synthesis
//
// Splits normalized text into chunks the synthesizer can handle. Chunks never
// cross a newline. Sentences are the unit of splitting; commas give soft
// break points (the comma itself is dropped); sentences longer than the
// ceiling are split at word boundaries.

/// Chunks shorter than this get merged with the next sentence.
pub const MIN_CHUNK_LENGTH: usize = 4;
/// Hard ceiling on chunk length, in characters.
pub const MAX_CHUNK_LENGTH: usize = 500;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// Split after sentence-final punctuation when followed by whitespace or end
// of line. Runs like "..." stay inside one sentence. Punctuation is kept.
fn split_sentences(line: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &(pos, ch)) in chars.iter().enumerate() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let next = chars.get(i + 1).map(|&(_, c)| c);
        if next.map_or(true, |c| c.is_whitespace()) {
            let end = pos + ch.len_utf8();
            parts.push(line[start..end].to_string());
            start = end;
        }
    }
    if start < line.len() {
        parts.push(line[start..].to_string());
    }
    parts
}

// Split at commas followed by whitespace or end. The comma is removed; a
// comma inside a number ("1,5") never matches.
fn split_commas(sentence: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = sentence.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &(pos, ch)) in chars.iter().enumerate() {
        if ch != ',' {
            continue;
        }
        let next = chars.get(i + 1).map(|&(_, c)| c);
        if next.map_or(true, |c| c.is_whitespace()) {
            parts.push(sentence[start..pos].to_string());
            start = pos + 1;
        }
    }
    if start < sentence.len() {
        parts.push(sentence[start..].to_string());
    }
    parts
}

// A sentence longer than the ceiling gets split at word boundaries. Returns
// the trailing remainder so it can keep accumulating with later sentences.
fn split_long_sentence(sentence: &str, chunks: &mut Vec<String>) -> String {
    let mut current = String::new();
    for word in sentence.split(' ') {
        let candidate_len = if current.is_empty() {
            char_len(word)
        } else {
            char_len(&current) + 1 + char_len(word)
        };
        if candidate_len <= MAX_CHUNK_LENGTH {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                chunks.push(current.clone());
            }
            current = word.to_string();
        }
    }
    current
}

/// Split normalized text into synthesis-sized chunks. Blank lines are
/// skipped; a line without terminal punctuation gets a closing period so the
/// voice drops its pitch at the end.
pub fn chunk_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let line = if trimmed.ends_with(['.', '!', '?']) {
            line.to_string()
        } else {
            format!("{}.", trimmed)
        };

        let sentences: Vec<String> = split_sentences(&line)
            .iter()
            .flat_map(|s| split_commas(s))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut current = String::new();
        for sentence in sentences {
            if char_len(&sentence) > MAX_CHUNK_LENGTH {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                current = split_long_sentence(&sentence, &mut chunks);
                continue;
            }

            let candidate = if current.is_empty() {
                sentence.clone()
            } else {
                format!("{} {}", current, sentence)
            };

            if char_len(&candidate) > MAX_CHUNK_LENGTH {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                current = sentence;
            } else if char_len(&candidate) < MIN_CHUNK_LENGTH {
                // Too short to stand alone, keep accumulating
                current = candidate;
            } else {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                current = sentence;
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(chunk_text("").is_empty());
        assert!(chunk_text("   \n  \n").is_empty());
    }

    #[test]
    fn test_sentences_become_chunks() {
        let chunks = chunk_text("Xin chào các bạn. Hôm nay trời đẹp!");
        assert_eq!(chunks, vec!["Xin chào các bạn.", "Hôm nay trời đẹp!"]);
    }

    #[test]
    fn test_missing_terminal_punctuation_added() {
        let chunks = chunk_text("xin chào các bạn");
        assert_eq!(chunks, vec!["xin chào các bạn."]);
    }

    #[test]
    fn test_newline_is_a_hard_boundary() {
        let chunks = chunk_text("dòng một\ndòng hai");
        assert_eq!(chunks, vec!["dòng một.", "dòng hai."]);
    }

    #[test]
    fn test_comma_splits_and_is_dropped() {
        let chunks = chunk_text("một đoạn dài, một đoạn nữa.");
        assert_eq!(chunks, vec!["một đoạn dài", "một đoạn nữa."]);
    }

    #[test]
    fn test_comma_inside_number_untouched() {
        let chunks = chunk_text("giá 1,5 triệu đồng.");
        assert_eq!(chunks, vec!["giá 1,5 triệu đồng."]);
    }

    #[test]
    fn test_tiny_fragments_accumulate() {
        // Merging happens only while the combined text is still below the
        // minimum: "à" and "ừ" join, the full clause stands alone
        let chunks = chunk_text("à, ừ, đi thôi.");
        assert_eq!(chunks, vec!["à ừ", "đi thôi."]);
    }

    #[test]
    fn test_long_sentence_split_at_word_boundaries() {
        let word = "từ";
        let long: String = std::iter::repeat(word).take(300).collect::<Vec<_>>().join(" ");
        let chunks = chunk_text(&long);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_CHUNK_LENGTH);
        }
    }

    #[test]
    fn test_ellipsis_not_split_internally() {
        let chunks = chunk_text("chờ đã... rồi đi tiếp.");
        assert_eq!(chunks, vec!["chờ đã...", "rồi đi tiếp."]);
    }
}
