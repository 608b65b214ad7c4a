/// N-gram assembly over characters and word tokens.
///
/// All length bounds are inclusive on both ends. Input shorter than the
/// minimum length yields an empty result, never an error.

/// Calculate all character n-grams of `text` for each length in
/// `min..=max`.
///
/// Grams are emitted position-major: every gram starting at offset 0, then
/// every gram starting at offset 1, and so on. The number of grams is
/// `SUM_n(min,max) (chars - n + 1)`.
///
/// # Arguments
/// * `text` - The text the n-grams are calculated for.
/// * `min` - The smallest n-gram length.
/// * `max` - The greatest n-gram length.
pub fn char_ngrams(text: &str, min: usize, max: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut grams = Vec::new();
    for start in 0..chars.len() {
        for n in min..=max {
            if start + n > chars.len() {
                break;
            }
            grams.push(chars[start..start + n].iter().collect());
        }
    }
    grams
}

/// Calculate character n-grams with `#` boundary padding.
///
/// For each length `n`, the text is wrapped with `n - 1` padding markers on
/// both sides before extraction, so a gram touching an edge of the text
/// carries the marker ("#pa" vs. "pal") and stays distinguishable from the
/// same characters in mid-string position. Grams consisting of markers only
/// are skipped.
pub fn char_ngrams_padded(text: &str, min: usize, max: usize) -> Vec<String> {
    let mut grams = Vec::new();
    if text.is_empty() {
        return grams;
    }
    for n in min..=max {
        let pad: String = std::iter::repeat(PADDING_CHAR).take(n - 1).collect();
        let padded = format!("{pad}{text}{pad}");
        let chars: Vec<char> = padded.chars().collect();
        for start in 0..chars.len().saturating_sub(n - 1) {
            let gram = &chars[start..start + n];
            if gram.iter().all(|&c| c == PADDING_CHAR) {
                continue;
            }
            grams.push(gram.iter().collect());
        }
    }
    grams
}

const PADDING_CHAR: char = '#';

/// Split `text` into base word tokens.
///
/// A token is a maximal run of alphanumeric characters; everything else
/// (whitespace, punctuation) is a boundary.
pub fn word_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Calculate all word n-grams over `tokens` for each length in `min..=max`,
/// joined by a single space.
///
/// For each start token the lengths are emitted ascending before advancing,
/// so `["the", "quick", "brown", "fox"]` with `min=1, max=2` yields
/// `the`, `the quick`, `quick`, `quick brown`, `brown`, `brown fox`, `fox`.
pub fn word_ngrams<T: AsRef<str>>(tokens: &[T], min: usize, max: usize) -> Vec<String> {
    let mut grams = Vec::new();
    for start in 0..tokens.len() {
        for n in min..=max {
            if start + n > tokens.len() {
                break;
            }
            let gram = tokens[start..start + n]
                .iter()
                .map(|t| t.as_ref())
                .collect::<Vec<_>>()
                .join(" ");
            grams.push(gram);
        }
    }
    grams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_ngram_counts() {
        assert_eq!(char_ngrams("wonderful", 3, 3).len(), 7);
        assert_eq!(char_ngrams("wonderful", 15, 15).len(), 0);
        assert_eq!(char_ngrams("wonderful", 3, 8).len(), 27);
    }

    #[test]
    fn char_ngrams_are_contiguous_substrings() {
        let grams = char_ngrams("abcd", 2, 3);
        assert_eq!(grams, vec!["ab", "abc", "bc", "bcd", "cd"]);
    }

    #[test]
    fn char_ngrams_handle_multibyte_input() {
        // 3 chars, 9 bytes; counted per char, not per byte
        assert_eq!(char_ngrams("日本語", 2, 2), vec!["日本", "本語"]);
    }

    #[test]
    fn padded_char_ngrams_mark_edges() {
        let grams = char_ngrams_padded("ab", 2, 2);
        assert_eq!(grams, vec!["#a", "ab", "b#"]);
        // pure marker grams are dropped
        assert!(char_ngrams_padded("a", 3, 3)
            .iter()
            .all(|g| g.chars().any(|c| c != '#')));
    }

    #[test]
    fn word_ngram_order() {
        let tokens = word_tokens("the quick brown fox");
        let grams = word_ngrams(&tokens, 1, 2);
        assert_eq!(
            grams,
            vec![
                "the",
                "the quick",
                "quick",
                "quick brown",
                "brown",
                "brown fox",
                "fox"
            ]
        );
    }

    #[test]
    fn word_tokens_split_on_punctuation() {
        assert_eq!(
            word_tokens("rust, the language!"),
            vec!["rust", "the", "language"]
        );
        assert!(word_tokens("  ,;  ").is_empty());
    }
}
