/// Word characters are Unicode alphanumerics plus underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split text at every word boundary.
///
/// Each token is either a run of word characters or a run of everything else
/// (whitespace, punctuation). Concatenating the tokens in order gives back the
/// input exactly. Empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_word: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let word = is_word_char(c);
        match in_word {
            Some(prev) if prev != word => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_word = Some(word);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

/// True when the token carries something other than whitespace.
pub fn is_countable(token: &str) -> bool {
    !token.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_words_and_spaces() {
        assert_eq!(tokenize("Hello guys"), vec!["Hello", " ", "guys"]);
    }

    #[test]
    fn test_tokenize_punctuation_runs() {
        assert_eq!(
            tokenize("Hi, team... ok?"),
            vec!["Hi", ", ", "team", "... ", "ok", "?"]
        );
    }

    #[test]
    fn test_tokenize_leading_and_trailing_whitespace() {
        assert_eq!(tokenize("  guys  "), vec!["  ", "guys", "  "]);
    }

    #[test]
    fn test_tokenize_only_punctuation() {
        assert_eq!(tokenize("?!"), vec!["?!"]);
    }

    #[test]
    fn test_tokenize_apostrophe_splits_word() {
        assert_eq!(tokenize("l'air"), vec!["l", "'", "air"]);
    }

    #[test]
    fn test_tokenize_unicode_letters_stay_together() {
        assert_eq!(tokenize("café président"), vec!["café", " ", "président"]);
    }

    #[test]
    fn test_tokenize_underscore_and_digits_are_word_chars() {
        assert_eq!(tokenize("snake_case 42x"), vec!["snake_case", " ", "42x"]);
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let inputs = [
            "",
            " ",
            "Hello guys",
            "  The chairman, the mailman & the fireman!\n\tDone.",
            "über-naïve ß façade — ok",
            "🙂 emoji 🙂",
        ];
        for input in inputs {
            assert_eq!(tokenize(input).concat(), input, "lossy split for {:?}", input);
        }
    }

    #[test]
    fn test_is_countable() {
        assert!(is_countable("guys"));
        assert!(is_countable(", "));
        assert!(!is_countable("   "));
        assert!(!is_countable("\n\t"));
        assert!(!is_countable(""));
    }
}
