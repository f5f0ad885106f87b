/// Copy `replacement`, aligning each character's case with `reference`.
///
/// Position `i` of the output is uppercased when character `i` of the
/// reference is uppercase and lowercased otherwise. Characters past the end of
/// the reference are lowercased.
pub fn match_case(replacement: &str, reference: &str) -> String {
    let mut pattern = reference.chars();
    let mut out = String::with_capacity(replacement.len());

    for c in replacement.chars() {
        match pattern.next() {
            Some(r) if r.is_uppercase() => out.extend(c.to_uppercase()),
            _ => out.extend(c.to_lowercase()),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_case_same_length() {
        assert_eq!(match_case("team", "GuYs"), "TeAm");
    }

    #[test]
    fn test_match_case_all_caps_reference() {
        assert_eq!(match_case("stop", "KILL"), "STOP");
    }

    #[test]
    fn test_match_case_longer_replacement_extends_lowercase() {
        assert_eq!(match_case("everyone", "GUYS"), "EVERyone");
        assert_eq!(match_case("everyone", "Guys"), "Everyone");
    }

    #[test]
    fn test_match_case_shorter_replacement_truncates_pattern() {
        assert_eq!(match_case("stop", "INSANE"), "STOP");
    }

    #[test]
    fn test_match_case_empty_inputs() {
        assert_eq!(match_case("", "GUYS"), "");
        assert_eq!(match_case("Team", ""), "team");
    }

    #[test]
    fn test_match_case_non_letters_in_reference() {
        assert_eq!(match_case("abc", "1B_"), "aBc");
    }

    #[test]
    fn test_match_case_expanding_uppercase() {
        assert_eq!(match_case("straße", "AAAAAA"), "STRASSE");
    }

    #[test]
    fn test_match_case_against_itself_keeps_simple_words() {
        for word in ["everyone", "Mail Carrier", "QA", "flight attendant"] {
            assert_eq!(match_case(word, word), word);
        }
    }
}
