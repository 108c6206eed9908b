use once_cell::sync::Lazy;
use regex::Regex;

// One token is the longest match of, in order: the splice-unquote prefix
// `~@`, a single special character, a double-quoted string (possibly
// unterminated - the reader raises on those), a comment running to the end
// of the line, or a run of atom characters. Leading whitespace and commas
// are skipped; commas count as whitespace.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\s,]*(~@|[\[\]{}()'`~^@]|"(?:\\.|[^\\"])*"?|;.*|[^\s\[\]{}('"`,;)]*)"#)
        .expect("token regex is valid")
});

/// Splits source text into tokens. Whitespace and commas between tokens are
/// discarded; comments are kept as tokens (the reader decides what to do
/// with them).
pub fn tokenize(source: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(source)
        .filter_map(|captures| {
            let token = captures.get(1)?.as_str();
            if token.is_empty() {
                None
            } else {
                Some(token.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_parens_and_atoms() {
        assert_eq!(tokenize("(+ 1 2)"), vec!["(", "+", "1", "2", ")"]);
    }

    #[test]
    fn commas_are_whitespace() {
        assert_eq!(tokenize("(1, 2,3)"), vec!["(", "1", "2", "3", ")"]);
    }

    #[test]
    fn strings_are_single_tokens() {
        assert_eq!(
            tokenize(r#"(prn "hello world")"#),
            vec!["(", "prn", r#""hello world""#, ")"]
        );
    }

    #[test]
    fn string_with_escaped_quote() {
        assert_eq!(tokenize(r#""a \" b""#), vec![r#""a \" b""#]);
    }

    #[test]
    fn unterminated_string_is_one_token() {
        assert_eq!(tokenize(r#""unclosed"#), vec![r#""unclosed"#]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            tokenize("1 ; the rest\n2"),
            vec!["1", "; the rest", "2"]
        );
    }

    #[test]
    fn hash_map_braces() {
        assert_eq!(tokenize("{1 2}"), vec!["{", "1", "2", "}"]);
    }

    #[test]
    fn splice_unquote_prefix_is_reserved() {
        assert_eq!(tokenize("~@a"), vec!["~@", "a"]);
    }
}
