use regex::Regex;

const WILDCARD: char = '*';

/// A `≈` pattern where `*` matches any run of characters and everything else
/// matches literally. The whole value has to match.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let body = pattern
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        Ok(Self {
            regex: Regex::new(&format!("(?s)^{body}$"))?,
        })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_suffix_substring() {
        let prefix = WildcardPattern::new("ab*").unwrap();
        assert!(prefix.is_match("abc"));
        assert!(prefix.is_match("ab"));
        assert!(!prefix.is_match("cab"));

        let suffix = WildcardPattern::new("*bc").unwrap();
        assert!(suffix.is_match("abc"));
        assert!(!suffix.is_match("bcd"));

        let substring = WildcardPattern::new("*b*").unwrap();
        assert!(substring.is_match("abc"));
        assert!(substring.is_match("b"));
        assert!(!substring.is_match("ac"));
    }

    #[test]
    fn test_without_wildcard_is_exact() {
        let exact = WildcardPattern::new("abc").unwrap();
        assert!(exact.is_match("abc"));
        assert!(!exact.is_match("abcd"));
    }

    #[test]
    fn test_regex_characters_are_literal() {
        let pattern = WildcardPattern::new("a.c(*)").unwrap();
        assert!(pattern.is_match("a.c(x)"));
        assert!(!pattern.is_match("abc(x)"));
    }

    #[test]
    fn test_wildcard_spans_lines() {
        assert!(WildcardPattern::new("a*z").unwrap().is_match("a\nz"));
    }
}
