//! Free-text matching used by every list.
//!
//! Matching is a plain case-insensitive substring test. Both sides are NFKC
//! normalised first so full-width or composed characters typed by the user
//! match the stored text.

use unicode_normalization::UnicodeNormalization;

/// Normalised, lowercased form of `value` used on both sides of a match.
#[must_use]
pub fn fold(value: &str) -> String {
    value.nfkc().flat_map(char::to_lowercase).collect()
}

/// A prepared search query.
///
/// An empty query matches everything. Whitespace is significant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    folded: String,
}

impl Query {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            folded: fold(text),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// `true` when any of `haystacks` contains the query.
    pub fn matches<I, S>(&self, haystacks: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.is_empty() {
            return true;
        }
        haystacks
            .into_iter()
            .any(|hay| fold(hay.as_ref()).contains(self.folded.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_substring() {
        let query = Query::new("aws");
        assert!(query.matches(["AWS"]));
        assert!(query.matches(["Jane", "console.aws.amazon.com"]));
        assert!(!query.matches(["GoDaddy", "example.com"]));
    }

    #[test]
    fn empty_query_matches_all() {
        assert!(Query::new("").matches(["anything"]));
        assert!(Query::new("").matches(Vec::<String>::new()));
        assert!(!Query::new(" ").matches(["JohnDoe"]));
    }

    #[test]
    fn no_tokenization() {
        let query = Query::new("john acme");
        assert!(!query.matches(["John Doe", "Acme Corp"]));
        assert!(query.matches(["Contact john acme ltd"]));
    }

    #[test]
    fn full_width_input_matches_ascii() {
        assert!(Query::new("ＡＷＳ").matches(["aws"]));
    }
}
