//! Query parsing: required ("plus") and excluded ("minus") terms.

use std::collections::BTreeSet;

use super::tokenize::{StopWords, is_valid_token, tokenize};
use crate::error::{Result, SearchError};

/// A parsed search query.
///
/// Both groups have set semantics: repeated terms collapse, and iteration
/// order is lexicographic. A term may appear in both groups at once; the
/// ranking engine lets exclusion win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Terms a document must contain to accumulate relevance.
    pub required: BTreeSet<String>,
    /// Terms that unconditionally remove a document from the results.
    pub excluded: BTreeSet<String>,
}

/// A single raw query token after shape validation.
struct QueryWord<'a> {
    word: &'a str,
    is_minus: bool,
}

/// Validates one raw token and classifies it as required or excluded.
///
/// The shape checks run on the raw token, minus sign included, before any
/// stop-word filtering.
fn parse_query_word(raw: &str) -> Result<QueryWord<'_>> {
    if raw.is_empty() {
        return Err(SearchError::EmptyQueryWord);
    }
    if raw.starts_with("--") {
        return Err(SearchError::DoubleMinus(raw.to_string()));
    }
    if raw == "-" {
        return Err(SearchError::EmptyWordAfterMinus);
    }
    if !is_valid_token(raw) {
        return Err(SearchError::InvalidToken(raw.to_string()));
    }
    match raw.strip_prefix('-') {
        Some(rest) => Ok(QueryWord {
            word: rest,
            is_minus: true,
        }),
        None => Ok(QueryWord {
            word: raw,
            is_minus: false,
        }),
    }
}

impl Query {
    /// Parses a raw query string.
    ///
    /// Stop words are dropped from both groups after the shape checks, so a
    /// malformed stop word still fails. An empty raw query parses to an
    /// empty query, which is not an error.
    pub fn parse(raw: &str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Self::default();
        for token in tokenize(raw) {
            let parsed = parse_query_word(token)?;
            if stop_words.contains(parsed.word) {
                continue;
            }
            if parsed.is_minus {
                query.excluded.insert(parsed.word.to_string());
            } else {
                query.required.insert(parsed.word.to_string());
            }
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.excluded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn terms(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn splits_required_and_excluded() {
        let query = Query::parse("curly -nasty cat -dog", &StopWords::default()).unwrap();
        check!(query.required == terms(&["curly", "cat"]));
        check!(query.excluded == terms(&["nasty", "dog"]));
    }

    #[test]
    fn deduplicates_terms() {
        let query = Query::parse("cat cat -dog -dog", &StopWords::default()).unwrap();
        check!(query.required.len() == 1);
        check!(query.excluded.len() == 1);
    }

    #[test]
    fn drops_stop_words_from_both_groups() {
        let stop_words = StopWords::new(["in", "the"]).unwrap();
        let query = Query::parse("cat in -the", &stop_words).unwrap();
        check!(query.required == terms(&["cat"]));
        check!(query.excluded.is_empty());
    }

    #[test]
    fn term_may_be_required_and_excluded() {
        let query = Query::parse("cat -cat", &StopWords::default()).unwrap();
        check!(query.required == terms(&["cat"]));
        check!(query.excluded == terms(&["cat"]));
    }

    #[test]
    fn empty_raw_query_is_empty_not_an_error() {
        let query = Query::parse("", &StopWords::default()).unwrap();
        check!(query.is_empty());
    }

    #[rstest]
    #[case("-", SearchError::EmptyWordAfterMinus)]
    #[case("--", SearchError::DoubleMinus("--".to_string()))]
    #[case("--x", SearchError::DoubleMinus("--x".to_string()))]
    #[case("cat --dog", SearchError::DoubleMinus("--dog".to_string()))]
    #[case("bro\u{1}ken", SearchError::InvalidToken("bro\u{1}ken".to_string()))]
    fn malformed_tokens_fail(#[case] raw: &str, #[case] expected: SearchError) {
        let result = Query::parse(raw, &StopWords::default());
        check!(result == Err(expected));
    }

    #[test]
    fn empty_token_is_rejected_at_word_level() {
        // `tokenize` never yields an empty token, but the word-level parser
        // still guards against one.
        check!(parse_query_word("").is_err());
    }
}
