//! Whitespace tokenization, token validation, and the stop-word set.

use std::collections::BTreeSet;

use crate::error::{Result, SearchError};

/// Splits text on runs of whitespace. Never yields an empty token.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// A token is valid when it contains no character below U+0020, i.e. no
/// ASCII control characters.
pub fn is_valid_token(token: &str) -> bool {
    !token.chars().any(|c| c < ' ')
}

/// Validated stop-word set, fixed at engine construction.
///
/// Stop words carry no discriminative power, so they are excluded from
/// indexing and silently dropped from queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Builds the set from any collection of words.
    ///
    /// Empty entries are ignored; a word containing a control character is
    /// rejected with [`SearchError::InvalidStopWord`].
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_token(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    /// Builds the set from a single whitespace-separated string.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(tokenize(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Tokenizes `text`, validating every token and dropping stop words.
///
/// The returned words keep their original order and multiplicity; frequency
/// normalization happens at indexing time.
pub(crate) fn split_into_words_no_stop<'a>(
    text: &'a str,
    stop_words: &StopWords,
) -> Result<Vec<&'a str>> {
    let mut words = Vec::new();
    for word in tokenize(text) {
        if !is_valid_token(word) {
            return Err(SearchError::InvalidToken(word.to_string()));
        }
        if !stop_words.contains(word) {
            words.push(word);
        }
    }
    Ok(words)
}
