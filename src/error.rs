//! Error handling types and utilities.

use crate::search::DocumentId;
use thiserror::Error;

/// A specialized Result type for search engine operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Broad failure categories, for callers that only care about the class of
/// failure rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied input the engine rejects up front.
    InvalidArgument,
    /// Lookup of a document id that is not in the store.
    NotFound,
    /// Positional lookup outside the live document range.
    OutOfRange,
}

/// Error returned by search engine operations.
///
/// Every failure is detected synchronously at the offending call and the
/// engine performs no partial mutation: an operation either fully succeeds
/// or leaves the index unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Document identifiers must be non-negative.
    #[error("negative document id {0}")]
    NegativeId(DocumentId),
    /// The identifier is already present in the store.
    #[error("document id {0} already exists")]
    DuplicateId(DocumentId),
    /// A word contained an ASCII control character.
    #[error("invalid symbol in word {0:?}")]
    InvalidToken(String),
    /// A stop word contained an ASCII control character.
    #[error("invalid symbol in stop word {0:?}")]
    InvalidStopWord(String),
    /// The query contained an empty word.
    #[error("empty word in query")]
    EmptyQueryWord,
    /// A query word was a bare `-`.
    #[error("empty word after minus")]
    EmptyWordAfterMinus,
    /// A query word started with `--`.
    #[error("more than one minus before word {0:?}")]
    DoubleMinus(String),
    /// The rating inputs were empty, so an average rating is undefined.
    #[error("cannot average an empty ratings list")]
    EmptyRatings,
    /// The requested document id is not in the store.
    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),
    /// Positional identifier lookup past the end of the id list.
    #[error("index {index} out of range for {len} documents")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SearchError {
    /// The broad category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NegativeId(_)
            | Self::DuplicateId(_)
            | Self::InvalidToken(_)
            | Self::InvalidStopWord(_)
            | Self::EmptyQueryWord
            | Self::EmptyWordAfterMinus
            | Self::DoubleMinus(_)
            | Self::EmptyRatings => ErrorKind::InvalidArgument,
            Self::DocumentNotFound(_) => ErrorKind::NotFound,
            Self::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}
