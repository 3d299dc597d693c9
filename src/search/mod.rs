//! TF-IDF text search: tokenization, query parsing, indexing, and ranking.
//!
//! [`SearchEngine`] is the entry point; the submodules hold the pieces it
//! composes. All index state mutates through the engine so the two index
//! views (by term and by document) can never drift apart.

// Module declarations
pub(crate) mod engine;
pub(crate) mod index;
pub(crate) mod query;
pub(crate) mod scoring;
pub(crate) mod store;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use engine::{MatchResult, SearchEngine};
pub use query::Query;
pub use scoring::{DEFAULT_MAX_RESULTS, RELEVANCE_EPSILON, ScoredDocument};
pub use store::{DocumentId, DocumentStatus};
pub use tokenize::{StopWords, is_valid_token, tokenize};
