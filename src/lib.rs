//! In-process text search engine with TF-IDF ranking.
//!
//! Documents are ingested with an identifier, a status, and raw rating inputs.
//! Queries support required terms and excluded ("minus") terms and return the
//! top-K results ranked by term-frequency × inverse-document-frequency, with
//! rating breaking near-ties. A match reporter answers which query terms a
//! specific document contains.
//!
//! Two small collaborators live alongside the engine: [`RequestTracker`]
//! keeps bounded statistics over recent searches, and [`paginate`] slices
//! any ordered collection into fixed-size windows for display.

pub mod error;
pub mod page;
pub mod search;
pub mod stats;
pub mod trace;

pub use error::{ErrorKind, Result, SearchError};
pub use page::{Page, paginate};
pub use search::{
    DocumentId, DocumentStatus, MatchResult, Query, ScoredDocument, SearchEngine, StopWords,
};
pub use stats::RequestTracker;
