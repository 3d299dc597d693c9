//! The search engine: document ingestion, ranked retrieval, and match
//! reporting.

use ahash::AHashMap;
use serde::Serialize;

use super::index::{InvertedIndex, WordFrequencies};
use super::query::Query;
use super::scoring::{self, DEFAULT_MAX_RESULTS, ScoredDocument};
use super::store::{DocumentId, DocumentMeta, DocumentStatus, DocumentStore};
use super::tokenize::{StopWords, split_into_words_no_stop};
use crate::error::{Result, SearchError};

/// Word-level match report for a single document.
///
/// `words` holds every required query term the document contains, in
/// lexicographic order. If any excluded term matched, the list is empty:
/// exclusion vetoes the whole match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

/// In-memory search engine over statused, rated text documents.
///
/// All state lives behind this type; results are owned copies, never
/// references into the internals. Single-threaded and synchronous: every
/// operation completes before returning and either fully succeeds or leaves
/// the engine unchanged.
#[derive(Debug)]
pub struct SearchEngine {
    stop_words: StopWords,
    index: InvertedIndex,
    store: DocumentStore,
    max_results: usize,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(StopWords::default())
    }
}

impl SearchEngine {
    /// Creates an engine with the given stop words and the default result
    /// cap of [`DEFAULT_MAX_RESULTS`].
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            index: InvertedIndex::default(),
            store: DocumentStore::default(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Overrides the cap on the number of ranked results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Adds a document to the store and the index.
    ///
    /// The id must be non-negative and unused, every token of `text` must be
    /// valid, and `ratings` must be non-empty. Validation runs before any
    /// mutation, so a rejected add leaves the engine untouched. Empty text
    /// is legal and contributes no postings.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::NegativeId(id));
        }
        if self.store.contains(id) {
            return Err(SearchError::DuplicateId(id));
        }
        let rating = average_rating(ratings)?;
        let words = split_into_words_no_stop(text, &self.stop_words)?;

        // Validation is done; nothing below can fail.
        let mut frequencies = WordFrequencies::new();
        if !words.is_empty() {
            let inverse_word_count = 1.0 / words.len() as f64;
            for word in &words {
                *frequencies.entry((*word).to_string()).or_insert(0.0) += inverse_word_count;
            }
        }
        self.store.insert(id, DocumentMeta { rating, status })?;
        self.index.insert_document(id, frequencies);
        tracing::debug!(
            id,
            words = words.len(),
            terms = self.index.term_count(),
            ?status,
            "added document"
        );
        Ok(())
    }

    /// Removes a document and all of its postings.
    ///
    /// Unlike an add, the only way this fails is an unknown id.
    pub fn remove_document(&mut self, id: DocumentId) -> Result<()> {
        self.store.remove(id)?;
        self.index.remove_document(id);
        tracing::debug!(id, "removed document");
        Ok(())
    }

    /// The term → normalized frequency map of one document.
    pub fn word_frequencies(&self, id: DocumentId) -> Result<WordFrequencies> {
        if !self.store.contains(id) {
            return Err(SearchError::DocumentNotFound(id));
        }
        Ok(self.index.word_frequencies(id).cloned().unwrap_or_default())
    }

    pub fn document_count(&self) -> usize {
        self.store.len()
    }

    /// The id of the `index`-th added document still present.
    pub fn document_id_at(&self, index: usize) -> Result<DocumentId> {
        self.store.id_at(index)
    }

    /// Live document ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.store.ids()
    }

    /// Top results for documents with status [`DocumentStatus::Active`].
    pub fn find_top(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_by_status(raw_query, DocumentStatus::Active)
    }

    /// Top results for documents with the given status.
    pub fn find_top_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_with(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top results for documents accepted by `predicate`, which receives
    /// `(id, status, rating)`.
    ///
    /// Relevance is TF-IDF accumulated over the required terms; documents
    /// touched by an excluded term are dropped unconditionally, even where
    /// the predicate accepted them. Query terms absent from the index simply
    /// contribute nothing.
    pub fn find_top_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let candidates = self.find_all(&query, predicate);
        let results = scoring::rank(candidates, self.max_results);
        tracing::trace!(
            query = raw_query,
            results = results.len(),
            "search completed"
        );
        Ok(results)
    }

    /// Reports which required terms the document `id` contains.
    pub fn match_document(&self, raw_query: &str, id: DocumentId) -> Result<MatchResult> {
        let meta = self
            .store
            .get(id)
            .ok_or(SearchError::DocumentNotFound(id))?;
        let query = Query::parse(raw_query, &self.stop_words)?;

        for word in &query.excluded {
            if self.index.contains_posting(word, id) {
                return Ok(MatchResult {
                    words: Vec::new(),
                    status: meta.status,
                });
            }
        }
        let words = query
            .required
            .iter()
            .filter(|word| self.index.contains_posting(word, id))
            .cloned()
            .collect();
        Ok(MatchResult {
            words,
            status: meta.status,
        })
    }

    /// Unranked relevance accumulation over one parsed query.
    fn find_all<P>(&self, query: &Query, predicate: P) -> Vec<ScoredDocument>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: AHashMap<DocumentId, f64> = AHashMap::new();
        for word in &query.required {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = scoring::inverse_document_frequency(self.store.len(), postings.len());
            for (&id, &term_frequency) in postings {
                let Some(meta) = self.store.get(id) else {
                    continue;
                };
                if predicate(id, meta.status, meta.rating) {
                    *relevance.entry(id).or_insert(0.0) += term_frequency * idf;
                }
            }
        }

        for word in &query.excluded {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            for &id in postings.keys() {
                relevance.remove(&id);
            }
        }

        let mut candidates: Vec<ScoredDocument> = relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.store.get(id).map(|meta| ScoredDocument {
                    id,
                    relevance,
                    rating: meta.rating,
                })
            })
            .collect();
        // The accumulation map iterates in arbitrary order; fix id order so
        // ranking sees a reproducible input.
        candidates.sort_unstable_by_key(|candidate| candidate.id);
        candidates
    }
}

/// Truncating integer mean of the raw rating inputs.
fn average_rating(ratings: &[i32]) -> Result<i32> {
    if ratings.is_empty() {
        return Err(SearchError::EmptyRatings);
    }
    let sum: i64 = ratings.iter().map(|&rating| i64::from(rating)).sum();
    Ok((sum / ratings.len() as i64) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use proptest::prelude::*;
    use rstest::rstest;

    fn engine() -> SearchEngine {
        SearchEngine::new(StopWords::new(["and", "in", "with"]).unwrap())
    }

    #[rstest]
    #[case(&[1, 2, 3], 2)]
    #[case(&[1, 2], 1)] // truncating, not rounding
    #[case(&[-1, -2], -1)] // truncation toward zero
    #[case(&[7], 7)]
    fn average_rating_truncates_toward_zero(#[case] ratings: &[i32], #[case] expected: i32) {
        check!(average_rating(ratings) == Ok(expected));
    }

    #[test]
    fn average_rating_rejects_empty_input() {
        check!(average_rating(&[]) == Err(SearchError::EmptyRatings));
    }

    #[test]
    fn frequencies_are_normalized_counts() {
        let mut engine = engine();
        engine
            .add_document(1, "a a b", DocumentStatus::Active, &[0])
            .unwrap();

        let frequencies = engine.word_frequencies(1).unwrap();
        check!((frequencies["a"] - 2.0 / 3.0).abs() < 1e-12);
        check!((frequencies["b"] - 1.0 / 3.0).abs() < 1e-12);
        let total: f64 = frequencies.values().sum();
        check!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_text_document_is_legal() {
        let mut engine = engine();
        engine
            .add_document(1, "", DocumentStatus::Active, &[0])
            .unwrap();
        check!(engine.document_count() == 1);
        check!(engine.word_frequencies(1).unwrap().is_empty());
    }

    #[test]
    fn failed_add_leaves_engine_unchanged() {
        let mut engine = engine();
        engine
            .add_document(1, "cat", DocumentStatus::Active, &[5])
            .unwrap();

        let duplicate = engine.add_document(1, "dog", DocumentStatus::Banned, &[1]);
        check!(duplicate == Err(SearchError::DuplicateId(1)));
        let invalid = engine.add_document(2, "bro\u{1}ken", DocumentStatus::Active, &[1]);
        check!(invalid == Err(SearchError::InvalidToken("bro\u{1}ken".to_string())));
        let unrated = engine.add_document(3, "dog", DocumentStatus::Active, &[]);
        check!(unrated == Err(SearchError::EmptyRatings));

        check!(engine.document_count() == 1);
        check!(engine.word_frequencies(1).unwrap().contains_key("cat"));
        check!(engine.word_frequencies(2) == Err(SearchError::DocumentNotFound(2)));
    }

    proptest! {
        /// Per-document frequencies always sum to 1 while the document is
        /// present, for any non-empty text drawn from a small alphabet.
        #[test]
        fn frequencies_sum_to_one(
            words in prop::collection::vec("[a-d]{1,3}", 1..30)
        ) {
            let mut engine = SearchEngine::default();
            engine
                .add_document(0, &words.join(" "), DocumentStatus::Active, &[1])
                .unwrap();
            let total: f64 = engine.word_frequencies(0).unwrap().values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }
    }
}
