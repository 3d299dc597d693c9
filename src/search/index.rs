//! Inverted index with a mirrored per-document view.
//!
//! The index keeps two maps: term → (document → frequency) for ranking, and
//! document → (term → frequency) for answering "which words does this
//! document have" without scanning every term. Both views mutate only
//! through [`InvertedIndex::insert_document`] and
//! [`InvertedIndex::remove_document`], which keeps them in lockstep.
//!
//! Ordered maps are used throughout so iteration order is stable and
//! results are reproducible.

use std::collections::BTreeMap;

use super::store::DocumentId;

/// Normalized term frequency: occurrences of the term divided by the total
/// word count of the document. Always in `(0, 1]`.
pub(crate) type TermFrequency = f64;

/// Frequencies of every term of one document.
pub(crate) type WordFrequencies = BTreeMap<String, TermFrequency>;

#[derive(Debug, Default)]
pub(crate) struct InvertedIndex {
    /// term → document → normalized frequency
    term_docs: BTreeMap<String, BTreeMap<DocumentId, TermFrequency>>,
    /// document → term → normalized frequency, mirror of `term_docs`
    doc_terms: BTreeMap<DocumentId, WordFrequencies>,
}

impl InvertedIndex {
    /// Records all postings of one document at once.
    ///
    /// `frequencies` must already be normalized. An empty map registers the
    /// document with no postings, which is how an empty-text document looks.
    pub(crate) fn insert_document(&mut self, id: DocumentId, frequencies: WordFrequencies) {
        for (term, frequency) in &frequencies {
            self.term_docs
                .entry(term.clone())
                .or_default()
                .insert(id, *frequency);
        }
        self.doc_terms.insert(id, frequencies);
    }

    /// Removes every posting of one document from both views, pruning term
    /// buckets that become empty so the term map never accumulates husks.
    pub(crate) fn remove_document(&mut self, id: DocumentId) {
        let Some(frequencies) = self.doc_terms.remove(&id) else {
            return;
        };
        for term in frequencies.keys() {
            if let Some(postings) = self.term_docs.get_mut(term) {
                postings.remove(&id);
                if postings.is_empty() {
                    self.term_docs.remove(term);
                }
            }
        }
    }

    /// All postings of one term, keyed by document id in ascending order.
    pub(crate) fn postings(&self, term: &str) -> Option<&BTreeMap<DocumentId, TermFrequency>> {
        self.term_docs.get(term)
    }

    pub(crate) fn contains_posting(&self, term: &str, id: DocumentId) -> bool {
        self.term_docs
            .get(term)
            .is_some_and(|postings| postings.contains_key(&id))
    }

    /// The term → frequency view of one document, if it is registered.
    pub(crate) fn word_frequencies(&self, id: DocumentId) -> Option<&WordFrequencies> {
        self.doc_terms.get(&id)
    }

    pub(crate) fn term_count(&self) -> usize {
        self.term_docs.len()
    }

    /// Checks that every (term, document) pair exists in both views with the
    /// same frequency, and that no term bucket is empty.
    #[cfg(test)]
    pub(crate) fn views_are_mirrored(&self) -> bool {
        let forward = self.term_docs.iter().all(|(term, postings)| {
            !postings.is_empty()
                && postings.iter().all(|(id, frequency)| {
                    self.doc_terms
                        .get(id)
                        .and_then(|terms| terms.get(term))
                        .is_some_and(|mirrored| mirrored == frequency)
                })
        });
        let backward = self.doc_terms.iter().all(|(id, terms)| {
            terms.iter().all(|(term, frequency)| {
                self.term_docs
                    .get(term)
                    .and_then(|postings| postings.get(id))
                    .is_some_and(|mirrored| mirrored == frequency)
            })
        });
        forward && backward
    }
}
