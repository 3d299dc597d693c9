//! Relevance scoring and ranking.

use serde::Serialize;

use super::store::DocumentId;

/// Two relevances closer than this are considered tied and fall back to
/// rating order. A difference of exactly this value is not a tie.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Default cap on the number of ranked results.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// One ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

/// Inverse document frequency: `ln(total_docs / docs_with_term)`.
///
/// Callers only invoke this for terms present in the index, so
/// `docs_with_term` is never zero.
pub(crate) fn inverse_document_frequency(total_docs: usize, docs_with_term: usize) -> f64 {
    (total_docs as f64 / docs_with_term as f64).ln()
}

/// Sorts candidates by relevance descending and truncates to `max_results`.
///
/// Relevances within [`RELEVANCE_EPSILON`] of each other are ordered by
/// rating descending, then by id ascending so equal-rated ties are still
/// deterministic.
///
/// Near-ties are resolved in a second pass over runs of adjacent relevances,
/// not inside the comparator: folding the epsilon check into one comparator
/// makes the relation non-transitive across chains of pairwise-tied
/// relevances, which `sort_by` may reject as a total-order violation.
pub(crate) fn rank(mut candidates: Vec<ScoredDocument>, max_results: usize) -> Vec<ScoredDocument> {
    candidates.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));

    let mut start = 0;
    while start < candidates.len() {
        let mut end = start + 1;
        while end < candidates.len()
            && (candidates[end - 1].relevance - candidates[end].relevance).abs()
                < RELEVANCE_EPSILON
        {
            end += 1;
        }
        candidates[start..end]
            .sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id)));
        start = end;
    }

    candidates.truncate(max_results);
    candidates
}
