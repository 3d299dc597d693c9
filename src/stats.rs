//! Bounded-history request statistics.
//!
//! [`RequestTracker`] wraps an engine's search entry points and remembers,
//! for the last [`DEFAULT_WINDOW`] requests, how many returned no results.
//! It observes only emptiness; relevance and ratings pass through untouched.

use std::collections::VecDeque;

use crate::error::Result;
use crate::search::{DocumentId, DocumentStatus, ScoredDocument, SearchEngine};

/// Number of requests retained by default: one per minute of a day.
pub const DEFAULT_WINDOW: usize = 1440;

/// Sliding-window counter of zero-result searches.
///
/// Only successful searches enter the window; a query that fails to parse
/// propagates its error and is not recorded. Once the window is full, the
/// oldest entry is evicted and its emptiness uncounted.
#[derive(Debug)]
pub struct RequestTracker<'a> {
    engine: &'a SearchEngine,
    /// One flag per retained request: true means the result set was empty.
    requests: VecDeque<bool>,
    window: usize,
    empty_results: usize,
}

impl<'a> RequestTracker<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        Self::with_window(engine, DEFAULT_WINDOW)
    }

    pub fn with_window(engine: &'a SearchEngine, window: usize) -> Self {
        Self {
            engine,
            requests: VecDeque::new(),
            window,
            empty_results: 0,
        }
    }

    /// Searches with the default Active-status filter and records the
    /// result.
    pub fn find(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let results = self.engine.find_top(raw_query)?;
        self.record(&results);
        Ok(results)
    }

    /// Searches with a status filter and records the result.
    pub fn find_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        let results = self.engine.find_top_by_status(raw_query, status)?;
        self.record(&results);
        Ok(results)
    }

    /// Searches with a caller-supplied predicate and records the result.
    pub fn find_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<ScoredDocument>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let results = self.engine.find_top_with(raw_query, predicate)?;
        self.record(&results);
        Ok(results)
    }

    /// How many of the retained requests returned no results.
    pub fn no_result_count(&self) -> usize {
        self.empty_results
    }

    fn record(&mut self, results: &[ScoredDocument]) {
        let empty = results.is_empty();
        self.requests.push_back(empty);
        if empty {
            self.empty_results += 1;
        }
        if self.requests.len() > self.window
            && self.requests.pop_front() == Some(true)
        {
            self.empty_results -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn engine_with_one_document() -> SearchEngine {
        let mut engine = SearchEngine::default();
        engine
            .add_document(1, "curly cat", DocumentStatus::Active, &[3])
            .unwrap();
        engine
    }

    #[test]
    fn counts_zero_result_requests() {
        let engine = engine_with_one_document();
        let mut tracker = RequestTracker::new(&engine);

        check!(!tracker.find("cat").unwrap().is_empty());
        check!(tracker.find("dog").unwrap().is_empty());
        check!(tracker.find("sparrow").unwrap().is_empty());
        check!(tracker.no_result_count() == 2);
    }

    #[test]
    fn evicts_oldest_entry_when_window_is_full() {
        let engine = engine_with_one_document();
        let mut tracker = RequestTracker::with_window(&engine, 3);

        // Three misses fill the window.
        for query in ["dog", "sparrow", "owl"] {
            tracker.find(query).unwrap();
        }
        check!(tracker.no_result_count() == 3);

        // A hit evicts the oldest miss. Window is now [miss, miss, hit].
        tracker.find("cat").unwrap();
        check!(tracker.no_result_count() == 2);

        // Another miss evicts a miss: [miss, hit, miss].
        tracker.find("raven").unwrap();
        check!(tracker.no_result_count() == 2);

        // A hit evicts a miss: [hit, miss, hit].
        tracker.find("cat").unwrap();
        check!(tracker.no_result_count() == 1);
    }

    #[test]
    fn parse_errors_propagate_and_are_not_recorded() {
        let engine = engine_with_one_document();
        let mut tracker = RequestTracker::new(&engine);

        check!(tracker.find("--cat").is_err());
        check!(tracker.no_result_count() == 0);
    }

    #[test]
    fn predicate_and_status_searches_are_recorded_too() {
        let engine = engine_with_one_document();
        let mut tracker = RequestTracker::new(&engine);

        tracker
            .find_by_status("cat", DocumentStatus::Banned)
            .unwrap();
        tracker
            .find_with("cat", |_, _, rating| rating > 100)
            .unwrap();
        check!(tracker.no_result_count() == 2);
    }
}
