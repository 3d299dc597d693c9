//! Document metadata storage and the insertion-ordered identifier list.

use std::collections::BTreeMap;

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Document identifier.
///
/// Non-negative by contract. The type is signed because the ingestion
/// boundary must reject a negative id as an error rather than silently
/// reinterpret it.
pub type DocumentId = i32;

/// Lifecycle tag carried by every document.
///
/// The engine records the status and hands it to filter predicates; it does
/// not enforce any visibility rules itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Active,
    Irrelevant,
    Banned,
    Removed,
}

/// Per-document metadata, immutable after insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DocumentMeta {
    pub(crate) rating: i32,
    pub(crate) status: DocumentStatus,
}

/// Owns document metadata and the insertion-order identifier list.
///
/// Invariant: `len()` always equals the number of entries in the id list,
/// and every listed id has a metadata entry.
#[derive(Debug, Default)]
pub(crate) struct DocumentStore {
    documents: BTreeMap<DocumentId, DocumentMeta>,
    ids: Vec<DocumentId>,
}

impl DocumentStore {
    pub(crate) fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    pub(crate) fn get(&self, id: DocumentId) -> Option<DocumentMeta> {
        self.documents.get(&id).copied()
    }

    /// Inserts a new document, appending its id to the insertion-order list.
    pub(crate) fn insert(&mut self, id: DocumentId, meta: DocumentMeta) -> Result<()> {
        if id < 0 {
            return Err(SearchError::NegativeId(id));
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateId(id));
        }
        self.documents.insert(id, meta);
        self.ids.push(id);
        Ok(())
    }

    /// Removes a document and its id-list entry.
    pub(crate) fn remove(&mut self, id: DocumentId) -> Result<DocumentMeta> {
        let meta = self
            .documents
            .remove(&id)
            .ok_or(SearchError::DocumentNotFound(id))?;
        self.ids.retain(|&other| other != id);
        Ok(meta)
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }

    /// The id of the `index`-th added document still present in the store.
    pub(crate) fn id_at(&self, index: usize) -> Result<DocumentId> {
        self.ids
            .get(index)
            .copied()
            .ok_or(SearchError::IndexOutOfRange {
                index,
                len: self.ids.len(),
            })
    }

    /// Live ids in insertion order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.ids.iter().copied()
    }
}
