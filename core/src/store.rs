use std::collections::btree_map::{self, BTreeMap};
use std::iter::Copied;

use crate::document::DocumentData;
use crate::DocId;

/// Live documents and their rating/status, ordered by id.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, DocumentData>,
}

pub type DocumentIds<'a> = Copied<btree_map::Keys<'a, DocId, DocumentData>>;

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, id: DocId, data: DocumentData) { self.documents.insert(id, data); }

    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> { self.documents.remove(&id) }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> { self.documents.get(&id) }

    pub fn contains(&self, id: DocId) -> bool { self.documents.contains_key(&id) }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// Live ids in ascending order.
    pub fn ids(&self) -> DocumentIds<'_> { self.documents.keys().copied() }
}
