use std::collections::BTreeSet;
use tracing::info;

use crate::{DocId, SearchServer};

/// Ids of documents whose set of distinct words equals the set of a document
/// with a lower id. Word frequency and order do not matter. Ascending order.
pub fn find_duplicates(server: &SearchServer) -> Vec<DocId> {
    let mut seen: BTreeSet<Vec<&str>> = BTreeSet::new();
    let mut duplicates = Vec::new();
    for id in server {
        let words: Vec<&str> = server.word_frequencies(id).keys().map(|term| &**term).collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Remove every duplicate found by [`find_duplicates`], keeping the lowest id of
/// each group. The whole scan finishes before the first removal. Returns the
/// removed ids.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let duplicates = find_duplicates(server);
    for &id in &duplicates {
        info!("Found duplicate document id {id}");
        server.remove_document(id);
    }
    duplicates
}
