use std::collections::BTreeSet;
use tracing::debug;

use crate::concurrent_map::ConcurrentMap;
use crate::config::SearchConfig;
use crate::document::{compute_average_rating, DocId, Document, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::{InvertedIndex, WordFrequencies};
use crate::policy::ExecutionPolicy;
use crate::query::{parse_query, rank_documents, Query};
use crate::store::{DocumentIds, DocumentStore};
use crate::tokenizer::{make_unique_non_empty_strings, split_into_words};

/// In-memory TF-IDF search engine.
///
/// Mutations take `&mut self` and queries take `&self`, so one instance has a
/// single writer and any number of readers between writes. To share an engine
/// across threads wrap it in [`crate::SharedSearchServer`].
#[derive(Debug, Default)]
pub struct SearchServer {
    config: SearchConfig,
    stop_words: BTreeSet<String>,
    index: InvertedIndex,
    store: DocumentStore,
}

impl SearchServer {
    /// An engine without stop words and with the default configuration.
    pub fn new() -> Self { Self::default() }

    /// Build an engine whose stop words come from any string container.
    /// Empty strings are skipped; control characters are rejected.
    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(SearchConfig::default(), stop_words)
    }

    /// Build an engine from space separated stop words, e.g. `"and in on"`.
    pub fn from_stop_words_text(text: &str) -> Result<Self> { Self::with_stop_words([text]) }

    pub fn with_config<I, S>(config: SearchConfig, stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = make_unique_non_empty_strings(stop_words)?;
        debug!(stop_words = stop_words.len(), ?config, "search server created");
        Ok(Self { config, stop_words, ..Default::default() })
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn stop_words(&self) -> impl Iterator<Item = &str> + '_ { self.stop_words.iter().map(String::as_str) }

    fn is_stop_word(&self, word: &str) -> bool { self.stop_words.contains(word) }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        Ok(split_into_words(text)?.into_iter().filter(|w| !self.is_stop_word(w)).collect())
    }

    /// Index a document. Nothing is registered unless every check passes: a
    /// negative id, an id that is already live, or text with control
    /// characters leave the engine untouched.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidId(id));
        }
        if self.store.contains(id) {
            return Err(SearchError::DuplicateId(id));
        }
        let words = self.split_into_words_no_stop(text)?;
        self.index.insert(id, &words);
        let rating = compute_average_rating(ratings);
        self.store.insert(id, DocumentData { rating, status });
        debug!(id, words = words.len(), rating, ?status, "document added");
        Ok(())
    }

    /// Remove a document. Removing an id that is not live does nothing.
    pub fn remove_document(&mut self, id: DocId) {
        if self.store.remove(id).is_some() {
            self.index.remove(ExecutionPolicy::Sequential, id);
            debug!(id, "document removed");
        }
    }

    /// Remove a document, clearing its postings through `policy`.
    ///
    /// Unlike [`remove_document`](Self::remove_document), the parallel variant
    /// requires the id to be live and reports [`SearchError::UnknownDocument`]
    /// otherwise. With the sequential policy an unknown id is still a no-op.
    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocId) -> Result<()> {
        if self.store.remove(id).is_none() {
            return match policy {
                ExecutionPolicy::Sequential => Ok(()),
                ExecutionPolicy::Parallel => Err(SearchError::UnknownDocument(id)),
            };
        }
        self.index.remove(policy, id);
        debug!(id, parallel = policy.is_parallel(), "document removed");
        Ok(())
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(ExecutionPolicy::Sequential, raw_query, status)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    pub fn find_top_documents_with_status(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(policy, raw_query, |_, document_status, _| document_status == status)
    }

    /// Rank documents accepted by `predicate(id, status, rating)` against the
    /// query, returning at most `config.max_results` of them.
    pub fn find_top_documents_with<P>(&self, policy: ExecutionPolicy, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let matched = self.find_all_documents(policy, &query, &predicate);
        Ok(rank_documents(matched, &self.config))
    }

    fn inverse_document_freq(&self, document_freq: usize) -> f64 {
        (self.store.len() as f64 / document_freq as f64).ln()
    }

    fn find_all_documents<P>(&self, policy: ExecutionPolicy, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let relevance = ConcurrentMap::<DocId, f64>::new(policy.shard_count(self.config.shard_count));
        policy.for_each(&query.plus_words, |word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            let idf = self.inverse_document_freq(postings.len());
            for (&id, &tf) in postings.iter() {
                let Some(data) = self.store.get(id) else {
                    continue;
                };
                if predicate(id, data.status, data.rating) {
                    *relevance.access(id) += tf * idf;
                }
            }
        });

        let mut relevance = relevance.build_ordinary_map();
        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }

        relevance
            .into_iter()
            .filter_map(|(id, rel)| self.store.get(id).map(|data| Document::new(id, rel, data.rating)))
            .collect()
    }

    /// Plus words of the query found in document `id`, together with its
    /// status. A matching minus word empties the word list.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Same as [`match_document`](Self::match_document) with the plus and minus
    /// lookups walked through `policy`. Fails with
    /// [`SearchError::UnknownDocument`] if `id` is not live.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let status = self.store.get(id).ok_or(SearchError::UnknownDocument(id))?.status;

        if policy.any(&query.minus_words, |word| self.index.contains(word, id)) {
            return Ok((Vec::new(), status));
        }
        let matched = policy
            .filter(&query.plus_words, |word| self.index.contains(word, id))
            .into_iter()
            .filter_map(|word| self.index.dictionary().get(word).map(|term| &**term))
            .collect();
        Ok((matched, status))
    }

    /// Term frequencies of document `id`; empty for an unknown id.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies { self.index.word_frequencies(id) }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> { self.store.get(id) }

    pub fn document_count(&self) -> usize { self.store.len() }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> DocumentIds<'_> { self.store.ids() }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> Self::IntoIter { self.document_ids() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> SearchServer {
        let mut server = SearchServer::new();
        server.add_document(0, "cat in the city", DocumentStatus::Actual, &[1]).unwrap();
        server.add_document(1, "dog in the town", DocumentStatus::Actual, &[2]).unwrap();
        server.add_document(2, "sparrow and dog at the ship", DocumentStatus::Actual, &[3]).unwrap();
        server
    }

    #[test]
    fn tf_idf_relevance() {
        let server = animals();
        let found = server.find_top_documents("dog ship").unwrap();
        assert_eq!(found.len(), 2);
        let expected_2 = (1.0 / 6.0) * 3f64.ln() + (1.0 / 6.0) * 1.5f64.ln();
        let expected_1 = 0.25 * 1.5f64.ln();
        assert_eq!(found[0].id, 2);
        assert!((found[0].relevance - expected_2).abs() < 1e-9);
        assert_eq!(found[1].id, 1);
        assert!((found[1].relevance - expected_1).abs() < 1e-9);
    }

    #[test]
    fn rejects_bad_ids() {
        let mut server = animals();
        assert_eq!(server.add_document(-1, "x", DocumentStatus::Actual, &[]), Err(SearchError::InvalidId(-1)));
        assert_eq!(server.add_document(1, "x", DocumentStatus::Actual, &[]), Err(SearchError::DuplicateId(1)));
        assert_eq!(server.document_count(), 3);
    }

    #[test]
    fn failed_add_leaves_no_trace() {
        let mut server = animals();
        let err = server.add_document(7, "bad\u{1f}word here", DocumentStatus::Actual, &[5]);
        assert!(matches!(err, Err(SearchError::InvalidInput { .. })));
        assert_eq!(server.document_count(), 3);
        assert!(server.word_frequencies(7).is_empty());
        assert!(server.document(7).is_none());
        // the id is still free
        server.add_document(7, "good word", DocumentStatus::Actual, &[]).unwrap();
    }

    #[test]
    fn readding_removed_id_is_allowed() {
        let mut server = animals();
        server.remove_document(1);
        server.add_document(1, "dog again", DocumentStatus::Banned, &[]).unwrap();
        assert_eq!(server.document(1).unwrap().status, DocumentStatus::Banned);
    }

    #[test]
    fn parallel_remove_requires_live_id() {
        let mut server = animals();
        assert_eq!(
            server.remove_document_with(ExecutionPolicy::Parallel, 9),
            Err(SearchError::UnknownDocument(9))
        );
        assert_eq!(server.remove_document_with(ExecutionPolicy::Sequential, 9), Ok(()));
        server.remove_document_with(ExecutionPolicy::Parallel, 2).unwrap();
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![0, 1]);
        assert!(server.find_top_documents("ship").unwrap().is_empty());
    }

    #[test]
    fn match_document_reports_plus_words() {
        let server = animals();
        let (words, status) = server.match_document("dog ship cat", 2).unwrap();
        assert_eq!(words, vec!["dog", "ship"]);
        assert_eq!(status, DocumentStatus::Actual);

        let (words, _) = server.match_document("dog -sparrow", 2).unwrap();
        assert!(words.is_empty());

        assert_eq!(server.match_document("dog", 42), Err(SearchError::UnknownDocument(42)));
    }

    #[test]
    fn match_document_parallel_agrees() {
        let server = animals();
        for (query, id) in [("dog ship cat", 2), ("city town -dog", 1), ("in the city", 0)] {
            assert_eq!(
                server.match_document(query, id).unwrap(),
                server.match_document_with(ExecutionPolicy::Parallel, query, id).unwrap()
            );
        }
    }

    #[test]
    fn document_without_terms_is_not_ranked() {
        let mut server = SearchServer::from_stop_words_text("in the").unwrap();
        server.add_document(0, "in the", DocumentStatus::Actual, &[4]).unwrap();
        server.add_document(1, "the cat", DocumentStatus::Actual, &[4]).unwrap();
        assert_eq!(server.document_count(), 2);
        assert!(server.word_frequencies(0).is_empty());
        let found = server.find_top_documents("cat the in").unwrap();
        assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn iterates_over_ids() {
        let server = animals();
        let ids: Vec<DocId> = (&server).into_iter().collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
