use dashmap::mapref::one::Ref;
use dashmap::DashMap;
use std::collections::BTreeMap;
use tracing::trace;

use crate::dictionary::{Term, TermDictionary};
use crate::policy::ExecutionPolicy;
use crate::DocId;

/// Postings of one term: document id -> term frequency.
pub type Postings = BTreeMap<DocId, f64>;
/// Reverse mapping of one document: term -> term frequency.
pub type WordFrequencies = BTreeMap<Term, f64>;

static EMPTY_FREQUENCIES: WordFrequencies = BTreeMap::new();

/// Term -> (doc -> tf) plus the per-document reverse map, both keyed by
/// interned terms from the owned dictionary.
///
/// The forward map is a `DashMap` so that removal can clear the postings of
/// distinct terms from several threads at once.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    dictionary: TermDictionary,
    postings: DashMap<Term, Postings>,
    doc_terms: BTreeMap<DocId, WordFrequencies>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index `words` (stop words already removed) under `id`. Each occurrence
    /// adds `1 / words.len()`, so the frequencies of a document sum to one.
    /// A document without words gets an empty reverse map and no postings.
    pub fn insert(&mut self, id: DocId, words: &[&str]) {
        let mut freqs = WordFrequencies::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                let term = self.dictionary.intern(word);
                *freqs.entry(term).or_insert(0.0) += inv_word_count;
            }
        }
        for (term, &tf) in &freqs {
            self.postings.entry(term.clone()).or_default().insert(id, tf);
        }
        self.doc_terms.insert(id, freqs);
    }

    /// Drop every posting of `id`. Returns `false` when the id was not indexed.
    ///
    /// Postings of the document's terms are cleared through `policy`; terms left
    /// without postings are then dropped from the map and the dictionary.
    pub fn remove(&mut self, policy: ExecutionPolicy, id: DocId) -> bool {
        let Some(freqs) = self.doc_terms.remove(&id) else {
            return false;
        };
        let terms: Vec<Term> = freqs.into_keys().collect();
        let postings = &self.postings;
        policy.for_each(&terms, |term| {
            if let Some(mut docs) = postings.get_mut(term) {
                docs.remove(&id);
            }
        });
        for term in &terms {
            if self.postings.remove_if(term, |_, docs| docs.is_empty()).is_some() {
                self.dictionary.release(term);
                trace!(term = %term, "term released");
            }
        }
        true
    }

    /// The reverse term map of `id`, empty for an unknown id.
    pub fn word_frequencies(&self, id: DocId) -> &WordFrequencies {
        self.doc_terms.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    pub fn postings(&self, word: &str) -> Option<Ref<'_, Term, Postings>> { self.postings.get(word) }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings.get(word).map_or(0, |docs| docs.len())
    }

    pub fn contains(&self, word: &str, id: DocId) -> bool {
        self.postings.get(word).is_some_and(|docs| docs.contains_key(&id))
    }

    pub fn contains_document(&self, id: DocId) -> bool { self.doc_terms.contains_key(&id) }

    pub fn term_count(&self) -> usize { self.postings.len() }

    pub fn dictionary(&self) -> &TermDictionary { &self.dictionary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index.insert(0, &["cat", "city", "cat", "dog"]);
        index.insert(1, &["dog", "town"]);
        index
    }

    #[test]
    fn frequencies_sum_to_one() {
        let index = sample();
        let freqs = index.word_frequencies(0);
        assert_eq!(freqs.len(), 3);
        assert!((freqs["cat"] - 0.5).abs() < 1e-12);
        let sum: f64 = freqs.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn postings_share_interned_terms() {
        let index = sample();
        let from_doc = index.word_frequencies(1).keys().find(|t| &***t == "dog").cloned().unwrap();
        let from_dict = index.dictionary().get("dog").cloned().unwrap();
        assert!(Arc::ptr_eq(&from_doc, &from_dict));
        assert_eq!(index.document_frequency("dog"), 2);
    }

    #[test]
    fn empty_document_has_no_postings() {
        let mut index = InvertedIndex::new();
        index.insert(3, &[]);
        assert!(index.contains_document(3));
        assert!(index.word_frequencies(3).is_empty());
        assert_eq!(index.term_count(), 0);
    }

    #[test]
    fn remove_clears_postings_and_releases_terms() {
        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let mut index = sample();
            assert!(index.remove(policy, 0));
            assert!(!index.contains("dog", 0));
            assert!(index.contains("dog", 1));
            assert!(index.postings("cat").is_none());
            assert!(!index.dictionary().contains("cat"));
            assert!(index.dictionary().contains("dog"));
            assert!(index.word_frequencies(0).is_empty());
            assert!(!index.remove(policy, 0));
        }
    }
}
