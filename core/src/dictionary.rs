use std::collections::HashSet;
use std::sync::Arc;

/// Interned term text. Cloning a `Term` shares the allocation owned by the
/// [`TermDictionary`] it came from.
pub type Term = Arc<str>;

/// Per-engine string pool. Every place the index stores a term holds a clone
/// of the same `Arc<str>`, so one word is allocated once no matter how many
/// documents contain it.
#[derive(Debug, Default)]
pub struct TermDictionary {
    terms: HashSet<Term>,
}

impl TermDictionary {
    pub fn new() -> Self { Self::default() }

    /// Return the shared handle for `word`, allocating it on first use.
    pub fn intern(&mut self, word: &str) -> Term {
        if let Some(term) = self.terms.get(word) {
            return Arc::clone(term);
        }
        let term: Term = Arc::from(word);
        self.terms.insert(Arc::clone(&term));
        term
    }

    pub fn get(&self, word: &str) -> Option<&Term> { self.terms.get(word) }

    pub fn contains(&self, word: &str) -> bool { self.terms.contains(word) }

    /// Drop a term once nothing in the index refers to it any more.
    pub fn release(&mut self, word: &str) -> bool { self.terms.remove(word) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}
