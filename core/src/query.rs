use std::collections::BTreeSet;

use crate::config::SearchConfig;
use crate::document::Document;
use crate::error::{Result, SearchError};
use crate::tokenizer::split_into_words;

/// A parsed query. Both term lists are sorted and free of duplicates; stop
/// words are already gone. Terms borrow from the raw query text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if data.is_empty() || data.starts_with('-') {
        return Err(SearchError::MalformedQuery(word.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

/// Split `text` into plus and minus words. A minus word is written `-word`;
/// a bare `-` or a `--word` is rejected. Stop words are matched after the
/// dash is stripped, so `-the` is dropped when `the` is a stop word.
pub fn parse_query<'a>(text: &'a str, stop_words: &BTreeSet<String>) -> Result<Query<'a>> {
    let mut plus = BTreeSet::new();
    let mut minus = BTreeSet::new();
    for word in split_into_words(text)? {
        let query_word = parse_query_word(word)?;
        if stop_words.contains(query_word.data) {
            continue;
        }
        if query_word.is_minus {
            minus.insert(query_word.data);
        } else {
            plus.insert(query_word.data);
        }
    }
    Ok(Query { plus_words: plus.into_iter().collect(), minus_words: minus.into_iter().collect() })
}

/// Sort by relevance descending. A tie group starts at its most relevant
/// document and holds every following document less than the configured
/// epsilon below it; inside a group documents are ordered by rating
/// descending, then by id. At most `max_results` documents are kept.
pub fn rank_documents(mut documents: Vec<Document>, config: &SearchConfig) -> Vec<Document> {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
    let epsilon = config.relevance_epsilon;
    let mut start = 0;
    while start < documents.len() {
        let head = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|doc| head - doc.relevance >= epsilon)
            .map_or(documents.len(), |len| start + len);
        documents[start..end].sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id)));
        start = end;
    }
    documents.truncate(config.max_results);
    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(words: &[&str]) -> BTreeSet<String> { words.iter().map(|w| w.to_string()).collect() }

    #[test]
    fn splits_plus_and_minus_words() {
        let query = parse_query("fluffy -collar cat cat -dog", &stop(&[])).unwrap();
        assert_eq!(query.plus_words, vec!["cat", "fluffy"]);
        assert_eq!(query.minus_words, vec!["collar", "dog"]);
    }

    #[test]
    fn drops_stop_words_on_both_sides() {
        let query = parse_query("in the -the cat -in", &stop(&["in", "the"])).unwrap();
        assert_eq!(query.plus_words, vec!["cat"]);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn rejects_bare_and_double_dash() {
        let none = stop(&[]);
        assert_eq!(parse_query("cat -", &none), Err(SearchError::MalformedQuery("-".into())));
        assert_eq!(parse_query("--cat", &none), Err(SearchError::MalformedQuery("--cat".into())));
        // a dash inside a word is fine
        assert!(parse_query("well-known -semi-colon", &none).is_ok());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(matches!(parse_query("cat\u{2}", &stop(&[])), Err(SearchError::InvalidInput { .. })));
    }

    #[test]
    fn ranking_breaks_ties_by_rating() {
        let docs = vec![
            Document::new(1, 0.5, 1),
            Document::new(2, 0.9, 0),
            Document::new(3, 0.5 + 1e-8, 7),
            Document::new(4, 0.1, 9),
        ];
        let ranked = rank_documents(docs, &SearchConfig::default());
        let ids: Vec<_> = ranked.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn ties_do_not_chain_past_epsilon() {
        let docs = vec![
            Document::new(1, 0.5 + 1.8e-6, 0),
            Document::new(2, 0.5 + 0.9e-6, 5),
            Document::new(3, 0.5, 9),
        ];
        let ranked = rank_documents(docs, &SearchConfig::default());
        let ids: Vec<_> = ranked.iter().map(|d| d.id).collect();
        // 1 and 2 tie, 3 is more than epsilon below 1
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn ranking_truncates() {
        let docs = (0..8).map(|i| Document::new(i, i as f64, 0)).collect();
        let ranked = rank_documents(docs, &SearchConfig::default());
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].id, 7);
        assert_eq!(ranked[4].id, 3);
    }
}
