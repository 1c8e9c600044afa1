use thiserror::Error;

use crate::DocId;

/// Errors raised by the search engine. All of them are detected locally and
/// synchronously; the caller has to fix the input before retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Text contains a control character (code point below 32).
    #[error("invalid input: control character {character:?} in {text:?}")]
    InvalidInput { text: String, character: char },

    #[error("document id {0} is negative")]
    InvalidId(DocId),

    #[error("document {0} already exists")]
    DuplicateId(DocId),

    /// A query term is a bare `-` or starts with `--`.
    #[error("malformed query term {0:?}: use \"-word\" to exclude a word")]
    MalformedQuery(String),

    #[error("document {0} not found")]
    UnknownDocument(DocId),
}

pub type Result<T> = std::result::Result<T, SearchError>;
