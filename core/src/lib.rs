//! In-memory TF-IDF search engine.
//!
//! Documents are split on spaces, stop words are dropped, and every remaining
//! word is indexed with its term frequency. Queries accept plus words and
//! `-minus` words and rank matching documents by summed TF-IDF, with optional
//! parallel scoring over a sharded accumulator.

pub mod concurrent_map;
pub mod config;
pub mod dictionary;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod log_duration;
pub mod paginator;
pub mod policy;
pub mod process_queries;
pub mod query;
pub mod request_queue;
pub mod server;
pub mod store;
pub mod tokenizer;

pub use concurrent_map::ConcurrentMap;
pub use config::SearchConfig;
pub use dictionary::{Term, TermDictionary};
pub use document::{DocId, Document, DocumentData, DocumentStatus};
pub use duplicates::{find_duplicates, remove_duplicates};
pub use error::{Result, SearchError};
pub use log_duration::LogDuration;
pub use paginator::{paginate, Page, Paginator};
pub use policy::ExecutionPolicy;
pub use process_queries::{process_queries, process_queries_joined};
pub use request_queue::RequestQueue;
pub use server::SearchServer;

/// An engine shared between threads: queries take the read lock, and
/// `add_document`/`remove_document` take the write lock, so no reader ever
/// overlaps a mutation.
pub type SharedSearchServer = std::sync::Arc<parking_lot::RwLock<SearchServer>>;
