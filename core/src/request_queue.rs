use std::collections::VecDeque;

use crate::error::Result;
use crate::{DocId, Document, DocumentStatus, ExecutionPolicy, SearchServer};

/// Requests remembered by default: one per minute for a day.
pub const MIN_IN_DAY: usize = 1440;

/// Forwards queries to a [`SearchServer`] and counts how many of the most
/// recent ones came back empty.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    capacity: usize,
    no_result_requests: usize,
}

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    results: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self { Self::with_capacity(server, MIN_IN_DAY) }

    pub fn with_capacity(server: &'a SearchServer, capacity: usize) -> Self {
        Self { server, requests: VecDeque::with_capacity(capacity), capacity: capacity.max(1), no_result_requests: 0 }
    }

    pub fn add_find_request_with<P>(&mut self, policy: ExecutionPolicy, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let found = self.server.find_top_documents_with(policy, raw_query, predicate)?;
        self.record(found.len());
        Ok(found)
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.add_find_request_with(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.add_find_request_by(raw_query, |_, document_status, _| document_status == status)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    fn record(&mut self, results: usize) {
        if self.requests.len() == self.capacity {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.results == 0 {
                    self.no_result_requests -= 1;
                }
            }
        }
        if results == 0 {
            self.no_result_requests += 1;
        }
        self.requests.push_back(QueryResult { results });
    }

    /// Empty results among the remembered requests.
    pub fn no_result_requests(&self) -> usize { self.no_result_requests }

    pub fn len(&self) -> usize { self.requests.len() }

    pub fn is_empty(&self) -> bool { self.requests.is_empty() }
}
