use rayon::prelude::*;

use crate::error::Result;
use crate::{Document, SearchServer};

/// Run every query through [`SearchServer::find_top_documents`] in parallel.
/// Results keep the order of `queries`; the first failing query fails the batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries.par_iter().map(|query| server.find_top_documents(query.as_ref())).collect()
}

/// Like [`process_queries`], with all result lists joined into one.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
