use crate::{
    search::{
        query::{QueryMode, SearchQuery, SearchResult, Suggestion},
        token::RequestId,
    },
    Result,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Results(Vec<SearchResult>),
    /// First phase of a two-phase backend, or a suggest-mode answer
    Suggestions(Vec<Suggestion>),
    Failed(String),
}

/// A response tagged with the request it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCompletion {
    pub request: RequestId,
    pub response: SearchResponse,
}

impl SearchCompletion {
    pub fn new(request: RequestId, response: SearchResponse) -> Self {
        Self { request, response }
    }
}

/// External places-search service.
///
/// Calls return immediately; each accepted request is answered later with
/// exactly one [`SearchCompletion`] unless it is cancelled first. An `Err`
/// return means the request was never issued.
pub trait SearchBackend {
    fn search(&mut self, request: RequestId, query: &SearchQuery, mode: QueryMode) -> Result<()>;

    /// Resolves a suggestion into concrete results.
    fn select(&mut self, request: RequestId, suggestion: &Suggestion) -> Result<()>;

    /// Best-effort cancellation. A completion may still arrive afterwards
    /// and must be discarded by the caller.
    fn cancel(&mut self, request: RequestId);
}
