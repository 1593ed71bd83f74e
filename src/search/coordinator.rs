//! Search orchestration: one live request, newest wins.

use crate::{
    core::{config::SearchConfig, geo::LatLng},
    search::{
        backend::{SearchBackend, SearchCompletion, SearchResponse},
        query::{QueryMode, SearchQuery, SearchResult, Suggestion},
        token::{RequestId, RequestKind, RequestSlot, RequestToken},
    },
    Result,
};

/// What the screen should do after a coordinator call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Nothing to show (empty input, stale completion, autocomplete noise)
    Ignored,
    /// A request is in flight
    Pending(RequestToken),
    /// Autocomplete suggestions were refreshed
    Suggestions(usize),
    /// Results with coordinates, at most `limit` of them
    Resolved(Vec<SearchResult>),
    NoResults,
    Failed(String),
}

pub struct SearchCoordinator {
    config: SearchConfig,
    slot: RequestSlot,
    suggestions: Vec<Suggestion>,
}

impl SearchCoordinator {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            slot: RequestSlot::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn query(&self, text: &str, bias: LatLng) -> SearchQuery {
        SearchQuery::new(text, bias, &self.config)
    }

    pub fn pending(&self) -> Option<RequestToken> {
        self.slot.current()
    }

    pub fn has_pending(&self) -> bool {
        self.slot.current().is_some()
    }

    /// Suggestions from the latest autocomplete lookup
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Cancels the live request, if any.
    pub fn cancel<B: SearchBackend + ?Sized>(&mut self, backend: &mut B) -> Option<RequestToken> {
        let token = self.slot.take()?;
        log::debug!("cancelling search request {}", token.id);
        backend.cancel(token.id);
        Some(token)
    }

    pub fn search<B: SearchBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        text: &str,
        bias: LatLng,
    ) -> SearchOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SearchOutcome::Ignored;
        }
        self.suggestions.clear();

        let query = self.query(text, bias);
        log::info!("searching {:?} near {}", query.text(), query.proximity());
        self.issue(backend, RequestKind::Search, |backend, id| {
            backend.search(id, &query, QueryMode::Search)
        })
    }

    /// Autocomplete hook for each edit of the search box. Never preempts a
    /// submitted search or its selection step.
    pub fn query_changed<B: SearchBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        text: &str,
        bias: LatLng,
    ) -> SearchOutcome {
        let text = text.trim();
        if text.chars().count() < self.config.min_suggest_len {
            if matches!(self.slot.current(), Some(token) if token.kind == RequestKind::Suggest) {
                self.cancel(backend);
            }
            self.suggestions.clear();
            return SearchOutcome::Ignored;
        }

        if let Some(token) = self.slot.current().filter(|t| t.kind != RequestKind::Suggest) {
            log::debug!("skipping suggestions while {} is in flight", token.id);
            return SearchOutcome::Ignored;
        }

        let query = self.query(text, bias);
        match self.issue(backend, RequestKind::Suggest, |backend, id| {
            backend.search(id, &query, QueryMode::Suggest)
        }) {
            SearchOutcome::Failed(message) => {
                log::warn!("suggestion lookup failed to start: {}", message);
                SearchOutcome::Ignored
            }
            outcome => outcome,
        }
    }

    pub fn on_completion<B: SearchBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        completion: SearchCompletion,
    ) -> SearchOutcome {
        let token = match self.slot.settle(completion.request) {
            Some(token) => token,
            None => {
                log::debug!("discarding stale search response {}", completion.request);
                return SearchOutcome::Ignored;
            }
        };

        match (token.kind, completion.response) {
            (RequestKind::Suggest, SearchResponse::Suggestions(suggestions)) => {
                self.suggestions = suggestions;
                SearchOutcome::Suggestions(self.suggestions.len())
            }
            (RequestKind::Suggest, SearchResponse::Results(results)) => {
                self.suggestions = results.iter().map(Suggestion::from).collect();
                SearchOutcome::Suggestions(self.suggestions.len())
            }
            (RequestKind::Suggest, SearchResponse::Failed(message)) => {
                log::warn!("suggestion lookup failed: {}", message);
                self.suggestions.clear();
                SearchOutcome::Ignored
            }
            (_, SearchResponse::Failed(message)) => {
                log::warn!("search {} failed: {}", token.id, message);
                SearchOutcome::Failed(message)
            }
            (_, SearchResponse::Results(results)) => self.resolve(results),
            (RequestKind::Search, SearchResponse::Suggestions(suggestions)) => {
                match suggestions.into_iter().next() {
                    Some(first) => {
                        log::debug!("selecting first suggestion {:?}", first.name);
                        self.issue(backend, RequestKind::Select, |backend, id| {
                            backend.select(id, &first)
                        })
                    }
                    None => SearchOutcome::NoResults,
                }
            }
            (RequestKind::Select, SearchResponse::Suggestions(_)) => {
                log::debug!("selection {} resolved to suggestions only", token.id);
                SearchOutcome::NoResults
            }
        }
    }

    fn resolve(&self, results: Vec<SearchResult>) -> SearchOutcome {
        let located: Vec<_> = results
            .into_iter()
            .filter(|result| result.coordinate.is_some())
            .take(self.config.limit)
            .collect();
        if located.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Resolved(located)
        }
    }

    fn issue<B: SearchBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        kind: RequestKind,
        send: impl FnOnce(&mut B, RequestId) -> Result<()>,
    ) -> SearchOutcome {
        let (previous, token) = self.slot.replace(kind);
        if let Some(previous) = previous {
            log::debug!("request {} preempted by {}", previous.id, token.id);
            backend.cancel(previous.id);
        }
        match send(backend, token.id) {
            Ok(()) => SearchOutcome::Pending(token),
            Err(e) => {
                self.slot.settle(token.id);
                SearchOutcome::Failed(e.to_string())
            }
        }
    }
}
