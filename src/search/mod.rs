pub mod backend;
pub mod coordinator;
pub mod photon;
pub mod query;
pub mod token;

pub use backend::{SearchBackend, SearchCompletion, SearchResponse};
pub use coordinator::{SearchCoordinator, SearchOutcome};
pub use query::{QueryMode, ResultType, SearchQuery, SearchResult, Suggestion};
pub use token::{RequestId, RequestKind, RequestSlot, RequestToken};
