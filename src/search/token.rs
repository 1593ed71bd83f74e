//! Ownership of the single outstanding search request.
//!
//! [`RequestSlot`] holds at most one live [`RequestToken`]. Replacing it hands
//! back the previous token so the caller can cancel it before the new request
//! goes out; completions for any token other than the live one are stale.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Suggestions-only lookup while typing
    Suggest,
    Search,
    /// Resolving a suggestion picked from a search response
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub id: RequestId,
    pub kind: RequestKind,
}

#[derive(Debug, Default)]
pub struct RequestSlot {
    next: u64,
    current: Option<RequestToken>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new live token. The previous one, if any, is invalidated and
    /// returned for cancellation.
    pub fn replace(&mut self, kind: RequestKind) -> (Option<RequestToken>, RequestToken) {
        self.next += 1;
        let token = RequestToken {
            id: RequestId(self.next),
            kind,
        };
        (self.current.replace(token), token)
    }

    /// Invalidates the live token and returns it.
    pub fn take(&mut self) -> Option<RequestToken> {
        self.current.take()
    }

    /// Clears the live token if it is `id`, returning it. Stale ids return `None`.
    pub fn settle(&mut self, id: RequestId) -> Option<RequestToken> {
        if self.is_current(id) {
            self.current.take()
        } else {
            None
        }
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.current.map_or(false, |token| token.id == id)
    }

    pub fn current(&self) -> Option<RequestToken> {
        self.current
    }
}
