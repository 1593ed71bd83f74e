pub mod headless;
pub mod provider;
pub mod session;

pub use headless::HeadlessMap;
pub use provider::{MapProvider, MarkerId, StyleRequestId, Stream, SubscriptionId};
pub use session::{MapSession, SessionState, StyleEvent, StyleStage, Transition};
