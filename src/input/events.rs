use crate::{
    core::geo::LatLng,
    map::provider::{StyleRequestId, SubscriptionId},
    search::backend::SearchCompletion,
};

/// Every callback the screen receives, from the user, the host lifecycle,
/// and the external collaborators. Events are handled one at a time, in
/// delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    /// Host lifecycle
    Start,
    Stop,
    Destroy,
    /// Outcome of a runtime permission request
    PermissionResult { request_code: u32, granted: bool },
    /// A style load finished, successfully or with a message
    StyleLoaded {
        request: StyleRequestId,
        outcome: std::result::Result<(), String>,
    },
    /// Location provider position update
    PositionChanged {
        subscription: SubscriptionId,
        position: LatLng,
    },
    /// Location provider bearing update, in degrees
    BearingChanged {
        subscription: SubscriptionId,
        bearing: f64,
    },
    /// A manual pan gesture started on the map canvas
    MoveBegin { subscription: SubscriptionId },
    /// A search backend delivered a response
    Search(SearchCompletion),
    ZoomIn,
    ZoomOut,
    Recenter,
    /// Search box text changed
    QueryChanged(String),
    /// Search box submitted
    QuerySubmitted(String),
}

impl ScreenEvent {
    /// Checks if this event originates from the user-facing surface
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ScreenEvent::ZoomIn
                | ScreenEvent::ZoomOut
                | ScreenEvent::Recenter
                | ScreenEvent::QueryChanged(_)
                | ScreenEvent::QuerySubmitted(_)
                | ScreenEvent::MoveBegin { .. }
        )
    }

    /// Checks if this event is part of the host screen lifecycle
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            ScreenEvent::Start | ScreenEvent::Stop | ScreenEvent::Destroy
        )
    }

    /// Short name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            ScreenEvent::Start => "start",
            ScreenEvent::Stop => "stop",
            ScreenEvent::Destroy => "destroy",
            ScreenEvent::PermissionResult { .. } => "permissionresult",
            ScreenEvent::StyleLoaded { .. } => "styleloaded",
            ScreenEvent::PositionChanged { .. } => "positionchanged",
            ScreenEvent::BearingChanged { .. } => "bearingchanged",
            ScreenEvent::MoveBegin { .. } => "movebegin",
            ScreenEvent::Search(_) => "search",
            ScreenEvent::ZoomIn => "zoomin",
            ScreenEvent::ZoomOut => "zoomout",
            ScreenEvent::Recenter => "recenter",
            ScreenEvent::QueryChanged(_) => "querychanged",
            ScreenEvent::QuerySubmitted(_) => "querysubmitted",
        }
    }
}

impl From<SearchCompletion> for ScreenEvent {
    fn from(completion: SearchCompletion) -> Self {
        ScreenEvent::Search(completion)
    }
}
