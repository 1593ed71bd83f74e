//! Runtime permission gating for map initialization.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    FineLocation,
}

/// The host's runtime permission subsystem.
pub trait PermissionProvider {
    fn is_granted(&self, permission: Permission) -> bool;

    /// Asks the user. The answer arrives later as
    /// `ScreenEvent::PermissionResult` carrying `request_code`.
    fn request(&mut self, permission: Permission, request_code: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Permission is held; the map may be initialized
    Granted,
    /// A request is in flight
    Requested,
    Denied,
    /// The result did not belong to this gate
    Ignored,
}

#[derive(Debug)]
pub struct PermissionGate {
    request_code: u32,
    pending: bool,
}

impl PermissionGate {
    pub fn new(request_code: u32) -> Self {
        Self {
            request_code,
            pending: false,
        }
    }

    pub fn request_code(&self) -> u32 {
        self.request_code
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn ensure<P: PermissionProvider + ?Sized>(&mut self, permissions: &mut P) -> GateOutcome {
        if permissions.is_granted(Permission::FineLocation) {
            return GateOutcome::Granted;
        }
        if !self.pending {
            log::debug!("requesting location permission");
            permissions.request(Permission::FineLocation, self.request_code);
            self.pending = true;
        }
        GateOutcome::Requested
    }

    /// Handles the permission callback. The grant state is re-read from the
    /// provider rather than trusted from the callback.
    pub fn on_result<P: PermissionProvider + ?Sized>(
        &mut self,
        permissions: &P,
        request_code: u32,
        reported: bool,
    ) -> GateOutcome {
        if request_code != self.request_code {
            log::debug!("ignoring permission result for request code {}", request_code);
            return GateOutcome::Ignored;
        }
        self.pending = false;

        let granted = permissions.is_granted(Permission::FineLocation);
        if granted != reported {
            log::debug!(
                "permission callback reported {} but provider says {}",
                reported,
                granted
            );
        }

        if granted {
            GateOutcome::Granted
        } else {
            log::warn!("location permission denied");
            GateOutcome::Denied
        }
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::new(crate::core::constants::LOCATION_PERMISSION_REQUEST_CODE)
    }
}

/// A provider with a fixed answer; requests are recorded and never answered.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    granted: bool,
    requests: Vec<u32>,
}

impl StaticPermissions {
    pub fn granted() -> Self {
        Self {
            granted: true,
            requests: Vec::new(),
        }
    }

    pub fn denied() -> Self {
        Self::default()
    }

    pub fn set_granted(&mut self, granted: bool) {
        self.granted = granted;
    }

    /// Request codes passed to [`PermissionProvider::request`]
    pub fn requests(&self) -> &[u32] {
        &self.requests
    }
}

impl PermissionProvider for StaticPermissions {
    fn is_granted(&self, _permission: Permission) -> bool {
        self.granted
    }

    fn request(&mut self, _permission: Permission, request_code: u32) {
        self.requests.push(request_code);
    }
}
