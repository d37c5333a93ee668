//! The ride session aggregate: the single source of truth the presentation
//! layer reads and the simulator systems mutate.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::catalog::{VehicleClass, VehicleOption};
use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RideStatus {
    #[default]
    Idle,
    Searching,
    Assigned,
}

/// Map pin-selection mode. UI-only; orthogonal to the ride status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinTarget {
    #[default]
    None,
    Pickup,
    Drop,
}

/// How the current pickup coordinate was obtained by location detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixSource {
    Live,
    Fallback,
}

/// Identifies one ride attempt. Bumped on every `start_search`, `cancel` and
/// `reset`, so a clock event scheduled under an older generation can never
/// mutate a later ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RideGeneration(pub u64);

/// The simulated service provider matched to a ride. Exists only while the
/// session is [`RideStatus::Assigned`].
#[derive(Debug, Clone, PartialEq)]
pub struct Captain {
    pub name: String,
    pub vehicle_class: VehicleClass,
    pub vehicle_label: String,
    pub rating: f64,
    /// Four-digit pickup code shown to the rider. Never verified (mock).
    pub otp: String,
    pub position: Coordinate,
}

/// Aggregate root for one booking flow. Created once per app session and
/// reset in place; never persisted.
#[derive(Debug, Default, Resource)]
pub struct RideSession {
    pub pickup: Option<Coordinate>,
    pub drop_off: Option<Coordinate>,
    pub status: RideStatus,
    pub selected_vehicle: Option<VehicleOption>,
    pub captain: Option<Captain>,
    pub pinning: PinTarget,
    pub generation: RideGeneration,
    /// Simulation time the current search started, for telemetry.
    pub searched_at: Option<u64>,
    /// Counter pairing a `LocationResolved` event with the detection attempt
    /// that scheduled it; superseded attempts resolve to nothing.
    pub location_request: u64,
    pub detecting_location: bool,
    pub last_fix_source: Option<FixSource>,
}

impl RideSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.status == RideStatus::Idle
    }

    /// Both endpoints chosen, ready for `start_search`.
    pub fn has_endpoints(&self) -> bool {
        self.pickup.is_some() && self.drop_off.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_idle_and_empty() {
        let session = RideSession::new();
        assert_eq!(session.status, RideStatus::Idle);
        assert!(session.pickup.is_none());
        assert!(session.drop_off.is_none());
        assert!(session.captain.is_none());
        assert!(session.selected_vehicle.is_none());
        assert_eq!(session.pinning, PinTarget::None);
        assert!(!session.has_endpoints());
    }
}
