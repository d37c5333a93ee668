//! Location source: resolves a pickup coordinate from a positioning
//! capability, bounded by a timeout, falling back to a fixed landmark.
//!
//! Positioning failure is a normal outcome here, not an error: the caller
//! always receives a coordinate, tagged with whether it came from a live fix
//! or the fallback.

use bevy_ecs::prelude::{Resource, World};
use thiserror::Error;

use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::config::RideParams;
use crate::geo::Coordinate;
use crate::session::{FixSource, RideSession};

/// Landmark used whenever a live fix cannot be obtained.
pub const FALLBACK_LABEL: &str = "Gachibowli DLF";
pub const FALLBACK_LATITUDE: f64 = 17.4483;
pub const FALLBACK_LONGITUDE: f64 = 78.3488;

pub const LIVE_LABEL: &str = "Current Location";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositioningError {
    #[error("positioning capability is not available")]
    Unavailable,
    #[error("positioning permission denied")]
    PermissionDenied,
    #[error("no fix within the timeout")]
    TimedOut,
}

/// Raw answer from the positioning capability: a lat/lng pair or a failure,
/// plus how long the capability took to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    pub outcome: Result<(f64, f64), PositioningError>,
    pub latency_ms: u64,
}

/// The platform positioning capability, behind a trait so tests and the CLI
/// can substitute fixed or absent hardware.
pub trait PositioningProvider: Send + Sync {
    fn request_fix(&mut self) -> PositionFix;
}

#[derive(Resource)]
pub struct PositioningProviderResource(pub Box<dyn PositioningProvider>);

/// Always produces the same fix after a fixed latency.
#[derive(Debug, Clone)]
pub struct FixedPositioningProvider {
    pub latitude: f64,
    pub longitude: f64,
    pub latency_ms: u64,
}

impl PositioningProvider for FixedPositioningProvider {
    fn request_fix(&mut self) -> PositionFix {
        PositionFix {
            outcome: Ok((self.latitude, self.longitude)),
            latency_ms: self.latency_ms,
        }
    }
}

/// Models a platform with no positioning capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailablePositioningProvider;

impl PositioningProvider for UnavailablePositioningProvider {
    fn request_fix(&mut self) -> PositionFix {
        PositionFix {
            outcome: Err(PositioningError::Unavailable),
            latency_ms: 0,
        }
    }
}

/// A resolved detection outcome: the coordinate plus where it came from, so
/// callers can tell degraded mode from an exact fix without an error type.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub source: FixSource,
}

pub fn fallback_fix() -> LocationFix {
    LocationFix {
        coordinate: Coordinate::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE, FALLBACK_LABEL),
        source: FixSource::Fallback,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingFix {
    pub request: u64,
    pub fix: LocationFix,
}

/// Parking spot for a fix between `detect_live_location` and its
/// `LocationResolved` event. At most one detection is outstanding; a newer
/// request simply replaces the pending fix.
#[derive(Debug, Default, Resource)]
pub struct PendingLocationFix(pub Option<PendingFix>);

/// Starts a location detection. Resolution is always scheduled within
/// `location_timeout_ms`, live or fallback; the caller never sees an error.
pub fn detect_live_location(world: &mut World) {
    let params = *world.resource::<RideParams>();
    let raw = world
        .resource_mut::<PositioningProviderResource>()
        .0
        .request_fix();

    let request = {
        let mut session = world.resource_mut::<RideSession>();
        session.location_request += 1;
        session.detecting_location = true;
        session.location_request
    };

    let (fix, resolve_in_ms) = match raw.outcome {
        Ok((latitude, longitude)) if raw.latency_ms <= params.location_timeout_ms => (
            LocationFix {
                coordinate: Coordinate::new(latitude, longitude, LIVE_LABEL),
                source: FixSource::Live,
            },
            raw.latency_ms,
        ),
        Ok(_) => {
            tracing::debug!(
                latency_ms = raw.latency_ms,
                "live fix exceeded the timeout, using fallback"
            );
            (fallback_fix(), params.location_timeout_ms)
        }
        Err(err) => {
            tracing::debug!(%err, "positioning failed, using fallback");
            (fallback_fix(), raw.latency_ms.min(params.location_timeout_ms))
        }
    };

    world.resource_mut::<PendingLocationFix>().0 = Some(PendingFix { request, fix });
    world.resource_mut::<SimulationClock>().schedule_in(
        resolve_in_ms,
        EventKind::LocationResolved,
        Some(EventSubject::LocationRequest(request)),
    );
}
