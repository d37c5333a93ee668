//! Presentation-facing operations on the ride session.
//!
//! All user-triggered mutation goes through these functions; the only other
//! writers are the simulator systems, and those are generation-guarded.

use bevy_ecs::prelude::World;
use thiserror::Error;

use crate::catalog::{vehicle_option, VehicleClass};
use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::config::RideParams;
use crate::geo::Coordinate;
use crate::location::PendingLocationFix;
use crate::session::{PinTarget, RideSession, RideStatus};
use crate::telemetry::RideTelemetry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartSearchError {
    #[error("cannot search without a pickup location")]
    MissingPickup,
    #[error("cannot search without a drop location")]
    MissingDrop,
    #[error("a ride is already {0:?}")]
    AlreadyActive(RideStatus),
}

/// Valid in any state; overwrites the pickup.
pub fn set_pickup(world: &mut World, coordinate: Coordinate) {
    world.resource_mut::<RideSession>().pickup = Some(coordinate);
}

/// Valid in any state; overwrites the drop.
pub fn set_drop(world: &mut World, coordinate: Coordinate) {
    world.resource_mut::<RideSession>().drop_off = Some(coordinate);
}

/// Sets the map pin-selection mode; orthogonal to the ride status.
pub fn set_pinning(world: &mut World, target: PinTarget) {
    world.resource_mut::<RideSession>().pinning = target;
}

/// Starts a search: `Idle -> Searching` synchronously, then schedules the
/// captain assignment after the configured matching latency. Precondition
/// violations are surfaced, never swallowed.
pub fn start_search(world: &mut World, class: VehicleClass) -> Result<(), StartSearchError> {
    let params = *world.resource::<RideParams>();
    let now = world.resource::<SimulationClock>().now();

    let generation = {
        let mut session = world.resource_mut::<RideSession>();
        if session.pickup.is_none() {
            return Err(StartSearchError::MissingPickup);
        }
        if session.drop_off.is_none() {
            return Err(StartSearchError::MissingDrop);
        }
        if session.status != RideStatus::Idle {
            return Err(StartSearchError::AlreadyActive(session.status));
        }

        session.generation.0 += 1;
        session.status = RideStatus::Searching;
        session.selected_vehicle = Some(vehicle_option(class));
        session.searched_at = Some(now);
        session.generation
    };

    world.resource_mut::<SimulationClock>().schedule_in(
        params.assignment_delay_ms,
        EventKind::CaptainAssigned,
        Some(EventSubject::Ride(generation)),
    );
    world.resource_mut::<RideTelemetry>().searches_started += 1;
    tracing::info!(%class, "ride search started");
    Ok(())
}

/// Returns the session to `Idle`, clearing captain and vehicle. The
/// generation bump makes any pending assignment or tick event from this ride
/// dead on arrival. Idempotent when already idle.
pub fn cancel(world: &mut World) {
    {
        let mut session = world.resource_mut::<RideSession>();
        if session.status == RideStatus::Idle {
            return;
        }
        session.status = RideStatus::Idle;
        session.captain = None;
        session.selected_vehicle = None;
        session.searched_at = None;
        session.generation.0 += 1;
    }
    world.resource_mut::<RideTelemetry>().rides_cancelled += 1;
    tracing::info!("ride cancelled");
}

/// Abandons the flow entirely: `cancel` plus clearing both endpoints, the
/// pinning mode, and any in-flight location detection.
pub fn reset(world: &mut World) {
    cancel(world);
    world.resource_mut::<PendingLocationFix>().0 = None;
    let mut session = world.resource_mut::<RideSession>();
    session.pickup = None;
    session.drop_off = None;
    session.pinning = PinTarget::None;
    session.detecting_location = false;
    session.last_fix_source = None;
    // Supersede any LocationResolved event still in the queue.
    session.location_request += 1;
}
