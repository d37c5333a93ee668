//! Shared test setup: canned Hyderabad coordinates and pre-built worlds.

use bevy_ecs::prelude::World;

use crate::catalog::VehicleClass;
use crate::config::{build_ride_world, RideParams};
use crate::geo::Coordinate;
use crate::intents;
use crate::session::{RideSession, RideStatus};

/// The fallback landmark, doubling as the standard test pickup.
pub fn gachibowli() -> Coordinate {
    Coordinate::new(17.4483, 78.3488, "Gachibowli DLF")
}

/// Standard test drop, across the city from the pickup.
pub fn charminar() -> Coordinate {
    Coordinate::new(17.3616, 78.4747, "Charminar")
}

/// A world with both endpoints chosen and a search already started: the next
/// clock event is the captain assignment.
///
/// # Panics
///
/// Panics if the search cannot start (never happens with both endpoints set).
pub fn booked_world(seed: u64, class: VehicleClass) -> World {
    let mut world = build_ride_world(RideParams::default().with_seed(seed));
    intents::set_pickup(&mut world, gachibowli());
    intents::set_drop(&mut world, charminar());
    intents::start_search(&mut world, class).expect("search should start with both endpoints set");
    world
}

/// Asserts the session invariants from the data model: captain present iff
/// assigned, vehicle present iff not idle.
pub fn assert_session_invariants(session: &RideSession) {
    assert_eq!(
        session.captain.is_some(),
        session.status == RideStatus::Assigned,
        "captain must be present iff the ride is assigned"
    );
    assert_eq!(
        session.selected_vehicle.is_some(),
        session.status != RideStatus::Idle,
        "vehicle must be present iff a ride is active"
    );
}
