//! Delayed captain assignment: the end of the simulated matching latency.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::config::RideParams;
use crate::dispatch::CaptainSourceResource;
use crate::rng::RideRng;
use crate::session::{RideSession, RideStatus};
use crate::telemetry::{AssignmentRecord, RideTelemetry};

/// Asks the captain source for a captain and moves the session to
/// `Assigned`. An event whose generation no longer matches the session (the
/// ride was cancelled or replaced while the event was in flight) is discarded
/// without touching the session.
pub fn captain_assigned_system(
    event: Res<CurrentEvent>,
    params: Res<RideParams>,
    mut clock: ResMut<SimulationClock>,
    mut rng: ResMut<RideRng>,
    mut source: ResMut<CaptainSourceResource>,
    mut session: ResMut<RideSession>,
    mut telemetry: ResMut<RideTelemetry>,
) {
    if event.0.kind != EventKind::CaptainAssigned {
        return;
    }
    let Some(EventSubject::Ride(generation)) = event.0.subject else {
        return;
    };
    if generation != session.generation || session.status != RideStatus::Searching {
        telemetry.stale_events_discarded += 1;
        tracing::debug!(
            generation = generation.0,
            current = session.generation.0,
            "discarding stale captain assignment"
        );
        return;
    }

    // Searching guarantees both of these; guarded anyway as let-else returns.
    let Some(pickup) = session.pickup.clone() else {
        return;
    };
    let Some(vehicle) = session.selected_vehicle else {
        return;
    };

    let captain = source
        .0
        .assign(&pickup, &vehicle, params.spawn_jitter_deg, &mut rng);
    let captain_name = captain.name.clone();
    session.captain = Some(captain);
    session.status = RideStatus::Assigned;

    telemetry.captains_assigned += 1;
    if let Some(searched_at) = session.searched_at {
        telemetry.assignments.push(AssignmentRecord {
            searched_at,
            assigned_at: event.0.timestamp,
            vehicle_class: vehicle.class,
        });
    }

    clock.schedule_in(
        params.tick_interval_ms,
        EventKind::CaptainMoveTick,
        Some(EventSubject::Ride(generation)),
    );
    tracing::info!(captain = %captain_name, vehicle = %vehicle.class, "captain assigned");
}
