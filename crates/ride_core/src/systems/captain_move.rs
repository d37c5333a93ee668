//! Periodic captain approach: exponential decay toward the pickup point.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::config::RideParams;
use crate::geo::{step_toward, within_epsilon};
use crate::session::{RideSession, RideStatus};
use crate::telemetry::RideTelemetry;

/// Moves the captain a fixed fraction of the remaining delta toward pickup
/// and reschedules itself, or snaps to the pickup coordinate and stops once
/// inside the arrival epsilon. Stale generations are discarded.
pub fn captain_move_system(
    event: Res<CurrentEvent>,
    params: Res<RideParams>,
    mut clock: ResMut<SimulationClock>,
    mut session: ResMut<RideSession>,
    mut telemetry: ResMut<RideTelemetry>,
) {
    if event.0.kind != EventKind::CaptainMoveTick {
        return;
    }
    let Some(EventSubject::Ride(generation)) = event.0.subject else {
        return;
    };
    if generation != session.generation || session.status != RideStatus::Assigned {
        telemetry.stale_events_discarded += 1;
        tracing::debug!(generation = generation.0, "discarding stale move tick");
        return;
    }

    let Some(pickup) = session.pickup.clone() else {
        return;
    };
    let Some(captain) = session.captain.as_mut() else {
        return;
    };

    if within_epsilon(&captain.position, &pickup, params.arrival_epsilon_deg) {
        // Arrived: rest exactly on the pickup point, keep the captain label.
        captain.position.latitude = pickup.latitude;
        captain.position.longitude = pickup.longitude;
        tracing::debug!(captain = %captain.name, "captain arrived at pickup");
        return;
    }

    captain.position = step_toward(&captain.position, &pickup, params.approach_fraction);
    clock.schedule_in(
        params.tick_interval_ms,
        EventKind::CaptainMoveTick,
        Some(EventSubject::Ride(generation)),
    );
}

#[cfg(test)]
mod tests {
    use bevy_ecs::prelude::World;

    use crate::catalog::VehicleClass;
    use crate::clock::SimulationClock;
    use crate::intents;
    use crate::runner::{ride_schedule, run_next_event, run_until_empty};
    use crate::session::{RideSession, RideStatus};
    use crate::telemetry::RideTelemetry;
    use crate::test_helpers::booked_world;

    fn assigned_world(seed: u64) -> World {
        let mut world = booked_world(seed, VehicleClass::Bike);
        let mut schedule = ride_schedule();
        // First event is the assignment.
        assert!(run_next_event(&mut world, &mut schedule));
        assert_eq!(
            world.resource::<RideSession>().status,
            RideStatus::Assigned
        );
        world
    }

    fn captain_delta(world: &World) -> (f64, f64) {
        let session = world.resource::<RideSession>();
        let pickup = session.pickup.as_ref().expect("pickup");
        let captain = session.captain.as_ref().expect("captain");
        (
            pickup.latitude - captain.position.latitude,
            pickup.longitude - captain.position.longitude,
        )
    }

    #[test]
    fn each_tick_shrinks_the_delta_without_overshooting() {
        let mut world = assigned_world(42);
        let mut schedule = ride_schedule();
        // Pin the captain to a known offset so the assertions do not depend
        // on the sampled spawn jitter.
        {
            let mut session = world.resource_mut::<RideSession>();
            let pickup = session.pickup.clone().expect("pickup");
            let captain = session.captain.as_mut().expect("captain");
            captain.position.latitude = pickup.latitude + 0.008;
            captain.position.longitude = pickup.longitude - 0.006;
        }
        let (lat_before, lng_before) = captain_delta(&world);

        assert!(run_next_event(&mut world, &mut schedule));

        let (lat_after, lng_after) = captain_delta(&world);
        assert!(lat_after.abs() < lat_before.abs());
        assert!(lng_after.abs() < lng_before.abs());
        // No overshoot: the delta never changes sign.
        assert_eq!(lat_after.signum(), lat_before.signum());
        assert_eq!(lng_after.signum(), lng_before.signum());
    }

    #[test]
    fn ticking_halts_with_the_captain_resting_on_pickup() {
        let mut world = assigned_world(42);
        let mut schedule = ride_schedule();

        let steps = run_until_empty(&mut world, &mut schedule, 1_000);
        assert!(steps < 1_000, "tick chain did not terminate");

        let session = world.resource::<RideSession>();
        let pickup = session.pickup.as_ref().expect("pickup");
        let captain = session.captain.as_ref().expect("captain");
        assert_eq!(captain.position.latitude, pickup.latitude);
        assert_eq!(captain.position.longitude, pickup.longitude);
        assert!(world.resource::<SimulationClock>().is_empty());
    }

    #[test]
    fn cancel_mid_approach_stops_the_tick_chain_permanently() {
        let mut world = assigned_world(42);
        let mut schedule = ride_schedule();
        // Let the captain take a couple of steps first.
        assert!(run_next_event(&mut world, &mut schedule));
        assert!(run_next_event(&mut world, &mut schedule));

        intents::cancel(&mut world);
        let drained = run_until_empty(&mut world, &mut schedule, 1_000);

        // Exactly one stale tick was in flight; nothing respawned after it.
        assert_eq!(drained, 1);
        let session = world.resource::<RideSession>();
        assert_eq!(session.status, RideStatus::Idle);
        assert!(session.captain.is_none());
        assert!(world.resource::<RideTelemetry>().stale_events_discarded >= 1);
        assert!(world.resource::<SimulationClock>().is_empty());
    }
}
