//! Applies a concluded location detection to the session pickup.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject};
use crate::location::PendingLocationFix;
use crate::session::{FixSource, RideSession};
use crate::telemetry::RideTelemetry;

/// Writes the pending fix into the pickup field, unless the detection was
/// superseded by a newer request or a `reset` while the event was in flight.
pub fn location_resolved_system(
    event: Res<CurrentEvent>,
    mut pending: ResMut<PendingLocationFix>,
    mut session: ResMut<RideSession>,
    mut telemetry: ResMut<RideTelemetry>,
) {
    if event.0.kind != EventKind::LocationResolved {
        return;
    }
    let Some(EventSubject::LocationRequest(request)) = event.0.subject else {
        return;
    };
    if request != session.location_request {
        telemetry.stale_events_discarded += 1;
        tracing::debug!(request, "discarding superseded location fix");
        return;
    }
    let Some(resolved) = pending.0.take() else {
        return;
    };
    if resolved.request != request {
        pending.0 = Some(resolved);
        return;
    }

    match resolved.fix.source {
        FixSource::Live => telemetry.location_fixes_live += 1,
        FixSource::Fallback => telemetry.location_fixes_fallback += 1,
    }
    tracing::info!(
        label = %resolved.fix.coordinate.label,
        source = ?resolved.fix.source,
        "pickup resolved"
    );
    session.pickup = Some(resolved.fix.coordinate);
    session.detecting_location = false;
    session.last_fix_source = Some(resolved.fix.source);
}

#[cfg(test)]
mod tests {
    use crate::config::{build_ride_world, RideParams};
    use crate::intents;
    use crate::location::{
        detect_live_location, FixedPositioningProvider, PositioningProviderResource,
        FALLBACK_LABEL, LIVE_LABEL,
    };
    use crate::runner::{ride_schedule, run_until_empty};
    use crate::session::{FixSource, RideSession};
    use crate::telemetry::RideTelemetry;

    #[test]
    fn live_fix_lands_in_the_pickup_field() {
        let mut world = build_ride_world(RideParams::default().with_seed(5));
        world.insert_resource(PositioningProviderResource(Box::new(
            FixedPositioningProvider {
                latitude: 17.4001,
                longitude: 78.4510,
                latency_ms: 1_200,
            },
        )));

        detect_live_location(&mut world);
        let mut schedule = ride_schedule();
        run_until_empty(&mut world, &mut schedule, 10);

        let session = world.resource::<RideSession>();
        let pickup = session.pickup.as_ref().expect("pickup set");
        assert_eq!(pickup.label, LIVE_LABEL);
        assert_eq!(pickup.latitude, 17.4001);
        assert!(!session.detecting_location);
        assert_eq!(session.last_fix_source, Some(FixSource::Live));
        assert_eq!(world.resource::<RideTelemetry>().location_fixes_live, 1);
    }

    #[test]
    fn unavailable_capability_falls_back_to_the_landmark() {
        let mut world = build_ride_world(RideParams::default().with_seed(5));
        // Default provider models an absent capability.
        detect_live_location(&mut world);
        let mut schedule = ride_schedule();
        run_until_empty(&mut world, &mut schedule, 10);

        let session = world.resource::<RideSession>();
        let pickup = session.pickup.as_ref().expect("pickup set");
        assert_eq!(pickup.label, FALLBACK_LABEL);
        assert_eq!(session.last_fix_source, Some(FixSource::Fallback));
        assert_eq!(
            world.resource::<RideTelemetry>().location_fixes_fallback,
            1
        );
    }

    #[test]
    fn reset_during_detection_discards_the_fix() {
        let mut world = build_ride_world(RideParams::default().with_seed(5));
        world.insert_resource(PositioningProviderResource(Box::new(
            FixedPositioningProvider {
                latitude: 17.4001,
                longitude: 78.4510,
                latency_ms: 1_200,
            },
        )));

        detect_live_location(&mut world);
        intents::reset(&mut world);

        let mut schedule = ride_schedule();
        run_until_empty(&mut world, &mut schedule, 10);

        let session = world.resource::<RideSession>();
        assert!(session.pickup.is_none());
        assert!(!session.detecting_location);
        assert_eq!(world.resource::<RideTelemetry>().stale_events_discarded, 1);
    }

    #[test]
    fn newer_detection_supersedes_the_older_one() {
        let mut world = build_ride_world(RideParams::default().with_seed(5));
        world.insert_resource(PositioningProviderResource(Box::new(
            FixedPositioningProvider {
                latitude: 17.4001,
                longitude: 78.4510,
                latency_ms: 5_000,
            },
        )));
        detect_live_location(&mut world);

        world.insert_resource(PositioningProviderResource(Box::new(
            FixedPositioningProvider {
                latitude: 17.9999,
                longitude: 78.9999,
                latency_ms: 100,
            },
        )));
        detect_live_location(&mut world);

        let mut schedule = ride_schedule();
        run_until_empty(&mut world, &mut schedule, 10);

        // The second request's coordinate wins and the first event is stale.
        let session = world.resource::<RideSession>();
        let pickup = session.pickup.as_ref().expect("pickup set");
        assert_eq!(pickup.latitude, 17.9999);
        assert_eq!(world.resource::<RideTelemetry>().stale_events_discarded, 1);
    }
}
