//! Captain dispatch behind a trait, so the simulated fabrication can be
//! swapped for a real matching backend without touching the state machine.

use bevy_ecs::prelude::Resource;

use crate::catalog::{captain_roster, VehicleOption};
use crate::geo::Coordinate;
use crate::rng::RideRng;
use crate::session::Captain;

/// Produces the captain for a ride once the matching latency has elapsed.
pub trait CaptainSource: Send + Sync {
    fn assign(
        &mut self,
        pickup: &Coordinate,
        vehicle: &VehicleOption,
        spawn_jitter_deg: f64,
        rng: &mut RideRng,
    ) -> Captain;
}

/// Resource wrapper for the captain source trait object.
#[derive(Resource)]
pub struct CaptainSourceResource(pub Box<dyn CaptainSource>);

impl CaptainSourceResource {
    pub fn new(source: Box<dyn CaptainSource>) -> Self {
        Self(source)
    }
}

/// The simulated dispatcher: picks a roster identity for the vehicle class
/// and places the captain near the pickup point with a random offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterCaptainSource;

impl CaptainSource for RosterCaptainSource {
    fn assign(
        &mut self,
        pickup: &Coordinate,
        vehicle: &VehicleOption,
        spawn_jitter_deg: f64,
        rng: &mut RideRng,
    ) -> Captain {
        let (name, vehicle_label) = *rng.pick(captain_roster(vehicle.class));
        Captain {
            name: name.to_string(),
            vehicle_class: vehicle.class,
            vehicle_label: vehicle_label.to_string(),
            rating: rng.rating(),
            otp: rng.four_digit_otp(),
            position: Coordinate::new(
                pickup.latitude + rng.jitter(spawn_jitter_deg),
                pickup.longitude + rng.jitter(spawn_jitter_deg),
                name,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{vehicle_option, VehicleClass};

    #[test]
    fn roster_source_spawns_near_pickup_with_matching_class() {
        let mut source = RosterCaptainSource;
        let mut rng = RideRng::new(Some(13));
        let pickup = Coordinate::new(17.4483, 78.3488, "Gachibowli DLF");
        let vehicle = vehicle_option(VehicleClass::Auto);

        let captain = source.assign(&pickup, &vehicle, 0.01, &mut rng);

        assert_eq!(captain.vehicle_class, VehicleClass::Auto);
        assert!((captain.position.latitude - pickup.latitude).abs() <= 0.01);
        assert!((captain.position.longitude - pickup.longitude).abs() <= 0.01);
        assert_eq!(captain.otp.len(), 4);
        assert!(captain.rating >= 4.5 && captain.rating <= 5.0);
    }
}
