//! Simulation parameters and world construction.

use bevy_ecs::prelude::{Resource, World};

use crate::clock::SimulationClock;
use crate::dispatch::{CaptainSourceResource, RosterCaptainSource};
use crate::location::{
    PendingLocationFix, PositioningProviderResource, UnavailablePositioningProvider,
};
use crate::rng::RideRng;
use crate::session::RideSession;
use crate::telemetry::RideTelemetry;

/// Tunables for the captain simulation and location detection. Defaults match
/// the observed behavior of the mock app.
#[derive(Debug, Clone, Copy, Resource)]
pub struct RideParams {
    /// Simulated matching latency before a captain is fabricated.
    pub assignment_delay_ms: u64,
    /// Period of the captain approach tick.
    pub tick_interval_ms: u64,
    /// Share of the remaining delta covered per tick (exponential decay).
    pub approach_fraction: f64,
    /// Remaining per-axis delta below which the captain has arrived.
    pub arrival_epsilon_deg: f64,
    /// Captain spawn offset from pickup, per axis.
    pub spawn_jitter_deg: f64,
    /// Upper bound on location detection; past it the fallback wins.
    pub location_timeout_ms: u64,
    /// Seed for captain fabrication; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for RideParams {
    fn default() -> Self {
        Self {
            assignment_delay_ms: 4_000,
            tick_interval_ms: 1_000,
            approach_fraction: 0.05,
            arrival_epsilon_deg: 1e-4,
            spawn_jitter_deg: 0.01,
            location_timeout_ms: 10_000,
            seed: None,
        }
    }
}

impl RideParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_assignment_delay_ms(mut self, delay_ms: u64) -> Self {
        self.assignment_delay_ms = delay_ms;
        self
    }

    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    pub fn with_approach_fraction(mut self, fraction: f64) -> Self {
        self.approach_fraction = fraction;
        self
    }

    pub fn with_location_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.location_timeout_ms = timeout_ms;
        self
    }
}

/// Builds a world carrying one fresh ride session and everything the systems
/// need. The default positioning provider models an absent capability;
/// callers with real (or scripted) hardware replace
/// [`PositioningProviderResource`] after building.
pub fn build_ride_world(params: RideParams) -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(RideSession::new());
    world.insert_resource(RideTelemetry::default());
    world.insert_resource(RideRng::new(params.seed));
    world.insert_resource(PendingLocationFix::default());
    world.insert_resource(PositioningProviderResource(Box::new(
        UnavailablePositioningProvider,
    )));
    world.insert_resource(CaptainSourceResource::new(Box::new(RosterCaptainSource)));
    world.insert_resource(params);
    world
}
