pub mod catalog;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod geo;
pub mod identity;
pub mod intents;
pub mod location;
pub mod rng;
pub mod runner;
pub mod session;
pub mod systems;
pub mod telemetry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
