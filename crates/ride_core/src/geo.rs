//! Coordinates and planar interpolation.
//!
//! The math here is deliberately planar, not geodesic: the map never leaves a
//! single city and the captain's approach is a cosmetic animation, so raw
//! degree arithmetic is the faithful model.

use serde::{Deserialize, Serialize};

/// A labelled point on the map: pickup, drop, or a live captain position.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }
}

/// Moves `fraction` of the remaining delta toward `target` on each axis.
/// Exponential decay: the result is strictly between `current` and `target`
/// per axis (for 0 < fraction < 1) and never overshoots. The label of
/// `current` is kept.
pub fn step_toward(current: &Coordinate, target: &Coordinate, fraction: f64) -> Coordinate {
    Coordinate {
        latitude: current.latitude + (target.latitude - current.latitude) * fraction,
        longitude: current.longitude + (target.longitude - current.longitude) * fraction,
        label: current.label.clone(),
    }
}

/// True when the remaining delta is below `epsilon_deg` on both axes.
pub fn within_epsilon(current: &Coordinate, target: &Coordinate, epsilon_deg: f64) -> bool {
    (target.latitude - current.latitude).abs() < epsilon_deg
        && (target.longitude - current.longitude).abs() < epsilon_deg
}
