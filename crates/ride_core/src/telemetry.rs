//! Session telemetry: counters for the booking flow plus one record per
//! completed assignment.

use bevy_ecs::prelude::Resource;

use crate::catalog::VehicleClass;

/// One successful captain assignment. Timestamps are simulation ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub searched_at: u64,
    pub assigned_at: u64,
    pub vehicle_class: VehicleClass,
}

impl AssignmentRecord {
    /// Time from `start_search` to the captain appearing.
    pub fn time_to_assign(&self) -> u64 {
        self.assigned_at.saturating_sub(self.searched_at)
    }
}

#[derive(Debug, Default, Resource)]
pub struct RideTelemetry {
    pub searches_started: u64,
    pub captains_assigned: u64,
    pub rides_cancelled: u64,
    /// Events from cancelled or superseded generations, discarded on arrival.
    pub stale_events_discarded: u64,
    pub location_fixes_live: u64,
    pub location_fixes_fallback: u64,
    pub assignments: Vec<AssignmentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_to_assign_spans_search_to_assignment() {
        let record = AssignmentRecord {
            searched_at: 1_000,
            assigned_at: 5_000,
            vehicle_class: VehicleClass::Bike,
        };
        assert_eq!(record.time_to_assign(), 4_000);
    }
}
