pub mod captain_assigned;
pub mod captain_move;
pub mod location_resolved;
