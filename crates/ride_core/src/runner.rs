//! Event pump: advances the clock and routes events into the schedule.
//!
//! Each step pops the next event from [`SimulationClock`], inserts it as
//! [`CurrentEvent`], then runs the schedule. The presentation layer (or a
//! test) owns the loop; nothing here blocks.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::systems::{
    captain_assigned::captain_assigned_system, captain_move::captain_move_system,
    location_resolved::location_resolved_system,
};

fn is_location_resolved(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::LocationResolved)
        .unwrap_or(false)
}

fn is_captain_assigned(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CaptainAssigned)
        .unwrap_or(false)
}

fn is_captain_move_tick(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CaptainMoveTick)
        .unwrap_or(false)
}

/// Builds the ride schedule: each system gated on its event kind.
pub fn ride_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        location_resolved_system.run_if(is_location_resolved),
        captain_assigned_system.run_if(is_captain_assigned),
        captain_move_system.run_if(is_captain_move_tick),
    ));
    schedule
}

/// Runs one step: pops the next event, inserts it as [`CurrentEvent`], runs
/// the schedule. Returns `false` once the clock is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    true
}

/// Runs one step and invokes `hook` after the schedule completes.
pub fn run_next_event_with_hook<F>(world: &mut World, schedule: &mut Schedule, mut hook: F) -> bool
where
    F: FnMut(&World, &Event),
{
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    hook(world, &event);
    true
}

/// Runs steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Runs steps until empty and invokes `hook` after each step.
pub fn run_until_empty_with_hook<F>(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
    mut hook: F,
) -> usize
where
    F: FnMut(&World, &Event),
{
    let mut steps = 0;
    while steps < max_steps && run_next_event_with_hook(world, schedule, &mut hook) {
        steps += 1;
    }
    steps
}
