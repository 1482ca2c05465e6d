//! Fixed timestep simulation tick

use super::state::SimState;
use crate::Vector2;

/// Pointer interaction, in simulation units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Vector2),
    Move(Vector2),
    Release,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub split: bool,
    pub join: bool,
    pub toggle_gravity: bool,
    /// Population-wide nudge
    pub push: Option<Vector2>,
    pub pointer: Option<PointerEvent>,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f64) {
    if state.is_stopped() {
        return;
    }

    if input.split {
        state.split();
    }
    if input.join {
        state.join();
    }
    if input.toggle_gravity {
        state.toggle_gravity();
    }
    if let Some(force) = input.push {
        state.apply_force(force);
    }
    match input.pointer {
        Some(PointerEvent::Press(p)) => {
            state.select_at(p);
        }
        Some(PointerEvent::Move(p)) => state.drag_selected_to(p),
        Some(PointerEvent::Release) => state.deselect(),
        None => {}
    }

    let target = state.drag().target();
    let gravity = state.gravity();
    let boundary = state.boundary;
    state.population.update(dt, &boundary, gravity, target);
    state.time_ticks += 1;
}
