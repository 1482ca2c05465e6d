//! Simulation context
//!
//! Everything a running session needs besides the blobs themselves lives
//! here: arena, gravity, run/stop and focus flags, and the drag state of
//! the pointer. Callers own a `SimState` and pass it to `tick`.

use super::blob::Blob;
use super::boundary::Boundary;
use super::population::Population;
use super::snapshot::Snapshot;
use crate::Vector2;
use crate::consts::GRAVITY;
use crate::error::SimError;
use crate::settings::Settings;

/// Direction of a population-wide nudge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Force of `magnitude` along this direction (y grows downward)
    pub fn force(self, magnitude: f64) -> Vector2 {
        match self {
            Direction::Left => Vector2::new(-magnitude, 0.0),
            Direction::Right => Vector2::new(magnitude, 0.0),
            Direction::Up => Vector2::new(0.0, -magnitude),
            Direction::Down => Vector2::new(0.0, magnitude),
        }
    }
}

/// Pointer grab state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Grab point relative to the held blob's center
    pub offset: Option<Vector2>,
    /// Last pointer position while dragging
    pub pointer: Option<Vector2>,
}

impl DragState {
    /// Where the held blob's center should be
    pub fn target(&self) -> Option<Vector2> {
        match (self.pointer, self.offset) {
            (Some(pointer), Some(offset)) => Some(pointer - offset),
            _ => None,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub population: Population,
    pub boundary: Boundary,
    gravity: Vector2,
    /// Gravity restored by `toggle_gravity`
    resting_gravity: Vector2,
    stopped: bool,
    focused: bool,
    drag: DragState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let arena = &settings.arena;
        let boundary = Boundary::new(arena.left, arena.top, arena.width, arena.height)?;
        let spawn = &settings.spawn;
        let first = Blob::new(Vector2::new(spawn.x, spawn.y), spawn.radius, spawn.ring_points)?;
        let population = Population::new(first, settings.capacity, settings.seed)?;

        let gravity = settings.gravity;
        let resting_gravity = if gravity == Vector2::ZERO {
            Vector2::new(0.0, GRAVITY)
        } else {
            gravity
        };

        Ok(Self {
            population,
            boundary,
            gravity,
            resting_gravity,
            stopped: false,
            focused: true,
            drag: DragState::default(),
            time_ticks: 0,
        })
    }

    pub fn split(&mut self) -> bool {
        self.population.split()
    }

    pub fn join(&mut self) -> bool {
        let joined = self.population.join();
        if self.population.selected().is_none() {
            self.drag = DragState::default();
        }
        joined
    }

    /// Try to grab a blob at `point`, remembering the grab offset
    pub fn select_at(&mut self, point: Vector2) -> Option<Vector2> {
        if self.stopped {
            return None;
        }
        let offset = self.population.select_blob(point)?;
        self.drag = DragState {
            offset: Some(offset),
            pointer: None,
        };
        Some(offset)
    }

    pub fn deselect(&mut self) {
        self.population.unselect_blob();
        self.drag = DragState::default();
    }

    /// Move the held blob under the pointer and keep it there on later ticks
    pub fn drag_selected_to(&mut self, pointer: Vector2) {
        if self.stopped {
            return;
        }
        let Some(offset) = self.drag.offset else {
            return;
        };
        self.population.move_selected_to(pointer - offset);
        self.drag.pointer = Some(pointer);
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn apply_force(&mut self, force: Vector2) {
        self.population.add_force(force);
    }

    pub fn nudge(&mut self, direction: Direction, magnitude: f64) {
        self.apply_force(direction.force(magnitude));
    }

    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.gravity = gravity;
        if gravity != Vector2::ZERO {
            self.resting_gravity = gravity;
        }
    }

    /// Switch gravity off, or back to its last non-zero value
    pub fn toggle_gravity(&mut self) {
        self.gravity = if self.gravity == Vector2::ZERO {
            self.resting_gravity
        } else {
            Vector2::ZERO
        };
        log::debug!("gravity now {:?}", self.gravity);
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Resume without resetting anything
    pub fn start(&mut self) {
        self.stopped = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
