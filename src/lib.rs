//! Blob Sallad - soft-bodied blob creatures
//!
//! Core modules:
//! - `sim`: Deterministic simulation (point masses, constraints, blobs, population)
//! - `settings`: Data-driven configuration
//! - `error`: Construction-time contract violations
//!
//! Rendering and input wiring live outside this crate. Everything here works
//! in abstract simulation units; `to_pixels`/`from_pixels` convert at the edge.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// 2D vector used throughout the simulation (f64 components)
pub type Vector2 = glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep in simulated-time units
    pub const SIM_DT: f64 = 0.05;
    /// Pixels per simulation unit
    pub const SCALE_FACTOR: f64 = 200.0;

    /// Arena placement (simulation units)
    pub const ARENA_LEFT: f64 = 0.2;
    pub const ARENA_TOP: f64 = 0.2;
    pub const ARENA_WIDTH: f64 = 2.6;
    pub const ARENA_HEIGHT: f64 = 1.6;

    /// Initial population
    pub const INITIAL_BLOB_X: f64 = 1.0;
    pub const INITIAL_BLOB_Y: f64 = 1.0;
    pub const INITIAL_BLOB_RADIUS: f64 = 0.4;
    pub const MAX_BLOBS: usize = 200;

    /// Ring points per blob
    pub const RING_POINTS: usize = 8;
    /// Mass of ring points 0 and 1 (orientation anchor)
    pub const ANCHOR_MASS: f64 = 4.0;
    /// Extra applications of a nudge on ring point 0
    pub const ANCHOR_EXTRA_THRUST: usize = 4;

    /// Relaxation passes per tick
    pub const RELAXATION_PASSES: usize = 4;
    /// Friction of a point mass away from the walls
    pub const FREE_FRICTION: f64 = 0.01;
    /// Friction of a point mass touching a wall
    pub const CONTACT_FRICTION: f64 = 0.75;

    /// Cross-brace band relative to the rest distance
    pub const BRACE_SHORT: f64 = 0.95;
    pub const BRACE_LONG: f64 = 1.05;
    /// Hub spoke band relative to the rest distance
    pub const SPOKE_SHORT: f64 = 0.9 * BRACE_LONG;
    pub const SPOKE_LONG: f64 = 1.1 * BRACE_SHORT;

    /// Tether minimum separation relative to the combined radius
    pub const TETHER_SPACING: f64 = 0.95;
    /// Parent shrink factor on split
    pub const SPLIT_SHRINK: f64 = 0.75;
    /// Absorber growth damping on join
    pub const JOIN_GROWTH: f64 = 0.945;
    /// Grab radius relative to blob radius
    pub const SELECT_RADIUS_FRACTION: f64 = 0.5;

    /// Per-axis jitter range for population-wide forces
    pub const JITTER_MIN: f64 = 0.25;
    pub const JITTER_MAX: f64 = 1.0;

    /// Default downward gravity
    pub const GRAVITY: f64 = 10.0;
    /// Nudge magnitudes (keyboard arrows, on-screen buttons)
    pub const KEY_NUDGE: f64 = 50.0;
    pub const BUTTON_NUDGE: f64 = 120.0;

    /// Squared center displacement per tick above which a blob counts as moving
    pub const MOVING_VELOCITY_SQ: f64 = 0.004;

    /// Default RNG seed for force jitter
    pub const DEFAULT_SEED: u64 = 0x5EED_B10B;
}

/// Convert polar (r, theta) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: Vector2, r: f64, theta: f64) -> Vector2 {
    center + Vector2::new(r * theta.cos(), r * theta.sin())
}

/// Convert a simulation-space position to pixel space
#[inline]
pub fn to_pixels(pos: Vector2, scale: f64) -> Vector2 {
    pos * scale
}

/// Convert a pixel-space position to simulation space
#[inline]
pub fn from_pixels(pos: Vector2, scale: f64) -> Vector2 {
    pos / scale
}
