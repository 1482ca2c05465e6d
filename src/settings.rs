//! Simulation settings
//!
//! Loaded from a JSON file; any field left out takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Vector2;
use crate::consts::*;
use crate::error::{SimError, is_positive};

/// Arena rectangle in simulation units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            left: ARENA_LEFT,
            top: ARENA_TOP,
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// The blob the population starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub ring_points: usize,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            x: INITIAL_BLOB_X,
            y: INITIAL_BLOB_Y,
            radius: INITIAL_BLOB_RADIUS,
            ring_points: RING_POINTS,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulated time per tick
    pub timestep: f64,
    /// Pixels per simulation unit (render/input edge only)
    pub scale_factor: f64,
    pub gravity: Vector2,
    pub arena: ArenaSettings,
    pub spawn: SpawnSettings,
    /// Maximum live blobs
    pub capacity: usize,
    /// Seed for force jitter
    pub seed: u64,

    // === Nudges ===
    pub key_nudge: f64,
    pub button_nudge: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timestep: SIM_DT,
            scale_factor: SCALE_FACTOR,
            gravity: Vector2::new(0.0, GRAVITY),
            arena: ArenaSettings::default(),
            spawn: SpawnSettings::default(),
            capacity: MAX_BLOBS,
            seed: DEFAULT_SEED,
            key_nudge: KEY_NUDGE,
            button_nudge: BUTTON_NUDGE,
        }
    }
}

impl Settings {
    /// Check every value a simulation would be built from
    pub fn validate(&self) -> Result<(), SimError> {
        if !is_positive(self.timestep) {
            return Err(SimError::InvalidTimestep(self.timestep));
        }
        if !is_positive(self.scale_factor) {
            return Err(SimError::InvalidScaleFactor(self.scale_factor));
        }
        if !is_positive(self.arena.width) || !is_positive(self.arena.height) {
            return Err(SimError::InvalidArena {
                width: self.arena.width,
                height: self.arena.height,
            });
        }
        if self.capacity == 0 {
            return Err(SimError::ZeroCapacity);
        }
        if !is_positive(self.spawn.radius) {
            return Err(SimError::InvalidRadius(self.spawn.radius));
        }
        if self.spawn.ring_points < 4 || self.spawn.ring_points % 2 != 0 {
            return Err(SimError::InvalidRingCount(self.spawn.ring_points));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is unusable
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
