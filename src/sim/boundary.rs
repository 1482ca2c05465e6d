//! Axis-aligned arena walls
//!
//! Walls clamp positions only. There is no velocity reflection: contact
//! raises the point's friction instead, which makes wall hits inelastic.

use serde::Serialize;

use super::point::PointMass;
use crate::error::{SimError, is_positive};

/// Rectangular region that confines point masses
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundary {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Boundary {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self, SimError> {
        if !is_positive(width) || !is_positive(height) || !left.is_finite() || !top.is_finite() {
            return Err(SimError::InvalidArena { width, height });
        }
        Ok(Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        })
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Clamp a point into the arena, each axis independently
    ///
    /// Returns true if either axis was clamped.
    pub fn resolve(&self, point: &mut PointMass) -> bool {
        let mut collided = false;
        let pos = &mut point.current;

        if pos.x < self.left {
            pos.x = self.left;
            collided = true;
        } else if pos.x > self.right {
            pos.x = self.right;
            collided = true;
        }

        if pos.y < self.top {
            pos.y = self.top;
            collided = true;
        } else if pos.y > self.bottom {
            pos.y = self.bottom;
            collided = true;
        }

        collided
    }
}
