//! Pairwise distance constraints
//!
//! Both constraint kinds share one positional correction: given a target
//! squared length `t` and separation `d`, move each endpoint by
//! `d * (t / (|d|² + t) - 0.5)` in opposite directions. This is a single
//! relaxation step that avoids a square root; repeating it converges on
//! `|d|² == t`.
//!
//! Endpoints are indices into a blob's point arena.

use super::point::{PointMass, pair_mut};

/// Apply one correction step toward `target_sq`
#[inline]
pub fn relax_pair(a: &mut PointMass, b: &mut PointMass, target_sq: f64) {
    let delta = b.current - a.current;
    let dist_sq = delta.dot(delta);
    let scale = target_sq / (dist_sq + target_sq) - 0.5;
    let correction = delta * scale;
    a.current -= correction;
    b.current += correction;
}

/// Rigid equality constraint
#[derive(Debug, Clone, PartialEq)]
pub struct Stick {
    pub a: usize,
    pub b: usize,
    rest_length: f64,
    rest_length_sq: f64,
}

impl Stick {
    /// Rest length is the endpoints' distance at construction
    pub fn new(a: usize, b: usize, points: &[PointMass]) -> Self {
        let rest_length = points[a].current.distance(points[b].current);
        Self {
            a,
            b,
            rest_length,
            rest_length_sq: rest_length * rest_length,
        }
    }

    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    pub fn scale(&mut self, factor: f64) {
        self.rest_length *= factor;
        self.rest_length_sq = self.rest_length * self.rest_length;
    }

    pub fn satisfy(&self, points: &mut [PointMass]) {
        let (a, b) = pair_mut(points, self.a, self.b);
        relax_pair(a, b, self.rest_length_sq);
    }
}

/// Two-sided distance band
///
/// A bound of zero is disabled. Only one side is corrected per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBand {
    short: f64,
    long: f64,
    short_sq: f64,
    long_sq: f64,
}

impl DistanceBand {
    pub fn new(short: f64, long: f64) -> Self {
        Self {
            short,
            long,
            short_sq: short * short,
            long_sq: long * long,
        }
    }

    pub fn short(&self) -> f64 {
        self.short
    }

    pub fn long(&self) -> f64 {
        self.long
    }

    /// Replace both bounds outright
    pub fn set_dist(&mut self, short: f64, long: f64) {
        *self = Self::new(short, long);
    }

    pub fn scale(&mut self, factor: f64) {
        self.set_dist(self.short * factor, self.long * factor);
    }

    pub fn apply(&self, a: &mut PointMass, b: &mut PointMass) {
        let dist_sq = a.current.distance_squared(b.current);
        if self.short != 0.0 && dist_sq < self.short_sq {
            relax_pair(a, b, self.short_sq);
        } else if self.long != 0.0 && dist_sq > self.long_sq {
            relax_pair(a, b, self.long_sq);
        }
    }
}

/// Band constraint between two points of the same blob
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub a: usize,
    pub b: usize,
    pub band: DistanceBand,
}

impl Joint {
    /// Bounds are ratios of the endpoints' distance at construction
    pub fn new(a: usize, b: usize, points: &[PointMass], short_ratio: f64, long_ratio: f64) -> Self {
        let dist = points[a].current.distance(points[b].current);
        Self {
            a,
            b,
            band: DistanceBand::new(dist * short_ratio, dist * long_ratio),
        }
    }

    pub fn set_dist(&mut self, short: f64, long: f64) {
        self.band.set_dist(short, long);
    }

    pub fn scale(&mut self, factor: f64) {
        self.band.scale(factor);
    }

    pub fn satisfy(&self, points: &mut [PointMass]) {
        let (a, b) = pair_mut(points, self.a, self.b);
        self.band.apply(a, b);
    }
}
