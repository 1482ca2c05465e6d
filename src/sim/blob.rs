//! Blob: a ring of point masses around a center hub
//!
//! Point masses live in a fixed arena: ring points at `0..ring_count`, the
//! center point last. Sticks join neighbouring ring points; joints brace
//! each ring point to its near-opposite point and to the center.

use super::boundary::Boundary;
use super::constraint::{Joint, Stick};
use super::point::PointMass;
use crate::consts::*;
use crate::error::{SimError, is_positive};
use crate::{Vector2, polar_to_cartesian};

/// A soft-bodied creature
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Center at creation
    anchor: Vector2,
    radius: f64,
    ring_count: usize,
    points: Vec<PointMass>,
    sticks: Vec<Stick>,
    joints: Vec<Joint>,
    selected: bool,
    /// Nudge waiting for the next integration
    pending_force: Vector2,
}

impl Blob {
    /// Build a blob centered at `center`
    ///
    /// `ring_count` must be even and at least 4, `radius` positive.
    pub fn new(center: Vector2, radius: f64, ring_count: usize) -> Result<Self, SimError> {
        if !is_positive(radius) {
            return Err(SimError::InvalidRadius(radius));
        }
        if ring_count < 4 || ring_count % 2 != 0 {
            return Err(SimError::InvalidRingCount(ring_count));
        }
        Ok(Self::build(center, radius, ring_count))
    }

    /// Construction without validation, for callers that derive arguments from a live blob
    pub(crate) fn build(center: Vector2, radius: f64, ring_count: usize) -> Self {
        let mut points = Vec::with_capacity(ring_count + 1);
        for i in 0..ring_count {
            let theta = std::f64::consts::TAU * i as f64 / ring_count as f64;
            points.push(PointMass::new(polar_to_cartesian(center, radius, theta), 1.0));
        }
        points.push(PointMass::new(center, 1.0));

        // Heavy pair breaks rotational symmetry so the body has a "top"
        points[0].mass = ANCHOR_MASS;
        points[1].mass = ANCHOR_MASS;

        let sticks = (0..ring_count)
            .map(|i| Stick::new(i, (i + 1) % ring_count, &points))
            .collect();

        let hub = ring_count;
        let mut joints = Vec::with_capacity(ring_count * 2);
        for i in 0..ring_count {
            let opposite = (i + ring_count / 2 + 1) % ring_count;
            joints.push(Joint::new(i, opposite, &points, BRACE_SHORT, BRACE_LONG));
            joints.push(Joint::new(i, hub, &points, SPOKE_SHORT, SPOKE_LONG));
        }

        Self {
            anchor: center,
            radius,
            ring_count,
            points,
            sticks,
            joints,
            selected: false,
            pending_force: Vector2::ZERO,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn anchor(&self) -> Vector2 {
        self.anchor
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn center(&self) -> &PointMass {
        &self.points[self.ring_count]
    }

    pub fn center_mut(&mut self) -> &mut PointMass {
        &mut self.points[self.ring_count]
    }

    pub fn center_position(&self) -> Vector2 {
        self.center().current
    }

    pub fn ring(&self) -> &[PointMass] {
        &self.points[..self.ring_count]
    }

    /// Ring point at `index`, wrapping in both directions
    pub fn ring_point(&self, index: isize) -> &PointMass {
        let n = self.ring_count as isize;
        &self.points[index.rem_euclid(n) as usize]
    }

    /// Ring points followed by the center
    pub fn points(&self) -> &[PointMass] {
        &self.points
    }

    pub fn sticks(&self) -> &[Stick] {
        &self.sticks
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Squared center displacement over the last step
    pub fn velocity_sq(&self) -> f64 {
        self.center().velocity_sq()
    }

    pub fn is_moving(&self) -> bool {
        self.velocity_sq() > MOVING_VELOCITY_SQ
    }

    /// Scale radius and every rest distance, keeping the point masses
    pub fn scale(&mut self, factor: f64) {
        self.radius *= factor;
        for joint in &mut self.joints {
            joint.scale(factor);
        }
        for stick in &mut self.sticks {
            stick.scale(factor);
        }
    }

    pub fn integrate(&mut self, dt: f64) {
        for p in &mut self.points {
            p.integrate(dt);
        }
    }

    pub fn set_force(&mut self, force: Vector2) {
        for p in &mut self.points {
            p.force = force;
        }
    }

    /// Add `force` to every point, plus extra thrust on the anchor point
    pub fn add_force(&mut self, force: Vector2) {
        for p in &mut self.points {
            p.force += force;
        }
        for _ in 0..ANCHOR_EXTRA_THRUST {
            self.points[0].force += force;
        }
    }

    /// Queue a force for the next tick
    pub(crate) fn queue_force(&mut self, force: Vector2) {
        self.pending_force += force;
    }

    pub(crate) fn take_pending_force(&mut self) -> Vector2 {
        std::mem::take(&mut self.pending_force)
    }

    /// Teleport so the center lands on `target`
    ///
    /// Only current positions shift, so the jump shows up as velocity.
    pub fn move_to(&mut self, target: Vector2) {
        let delta = target - self.center_position();
        for p in &mut self.points {
            p.translate(delta);
        }
    }

    pub fn satisfy_constraints(&mut self, boundary: &Boundary) {
        self.satisfy_constraints_with(boundary, |_| {});
    }

    /// Relaxation passes with a hook for constraints that leave the blob
    ///
    /// `external` runs at the end of every pass, after the blob's own joints,
    /// with the center point.
    pub fn satisfy_constraints_with<F>(&mut self, boundary: &Boundary, mut external: F)
    where
        F: FnMut(&mut PointMass),
    {
        for _ in 0..RELAXATION_PASSES {
            for p in &mut self.points {
                p.friction = if boundary.resolve(p) {
                    CONTACT_FRICTION
                } else {
                    FREE_FRICTION
                };
            }
            for stick in &self.sticks {
                stick.satisfy(&mut self.points);
            }
            for joint in &self.joints {
                joint.satisfy(&mut self.points);
            }
            external(self.center_mut());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> Blob {
        Blob::new(Vector2::new(1.0, 1.0), 0.4, RING_POINTS).unwrap()
    }

    fn arena() -> Boundary {
        Boundary::new(ARENA_LEFT, ARENA_TOP, ARENA_WIDTH, ARENA_HEIGHT).unwrap()
    }

    #[test]
    fn test_construction_topology() {
        let b = blob();
        assert_eq!(b.ring().len(), 8);
        assert_eq!(b.points().len(), 9);
        assert_eq!(b.sticks().len(), 8);
        assert_eq!(b.joints().len(), 16);
        assert_eq!(b.center_position(), Vector2::new(1.0, 1.0));
        assert_eq!(b.anchor(), Vector2::new(1.0, 1.0));
    }

    #[test]
    fn test_anchor_masses() {
        let b = blob();
        assert_eq!(b.ring()[0].mass, ANCHOR_MASS);
        assert_eq!(b.ring()[1].mass, ANCHOR_MASS);
        assert!(b.ring()[2..].iter().all(|p| p.mass == 1.0));
        assert_eq!(b.center().mass, 1.0);
    }

    #[test]
    fn test_ring_on_circle() {
        let b = blob();
        for p in b.ring() {
            assert!((p.current.distance(b.center_position()) - 0.4).abs() < 1e-12);
        }
    }

    #[test]
    fn test_joint_wiring() {
        let b = blob();
        // Ring point 0 braces to 0 + 4 + 1 = 5, then to the hub
        assert_eq!((b.joints()[0].a, b.joints()[0].b), (0, 5));
        assert_eq!((b.joints()[1].a, b.joints()[1].b), (0, 8));
        assert_eq!((b.joints()[14].a, b.joints()[14].b), (7, 4));

        let spoke = &b.joints()[1].band;
        assert!((spoke.short() - 0.4 * 0.9 * 1.05).abs() < 1e-12);
        assert!((spoke.long() - 0.4 * 1.1 * 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_ring_point_wraps() {
        let b = blob();
        assert_eq!(b.ring_point(-1), &b.ring()[7]);
        assert_eq!(b.ring_point(9), &b.ring()[1]);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            Blob::new(Vector2::ZERO, 0.0, 8),
            Err(SimError::InvalidRadius(0.0))
        );
        assert_eq!(
            Blob::new(Vector2::ZERO, 1.0, 7),
            Err(SimError::InvalidRingCount(7))
        );
        assert_eq!(
            Blob::new(Vector2::ZERO, 1.0, 2),
            Err(SimError::InvalidRingCount(2))
        );
    }

    #[test]
    fn test_scale_rescales_constraints() {
        let mut b = blob();
        let stick_before = b.sticks()[0].rest_length();
        let brace_before = b.joints()[0].band.long();
        b.scale(0.75);
        assert!((b.radius() - 0.3).abs() < 1e-12);
        assert!((b.sticks()[0].rest_length() - stick_before * 0.75).abs() < 1e-12);
        assert!((b.joints()[0].band.long() - brace_before * 0.75).abs() < 1e-12);
        // point masses are not rebuilt
        assert_eq!(b.points().len(), 9);
    }

    #[test]
    fn test_add_force_biases_anchor() {
        let mut b = blob();
        b.set_force(Vector2::ZERO);
        b.add_force(Vector2::new(1.0, 0.0));
        assert_eq!(b.ring()[0].force, Vector2::new(5.0, 0.0));
        assert_eq!(b.ring()[1].force, Vector2::new(1.0, 0.0));
        assert_eq!(b.center().force, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_set_force_overwrites() {
        let mut b = blob();
        b.add_force(Vector2::new(3.0, 3.0));
        b.set_force(Vector2::new(0.0, 10.0));
        assert!(b.points().iter().all(|p| p.force == Vector2::new(0.0, 10.0)));
    }

    #[test]
    fn test_move_to_translates_current_only() {
        let mut b = blob();
        let before: Vec<Vector2> = b.points().iter().map(|p| p.current).collect();
        b.move_to(Vector2::new(2.0, 1.5));
        assert_eq!(b.center_position(), Vector2::new(2.0, 1.5));
        for (p, old) in b.points().iter().zip(&before) {
            assert!((p.current - (*old + Vector2::new(1.0, 0.5))).length() < 1e-12);
            assert_eq!(p.previous, *old);
        }
    }

    #[test]
    fn test_at_rest_stays_at_rest() {
        let mut b = blob();
        let before: Vec<Vector2> = b.points().iter().map(|p| p.current).collect();
        b.set_force(Vector2::ZERO);
        b.integrate(SIM_DT);
        b.satisfy_constraints(&arena());
        for (p, old) in b.points().iter().zip(&before) {
            assert!((p.current - *old).length() < 1e-9);
        }
        assert!(!b.is_moving());
    }

    #[test]
    fn test_falls_and_rests_on_floor() {
        let bounds = arena();
        let mut b = blob();
        for _ in 0..400 {
            b.set_force(Vector2::new(0.0, GRAVITY));
            b.integrate(SIM_DT);
            b.satisfy_constraints(&bounds);
        }
        // joints run after the clamp, so allow a little overshoot
        for p in b.points() {
            assert!(p.current.y <= bounds.bottom + 0.02);
            assert!(p.current.x >= bounds.left - 0.02 && p.current.x <= bounds.right + 0.02);
        }
        assert!(b.center_position().y > 1.0, "blob should have fallen");
        let lowest = b.ring().iter().map(|p| p.current.y).fold(f64::MIN, f64::max);
        assert!((lowest - bounds.bottom).abs() < 0.05, "lowest ring point at {}", lowest);
    }

    #[test]
    fn test_contact_raises_friction() {
        let bounds = arena();
        let mut b = Blob::new(Vector2::new(1.0, 1.7), 0.4, RING_POINTS).unwrap();
        b.satisfy_constraints(&bounds);
        let touching = b.ring().iter().filter(|p| p.friction == CONTACT_FRICTION).count();
        assert!(touching > 0);
        assert_eq!(b.center().friction, FREE_FRICTION);
    }

    #[test]
    fn test_external_hook_runs_every_pass() {
        let mut b = blob();
        let mut calls = 0;
        b.satisfy_constraints_with(&arena(), |center| {
            assert_eq!(center.mass, 1.0);
            calls += 1;
        });
        assert_eq!(calls, RELAXATION_PASSES);
    }
}
