//! Verlet point masses

use crate::Vector2;
use crate::consts::FREE_FRICTION;

/// A simulated particle with position history
///
/// Velocity is implicit in `current - previous`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMass {
    pub current: Vector2,
    pub previous: Vector2,
    pub mass: f64,
    /// Force accumulated for the next integration
    pub force: Vector2,
    /// Linear damping in [0, 1], reset by every relaxation pass
    pub friction: f64,
}

impl PointMass {
    /// Panics unless `mass` is positive and finite.
    pub fn new(pos: Vector2, mass: f64) -> Self {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "point mass must be positive and finite (got {})",
            mass
        );
        Self {
            current: pos,
            previous: pos,
            mass,
            force: Vector2::ZERO,
            friction: FREE_FRICTION,
        }
    }

    /// Advance one Verlet step with linear damping
    pub fn integrate(&mut self, dt: f64) {
        let accel = self.force / self.mass;
        let keep = 2.0 - self.friction;
        let drop = 1.0 - self.friction;
        let next = self.current * keep - self.previous * drop + accel * (dt * dt);
        self.previous = self.current;
        self.current = next;
    }

    /// Squared displacement over the last step (speed proxy)
    pub fn velocity_sq(&self) -> f64 {
        (self.current - self.previous).length_squared()
    }

    pub fn translate(&mut self, delta: Vector2) {
        self.current += delta;
    }
}

/// Mutable access to two distinct points of a slice
///
/// Panics if `a == b`; constraint construction never links a point to itself.
pub(crate) fn pair_mut(points: &mut [PointMass], a: usize, b: usize) -> (&mut PointMass, &mut PointMass) {
    assert_ne!(a, b, "constraint endpoints must differ");
    if a < b {
        let (lo, hi) = points.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = points.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rest_without_force() {
        let mut p = PointMass::new(Vector2::new(1.0, 2.0), 1.0);
        p.integrate(0.05);
        assert_eq!(p.current, Vector2::new(1.0, 2.0));
        assert_eq!(p.velocity_sq(), 0.0);
    }

    #[test]
    fn test_integration_formula() {
        let mut p = PointMass::new(Vector2::new(1.0, 0.0), 2.0);
        p.previous = Vector2::new(0.9, 0.0);
        p.force = Vector2::new(4.0, -2.0);
        p.friction = 0.75;
        p.integrate(0.1);

        let expected_x = 1.25 * 1.0 - 0.25 * 0.9 + 2.0 * 0.01;
        let expected_y = -1.0 * 0.01;
        assert!((p.current.x - expected_x).abs() < 1e-12);
        assert!((p.current.y - expected_y).abs() < 1e-12);
        assert_eq!(p.previous, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_friction_damps_velocity() {
        let mut free = PointMass::new(Vector2::ZERO, 1.0);
        free.previous = Vector2::new(-0.1, 0.0);
        let mut damped = free.clone();
        damped.friction = 0.75;

        free.integrate(0.05);
        damped.integrate(0.05);
        assert!(damped.velocity_sq() < free.velocity_sq());
    }

    #[test]
    fn test_velocity_is_squared() {
        let mut p = PointMass::new(Vector2::new(3.0, 4.0), 1.0);
        p.previous = Vector2::ZERO;
        assert!((p.velocity_sq() - 25.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "point mass must be positive")]
    fn test_zero_mass_rejected() {
        PointMass::new(Vector2::ZERO, 0.0);
    }

    #[test]
    #[should_panic(expected = "point mass must be positive")]
    fn test_negative_mass_rejected() {
        PointMass::new(Vector2::ZERO, -1.0);
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut pts = vec![
            PointMass::new(Vector2::new(0.0, 0.0), 1.0),
            PointMass::new(Vector2::new(1.0, 0.0), 1.0),
            PointMass::new(Vector2::new(2.0, 0.0), 1.0),
        ];
        let (a, b) = pair_mut(&mut pts, 2, 0);
        assert_eq!(a.current.x, 2.0);
        assert_eq!(b.current.x, 0.0);
    }
}
