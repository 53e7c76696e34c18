//! Position plus polar velocity on a toroidal plane.
//!
//! Velocity is stored as `(speed, heading)` because that is how ships and
//! projectiles reason about it, but forces are always composed in Cartesian
//! space: convert, add, convert back. Speed is clamped to `[0, max_speed]`
//! after every change.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, distance, heading_of, normalize_degrees};
use crate::tuning::MAX_SPEED;

/// Kinematic state of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    x: f64,
    y: f64,
    speed: f64,
    heading: f64,
    max_speed: f64,
}

impl Motion {
    /// A body at rest at `(x, y)` with the default speed cap.
    pub fn at(x: f64, y: f64) -> Self {
        Self::with_max_speed(x, y, MAX_SPEED)
    }

    /// A body at rest at `(x, y)` with a custom speed cap.
    pub fn with_max_speed(x: f64, y: f64, max_speed: f64) -> Self {
        Self {
            x,
            y,
            speed: 0.0,
            heading: 0.0,
            max_speed: max_speed.max(0.0),
        }
    }

    /// Builder-style velocity setter.
    pub fn moving(mut self, speed: f64, heading: f64) -> Self {
        self.set_velocity(speed, heading);
        self
    }

    /// Horizontal position.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical position.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Position as `(x, y)`.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Current speed in units per tick, always within `[0, max_speed]`.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Direction of travel in degrees, within `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Speed cap applied after every change.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Teleport without touching velocity. The caller is responsible for
    /// passing a point inside the plane.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Replace the velocity, clamping speed and normalizing heading.
    pub fn set_velocity(&mut self, speed: f64, heading: f64) {
        self.speed = speed.clamp(0.0, self.max_speed);
        self.heading = normalize_degrees(heading);
    }

    /// Replace the speed only, keeping the heading.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.0, self.max_speed);
    }

    /// Bring the body to rest facing `heading`.
    pub fn stop(&mut self, heading: f64) {
        self.set_velocity(0.0, heading);
    }

    /// Velocity as a Cartesian `(dx, dy)` per tick.
    pub fn velocity(&self) -> (f64, f64) {
        polar_to_cartesian(self.speed, self.heading)
    }

    /// Advance one tick along the current velocity and wrap onto the plane.
    pub fn integrate(&mut self, bounds: &Bounds) {
        let (dx, dy) = self.velocity();
        let (x, y) = bounds.wrap(self.x + dx, self.y + dy);
        self.x = x;
        self.y = y;
    }

    /// Add an impulse of `magnitude` toward `direction` degrees.
    ///
    /// A negative magnitude pushes the opposite way.
    pub fn apply_force(&mut self, magnitude: f64, direction: f64) {
        let (vx, vy) = self.velocity();
        let (fx, fy) = polar_to_cartesian(magnitude, direction);
        let (dx, dy) = (vx + fx, vy + fy);
        self.speed = dx.hypot(dy).clamp(0.0, self.max_speed);
        self.heading = heading_of(dx, dy);
    }

    /// Straight-line distance to a point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        distance(self.x, self.y, x, y)
    }

    /// Heading from this body toward a point.
    pub fn heading_to(&self, x: f64, y: f64) -> f64 {
        heading_of(x - self.x, y - self.y)
    }
}

fn polar_to_cartesian(magnitude: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (rad.cos() * magnitude, rad.sin() * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn big_plane() -> Bounds {
        Bounds::new(10_000.0, 10_000.0).unwrap()
    }

    #[test]
    fn thrust_from_rest_keeps_heading() {
        let mut m = Motion::at(100.0, 100.0);
        m.apply_force(0.25, 0.0);
        assert!((m.speed() - 0.25).abs() < 1e-12);
        assert!(m.heading().abs() < 1e-9);

        m.integrate(&big_plane());
        assert!((m.x() - 100.25).abs() < 1e-12);
        assert!((m.y() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn opposing_force_cancels() {
        let mut m = Motion::at(0.0, 0.0).moving(2.0, 90.0);
        m.apply_force(2.0, 270.0);
        assert!(m.speed() < 1e-9);
    }

    #[test]
    fn zero_vector_has_heading_zero() {
        let mut m = Motion::at(5.0, 5.0);
        m.apply_force(0.0, 123.0);
        assert_eq!(m.speed(), 0.0);
        assert_eq!(m.heading(), 0.0);
    }

    #[test]
    fn negative_force_pushes_backwards() {
        let mut m = Motion::at(0.0, 0.0);
        m.apply_force(-0.1, 0.0);
        assert!((m.speed() - 0.1).abs() < 1e-12);
        assert!((m.heading() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn speed_is_capped() {
        let mut m = Motion::at(0.0, 0.0);
        m.apply_force(50.0, 45.0);
        assert_eq!(m.speed(), MAX_SPEED);
        assert!((m.heading() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn two_forces_match_their_sum() {
        let mut twice = Motion::at(0.0, 0.0).moving(1.0, 10.0);
        twice.apply_force(0.5, 100.0);
        twice.apply_force(0.7, 200.0);

        let (ax, ay) = polar_to_cartesian(0.5, 100.0);
        let (bx, by) = polar_to_cartesian(0.7, 200.0);
        let mut once = Motion::at(0.0, 0.0).moving(1.0, 10.0);
        once.apply_force((ax + bx).hypot(ay + by), heading_of(ax + bx, ay + by));

        assert!((twice.speed() - once.speed()).abs() < 1e-9);
        assert!((twice.heading() - once.heading()).abs() < 1e-6);
    }

    #[test]
    fn integrate_wraps_across_edge() {
        let bounds = Bounds::new(100.0, 100.0).unwrap();
        let mut m = Motion::at(99.0, 50.0).moving(1.5, 0.0);
        m.integrate(&bounds);
        assert!((m.x() - 0.5).abs() < 1e-9);

        let mut m = Motion::at(1.0, 1.0).moving(2.0, 225.0);
        m.integrate(&bounds);
        assert!(m.x() > 99.0 && m.y() > 99.0);
    }

    #[test]
    fn heading_to_points_at_target() {
        let m = Motion::at(10.0, 10.0);
        assert!((m.heading_to(10.0, 20.0) - 90.0).abs() < 1e-9);
        assert!((m.distance_to(13.0, 14.0) - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn speed_stays_clamped(forces in prop::collection::vec((-20.0f64..20.0, -720.0f64..720.0), 1..40)) {
            let mut m = Motion::at(0.0, 0.0);
            for (magnitude, direction) in forces {
                m.apply_force(magnitude, direction);
                prop_assert!(m.speed() >= 0.0 && m.speed() <= MAX_SPEED);
                prop_assert!(m.heading() >= 0.0 && m.heading() < 360.0);
            }
        }
    }
}
