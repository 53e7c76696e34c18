//! Fixed gravity wells.

use serde::{Deserialize, Serialize};
use sw_core::tuning::GravityTuning;
use sw_core::{Motion, distance};

/// A stationary attractor with a lethal core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityWell {
    x: f64,
    y: f64,
    radius: f64,
    force: f64,
}

impl GravityWell {
    /// A well centered on `(x, y)`.
    pub fn new(x: f64, y: f64, tuning: &GravityTuning) -> Self {
        Self {
            x,
            y,
            radius: tuning.radius,
            force: tuning.force,
        }
    }

    /// Center of the well.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Radius of the core that destroys ships and detonates projectiles.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Pull strength before distance falloff.
    pub fn force(&self) -> f64 {
        self.force
    }

    /// Pull strength at `distance`: `force / (distance / 2)`, or the raw
    /// force at the center.
    pub fn effective_force(&self, distance: f64) -> f64 {
        if distance == 0.0 {
            self.force
        } else {
            self.force / (distance / 2.0)
        }
    }

    /// Apply one tick of pull to a body.
    pub fn pull(&self, motion: &mut Motion) {
        let dist = motion.distance_to(self.x, self.y);
        let direction = motion.heading_to(self.x, self.y);
        motion.apply_force(self.effective_force(dist), direction);
    }

    /// Returns true if the point lies inside the core.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        distance(self.x, self.y, x, y) <= self.radius
    }
}
