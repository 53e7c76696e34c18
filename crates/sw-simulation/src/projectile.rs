//! Short-lived shots.
//!
//! A projectile flies while `ttl > 0`, sits at `ttl == 0` for the tick it
//! impacts, plays an explosion while `ttl` runs down to `-explosion_ticks`, and
//! is removed once it drops below that.

use serde::{Deserialize, Serialize};
use sw_core::tuning::ProjectileTuning;
use sw_core::{Bounds, Motion};

use crate::ship::ShipId;

/// Lifecycle stage derived from the ttl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectilePhase {
    /// Still live and able to hit things.
    Flying,
    /// Hit something this tick.
    Impacted,
    /// Inert, showing the explosion frame `1..=explosion_ticks`.
    Exploding(u8),
    /// Due for removal.
    Expired,
}

/// A shot fired by a ship.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    owner: ShipId,
    motion: Motion,
    ttl: i32,
    explosion_ticks: i32,
}

impl Projectile {
    /// A flying shot with a full ttl.
    pub fn new(owner: ShipId, motion: Motion, tuning: &ProjectileTuning) -> Self {
        Self {
            owner,
            motion,
            ttl: tuning.ttl,
            explosion_ticks: tuning.explosion_ticks,
        }
    }

    /// The ship that fired this projectile. A shot can still hit its owner.
    pub fn owner(&self) -> ShipId {
        self.owner
    }

    /// Position and velocity.
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub(crate) fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    /// Ticks of flight left. Zero or below means spent.
    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    /// Lifecycle stage derived from the ttl.
    pub fn phase(&self) -> ProjectilePhase {
        match self.ttl {
            t if t > 0 => ProjectilePhase::Flying,
            0 => ProjectilePhase::Impacted,
            t if t >= -self.explosion_ticks => {
                ProjectilePhase::Exploding(u8::try_from(-t).unwrap_or(u8::MAX))
            }
            _ => ProjectilePhase::Expired,
        }
    }

    /// Returns true while the shot can still hit things.
    pub fn is_flying(&self) -> bool {
        self.ttl > 0
    }

    /// Returns true once the explosion has finished.
    pub fn is_expired(&self) -> bool {
        self.ttl < -self.explosion_ticks
    }

    /// Stop a flying projectile. Returns false if it had already stopped.
    pub fn detonate(&mut self) -> bool {
        if self.ttl > 0 {
            self.ttl = 0;
            true
        } else {
            false
        }
    }

    /// Move one tick and burn one unit of ttl. Explosions keep drifting.
    pub fn advance(&mut self, bounds: &Bounds) {
        self.motion.integrate(bounds);
        self.ttl -= 1;
    }
}
