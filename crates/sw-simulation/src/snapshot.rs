//! Read-only, serializable views of a world.

use serde::Serialize;
use sw_mechanics::Subsystem;

use crate::projectile::{Projectile, ProjectilePhase};
use crate::ship::{Ship, ShipId};
use crate::world::MatchOutcome;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    /// Tick the snapshot was taken on.
    pub tick: u64,
    /// Set once the match is decided.
    pub outcome: Option<MatchOutcome>,
    /// Ships in id order.
    pub ships: Vec<ShipSnapshot>,
    /// Live and exploding projectiles.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Gravity wells.
    pub wells: Vec<WellSnapshot>,
}

/// One ship as seen from outside.
#[derive(Debug, Clone, Serialize)]
pub struct ShipSnapshot {
    /// Player slot.
    pub id: ShipId,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Units per tick.
    pub speed: f64,
    /// Direction of travel in degrees.
    pub heading: f64,
    /// Nose direction in degrees.
    pub facing: f64,
    /// Spare lives. Negative once eliminated.
    pub lives: i32,
    /// Shield up this tick.
    pub shielded: bool,
    /// Engine fired this tick.
    pub thrusting: bool,
    /// Subsystem that redistribution feeds.
    pub selected: Subsystem,
    /// All five subsystems in selection order.
    pub subsystems: Vec<SubsystemSnapshot>,
}

/// Level and regeneration of one subsystem.
#[derive(Debug, Clone, Serialize)]
pub struct SubsystemSnapshot {
    /// Which subsystem.
    pub subsystem: Subsystem,
    /// Level in `[0, 100]`.
    pub level: f64,
    /// Rate slider in `[0, 100]`.
    pub slider: f64,
    /// Effective regeneration per tick.
    pub rate: f64,
}

/// One projectile as seen from outside.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectileSnapshot {
    /// Who fired it.
    pub owner: ShipId,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Remaining ttl.
    pub ttl: i32,
    /// Lifecycle stage.
    pub phase: ProjectilePhase,
}

/// A gravity well's center and core.
#[derive(Debug, Clone, Serialize)]
pub struct WellSnapshot {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Radius of the core that resets ships.
    pub radius: f64,
}

impl From<&Ship> for ShipSnapshot {
    fn from(ship: &Ship) -> Self {
        let motion = ship.motion();
        let energy = ship.energy();
        Self {
            id: ship.id(),
            x: motion.x(),
            y: motion.y(),
            speed: motion.speed(),
            heading: motion.heading(),
            facing: ship.facing(),
            lives: ship.lives(),
            shielded: ship.is_shielded(),
            thrusting: ship.is_thrusting(),
            selected: ship.selected_subsystem(),
            subsystems: Subsystem::ALL
                .into_iter()
                .map(|subsystem| SubsystemSnapshot {
                    subsystem,
                    level: energy.level(subsystem),
                    slider: energy.slider(subsystem),
                    rate: energy.rate(subsystem),
                })
                .collect(),
        }
    }
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(projectile: &Projectile) -> Self {
        let (x, y) = projectile.motion().position();
        Self {
            owner: projectile.owner(),
            x,
            y,
            ttl: projectile.ttl(),
            phase: projectile.phase(),
        }
    }
}
