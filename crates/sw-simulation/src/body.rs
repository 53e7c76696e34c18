use sw_core::{Bounds, Motion};

use crate::gravity::GravityWell;
use crate::projectile::Projectile;
use crate::ship::Ship;

/// Everything that lives in the world.
#[derive(Debug, Clone)]
pub enum Body {
    /// A player ship.
    Ship(Ship),
    /// A shot in flight or exploding.
    Projectile(Projectile),
    /// A fixed gravity well.
    Well(GravityWell),
}

impl Body {
    /// Kinematic state, for bodies that move.
    pub fn motion(&self) -> Option<&Motion> {
        match self {
            Self::Ship(ship) => Some(ship.motion()),
            Self::Projectile(projectile) => Some(projectile.motion()),
            Self::Well(_) => None,
        }
    }

    pub(crate) fn motion_mut(&mut self) -> Option<&mut Motion> {
        match self {
            Self::Ship(ship) => Some(ship.motion_mut()),
            Self::Projectile(projectile) => Some(projectile.motion_mut()),
            Self::Well(_) => None,
        }
    }

    /// Whether other bodies run collision checks against this one.
    pub fn is_target(&self) -> bool {
        matches!(self, Self::Ship(_) | Self::Well(_))
    }

    /// One tick of movement. Projectiles also burn ttl; wells stay put.
    pub fn advance(&mut self, bounds: &Bounds) {
        match self {
            Self::Ship(ship) => ship.motion_mut().integrate(bounds),
            Self::Projectile(projectile) => projectile.advance(bounds),
            Self::Well(_) => {}
        }
    }

    /// The ship, if this body is one.
    pub fn as_ship(&self) -> Option<&Ship> {
        match self {
            Self::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    /// Mutable access to the ship, if this body is one.
    pub fn as_ship_mut(&mut self) -> Option<&mut Ship> {
        match self {
            Self::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    /// The projectile, if this body is one.
    pub fn as_projectile(&self) -> Option<&Projectile> {
        match self {
            Self::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    /// The well, if this body is one.
    pub fn as_well(&self) -> Option<&GravityWell> {
        match self {
            Self::Well(well) => Some(well),
            _ => None,
        }
    }
}

/// Borrow two distinct bodies mutably, in argument order.
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (low, high) = bodies.split_at_mut(j);
        (&mut low[i], &mut high[0])
    } else {
        let (low, high) = bodies.split_at_mut(i);
        (&mut high[0], &mut low[j])
    }
}
