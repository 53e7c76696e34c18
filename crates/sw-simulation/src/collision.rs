//! Pairwise contact rules.
//!
//! [`CollisionResolver::resolve`] dispatches on the kinds of both bodies.
//! Every arm is symmetric in which body started the check. The world only
//! offers each pair of ships once per tick.

use sw_core::Bounds;
use sw_core::tuning::CollisionTuning;
use tracing::debug;

use crate::body::Body;
use crate::gravity::GravityWell;
use crate::projectile::Projectile;
use crate::ship::{Ship, ShipId};

/// What a resolved contact did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Two ships bumped.
    Ships {
        /// The ship whose check found the contact.
        first: ShipId,
        /// The other ship.
        second: ShipId,
        /// Magnitude of the relative velocity.
        force: f64,
    },
    /// A projectile struck a ship.
    Hit {
        /// The struck ship.
        ship: ShipId,
        /// Who fired.
        owner: ShipId,
        /// Whether the shield took the hit.
        shielded: bool,
    },
    /// A flying projectile entered a well core.
    Swallowed {
        /// Who fired.
        owner: ShipId,
    },
    /// A ship entered a well core and was reset.
    Crushed {
        /// The ship that fell in.
        ship: ShipId,
        /// Lives left after the reset.
        lives: i32,
    },
}

/// Applies the outcome of body-vs-body contacts.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    bounds: Bounds,
    tuning: CollisionTuning,
}

impl CollisionResolver {
    /// A resolver for one plane and set of contact constants.
    pub fn new(bounds: Bounds, tuning: CollisionTuning) -> Self {
        Self { bounds, tuning }
    }

    /// Check one pair and apply the effects of any contact.
    pub fn resolve(&self, a: &mut Body, b: &mut Body) -> Option<Contact> {
        match (a, b) {
            (Body::Ship(a), Body::Ship(b)) => self.ships(a, b),
            (Body::Projectile(p), Body::Ship(s)) | (Body::Ship(s), Body::Projectile(p)) => {
                self.projectile_hit(p, s)
            }
            (Body::Projectile(p), Body::Well(w)) | (Body::Well(w), Body::Projectile(p)) => {
                Self::projectile_swallowed(p, w)
            }
            (Body::Ship(s), Body::Well(w)) | (Body::Well(w), Body::Ship(s)) => {
                Self::ship_crushed(s, w)
            }
            (Body::Projectile(_), Body::Projectile(_)) | (Body::Well(_), Body::Well(_)) => None,
        }
    }

    fn ships(&self, a: &mut Ship, b: &mut Ship) -> Option<Contact> {
        let shields = [a.is_shielded(), b.is_shielded()];
        let shielded_count = shields.iter().filter(|s| **s).count() as f64;
        let (bx, by) = b.motion().position();
        let gap = a.motion().distance_to(bx, by)
            - (a.hull_radius() + b.hull_radius())
            - self.tuning.shield_bonus_radius * shielded_count;
        if gap > 0.0 {
            return None;
        }

        let (avx, avy) = a.motion().velocity();
        let (bvx, bvy) = b.motion().velocity();
        let force = (avx - bvx).hypot(avy - bvy);
        let damage = force * self.tuning.damage_multiplier;

        let (a_speed, a_heading) = (a.motion().speed(), a.motion().heading());
        let (b_speed, b_heading) = (b.motion().speed(), b.motion().heading());

        match shields {
            [true, true] => {
                a.motion_mut().set_velocity(b_speed, b_heading);
                b.motion_mut().set_velocity(a_speed, a_heading);
            }
            [true, false] => {
                a.motion_mut().set_speed(b_speed);
                b.motion_mut().set_speed(b_speed / 2.0);
                b.take_damage(damage);
            }
            [false, true] => {
                b.motion_mut().set_speed(a_speed);
                a.motion_mut().set_speed(a_speed / 2.0);
                a.take_damage(damage);
            }
            [false, false] => {
                a.motion_mut().set_velocity(b_speed / 2.0, b_heading);
                b.motion_mut().set_velocity(a_speed / 2.0, a_heading);
                a.take_damage(damage);
                b.take_damage(damage);
            }
        }

        a.motion_mut().integrate(&self.bounds);
        b.motion_mut().integrate(&self.bounds);
        debug!(first = %a.id(), second = %b.id(), force, "ships collided");
        Some(Contact::Ships {
            first: a.id(),
            second: b.id(),
            force,
        })
    }

    fn projectile_hit(&self, p: &mut Projectile, s: &mut Ship) -> Option<Contact> {
        if !p.is_flying() {
            return None;
        }
        let shielded = s.is_shielded();
        let (radius, divisor) = if shielded {
            (self.tuning.shield_hit_radius, self.tuning.shielded_recoil_divisor)
        } else {
            (self.tuning.hull_hit_radius, self.tuning.hull_recoil_divisor)
        };
        let (sx, sy) = s.motion().position();
        if p.motion().distance_to(sx, sy) > radius {
            return None;
        }

        s.motion_mut()
            .apply_force(p.motion().speed() / divisor, p.motion().heading());
        if !shielded {
            s.take_damage(self.tuning.projectile_damage);
        }
        p.detonate();
        debug!(ship = %s.id(), owner = %p.owner(), shielded, "projectile hit");
        Some(Contact::Hit {
            ship: s.id(),
            owner: p.owner(),
            shielded,
        })
    }

    fn projectile_swallowed(p: &mut Projectile, w: &GravityWell) -> Option<Contact> {
        let (x, y) = p.motion().position();
        if p.is_flying() && w.contains(x, y) {
            p.detonate();
            return Some(Contact::Swallowed { owner: p.owner() });
        }
        None
    }

    fn ship_crushed(s: &mut Ship, w: &GravityWell) -> Option<Contact> {
        let (x, y) = s.motion().position();
        if !w.contains(x, y) {
            return None;
        }
        s.respawn();
        Some(Contact::Crushed {
            ship: s.id(),
            lives: s.lives(),
        })
    }
}
