//! A simple rule-based pilot so matches can run without a keyboard.
//!
//! Priorities, highest first: escape the gravity well, shield against
//! incoming fire, then hunt the nearest opponent. Energy is steered one
//! slider step per tick toward whichever subsystem is running lowest.

use sw_core::{distance, normalize_degrees};
use sw_mechanics::Subsystem;
use sw_simulation::{Intent, Ship, ShipId, World};

/// Degrees per rotate input, as on the keyboard.
const TURN_STEP: f64 = 5.0;
/// Forward thrust per input.
const THRUST: f64 = 0.25;
/// Reverse thrust per input.
const BRAKE: f64 = -0.1;
/// Multiples of the well radius that count as dangerously close.
const WELL_DANGER: f64 = 6.0;
/// Hostile shots closer than this trigger the shield.
const THREAT_RANGE: f64 = 30.0;
const FIRE_RANGE: f64 = 400.0;
const FIRE_CONE: f64 = 8.0;
const CRUISE_SPEED: f64 = 2.0;
/// Sliders are not pushed past this.
const SLIDER_CEILING: f64 = 75.0;

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    id: ShipId,
}

impl Autopilot {
    pub fn new(id: ShipId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Inputs for this tick. Empty once the ship is gone.
    pub fn decide(&self, world: &World) -> Vec<Intent> {
        let Some(me) = world.ship(self.id) else {
            return Vec::new();
        };
        let mut intents = Vec::new();
        let (x, y) = me.motion().position();

        let danger = world.wells().find(|well| {
            let (wx, wy) = well.position();
            distance(x, y, wx, wy) < well.radius() * WELL_DANGER
        });

        if let Some(well) = danger {
            let (wx, wy) = well.position();
            if me.jump_cooldown() == 0
                && me.level(Subsystem::Jump) >= world.tuning().ship.jump_min_level
            {
                intents.push(Intent::Jump);
            }
            let away = normalize_degrees(me.motion().heading_to(wx, wy) + 180.0);
            intents.extend(turn_toward(me, away));
            intents.push(Intent::Thrust(THRUST));
        } else if let Some(target) = nearest_opponent(world, me) {
            let (tx, ty) = target.motion().position();
            let bearing = me.motion().heading_to(tx, ty);
            let range = me.motion().distance_to(tx, ty);
            let error = angle_between(me.facing(), bearing);

            intents.extend(turn_toward(me, bearing));
            if me.motion().speed() > CRUISE_SPEED * 1.5 {
                intents.push(Intent::Thrust(BRAKE));
            } else if error.abs() < 30.0 && me.motion().speed() < CRUISE_SPEED {
                intents.push(Intent::Thrust(THRUST));
            }
            if error.abs() < FIRE_CONE && range < FIRE_RANGE {
                intents.push(Intent::Fire);
            }
        }

        if under_fire(world, me) {
            intents.push(Intent::RaiseShield);
        }

        intents.extend(steer_energy(me));
        intents
    }
}

fn nearest_opponent<'a>(world: &'a World, me: &Ship) -> Option<&'a Ship> {
    let (x, y) = me.motion().position();
    world
        .ships()
        .filter(|ship| ship.id() != me.id() && !ship.is_eliminated())
        .min_by(|a, b| {
            let da = a.motion().distance_to(x, y);
            let db = b.motion().distance_to(x, y);
            da.total_cmp(&db)
        })
}

fn under_fire(world: &World, me: &Ship) -> bool {
    let (x, y) = me.motion().position();
    world.projectiles().any(|shot| {
        shot.is_flying()
            && shot.owner() != me.id()
            && shot.motion().distance_to(x, y) < THREAT_RANGE
    })
}

/// Signed shortest turn from `from` to `to`, in `(-180, 180]`.
fn angle_between(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 { diff - 360.0 } else { diff }
}

fn turn_toward(me: &Ship, bearing: f64) -> Option<Intent> {
    let error = angle_between(me.facing(), bearing);
    if error.abs() < f64::EPSILON {
        None
    } else {
        Some(Intent::Rotate(error.clamp(-TURN_STEP, TURN_STEP)))
    }
}

/// Select the weakest of the combat subsystems and raise its slider.
fn steer_energy(me: &Ship) -> Option<Intent> {
    let weakest = [
        Subsystem::Hull,
        Subsystem::Ammo,
        Subsystem::Shield,
        Subsystem::Engine,
    ]
    .into_iter()
    .min_by(|a, b| me.level(*a).total_cmp(&me.level(*b)))?;

    if me.level(weakest) >= 90.0 {
        return None;
    }
    if me.selected_subsystem() != weakest {
        let forward = (weakest.index() + 5 - me.selected_subsystem().index()) % 5;
        return Some(Intent::SelectSubsystem(if forward <= 2 { 1 } else { -1 }));
    }
    if me.energy().slider(weakest) < SLIDER_CEILING {
        return Some(Intent::ShiftEnergy(1));
    }
    None
}
