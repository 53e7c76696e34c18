//! Player ships.
//!
//! A ship is a body plus a facing, an energy system, a life counter and four
//! independent countdowns. The facing is where the nose points; it drives
//! thrust and fire but is separate from the direction of travel. Every action
//! is gated on energy or a cooldown and reports what happened through
//! [`ActionOutcome`].

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sw_core::tuning::{ProjectileTuning, ShipTuning};
use sw_core::{Bounds, Motion, Tuning, normalize_degrees};
use sw_mechanics::{ActionOutcome, EnergySystem, Subsystem};
use tracing::debug;

use crate::config::SpawnPose;
use crate::projectile::Projectile;

/// Index of a ship within its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u8);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", u16::from(self.0) + 1)
    }
}

/// A player ship: kinematics, energy, lives and action timers.
#[derive(Debug, Clone)]
pub struct Ship {
    id: ShipId,
    motion: Motion,
    facing: f64,
    spawn: SpawnPose,
    energy: EnergySystem,
    lives: i32,
    firing_cooldown: u32,
    shield_ticks: u32,
    thrust_ticks: u32,
    jump_cooldown: u32,
    tuning: ShipTuning,
    projectile: ProjectileTuning,
}

impl Ship {
    /// A fresh ship at rest on its spawn pose.
    pub fn new(id: ShipId, spawn: SpawnPose, tuning: &Tuning) -> Self {
        let facing = normalize_degrees(spawn.facing);
        let mut motion = Motion::with_max_speed(spawn.x, spawn.y, tuning.motion.max_speed);
        motion.stop(facing);
        Self {
            id,
            motion,
            facing,
            spawn,
            energy: EnergySystem::new(&tuning.energy),
            lives: tuning.ship.starting_lives,
            firing_cooldown: 0,
            shield_ticks: 0,
            thrust_ticks: 0,
            jump_cooldown: 0,
            tuning: tuning.ship,
            projectile: tuning.projectile,
        }
    }

    /// This ship's player slot.
    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Position and velocity.
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub(crate) fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    /// Nose direction in degrees, within `[0, 360)`.
    pub fn facing(&self) -> f64 {
        self.facing
    }

    /// The five subsystems and their sliders.
    pub fn energy(&self) -> &EnergySystem {
        &self.energy
    }

    #[cfg(test)]
    pub(crate) fn energy_mut(&mut self) -> &mut EnergySystem {
        &mut self.energy
    }

    /// Current level of a subsystem.
    pub fn level(&self, sub: Subsystem) -> f64 {
        self.energy.level(sub)
    }

    /// Effective regeneration rate of a subsystem.
    pub fn rate(&self, sub: Subsystem) -> f64 {
        self.energy.rate(sub)
    }

    /// Spare lives. Negative means the ship is out of the match.
    pub fn lives(&self) -> i32 {
        self.lives
    }

    /// Collision radius of the hull.
    pub fn hull_radius(&self) -> f64 {
        self.tuning.hull_radius
    }

    /// Returns true while the shield is up.
    pub fn is_shielded(&self) -> bool {
        self.shield_ticks > 0
    }

    /// True for a few ticks after a successful thrust, for the engine flame.
    pub fn is_thrusting(&self) -> bool {
        self.thrust_ticks > 0
    }

    /// Ticks until the gun can fire again.
    pub fn firing_cooldown(&self) -> u32 {
        self.firing_cooldown
    }

    /// Ticks left on the active shield.
    pub fn shield_ticks(&self) -> u32 {
        self.shield_ticks
    }

    /// Ticks until the jump drive is ready.
    pub fn jump_cooldown(&self) -> u32 {
        self.jump_cooldown
    }

    /// Returns true when the hull has failed.
    pub fn is_destroyed(&self) -> bool {
        self.energy.level(Subsystem::Hull) <= 0.0
    }

    /// Returns true once the ship has no lives left.
    pub fn is_eliminated(&self) -> bool {
        self.lives < 0
    }

    /// Turn the nose by `delta` degrees.
    pub fn rotate(&mut self, delta: f64) {
        self.facing = normalize_degrees(self.facing + delta);
    }

    /// Push along the facing. Negative `delta` brakes or reverses.
    pub fn thrust(&mut self, delta: f64) -> ActionOutcome {
        let outcome = self
            .energy
            .try_spend(Subsystem::Engine, self.tuning.thrust_cost);
        if outcome.is_performed() {
            self.motion.apply_force(delta, self.facing);
            self.thrust_ticks = self.tuning.thrust_flash;
        }
        outcome
    }

    /// Fire a projectile if the gun is ready and there is ammo.
    pub fn fire(&mut self) -> Option<Projectile> {
        self.try_fire().ok()
    }

    /// Like [`Ship::fire`], but says why a shot was refused.
    pub fn try_fire(&mut self) -> Result<Projectile, ActionOutcome> {
        if self.firing_cooldown > 0 {
            return Err(ActionOutcome::Cooldown);
        }
        let spent = self.energy.try_spend(Subsystem::Ammo, self.tuning.fire_cost);
        if !spent.is_performed() {
            return Err(spent);
        }
        self.firing_cooldown = self.tuning.firing_cooldown;
        Ok(self.launch())
    }

    fn launch(&self) -> Projectile {
        let rad = self.facing.to_radians();
        let x = self.motion.x() + rad.cos() * self.tuning.muzzle_offset;
        let y = self.motion.y() + rad.sin() * self.tuning.muzzle_offset;
        let mut motion = Motion::with_max_speed(x, y, self.motion.max_speed())
            .moving(self.motion.speed(), self.motion.heading());
        motion.apply_force(self.tuning.muzzle_impulse, self.facing);
        Projectile::new(self.id, motion, &self.projectile)
    }

    /// Raise the shield for its full duration. Holding it up does not
    /// re-spend energy.
    pub fn raise_shield(&mut self) -> ActionOutcome {
        if self.shield_ticks > 0 {
            return ActionOutcome::Cooldown;
        }
        let outcome = self
            .energy
            .try_spend(Subsystem::Shield, self.tuning.shield_cost);
        if outcome.is_performed() {
            self.shield_ticks = self.tuning.shield_duration;
        }
        outcome
    }

    /// Hyperspace to a uniformly random point on the plane.
    pub fn jump<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &Bounds) -> ActionOutcome {
        if self.jump_cooldown > 0 {
            return ActionOutcome::Cooldown;
        }
        if self.energy.level(Subsystem::Jump) < self.tuning.jump_min_level {
            return ActionOutcome::InsufficientEnergy(Subsystem::Jump);
        }
        let outcome = self.energy.try_spend(Subsystem::Jump, self.tuning.jump_cost);
        if !outcome.is_performed() {
            return outcome;
        }
        let x = rng.random_range(0.0..bounds.width);
        let y = rng.random_range(0.0..bounds.height);
        self.motion.set_position(x, y);
        self.jump_cooldown = self.tuning.jump_cooldown;
        debug!(ship = %self.id, x, y, "hyperspace jump");
        outcome
    }

    /// Move the selected subsystem's slider one step in `direction`.
    pub fn shift_energy(&mut self, direction: i32) -> ActionOutcome {
        self.energy.shift(direction)
    }

    /// Move the selected subsystem's slider by `magnitude` in `direction`.
    pub fn shift_energy_by(&mut self, direction: i32, magnitude: f64) -> ActionOutcome {
        let amount = f64::from(direction.signum()) * magnitude.abs();
        let target = self.energy.selected();
        self.energy.shift_by(target, amount)
    }

    /// The subsystem that redistribution feeds.
    pub fn selected_subsystem(&self) -> Subsystem {
        self.energy.selected()
    }

    /// Cycle the redistribution target. Returns the new selection.
    pub fn select_next_subsystem(&mut self, direction: i32) -> Subsystem {
        self.energy.select_next(direction)
    }

    /// Remove hull. Returns the remaining hull level.
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        self.energy.drain(Subsystem::Hull, amount)
    }

    /// Lose a life and return to the spawn pose with fresh energy.
    pub fn respawn(&mut self) {
        self.lives -= 1;
        self.facing = normalize_degrees(self.spawn.facing);
        self.motion.set_position(self.spawn.x, self.spawn.y);
        self.motion.stop(self.facing);
        self.energy.reset();
        self.firing_cooldown = 0;
        self.shield_ticks = 0;
        self.thrust_ticks = 0;
        self.jump_cooldown = 0;
        debug!(ship = %self.id, lives = self.lives, "ship respawned");
    }

    /// End-of-tick bookkeeping. A ship with no hull respawns instead of
    /// regenerating. Returns true if it respawned.
    pub fn upkeep(&mut self) -> bool {
        if self.is_destroyed() {
            self.respawn();
            return true;
        }
        self.firing_cooldown = self.firing_cooldown.saturating_sub(1);
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.thrust_ticks = self.thrust_ticks.saturating_sub(1);
        self.jump_cooldown = self.jump_cooldown.saturating_sub(1);
        self.energy.regenerate();
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sw_core::tuning::SLIDER_BASELINE;

    fn ship_at(x: f64, y: f64, facing: f64) -> Ship {
        Ship::new(ShipId(0), SpawnPose::new(x, y, facing), &Tuning::default())
    }

    fn big_plane() -> Bounds {
        Bounds::new(10_000.0, 10_000.0).unwrap()
    }

    #[test]
    fn new_ship_is_ready() {
        let ship = ship_at(256.0, 384.0, 180.0);
        assert_eq!(ship.lives(), 3);
        assert_eq!(ship.facing(), 180.0);
        assert_eq!(ship.motion().speed(), 0.0);
        for sub in Subsystem::ALL {
            assert_eq!(ship.level(sub), 100.0);
        }
        assert!(!ship.is_shielded());
        assert_eq!(ship.id().to_string(), "P1");
    }

    #[test]
    fn rotate_wraps() {
        let mut ship = ship_at(0.0, 0.0, 180.0);
        ship.rotate(190.0);
        assert!((ship.facing() - 10.0).abs() < 1e-9);
        ship.rotate(-200.0);
        assert!((ship.facing() - 170.0).abs() < 1e-9);
    }

    #[test]
    fn thrust_scenario() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        assert_eq!(ship.thrust(0.25), ActionOutcome::Performed);
        assert!((ship.motion().speed() - 0.25).abs() < 1e-12);
        assert!(ship.is_thrusting());

        ship.motion_mut().integrate(&big_plane());
        assert!((ship.motion().x() - 100.25).abs() < 1e-12);
        assert!((ship.motion().y() - 100.0).abs() < 1e-12);
        assert!((ship.level(Subsystem::Engine) - 99.5).abs() < 1e-12);
    }

    #[test]
    fn thrust_needs_engine() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        ship.energy_mut().cell_mut(Subsystem::Engine).set_level(0.4);
        assert_eq!(
            ship.thrust(0.25),
            ActionOutcome::InsufficientEnergy(Subsystem::Engine)
        );
        assert_eq!(ship.motion().speed(), 0.0);
        assert!(!ship.is_thrusting());
    }

    #[test]
    fn facing_and_heading_are_independent() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        let _ = ship.thrust(1.0);
        ship.rotate(90.0);
        assert_eq!(ship.motion().heading(), 0.0);
        assert_eq!(ship.facing(), 90.0);
    }

    #[test]
    fn fire_rejected_with_ammo_one() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        ship.energy_mut().cell_mut(Subsystem::Ammo).set_level(1.0);
        assert!(ship.fire().is_none());
        assert_eq!(ship.level(Subsystem::Ammo), 1.0);
        assert_eq!(ship.firing_cooldown(), 0);
    }

    #[test]
    fn fire_spawns_ahead_of_the_nose() {
        let mut ship = ship_at(100.0, 100.0, 90.0);
        let shot = ship.fire().unwrap();
        assert_eq!(shot.owner(), ShipId(0));
        assert!((shot.motion().x() - 100.0).abs() < 1e-9);
        assert!((shot.motion().y() - 107.0).abs() < 1e-9);
        assert!((shot.motion().speed() - 3.0).abs() < 1e-12);
        assert!((shot.motion().heading() - 90.0).abs() < 1e-9);
        assert_eq!(shot.ttl(), 255);
        assert_eq!(ship.level(Subsystem::Ammo), 95.0);
        assert_eq!(ship.firing_cooldown(), 2);
        assert_eq!(ship.try_fire().unwrap_err(), ActionOutcome::Cooldown);
    }

    #[test]
    fn fire_inherits_ship_velocity() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        ship.motion_mut().set_velocity(1.0, 90.0);
        let shot = ship.fire().unwrap();
        assert!((shot.motion().speed() - 10f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn firing_cooldown_counts_down() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        assert!(ship.fire().is_some());
        ship.upkeep();
        assert!(ship.fire().is_none());
        ship.upkeep();
        assert!(ship.fire().is_some());
    }

    #[test]
    fn shield_lasts_its_duration() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        assert_eq!(ship.raise_shield(), ActionOutcome::Performed);
        assert!(ship.is_shielded());
        assert_eq!(ship.level(Subsystem::Shield), 90.0);
        assert_eq!(ship.raise_shield(), ActionOutcome::Cooldown);
        assert_eq!(ship.level(Subsystem::Shield), 90.0);

        for _ in 0..15 {
            ship.upkeep();
        }
        assert!(!ship.is_shielded());
    }

    #[test]
    fn shield_needs_energy() {
        let mut ship = ship_at(100.0, 100.0, 0.0);
        ship.energy_mut().cell_mut(Subsystem::Shield).set_level(9.0);
        assert_eq!(
            ship.raise_shield(),
            ActionOutcome::InsufficientEnergy(Subsystem::Shield)
        );
        assert!(!ship.is_shielded());
    }

    #[test]
    fn jump_teleports_inside_the_plane() {
        let bounds = Bounds::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut ship = ship_at(100.0, 100.0, 0.0);

        assert_eq!(ship.jump(&mut rng, &bounds), ActionOutcome::Performed);
        let (x, y) = ship.motion().position();
        assert!(bounds.contains(x, y));
        assert_eq!(ship.level(Subsystem::Jump), 25.0);
        assert_eq!(ship.jump(&mut rng, &bounds), ActionOutcome::Cooldown);
    }

    #[test]
    fn jump_needs_a_full_charge() {
        let bounds = Bounds::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut ship = ship_at(100.0, 100.0, 0.0);
        ship.energy_mut().cell_mut(Subsystem::Jump).set_level(74.0);
        assert_eq!(
            ship.jump(&mut rng, &bounds),
            ActionOutcome::InsufficientEnergy(Subsystem::Jump)
        );
        assert_eq!(ship.motion().position(), (100.0, 100.0));
    }

    #[test]
    fn respawn_resets_everything() {
        let mut ship = ship_at(256.0, 384.0, 180.0);
        let _ = ship.thrust(2.0);
        ship.rotate(45.0);
        ship.motion_mut().integrate(&big_plane());
        ship.take_damage(60.0);
        let _ = ship.shift_energy(1);
        let _ = ship.raise_shield();

        ship.respawn();
        assert_eq!(ship.lives(), 2);
        assert_eq!(ship.motion().position(), (256.0, 384.0));
        assert_eq!(ship.motion().speed(), 0.0);
        assert_eq!(ship.facing(), 180.0);
        assert!(!ship.is_shielded());
        for sub in Subsystem::ALL {
            assert_eq!(ship.level(sub), 100.0);
            assert_eq!(ship.energy().slider(sub), SLIDER_BASELINE);
        }
    }

    #[test]
    fn upkeep_respawns_a_dead_ship() {
        let mut ship = ship_at(256.0, 384.0, 180.0);
        assert_eq!(ship.take_damage(150.0), 0.0);
        assert!(ship.is_destroyed());
        assert!(ship.upkeep());
        assert_eq!(ship.lives(), 2);
        assert!(!ship.is_destroyed());
    }

    #[test]
    fn upkeep_regenerates() {
        let mut ship = ship_at(0.0, 0.0, 0.0);
        ship.energy_mut().cell_mut(Subsystem::Ammo).set_level(50.0);
        assert!(!ship.upkeep());
        assert!((ship.level(Subsystem::Ammo) - 50.25).abs() < 1e-12);
    }

    #[test]
    fn shift_energy_by_uses_magnitude() {
        let mut ship = ship_at(0.0, 0.0, 0.0);
        ship.select_next_subsystem(1);
        assert_eq!(ship.selected_subsystem(), Subsystem::Ammo);
        assert_eq!(ship.shift_energy_by(1, 4.0), ActionOutcome::Performed);
        assert_eq!(ship.energy().slider(Subsystem::Ammo), 54.0);
        assert_eq!(ship.energy().slider(Subsystem::Hull), 49.0);
    }
}
