//! Gameplay tuning values.
//!
//! Every constant that shapes the feel of a match is named here. The
//! [`Tuning`] struct mirrors them and defaults to them, so a TOML file can
//! override any subset:
//!
//! ```toml
//! [collision]
//! damage_multiplier = 3.0
//!
//! [gravity]
//! force = 8.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// Motion
/// Speed cap for every body, in units per tick.
pub const MAX_SPEED: f64 = 5.0;

// Ship
/// Radius of a ship's hull.
pub const HULL_RADIUS: f64 = 5.0;
/// Lives a ship starts a match with.
pub const STARTING_LIVES: i32 = 3;
/// Ammo level consumed per shot.
pub const FIRE_COST: f64 = 5.0;
/// Engine level consumed per thrust.
pub const THRUST_COST: f64 = 0.5;
/// Shield level consumed when the shield is raised.
pub const SHIELD_COST: f64 = 10.0;
/// Jump level consumed per jump.
pub const JUMP_COST: f64 = 75.0;
/// Minimum jump level required before a jump is allowed.
pub const JUMP_MIN_LEVEL: f64 = 75.0;
/// Ticks between shots.
pub const FIRING_COOLDOWN: u32 = 2;
/// Ticks a raised shield stays up.
pub const SHIELD_DURATION: u32 = 15;
/// Ticks the thrust flame stays visible.
pub const THRUST_FLASH: u32 = 3;
/// Ticks between jumps.
pub const JUMP_COOLDOWN: u32 = 60;
/// Distance ahead of the ship where projectiles spawn.
pub const MUZZLE_OFFSET: f64 = 7.0;
/// Impulse added to a projectile along the ship's facing.
pub const MUZZLE_IMPULSE: f64 = 3.0;

// Energy
/// Upper bound of every subsystem level.
pub const LEVEL_MAX: f64 = 100.0;
/// Upper bound of every rate slider.
pub const SLIDER_MAX: f64 = 100.0;
/// Slider position that yields exactly the baseline rate.
pub const SLIDER_BASELINE: f64 = 50.0;
/// Slider units moved by one energy shift.
pub const SHIFT_MAGNITUDE: f64 = 1.0;
/// Baseline hull regeneration per tick.
pub const HULL_RATE: f64 = 0.02;
/// Baseline ammo regeneration per tick.
pub const AMMO_RATE: f64 = 0.25;
/// Baseline shield regeneration per tick.
pub const SHIELD_RATE: f64 = 0.2;
/// Baseline engine regeneration per tick.
pub const ENGINE_RATE: f64 = 0.3;
/// Baseline jump-drive regeneration per tick.
pub const JUMP_RATE: f64 = 0.05;

// Collision
/// Extra reach a raised shield adds to ship-vs-ship contact.
pub const SHIELD_BONUS_RADIUS: f64 = 5.0;
/// Projectile hit radius against a shielded ship.
pub const SHIELD_HIT_RADIUS: f64 = 12.0;
/// Projectile hit radius against an unshielded ship.
pub const HULL_HIT_RADIUS: f64 = 5.0;
/// Hull damage per unit of relative speed in a ship-vs-ship collision.
pub const COLLISION_DAMAGE_MULTIPLIER: f64 = 5.0;
/// Projectile speed divisor for recoil on a shielded ship.
pub const SHIELDED_RECOIL_DIVISOR: f64 = 5.0;
/// Projectile speed divisor for recoil on an unshielded ship.
pub const HULL_RECOIL_DIVISOR: f64 = 10.0;
/// Flat hull damage of a projectile hit.
pub const PROJECTILE_DAMAGE: f64 = 25.0;

// Projectile
/// Ticks a projectile flies before detonating on its own.
pub const PROJECTILE_TTL: i32 = 255;
/// Ticks of explosion after impact before removal.
pub const EXPLOSION_TICKS: i32 = 5;

// Gravity
/// Kill radius of the gravity well.
pub const WELL_RADIUS: f64 = 15.0;
/// Base attraction of the gravity well.
pub const WELL_FORCE: f64 = 5.5;

/// Kinematics tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Speed cap for every body.
    pub max_speed: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
        }
    }
}

/// Ship action costs, cooldowns, and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Radius of a ship's hull.
    pub hull_radius: f64,
    /// Lives at match start.
    pub starting_lives: i32,
    /// Ammo per shot.
    pub fire_cost: f64,
    /// Engine per thrust.
    pub thrust_cost: f64,
    /// Shield per raise.
    pub shield_cost: f64,
    /// Jump level per jump.
    pub jump_cost: f64,
    /// Minimum jump level to jump.
    pub jump_min_level: f64,
    /// Ticks between shots.
    pub firing_cooldown: u32,
    /// Ticks a shield stays up.
    pub shield_duration: u32,
    /// Ticks the thrust flame is visible.
    pub thrust_flash: u32,
    /// Ticks between jumps.
    pub jump_cooldown: u32,
    /// Projectile spawn distance ahead of the ship.
    pub muzzle_offset: f64,
    /// Impulse added to fired projectiles.
    pub muzzle_impulse: f64,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            hull_radius: HULL_RADIUS,
            starting_lives: STARTING_LIVES,
            fire_cost: FIRE_COST,
            thrust_cost: THRUST_COST,
            shield_cost: SHIELD_COST,
            jump_cost: JUMP_COST,
            jump_min_level: JUMP_MIN_LEVEL,
            firing_cooldown: FIRING_COOLDOWN,
            shield_duration: SHIELD_DURATION,
            thrust_flash: THRUST_FLASH,
            jump_cooldown: JUMP_COOLDOWN,
            muzzle_offset: MUZZLE_OFFSET,
            muzzle_impulse: MUZZLE_IMPULSE,
        }
    }
}

/// Baseline regeneration rates and the redistribution step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyTuning {
    /// Hull regeneration per tick at the baseline slider.
    pub hull_rate: f64,
    /// Ammo regeneration per tick at the baseline slider.
    pub ammo_rate: f64,
    /// Shield regeneration per tick at the baseline slider.
    pub shield_rate: f64,
    /// Engine regeneration per tick at the baseline slider.
    pub engine_rate: f64,
    /// Jump regeneration per tick at the baseline slider.
    pub jump_rate: f64,
    /// Slider units moved by one shift.
    pub shift_magnitude: f64,
}

impl Default for EnergyTuning {
    fn default() -> Self {
        Self {
            hull_rate: HULL_RATE,
            ammo_rate: AMMO_RATE,
            shield_rate: SHIELD_RATE,
            engine_rate: ENGINE_RATE,
            jump_rate: JUMP_RATE,
            shift_magnitude: SHIFT_MAGNITUDE,
        }
    }
}

/// Contact radii, damage, and recoil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    /// Extra ship-vs-ship reach per raised shield.
    pub shield_bonus_radius: f64,
    /// Projectile hit radius against a raised shield.
    pub shield_hit_radius: f64,
    /// Projectile hit radius against a bare hull.
    pub hull_hit_radius: f64,
    /// Hull damage per unit of relative speed.
    pub damage_multiplier: f64,
    /// Recoil divisor against a raised shield.
    pub shielded_recoil_divisor: f64,
    /// Recoil divisor against a bare hull.
    pub hull_recoil_divisor: f64,
    /// Flat projectile damage.
    pub projectile_damage: f64,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            shield_bonus_radius: SHIELD_BONUS_RADIUS,
            shield_hit_radius: SHIELD_HIT_RADIUS,
            hull_hit_radius: HULL_HIT_RADIUS,
            damage_multiplier: COLLISION_DAMAGE_MULTIPLIER,
            shielded_recoil_divisor: SHIELDED_RECOIL_DIVISOR,
            hull_recoil_divisor: HULL_RECOIL_DIVISOR,
            projectile_damage: PROJECTILE_DAMAGE,
        }
    }
}

/// Projectile lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Starting time-to-live.
    pub ttl: i32,
    /// Explosion ticks after impact.
    pub explosion_ticks: i32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            ttl: PROJECTILE_TTL,
            explosion_ticks: EXPLOSION_TICKS,
        }
    }
}

/// Gravity well shape and strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityTuning {
    /// Kill radius.
    pub radius: f64,
    /// Base attraction.
    pub force: f64,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            radius: WELL_RADIUS,
            force: WELL_FORCE,
        }
    }
}

/// All tuning groups. Missing keys in a TOML override keep their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Kinematics.
    pub motion: MotionTuning,
    /// Ship actions.
    pub ship: ShipTuning,
    /// Energy regeneration and redistribution.
    pub energy: EnergyTuning,
    /// Collision outcomes.
    pub collision: CollisionTuning,
    /// Projectile lifetime.
    pub projectile: ProjectileTuning,
    /// Gravity well.
    pub gravity: GravityTuning,
}

impl Tuning {
    /// Parse a (possibly partial) TOML override and validate the result.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let tuning: Self = toml::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        positive("motion.max_speed", self.motion.max_speed)?;

        non_negative("ship.hull_radius", self.ship.hull_radius)?;
        level_cost("ship.fire_cost", self.ship.fire_cost)?;
        level_cost("ship.thrust_cost", self.ship.thrust_cost)?;
        level_cost("ship.shield_cost", self.ship.shield_cost)?;
        level_cost("ship.jump_cost", self.ship.jump_cost)?;
        level_cost("ship.jump_min_level", self.ship.jump_min_level)?;
        non_negative("ship.muzzle_offset", self.ship.muzzle_offset)?;
        non_negative("ship.muzzle_impulse", self.ship.muzzle_impulse)?;
        if self.ship.starting_lives < 0 {
            return Err(invalid("ship.starting_lives", "must not be negative"));
        }

        non_negative("energy.hull_rate", self.energy.hull_rate)?;
        non_negative("energy.ammo_rate", self.energy.ammo_rate)?;
        non_negative("energy.shield_rate", self.energy.shield_rate)?;
        non_negative("energy.engine_rate", self.energy.engine_rate)?;
        non_negative("energy.jump_rate", self.energy.jump_rate)?;
        positive("energy.shift_magnitude", self.energy.shift_magnitude)?;

        non_negative(
            "collision.shield_bonus_radius",
            self.collision.shield_bonus_radius,
        )?;
        non_negative("collision.shield_hit_radius", self.collision.shield_hit_radius)?;
        non_negative("collision.hull_hit_radius", self.collision.hull_hit_radius)?;
        non_negative("collision.damage_multiplier", self.collision.damage_multiplier)?;
        positive(
            "collision.shielded_recoil_divisor",
            self.collision.shielded_recoil_divisor,
        )?;
        positive(
            "collision.hull_recoil_divisor",
            self.collision.hull_recoil_divisor,
        )?;
        non_negative("collision.projectile_damage", self.collision.projectile_damage)?;

        if self.projectile.ttl <= 0 {
            return Err(invalid("projectile.ttl", "must be positive"));
        }
        if self.projectile.explosion_ticks < 0 {
            return Err(invalid("projectile.explosion_ticks", "must not be negative"));
        }

        non_negative("gravity.radius", self.gravity.radius)?;
        finite("gravity.force", self.gravity.force)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidTuning {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f64) -> CoreResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, format!("{value} must not be negative")));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> CoreResult<()> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(invalid(field, format!("{value} must be positive")));
    }
    Ok(())
}

fn level_cost(field: &'static str, value: f64) -> CoreResult<()> {
    non_negative(field, value)?;
    if value > LEVEL_MAX {
        return Err(invalid(field, format!("{value} exceeds {LEVEL_MAX}")));
    }
    Ok(())
}
