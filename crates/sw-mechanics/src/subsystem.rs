//! The five shipboard subsystems.

use serde::{Deserialize, Serialize};
use sw_core::EnergyTuning;

/// A shipboard subsystem with its own energy level and rate slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    /// Structural integrity. Reaching zero destroys the ship.
    Hull,
    /// Projectile reserve.
    Ammo,
    /// Deflector charge.
    Shield,
    /// Thruster fuel.
    Engine,
    /// Jump-drive charge.
    Jump,
}

impl Subsystem {
    /// All subsystems in selection order.
    pub const ALL: [Subsystem; 5] = [
        Subsystem::Hull,
        Subsystem::Ammo,
        Subsystem::Shield,
        Subsystem::Engine,
        Subsystem::Jump,
    ];

    /// Position in [`Subsystem::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Hull => 0,
            Self::Ammo => 1,
            Self::Shield => 2,
            Self::Engine => 3,
            Self::Jump => 4,
        }
    }

    /// Step through the selection order, wrapping at both ends.
    pub fn cycle(self, direction: i32) -> Self {
        let len = Self::ALL.len() as i64;
        let next = (self.index() as i64 + i64::from(direction)).rem_euclid(len);
        Self::ALL[next as usize]
    }

    /// Regeneration per tick at the baseline slider position.
    pub fn baseline_rate(self, tuning: &EnergyTuning) -> f64 {
        match self {
            Self::Hull => tuning.hull_rate,
            Self::Ammo => tuning.ammo_rate,
            Self::Shield => tuning.shield_rate,
            Self::Engine => tuning.engine_rate,
            Self::Jump => tuning.jump_rate,
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hull => write!(f, "hull"),
            Self::Ammo => write!(f, "ammo"),
            Self::Shield => write!(f, "shield"),
            Self::Engine => write!(f, "engine"),
            Self::Jump => write!(f, "jump"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_all_order() {
        for (i, sub) in Subsystem::ALL.iter().enumerate() {
            assert_eq!(sub.index(), i);
        }
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(Subsystem::Jump.cycle(1), Subsystem::Hull);
        assert_eq!(Subsystem::Hull.cycle(-1), Subsystem::Jump);
        assert_eq!(Subsystem::Ammo.cycle(2), Subsystem::Engine);
        assert_eq!(Subsystem::Shield.cycle(5), Subsystem::Shield);
    }

    #[test]
    fn baseline_rates_come_from_tuning() {
        let tuning = EnergyTuning {
            ammo_rate: 1.5,
            ..EnergyTuning::default()
        };
        assert_eq!(Subsystem::Ammo.baseline_rate(&tuning), 1.5);
        assert_eq!(
            Subsystem::Hull.baseline_rate(&tuning),
            sw_core::tuning::HULL_RATE
        );
    }
}
