use std::fmt;

use serde::{Deserialize, Serialize};

/// A single control input for one ship on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Turn the nose by this many degrees.
    Rotate(f64),
    /// Push along the facing; negative brakes.
    Thrust(f64),
    /// Fire a projectile.
    Fire,
    /// Raise the shield.
    RaiseShield,
    /// Hyperspace jump.
    Jump,
    /// Move the selected slider up (`+1`) or down (`-1`).
    ShiftEnergy(i32),
    /// Cycle the selected subsystem.
    SelectSubsystem(i32),
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotate(delta) => write!(f, "rotate {delta:+}"),
            Self::Thrust(delta) => write!(f, "thrust {delta:+}"),
            Self::Fire => write!(f, "fire"),
            Self::RaiseShield => write!(f, "shield"),
            Self::Jump => write!(f, "jump"),
            Self::ShiftEnergy(direction) => write!(f, "shift {direction:+}"),
            Self::SelectSubsystem(direction) => write!(f, "select {direction:+}"),
        }
    }
}
