//! Result of a ship action.
//!
//! Rejections are ordinary steady-state answers, not errors: a ship that
//! holds the fire button with an empty magazine simply does not fire.

use crate::subsystem::Subsystem;

/// Whether an action was carried out, and if not, why.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action took effect.
    Performed,
    /// A cooldown has not elapsed yet.
    Cooldown,
    /// The subsystem level is below the action's requirement.
    InsufficientEnergy(Subsystem),
    /// An energy shift could not move any slider.
    Saturated,
    /// The ship or match cannot act right now.
    Inactive,
}

impl ActionOutcome {
    /// Returns true if the action took effect.
    pub fn is_performed(self) -> bool {
        self == Self::Performed
    }
}

impl std::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Performed => write!(f, "performed"),
            Self::Cooldown => write!(f, "cooling down"),
            Self::InsufficientEnergy(sub) => write!(f, "not enough {sub}"),
            Self::Saturated => write!(f, "saturated"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}
