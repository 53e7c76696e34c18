//! Shipboard energy for Spacewar.
//!
//! Each ship runs five subsystems (hull, ammo, shield, engine, jump drive).
//! A subsystem has a consumable *level* and a *rate slider* that controls how
//! fast the level regenerates. Sliders are a shared budget: pushing one up
//! draws equally from the others, within their own bounds.

pub mod cell;
pub mod energy;
pub mod outcome;
pub mod subsystem;

pub use cell::EnergyCell;
pub use energy::{EnergySystem, ShiftPlan};
pub use outcome::ActionOutcome;
pub use subsystem::Subsystem;
