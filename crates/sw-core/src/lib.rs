//! Core types for Spacewar: plane geometry, kinematics, and tuning.
//!
//! Every moving thing in a match is driven by a [`Motion`]: a position on a
//! toroidal plane plus a polar velocity. Forces are composed in Cartesian
//! space and converted back, so thrust, gravity, recoil, and collisions all
//! share one primitive. Gameplay constants live in [`tuning`] so they can be
//! adjusted without touching the algorithms that use them.

/// Error types used throughout the crate.
pub mod error;
/// Plane bounds, wraparound, and heading helpers.
pub mod geometry;
/// The kinematic primitive shared by every body.
pub mod motion;
/// Named tuning constants and the runtime [`tuning::Tuning`] overrides.
pub mod tuning;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export geometry types and helpers.
pub use geometry::{Bounds, distance, heading_of, normalize_degrees, wrap_axis};
/// Re-export the kinematic primitive.
pub use motion::Motion;
/// Re-export tuning groups.
pub use tuning::{
    CollisionTuning, EnergyTuning, GravityTuning, MotionTuning, ProjectileTuning, ShipTuning,
    Tuning,
};
