//! Match simulation for Spacewar.
//!
//! A [`World`] holds ships, projectiles and gravity wells as one closed
//! [`Body`] type and advances them on a fixed timestep. Controls arrive as
//! [`Intent`]s; everything that happens is reported through the
//! [`EventLog`] and `tracing`.

/// The closed set of world bodies.
pub mod body;
/// Simulation clock for tracking ticks.
pub mod clock;
/// Pairwise contact rules.
pub mod collision;
/// Match configuration and spawn layout.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Match event types and the event log.
pub mod event;
/// Gravity wells.
pub mod gravity;
/// Control inputs.
pub mod intent;
/// Projectiles and their lifecycle.
pub mod projectile;
/// Player ships.
pub mod ship;
/// Serializable views of the world.
pub mod snapshot;
/// The match orchestrator.
pub mod world;

pub use body::Body;
pub use clock::SimClock;
pub use collision::{CollisionResolver, Contact};
pub use config::{MatchConfig, SpawnPose};
pub use error::{SimError, SimResult};
pub use event::{EventLog, MatchEvent, MatchEventKind};
pub use gravity::GravityWell;
pub use intent::Intent;
pub use projectile::{Projectile, ProjectilePhase};
pub use ship::{Ship, ShipId};
pub use snapshot::WorldSnapshot;
pub use world::{MatchOutcome, World};
