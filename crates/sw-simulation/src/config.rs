use serde::{Deserialize, Serialize};
use sw_core::{Bounds, Tuning};

use crate::clock::DEFAULT_TICKS_PER_SECOND;

/// Where and which way a ship (re)appears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPose {
    /// Spawn x coordinate.
    pub x: f64,
    /// Spawn y coordinate.
    pub y: f64,
    /// Facing in degrees.
    pub facing: f64,
}

impl SpawnPose {
    /// Create a spawn pose.
    pub fn new(x: f64, y: f64, facing: f64) -> Self {
        Self { x, y, facing }
    }
}

/// Configuration for a match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// RNG seed for deterministic jumps.
    pub seed: u64,
    /// Plane dimensions.
    pub bounds: Bounds,
    /// One entry per ship, in ship-id order.
    pub spawns: Vec<SpawnPose>,
    /// Gravity well centers. Radius and force come from the tuning.
    pub wells: Vec<(f64, f64)>,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Target simulation rate.
    pub ticks_per_second: u32,
    /// Every tuning value.
    pub tuning: Tuning,
}

impl Default for MatchConfig {
    fn default() -> Self {
        let bounds = Bounds::default();
        Self {
            seed: 42,
            bounds,
            spawns: default_spawns(&bounds),
            wells: vec![bounds.center()],
            max_events: 0,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            tuning: Tuning::default(),
        }
    }
}

impl MatchConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the plane size. Spawns and wells move to the default layout for
    /// the new plane; call [`MatchConfig::with_spawns`] afterwards to override.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self.spawns = default_spawns(&bounds);
        self.wells = vec![bounds.center()];
        self
    }

    /// Set the number of spare lives each ship starts with.
    pub fn with_lives(mut self, lives: i32) -> Self {
        self.tuning.ship.starting_lives = lives;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Replace every tuning value, starting lives included.
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Replace the ship spawn poses.
    pub fn with_spawns(mut self, spawns: Vec<SpawnPose>) -> Self {
        self.spawns = spawns;
        self
    }

    /// Replace the gravity well centers. An empty list disables gravity.
    pub fn with_wells(mut self, wells: Vec<(f64, f64)>) -> Self {
        self.wells = wells;
        self
    }
}

/// Two ships facing away from each other on either side of the center.
fn default_spawns(bounds: &Bounds) -> Vec<SpawnPose> {
    let (cx, cy) = bounds.center();
    let offset = bounds.width / 4.0;
    vec![
        SpawnPose::new(cx - offset, cy, 180.0),
        SpawnPose::new(cx + offset, cy, 0.0),
    ]
}
