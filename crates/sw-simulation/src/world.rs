//! The match.
//!
//! [`World`] owns every body plus the clock, the RNG and the event log. One
//! call to [`World::tick`] runs, in order:
//!
//! 1. For each non-well body in insertion order: its collision checks against
//!    every ship and well, then one step of movement. Later bodies therefore
//!    see earlier bodies' new positions. A pair of ships is checked once, by
//!    the earlier of the two.
//! 2. Gravity on every moving body.
//! 3. Ship upkeep: respawn on hull failure, otherwise cooldowns and
//!    regeneration.
//! 4. Removal of expired projectiles.
//! 5. The end-of-match check. Once decided, further ticks and intents do
//!    nothing, but every query keeps working.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use sw_core::{Bounds, Tuning};
use sw_mechanics::ActionOutcome;
use tracing::{info, trace};

use crate::body::{Body, pair_mut};
use crate::clock::SimClock;
use crate::collision::{CollisionResolver, Contact};
use crate::config::MatchConfig;
use crate::error::{SimError, SimResult};
use crate::event::{EventLog, MatchEvent, MatchEventKind};
use crate::gravity::GravityWell;
use crate::intent::Intent;
use crate::projectile::Projectile;
use crate::ship::{Ship, ShipId};
use crate::snapshot::{ProjectileSnapshot, ShipSnapshot, WellSnapshot, WorldSnapshot};

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Exactly one ship still has lives.
    Winner(ShipId),
    /// Every ship ran out of lives on the same tick.
    Tie,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(ship) => write!(f, "{ship} wins"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// A running match: bodies, clock, RNG and history.
#[derive(Debug)]
pub struct World {
    config: MatchConfig,
    bodies: Vec<Body>,
    clock: SimClock,
    rng: StdRng,
    events: EventLog,
    outcome: Option<MatchOutcome>,
}

impl World {
    /// Validate the config and set up a fresh match.
    pub fn new(config: MatchConfig) -> SimResult<Self> {
        validate(&config)?;
        Ok(Self::assemble(config))
    }

    fn assemble(config: MatchConfig) -> Self {
        let tuning = config.tuning;
        let mut bodies = Vec::with_capacity(config.spawns.len() + config.wells.len());
        for (index, spawn) in (0..=u8::MAX).zip(&config.spawns) {
            bodies.push(Body::Ship(Ship::new(ShipId(index), *spawn, &tuning)));
        }
        for &(x, y) in &config.wells {
            bodies.push(Body::Well(GravityWell::new(x, y, &tuning.gravity)));
        }

        info!(
            ships = config.spawns.len(),
            wells = config.wells.len(),
            seed = config.seed,
            "match started"
        );

        Self {
            clock: SimClock::new(config.ticks_per_second),
            rng: StdRng::seed_from_u64(config.seed),
            events: EventLog::new(config.max_events),
            outcome: None,
            bodies,
            config,
        }
    }

    /// Throw the current match away and start again from the same config.
    pub fn reset(&mut self) {
        *self = Self::assemble(self.config.clone());
    }

    /// The config the match was built from.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The plane every body wraps around.
    pub fn bounds(&self) -> &Bounds {
        &self.config.bounds
    }

    /// Gameplay constants in effect.
    pub fn tuning(&self) -> &Tuning {
        &self.config.tuning
    }

    /// The tick clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Ticks run so far.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Everything recorded so far, up to the log limit.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The result, once the match is decided.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Returns true once the match has an outcome.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// All bodies in update order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Ships in id order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.bodies.iter().filter_map(Body::as_ship)
    }

    /// Live and exploding projectiles, oldest first.
    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.bodies.iter().filter_map(Body::as_projectile)
    }

    /// Gravity wells in config order.
    pub fn wells(&self) -> impl Iterator<Item = &GravityWell> {
        self.bodies.iter().filter_map(Body::as_well)
    }

    /// Look up a ship by id.
    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships().find(|ship| ship.id() == id)
    }

    /// Direct access to a ship. Projectiles returned by [`Ship::fire`] on
    /// this reference are not added to the world; use [`World::apply`].
    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        find_ship_mut(&mut self.bodies, id)
    }

    /// Route a control input to a ship.
    pub fn apply(&mut self, id: ShipId, intent: Intent) -> SimResult<ActionOutcome> {
        let bounds = self.config.bounds;
        let ship = find_ship_mut(&mut self.bodies, id).ok_or(SimError::ShipNotFound(id))?;
        if self.outcome.is_some() {
            return Ok(ActionOutcome::Inactive);
        }

        let mut launched = None;
        let outcome = match intent {
            Intent::Rotate(delta) => {
                ship.rotate(delta);
                ActionOutcome::Performed
            }
            Intent::Thrust(delta) => ship.thrust(delta),
            Intent::Fire => match ship.try_fire() {
                Ok(projectile) => {
                    launched = Some(projectile);
                    ActionOutcome::Performed
                }
                Err(outcome) => outcome,
            },
            Intent::RaiseShield => ship.raise_shield(),
            Intent::Jump => ship.jump(&mut self.rng, &bounds),
            Intent::ShiftEnergy(direction) => ship.shift_energy(direction),
            Intent::SelectSubsystem(direction) => {
                ship.select_next_subsystem(direction);
                ActionOutcome::Performed
            }
        };
        trace!(ship = %id, %intent, %outcome, "intent applied");

        let tick = self.clock.tick();
        if let Some(mut projectile) = launched {
            projectile.advance(&bounds);
            self.bodies.push(Body::Projectile(projectile));
            self.events.push(MatchEvent::new(
                tick,
                MatchEventKind::ShotFired { ship: id },
                format!("{id} fired"),
            ));
        }
        if matches!(intent, Intent::Jump) && outcome.is_performed() {
            self.events.push(MatchEvent::new(
                tick,
                MatchEventKind::Jumped { ship: id },
                format!("{id} jumped to hyperspace"),
            ));
        }
        Ok(outcome)
    }

    /// Advance the match by one tick. Does nothing once the match is over.
    pub fn tick(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let tick = self.clock.advance();
        let bounds = self.config.bounds;
        let resolver = CollisionResolver::new(bounds, self.config.tuning.collision);

        let targets: Vec<usize> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.is_target())
            .map(|(index, _)| index)
            .collect();

        for i in 0..self.bodies.len() {
            if matches!(self.bodies[i], Body::Well(_)) {
                continue;
            }
            let is_ship = self.bodies[i].as_ship().is_some();
            for &j in &targets {
                // An earlier ship already resolved this pair during its pass.
                if i == j || (is_ship && j < i && self.bodies[j].as_ship().is_some()) {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if let Some(contact) = resolver.resolve(a, b) {
                    record_contact(&mut self.events, tick, contact);
                }
            }
            self.bodies[i].advance(&bounds);
        }

        let wells: Vec<GravityWell> = self.wells().copied().collect();
        for well in &wells {
            for body in &mut self.bodies {
                if let Some(motion) = body.motion_mut() {
                    well.pull(motion);
                }
            }
        }

        for body in &mut self.bodies {
            if let Body::Ship(ship) = body
                && ship.upkeep()
            {
                let (id, lives) = (ship.id(), ship.lives());
                info!(ship = %id, lives, "ship destroyed");
                self.events.push(MatchEvent::new(
                    tick,
                    MatchEventKind::ShipDestroyed { ship: id, lives },
                    format!("{id} was destroyed"),
                ));
            }
        }

        self.bodies
            .retain(|body| !matches!(body, Body::Projectile(p) if p.is_expired()));

        if let Some(outcome) = self.decide() {
            self.outcome = Some(outcome);
            info!(tick, %outcome, "match over");
            self.events.push(MatchEvent::new(
                tick,
                MatchEventKind::MatchOver { outcome },
                outcome.to_string(),
            ));
        }
    }

    /// Tick until `ticks` have run or the match ends. Returns the ticks run.
    pub fn run(&mut self, ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < ticks && !self.is_over() {
            self.tick();
            ran += 1;
        }
        ran
    }

    fn decide(&self) -> Option<MatchOutcome> {
        let mut eliminated = 0;
        let mut survivors = Vec::new();
        for ship in self.ships() {
            if ship.is_eliminated() {
                eliminated += 1;
            } else {
                survivors.push(ship.id());
            }
        }
        if eliminated == 0 {
            return None;
        }
        match survivors.as_slice() {
            [] => Some(MatchOutcome::Tie),
            [winner] => Some(MatchOutcome::Winner(*winner)),
            _ => None,
        }
    }

    /// A serializable copy of the visible state.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.clock.tick(),
            outcome: self.outcome,
            ships: self.ships().map(ShipSnapshot::from).collect(),
            projectiles: self.projectiles().map(ProjectileSnapshot::from).collect(),
            wells: self
                .wells()
                .map(|well| {
                    let (x, y) = well.position();
                    WellSnapshot {
                        x,
                        y,
                        radius: well.radius(),
                    }
                })
                .collect(),
        }
    }
}

fn find_ship_mut(bodies: &mut [Body], id: ShipId) -> Option<&mut Ship> {
    bodies
        .iter_mut()
        .filter_map(Body::as_ship_mut)
        .find(|ship| ship.id() == id)
}

fn record_contact(events: &mut EventLog, tick: u64, contact: Contact) {
    let (kind, description) = match contact {
        Contact::Ships {
            first,
            second,
            force,
        } => (
            MatchEventKind::ShipsCollided {
                first,
                second,
                force,
            },
            format!("{first} rammed {second} (force {force:.2})"),
        ),
        Contact::Hit {
            ship,
            owner,
            shielded,
        } => (
            MatchEventKind::ProjectileHit {
                ship,
                owner,
                shielded,
            },
            if shielded {
                format!("{owner} hit {ship}'s shield")
            } else {
                format!("{owner} hit {ship}")
            },
        ),
        Contact::Swallowed { owner } => (
            MatchEventKind::ProjectileSwallowed { owner },
            format!("{owner}'s shot fell into the well"),
        ),
        Contact::Crushed { ship, lives } => {
            info!(ship = %ship, lives, "ship crushed by gravity well");
            (
                MatchEventKind::ShipDestroyed { ship, lives },
                format!("{ship} was crushed by the gravity well"),
            )
        }
    };
    events.push(MatchEvent::new(tick, kind, description));
}

fn validate(config: &MatchConfig) -> SimResult<()> {
    config.tuning.validate()?;
    let bounds = Bounds::new(config.bounds.width, config.bounds.height)?;

    if config.spawns.is_empty() {
        return Err(SimError::InvalidConfig("a match needs at least one ship".into()));
    }
    if config.spawns.len() > usize::from(u8::MAX) + 1 {
        return Err(SimError::InvalidConfig(format!(
            "{} ships is more than a match supports",
            config.spawns.len()
        )));
    }
    for (index, spawn) in config.spawns.iter().enumerate() {
        if !bounds.contains(spawn.x, spawn.y) || !spawn.facing.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "spawn {} at ({}, {}) is outside the plane",
                index + 1,
                spawn.x,
                spawn.y
            )));
        }
    }
    for &(x, y) in &config.wells {
        if !bounds.contains(x, y) {
            return Err(SimError::InvalidConfig(format!(
                "gravity well at ({x}, {y}) is outside the plane"
            )));
        }
    }
    Ok(())
}
