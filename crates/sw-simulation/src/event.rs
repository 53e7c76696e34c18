//! Match history.
//!
//! [`EventLog`] is a bounded queue: once full, each new event pushes the
//! oldest one out.

use std::collections::VecDeque;

use crate::ship::ShipId;
use crate::world::MatchOutcome;

/// What kind of match event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEventKind {
    /// A ship fired a projectile.
    ShotFired {
        /// The firing ship.
        ship: ShipId,
    },
    /// A projectile struck a ship.
    ProjectileHit {
        /// The ship that was hit.
        ship: ShipId,
        /// The ship that fired.
        owner: ShipId,
        /// Whether the shield absorbed the hit.
        shielded: bool,
    },
    /// A projectile detonated inside a gravity well.
    ProjectileSwallowed {
        /// The ship that fired.
        owner: ShipId,
    },
    /// Two ships collided.
    ShipsCollided {
        /// The ship whose check found the contact.
        first: ShipId,
        /// The other ship.
        second: ShipId,
        /// Magnitude of the relative velocity.
        force: f64,
    },
    /// A ship hyperspace-jumped.
    Jumped {
        /// The jumping ship.
        ship: ShipId,
    },
    /// A ship lost a life, through hull failure or the gravity well.
    ShipDestroyed {
        /// The destroyed ship.
        ship: ShipId,
        /// Lives left after the loss. Negative means eliminated.
        lives: i32,
    },
    /// The match ended.
    MatchOver {
        /// Who won.
        outcome: MatchOutcome,
    },
}

impl MatchEventKind {
    /// Check whether a given ship is involved in this event.
    pub fn involves(&self, id: ShipId) -> bool {
        match self {
            Self::ShotFired { ship } | Self::Jumped { ship } | Self::ShipDestroyed { ship, .. } => {
                *ship == id
            }
            Self::ProjectileHit { ship, owner, .. } => *ship == id || *owner == id,
            Self::ProjectileSwallowed { owner } => *owner == id,
            Self::ShipsCollided { first, second, .. } => *first == id || *second == id,
            Self::MatchOver { outcome } => match outcome {
                MatchOutcome::Winner(winner) => *winner == id,
                MatchOutcome::Tie => true,
            },
        }
    }
}

/// Something that happened during a match.
#[derive(Debug, Clone)]
pub struct MatchEvent {
    /// Tick the event happened on.
    pub tick: u64,
    /// What happened.
    pub kind: MatchEventKind,
    /// One-line text for logs and reports.
    pub description: String,
}

impl MatchEvent {
    /// An event with its log text.
    pub fn new(tick: u64, kind: MatchEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            description: description.into(),
        }
    }
}

/// The most recent events of a match, oldest first.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    recent: VecDeque<MatchEvent>,
    limit: Option<usize>,
}

impl EventLog {
    /// A log keeping at most `max_events` entries. Zero keeps everything.
    pub fn new(max_events: usize) -> Self {
        Self {
            recent: VecDeque::new(),
            limit: (max_events > 0).then_some(max_events),
        }
    }

    /// Record an event, evicting the oldest one when full.
    pub fn push(&mut self, event: MatchEvent) {
        if let Some(limit) = self.limit
            && self.recent.len() == limit
        {
            self.recent.pop_front();
        }
        self.recent.push_back(event);
    }

    /// Events oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MatchEvent> {
        self.recent.iter()
    }

    /// Events that name `id` in any role.
    pub fn involving(&self, id: ShipId) -> impl Iterator<Item = &MatchEvent> {
        self.recent.iter().filter(move |e| e.kind.involves(id))
    }

    /// Number of events whose kind matches `predicate`.
    pub fn count(&self, predicate: impl Fn(&MatchEventKind) -> bool) -> usize {
        self.recent.iter().filter(|e| predicate(&e.kind)).count()
    }

    /// Number of events kept.
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}
