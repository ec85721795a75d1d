//! Killer
//!
//! Each player owns one board number. Hitting your own number (or the
//! numbers beside it) earns lives; reaching the life cap makes you a
//! killer, and from then on your darts on other players' numbers take
//! their lives away. Drop below zero and you are out.
//!
//! ## Turn resolution
//!
//! ```text
//!   snapshot ──process_turn(thrower, darts)──▶ [KillerEvent]
//!   snapshot ──apply_changes(events)─────────▶ snapshot' + newly eliminated
//! ```
//!
//! Resolution never touches the snapshot; the reducer builds a new one.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::board::{adjacent_numbers, SEGMENT_COUNT};
use crate::core::dart::Dart;
use crate::game::events::{HitReason, KillerEvent};
use crate::game::player::PlayerId;

/// Lives at which a player becomes a killer; also the life ceiling.
pub const MAX_LIVES: i32 = 9;

/// A player at or below this many lives is eliminated.
pub const ELIMINATION_LIVES: i32 = -1;

/// Killer rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillerConfig {
    /// Life ceiling and killer threshold
    pub max_lives: i32,
    /// Lives every player starts with
    pub starting_lives: i32,
    /// Lives per ring multiplier for hitting the owned number
    pub own_hit_value: i32,
    /// Lives per ring multiplier for hitting a neighboring number
    pub adjacent_hit_value: i32,
}

impl Default for KillerConfig {
    fn default() -> Self {
        Self {
            max_lives: MAX_LIVES,
            starting_lives: 0,
            own_hit_value: 3,
            adjacent_hit_value: 1,
        }
    }
}

/// Problems with a Killer roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Killer needs an opponent
    #[error("need at least 2 players, got {0}")]
    TooFewPlayers(usize),

    /// Same id twice
    #[error("duplicate player: {0}")]
    DuplicatePlayer(PlayerId),

    /// Two players chose the same number
    #[error("number {0} is already taken")]
    DuplicateNumber(u8),

    /// Number not on the board
    #[error("number {0} is not a board wedge")]
    InvalidNumber(u8),
}

/// One player's Killer state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillerPlayer {
    /// Player identifier
    pub id: PlayerId,
    /// Owned board number (1-20)
    pub number: u8,
    /// Current lives (capped above, never floored)
    pub lives: i32,
    /// Can attack; never reverts
    pub killer: bool,
    /// Out of the game; never reverts
    pub eliminated: bool,
}

impl KillerPlayer {
    /// Fresh player.
    pub fn new(id: PlayerId, number: u8, lives: i32) -> Self {
        Self {
            id,
            number,
            lives,
            killer: false,
            eliminated: false,
        }
    }

    /// Numbers beside the owned number.
    #[inline]
    pub fn adjacent(&self) -> [u8; 2] {
        adjacent_numbers(i32::from(self.number)).unwrap_or_default()
    }

    /// Still in the game.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }
}

/// Outcome of one Killer turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillerTurn {
    /// Life changes in throw order
    pub events: Vec<KillerEvent>,
    /// Players knocked out this turn, in roster order
    pub newly_eliminated: Vec<PlayerId>,
    /// At most one player left
    pub game_over: bool,
    /// Last player standing
    pub winner: Option<PlayerId>,
}

/// Immutable snapshot of a Killer game, players in roster order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillerState {
    players: Vec<KillerPlayer>,
    config: KillerConfig,
}

impl KillerState {
    /// Start a game from `(player, number)` pairs.
    pub fn new(
        roster: impl IntoIterator<Item = (PlayerId, u8)>,
        config: KillerConfig,
    ) -> Result<Self, RosterError> {
        let players = roster
            .into_iter()
            .map(|(id, number)| KillerPlayer::new(id, number, config.starting_lives))
            .collect();
        Self::from_players(players, config)
    }

    /// Rebuild a snapshot from stored player states.
    pub fn from_players(
        players: Vec<KillerPlayer>,
        config: KillerConfig,
    ) -> Result<Self, RosterError> {
        if players.len() < 2 {
            return Err(RosterError::TooFewPlayers(players.len()));
        }

        let mut ids = BTreeSet::new();
        let mut numbers = BTreeSet::new();
        for player in &players {
            if !(1..=SEGMENT_COUNT as u8).contains(&player.number) {
                return Err(RosterError::InvalidNumber(player.number));
            }
            if !ids.insert(&player.id) {
                return Err(RosterError::DuplicatePlayer(player.id.clone()));
            }
            if !numbers.insert(player.number) {
                return Err(RosterError::DuplicateNumber(player.number));
            }
        }

        Ok(Self { players, config })
    }

    /// All players in roster order.
    pub fn players(&self) -> &[KillerPlayer] {
        &self.players
    }

    /// Look up one player.
    pub fn player(&self, id: &PlayerId) -> Option<&KillerPlayer> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Rules in force.
    pub fn config(&self) -> &KillerConfig {
        &self.config
    }

    /// Players not yet eliminated.
    pub fn remaining(&self) -> impl Iterator<Item = &KillerPlayer> {
        self.players.iter().filter(|p| p.is_active())
    }

    fn opponents<'a>(&'a self, thrower: &'a PlayerId) -> impl Iterator<Item = &'a KillerPlayer> {
        self.remaining().filter(move |p| &p.id != thrower)
    }

    /// Resolve a turn's darts into life changes, in throw order.
    ///
    /// Killer status earned by one dart only arms the darts after it.
    pub fn process_turn(&self, thrower: &PlayerId, darts: &[Dart]) -> Vec<KillerEvent> {
        let mut events = Vec::new();

        let Some(me) = self.player(thrower) else {
            warn!("Killer turn for unknown player {}", thrower);
            return events;
        };
        if me.eliminated {
            warn!("Killer turn for eliminated player {}", thrower);
            return events;
        }

        let own = me.number;
        let beside = me.adjacent();
        let mut tally = me.lives;
        let mut is_killer = me.killer;

        for dart in darts {
            if dart.is_miss() || dart.is_bull() {
                continue;
            }

            let hit = dart.number();
            let multiplier = dart.multiplier() as i32;
            let armed = is_killer;

            let gain = if hit == own {
                Some((self.config.own_hit_value * multiplier, HitReason::Own))
            } else if beside.contains(&hit) {
                Some((self.config.adjacent_hit_value * multiplier, HitReason::Adjacent))
            } else {
                None
            };

            if let Some((amount, reason)) = gain {
                events.push(KillerEvent::gain(thrower.clone(), amount, reason));
                tally += amount;
                if tally >= self.config.max_lives && !is_killer {
                    is_killer = true;
                    debug!("{} reaches {} lives mid-turn and becomes a killer", thrower, tally);
                }
            }

            #[cfg(feature = "debug-tracing")]
            tracing::trace!("{} threw {} (tally {}, armed {})", thrower, dart, tally, armed);

            if !armed {
                continue;
            }

            // Direct hits first, then splash on neighbors.
            for victim in self.opponents(thrower).filter(|p| p.number == hit) {
                events.push(KillerEvent::damage(
                    victim.id.clone(),
                    self.config.own_hit_value * multiplier,
                    HitReason::Killed,
                ));
            }
            for victim in self.opponents(thrower).filter(|p| p.adjacent().contains(&hit)) {
                events.push(KillerEvent::damage(
                    victim.id.clone(),
                    self.config.adjacent_hit_value * multiplier,
                    HitReason::AdjKilled,
                ));
            }
        }

        events
    }

    /// Apply a turn's events, returning the new snapshot and the players
    /// eliminated by it.
    ///
    /// Deltas are summed per player before the life cap is applied.
    pub fn apply_changes(&self, events: &[KillerEvent]) -> (KillerState, Vec<PlayerId>) {
        let mut totals: BTreeMap<&PlayerId, i32> = BTreeMap::new();
        for event in events {
            if self.player(&event.player).is_none() {
                warn!("Dropping Killer event for unknown player {}", event.player);
                continue;
            }
            let total = totals.entry(&event.player).or_default();
            *total = total.saturating_add(event.delta);
        }

        let max_lives = self.config.max_lives;
        let mut players = self.players.clone();
        let mut newly_eliminated = Vec::new();

        for player in &mut players {
            if let Some(&delta) = totals.get(&player.id) {
                player.lives = player.lives.saturating_add(delta).min(max_lives);
            }

            if player.eliminated {
                continue;
            }

            if player.lives >= max_lives && !player.killer {
                player.killer = true;
                debug!("{} is now a killer", player.id);
            }

            if player.lives <= ELIMINATION_LIVES {
                player.eliminated = true;
                newly_eliminated.push(player.id.clone());
                debug!("{} eliminated with {} lives", player.id, player.lives);
            }
        }

        let next = KillerState {
            players,
            config: self.config.clone(),
        };
        (next, newly_eliminated)
    }

    /// At most one player remains.
    pub fn is_game_over(&self) -> bool {
        self.remaining().count() <= 1
    }

    /// The sole remaining player, if exactly one is left.
    pub fn winner(&self) -> Option<&PlayerId> {
        let mut remaining = self.remaining();
        match (remaining.next(), remaining.next()) {
            (Some(last), None) => Some(&last.id),
            _ => None,
        }
    }

    /// Resolve and apply one turn.
    pub fn take_turn(&self, thrower: &PlayerId, darts: &[Dart]) -> (KillerState, KillerTurn) {
        let events = self.process_turn(thrower, darts);
        let (next, newly_eliminated) = self.apply_changes(&events);
        let turn = KillerTurn {
            events,
            newly_eliminated,
            game_over: next.is_game_over(),
            winner: next.winner().cloned(),
        };
        (next, turn)
    }
}
