//! Around the Clock
//!
//! Players work through 1 to 10 in order, then the bull. A double or
//! triple on the current target skips ahead by the ring multiplier, but
//! never past the bull. Hitting the bull (either ring) finishes. A turn
//! whose last dart scores a hit earns another turn, unless that hit
//! finished the game.
//!
//! ```text
//!   1 ─▶ 2 ─▶ ... ─▶ 10 ─▶ Bull(11) ─▶ Finished(12)
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::dart::Dart;
use crate::game::contract::DARTS_PER_TURN;
use crate::game::player::PlayerId;

/// Every player starts here.
pub const START_POSITION: u8 = 1;

/// Last numbered target.
pub const LAST_NUMBER_POSITION: u8 = 10;

/// Position meaning "aim at the bull".
pub const BULL_POSITION: u8 = 11;

/// Position meaning "done".
pub const FINISHED_POSITION: u8 = 12;

/// Default turn limit per player.
pub const DEFAULT_MAX_TURNS: u32 = 20;

/// Clock rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Visits each player gets before the game is decided on position
    pub max_turns: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// Result of one Clock turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockTurn {
    /// Position after the turn
    pub end_position: u8,
    /// Whether the last dart looked at was a hit
    pub last_dart_hit: bool,
    /// Reached the finished position
    pub finished: bool,
    /// Player throws again
    pub extra_turn: bool,
}

/// Advance a player through one turn of up to three darts.
///
/// Darts after the third, or after the finishing dart, are ignored.
pub fn process_turn(darts: &[Dart], start_position: u8) -> ClockTurn {
    if start_position >= FINISHED_POSITION {
        return ClockTurn {
            end_position: FINISHED_POSITION,
            finished: true,
            ..ClockTurn::default()
        };
    }

    let mut position = start_position;
    let mut last_dart_hit = false;

    for dart in darts.iter().take(DARTS_PER_TURN) {
        if position == FINISHED_POSITION {
            break;
        }

        let hit = if position <= LAST_NUMBER_POSITION {
            let hit = position >= START_POSITION && dart.number() == position;
            if hit {
                position = (position + dart.multiplier() as u8).min(BULL_POSITION);
            }
            hit
        } else {
            let hit = dart.is_bull();
            if hit {
                position = FINISHED_POSITION;
            }
            hit
        };

        #[cfg(feature = "debug-tracing")]
        tracing::trace!("clock dart {} hit={} -> {}", dart, hit, position);

        last_dart_hit = hit;
    }

    let finished = position == FINISHED_POSITION;
    ClockTurn {
        end_position: position,
        last_dart_hit,
        finished,
        extra_turn: last_dart_hit && !finished,
    }
}

/// Target shown while a turn is still being entered.
#[inline]
pub fn preview_target(darts: &[Dart], start_position: u8) -> u8 {
    process_turn(darts, start_position).end_position
}

/// Percentage of the way round the board.
///
/// Eleven steps lead from the start to the finished position.
pub fn progress(position: u8, finished: bool) -> f64 {
    if finished {
        return 100.0;
    }
    let steps = f64::from(FINISHED_POSITION - START_POSITION);
    f64::from(position.saturating_sub(START_POSITION)) / steps * 100.0
}

/// Who won, and whether it is shared.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockResult {
    /// Winning players in roster order
    pub winners: Vec<PlayerId>,
    /// More than one winner
    pub is_tie: bool,
}

/// Decide the game.
///
/// The first player to finish wins outright. If nobody finished, the
/// furthest position wins and ties are shared. Players missing from
/// `positions` count as being on the start position.
pub fn determine_winner(
    players: &[PlayerId],
    positions: &BTreeMap<PlayerId, u8>,
    finish_order: &[PlayerId],
) -> ClockResult {
    if let Some(first) = finish_order.first() {
        return ClockResult {
            winners: vec![first.clone()],
            is_tie: false,
        };
    }

    let position_of = |id: &PlayerId| positions.get(id).copied().unwrap_or(START_POSITION);

    let Some(best) = players.iter().map(position_of).max() else {
        return ClockResult::default();
    };

    let winners: Vec<PlayerId> = players
        .iter()
        .filter(|id| position_of(*id) == best)
        .cloned()
        .collect();
    let is_tie = winners.len() > 1;
    ClockResult { winners, is_tie }
}

/// Problems starting or continuing a Clock game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// Nobody to play
    #[error("roster is empty")]
    EmptyRoster,

    /// Same id twice
    #[error("duplicate player: {0}")]
    DuplicatePlayer(PlayerId),

    /// Turn submitted after the game was decided
    #[error("game is already over")]
    GameOver,
}

/// One player's Clock progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockPlayer {
    /// Player identifier
    pub id: PlayerId,
    /// Current target (1-11) or finished (12)
    pub position: u8,
    /// Visits used, extra turns excluded
    pub turns_taken: u32,
    /// 1-based finishing place
    pub finish_rank: Option<usize>,
}

impl ClockPlayer {
    fn new(id: PlayerId) -> Self {
        Self {
            id,
            position: START_POSITION,
            turns_taken: 0,
            finish_rank: None,
        }
    }

    /// Reached the finished position.
    pub fn is_finished(&self) -> bool {
        self.position == FINISHED_POSITION
    }
}

/// Immutable snapshot of a Clock game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    players: Vec<ClockPlayer>,
    current: usize,
    extra_turn_pending: bool,
    finish_order: Vec<PlayerId>,
    config: ClockConfig,
}

impl ClockState {
    /// Start a game with players throwing in roster order.
    pub fn new(
        roster: impl IntoIterator<Item = PlayerId>,
        config: ClockConfig,
    ) -> Result<Self, ClockError> {
        let mut seen = BTreeSet::new();
        let mut players = Vec::new();
        for id in roster {
            if !seen.insert(id.clone()) {
                return Err(ClockError::DuplicatePlayer(id));
            }
            players.push(ClockPlayer::new(id));
        }
        if players.is_empty() {
            return Err(ClockError::EmptyRoster);
        }

        Ok(Self {
            players,
            current: 0,
            extra_turn_pending: false,
            finish_order: Vec::new(),
            config,
        })
    }

    /// All players in roster order.
    pub fn players(&self) -> &[ClockPlayer] {
        &self.players
    }

    /// Look up one player.
    pub fn player(&self, id: &PlayerId) -> Option<&ClockPlayer> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Player due to throw.
    pub fn current_player(&self) -> &ClockPlayer {
        &self.players[self.current]
    }

    /// Players in the order they finished.
    pub fn finish_order(&self) -> &[PlayerId] {
        &self.finish_order
    }

    /// Rules in force.
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Someone finished, or every visit has been used.
    pub fn is_over(&self) -> bool {
        if !self.finish_order.is_empty() {
            return true;
        }
        !self.extra_turn_pending
            && self
                .players
                .iter()
                .all(|p| p.turns_taken >= self.config.max_turns)
    }

    /// Current positions keyed by player.
    pub fn positions(&self) -> BTreeMap<PlayerId, u8> {
        self.players
            .iter()
            .map(|p| (p.id.clone(), p.position))
            .collect()
    }

    /// Winner(s) on the current snapshot.
    pub fn result(&self) -> ClockResult {
        let roster: Vec<PlayerId> = self.players.iter().map(|p| p.id.clone()).collect();
        determine_winner(&roster, &self.positions(), &self.finish_order)
    }

    /// Play the current player's darts and hand over to whoever is next.
    pub fn take_turn(&self, darts: &[Dart]) -> Result<(ClockState, ClockTurn), ClockError> {
        if self.is_over() {
            return Err(ClockError::GameOver);
        }

        let mut next = self.clone();
        let turn = {
            let player = &mut next.players[next.current];
            let turn = process_turn(darts, player.position);
            if !self.extra_turn_pending {
                player.turns_taken += 1;
            }
            player.position = turn.end_position;
            turn
        };

        if turn.finished {
            let player = &mut next.players[next.current];
            next.finish_order.push(player.id.clone());
            player.finish_rank = Some(next.finish_order.len());
            info!("{} finished the clock in {} turns", player.id, player.turns_taken);
            next.extra_turn_pending = false;
            return Ok((next, turn));
        }

        if turn.extra_turn {
            debug!("{} earns an extra turn", next.players[next.current].id);
            next.extra_turn_pending = true;
            return Ok((next, turn));
        }

        next.extra_turn_pending = false;
        next.advance();
        Ok((next, turn))
    }

    /// Move to the next player with visits left, wrapping round the roster.
    fn advance(&mut self) {
        let count = self.players.len();
        for step in 1..=count {
            let candidate = (self.current + step) % count;
            if self.players[candidate].turns_taken < self.config.max_turns {
                self.current = candidate;
                return;
            }
        }
    }
}
