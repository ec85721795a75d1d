//! Halve-It Scorecards
//!
//! Per-player bookkeeping on top of the contract rules.
//!
//! - **Classic**: contracts are played in order. Meeting a contract adds
//!   its score to the capital; failing it halves the capital.
//! - **Yahtzee**: each turn is banked against any contract not yet used.
//!   A contract the turn does not qualify for can still be claimed, for 0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::dart::Dart;
use crate::game::contract::{
    meets_contract, score_contract, valid_contracts, validate_score, Contract, CONTRACT_ORDER,
};
use crate::game::player::PlayerId;

/// Halve-It house rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalveItConfig {
    /// Round odd capitals up when halving
    pub round_up: bool,
}

impl Default for HalveItConfig {
    fn default() -> Self {
        Self { round_up: true }
    }
}

/// Scorecard errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// Every contract has been played
    #[error("scorecard is complete")]
    Complete,

    /// Yahtzee contract used twice
    #[error("contract {0} already claimed")]
    AlreadyClaimed(Contract),

    /// Hand-entered score the contract cannot produce
    #[error("score {score} is not possible for contract {contract}")]
    InvalidScore {
        /// Contract being played
        contract: Contract,
        /// Rejected score
        score: i32,
    },
}

/// Halve a capital.
#[inline]
pub fn halve(capital: u32, round_up: bool) -> u32 {
    if round_up {
        capital.div_ceil(2)
    } else {
        capital / 2
    }
}

/// One played Classic contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicTurn {
    /// Contract played
    pub contract: Contract,
    /// Whether it was met
    pub met: bool,
    /// Points the turn earned towards the contract
    pub score: u32,
    /// Capital going in
    pub capital_before: u32,
    /// Capital coming out
    pub capital_after: u32,
}

/// A player's Classic-mode card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicCard {
    capital: u32,
    next: Option<Contract>,
    history: Vec<ClassicTurn>,
    config: HalveItConfig,
}

impl Default for ClassicCard {
    fn default() -> Self {
        Self::new(HalveItConfig::default())
    }
}

impl ClassicCard {
    /// Empty card, first contract up.
    pub fn new(config: HalveItConfig) -> Self {
        Self {
            capital: 0,
            next: CONTRACT_ORDER.first().copied(),
            history: Vec::new(),
            config,
        }
    }

    /// Running score.
    pub fn capital(&self) -> u32 {
        self.capital
    }

    /// Contract to be played next.
    pub fn current_contract(&self) -> Option<Contract> {
        self.next
    }

    /// Contracts played so far.
    pub fn history(&self) -> &[ClassicTurn] {
        &self.history
    }

    /// All fifteen contracts played.
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    /// Score a thrown turn against the current contract.
    ///
    /// Returns `None` once the card is complete.
    pub fn play_turn(&mut self, darts: &[Dart]) -> Option<ClassicTurn> {
        let contract = self.next?;
        let met = meets_contract(darts, contract);
        let score = score_contract(darts, contract);
        Some(self.record(contract, met, score))
    }

    /// Apply a hand-entered turn score to the current contract.
    ///
    /// A zero counts as a failed contract.
    pub fn play_manual(&mut self, score: i32) -> Result<ClassicTurn, CardError> {
        let contract = self.next.ok_or(CardError::Complete)?;
        if !validate_score(score, contract) {
            return Err(CardError::InvalidScore { contract, score });
        }
        let score = score.unsigned_abs();
        let met = contract == Contract::Capital || score > 0;
        Ok(self.record(contract, met, score))
    }

    fn record(&mut self, contract: Contract, met: bool, score: u32) -> ClassicTurn {
        let capital_before = self.capital;
        let capital_after = match (contract, met) {
            (Contract::Capital, _) => score,
            (_, true) => capital_before + score,
            (_, false) => halve(capital_before, self.config.round_up),
        };

        if !met {
            debug!("{} failed, capital {} -> {}", contract, capital_before, capital_after);
        }

        let turn = ClassicTurn {
            contract,
            met,
            score,
            capital_before,
            capital_after,
        };
        self.capital = capital_after;
        self.history.push(turn);
        self.next = contract.next();
        turn
    }
}

/// A player's Yahtzee-mode card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahtzeeCard {
    claimed: BTreeMap<Contract, u32>,
}

impl YahtzeeCard {
    /// Empty card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contracts the turn qualifies for that are still open, in play order.
    pub fn available(&self, darts: &[Dart]) -> Vec<Contract> {
        valid_contracts(darts)
            .into_iter()
            .filter(|c| !self.claimed.contains_key(c))
            .collect()
    }

    /// Contracts not yet claimed, in play order.
    pub fn open_contracts(&self) -> Vec<Contract> {
        CONTRACT_ORDER
            .iter()
            .copied()
            .filter(|c| !self.claimed.contains_key(c))
            .collect()
    }

    /// Bank a turn against `contract`; a turn that does not qualify scores 0.
    pub fn claim(&mut self, darts: &[Dart], contract: Contract) -> Result<u32, CardError> {
        if self.claimed.contains_key(&contract) {
            return Err(CardError::AlreadyClaimed(contract));
        }
        let score = if meets_contract(darts, contract) {
            score_contract(darts, contract)
        } else {
            0
        };
        self.claimed.insert(contract, score);
        Ok(score)
    }

    /// Score banked against a contract.
    pub fn claimed(&self, contract: Contract) -> Option<u32> {
        self.claimed.get(&contract).copied()
    }

    /// Sum of banked scores.
    pub fn total(&self) -> u32 {
        self.claimed.values().sum()
    }

    /// Every contract claimed.
    pub fn is_complete(&self) -> bool {
        self.claimed.len() == CONTRACT_ORDER.len()
    }
}

/// A player's place in the standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based; tied players share a rank
    pub rank: usize,
    /// Player
    pub player: PlayerId,
    /// Capital or card total
    pub score: u32,
}

/// Rank players by score, highest first.
pub fn standings(scores: &[(PlayerId, u32)]) -> Vec<Standing> {
    let mut sorted: Vec<&(PlayerId, u32)> = scores.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let mut result: Vec<Standing> = Vec::with_capacity(sorted.len());
    for (index, (player, score)) in sorted.into_iter().enumerate() {
        let rank = match result.last() {
            Some(prev) if prev.score == *score => prev.rank,
            _ => index + 1,
        };
        result.push(Standing {
            rank,
            player: player.clone(),
            score: *score,
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::BULL;

    fn s(n: u8) -> Dart {
        Dart::single(n)
    }

    #[test]
    fn test_halve_rounding() {
        assert_eq!(halve(45, true), 23);
        assert_eq!(halve(45, false), 22);
        assert_eq!(halve(0, true), 0);
    }

    #[test]
    fn test_classic_capital_then_contract() {
        let mut card = ClassicCard::default();
        let turn = card.play_turn(&[s(20), s(20), s(5)]).unwrap();
        assert_eq!(turn.contract, Contract::Capital);
        assert_eq!(card.capital(), 45);

        let turn = card.play_turn(&[s(20), Dart::double(20), s(1)]).unwrap();
        assert!(turn.met);
        assert_eq!(turn.score, 60);
        assert_eq!(card.capital(), 105);
        assert_eq!(card.current_contract(), Some(Contract::Side));
    }

    #[test]
    fn test_classic_failure_halves() {
        let mut card = ClassicCard::default();
        card.play_turn(&[s(20), s(20), s(5)]);
        let turn = card.play_turn(&[s(1), s(2), s(3)]).unwrap();
        assert!(!turn.met);
        assert_eq!(turn.capital_before, 45);
        assert_eq!(turn.capital_after, 23);
    }

    #[test]
    fn test_classic_card_completes() {
        let mut card = ClassicCard::default();
        let misses = [Dart::miss(); 3];
        for _ in 0..CONTRACT_ORDER.len() {
            assert!(card.play_turn(&misses).is_some());
        }
        assert!(card.is_complete());
        assert_eq!(card.history().len(), 15);
        assert_eq!(card.play_turn(&misses), None);
        assert_eq!(card.play_manual(0), Err(CardError::Complete));
    }

    #[test]
    fn test_classic_manual_entry() {
        let mut card = ClassicCard::default();
        card.play_manual(60).unwrap();
        assert_eq!(card.capital(), 60);

        assert_eq!(
            card.play_manual(30),
            Err(CardError::InvalidScore {
                contract: Contract::Twenty,
                score: 30
            })
        );
        card.play_manual(40).unwrap();
        assert_eq!(card.capital(), 100);

        // side: zero fails
        let turn = card.play_manual(0).unwrap();
        assert!(!turn.met);
        assert_eq!(card.capital(), 50);
    }

    #[test]
    fn test_yahtzee_claims() {
        let mut card = YahtzeeCard::new();
        let turn = [s(20), s(20), s(17)];
        assert_eq!(
            card.available(&turn),
            vec![Contract::Capital, Contract::Twenty, Contract::Seventeen, Contract::FiftySeven]
        );

        assert_eq!(card.claim(&turn, Contract::FiftySeven), Ok(57));
        assert_eq!(
            card.claim(&turn, Contract::FiftySeven),
            Err(CardError::AlreadyClaimed(Contract::FiftySeven))
        );
        assert!(!card.available(&turn).contains(&Contract::FiftySeven));

        // Scratch a contract the turn misses.
        assert_eq!(card.claim(&turn, Contract::Bull), Ok(0));
        assert_eq!(card.claimed(Contract::Bull), Some(0));
        assert_eq!(card.total(), 57);
        assert_eq!(card.open_contracts().len(), 13);
    }

    #[test]
    fn test_yahtzee_complete() {
        let mut card = YahtzeeCard::new();
        let turn = [s(BULL), Dart::double(BULL), s(20)];
        for contract in CONTRACT_ORDER {
            card.claim(&turn, contract).unwrap();
        }
        assert!(card.is_complete());
        assert!(card.available(&turn).is_empty());
    }

    #[test]
    fn test_standings_share_ties() {
        let scores = [
            (PlayerId::from("a"), 40),
            (PlayerId::from("b"), 90),
            (PlayerId::from("c"), 40),
            (PlayerId::from("d"), 10),
        ];
        let table = standings(&scores);
        let ranks: Vec<(usize, &str)> = table.iter().map(|s| (s.rank, s.player.as_str())).collect();
        assert_eq!(ranks, [(1, "b"), (2, "a"), (2, "c"), (4, "d")]);
    }
}
