//! Halve-It Contracts
//!
//! The fifteen contracts, in play order, with their qualification rules,
//! turn scoring, and the validator used when a score is typed in by hand.
//!
//! A contract is evaluated against one full turn of three darts. Shorter
//! turns never qualify and score nothing; darts past the third are ignored.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::board::{are_adjacent, BULL};
use crate::core::dart::{total_score, Dart, Modifier};

/// Darts in one Halve-It turn.
pub const DARTS_PER_TURN: usize = 3;

/// Target for the `57` contract.
pub const FIFTY_SEVEN: u32 = 57;

/// Distinct colors needed for the `color` contract.
pub const COLORS_REQUIRED: usize = 3;

/// Scores a bull-only turn can produce.
pub const BULL_SCORES: [u32; 4] = [25, 50, 75, 100];

/// One of the fifteen contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Contract {
    /// Raw turn total
    #[serde(rename = "capital")]
    Capital,
    /// Hit 20s
    #[serde(rename = "20")]
    Twenty,
    /// Three darts on touching wedges
    #[serde(rename = "side")]
    Side,
    /// Hit 19s
    #[serde(rename = "19")]
    Nineteen,
    /// Three consecutive numbers
    #[serde(rename = "3row")]
    ThreeInARow,
    /// Hit 18s
    #[serde(rename = "18")]
    Eighteen,
    /// Three different colors
    #[serde(rename = "color")]
    Color,
    /// Hit 17s
    #[serde(rename = "17")]
    Seventeen,
    /// Hit any double
    #[serde(rename = "double")]
    Double,
    /// Hit 16s
    #[serde(rename = "16")]
    Sixteen,
    /// Hit any triple
    #[serde(rename = "triple")]
    Triple,
    /// Hit 15s
    #[serde(rename = "15")]
    Fifteen,
    /// Score exactly 57
    #[serde(rename = "57")]
    FiftySeven,
    /// Hit 14s
    #[serde(rename = "14")]
    Fourteen,
    /// Hit the bull
    #[serde(rename = "bull")]
    Bull,
}

/// All contracts in play order.
pub const CONTRACT_ORDER: [Contract; 15] = [
    Contract::Capital,
    Contract::Twenty,
    Contract::Side,
    Contract::Nineteen,
    Contract::ThreeInARow,
    Contract::Eighteen,
    Contract::Color,
    Contract::Seventeen,
    Contract::Double,
    Contract::Sixteen,
    Contract::Triple,
    Contract::Fifteen,
    Contract::FiftySeven,
    Contract::Fourteen,
    Contract::Bull,
];

impl Contract {
    /// Canonical string id.
    pub const fn id(self) -> &'static str {
        match self {
            Contract::Capital => "capital",
            Contract::Twenty => "20",
            Contract::Side => "side",
            Contract::Nineteen => "19",
            Contract::ThreeInARow => "3row",
            Contract::Eighteen => "18",
            Contract::Color => "color",
            Contract::Seventeen => "17",
            Contract::Double => "double",
            Contract::Sixteen => "16",
            Contract::Triple => "triple",
            Contract::Fifteen => "15",
            Contract::FiftySeven => "57",
            Contract::Fourteen => "14",
            Contract::Bull => "bull",
        }
    }

    /// Board number for the numeric contracts.
    pub const fn target_number(self) -> Option<u8> {
        match self {
            Contract::Twenty => Some(20),
            Contract::Nineteen => Some(19),
            Contract::Eighteen => Some(18),
            Contract::Seventeen => Some(17),
            Contract::Sixteen => Some(16),
            Contract::Fifteen => Some(15),
            Contract::Fourteen => Some(14),
            _ => None,
        }
    }

    /// Position in [`CONTRACT_ORDER`].
    pub fn index(self) -> usize {
        CONTRACT_ORDER
            .iter()
            .position(|&c| c == self)
            .unwrap_or_default()
    }

    /// Contract played after this one.
    pub fn next(self) -> Option<Contract> {
        CONTRACT_ORDER.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown contract id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contract: {0}")]
pub struct ParseContractError(pub String);

impl FromStr for Contract {
    type Err = ParseContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CONTRACT_ORDER
            .iter()
            .copied()
            .find(|c| c.id() == s)
            .ok_or_else(|| ParseContractError(s.to_string()))
    }
}

/// The darts of a complete turn, or `None` if fewer than three were thrown.
#[inline]
fn full_turn(darts: &[Dart]) -> Option<&[Dart]> {
    darts.get(..DARTS_PER_TURN)
}

/// Whether a turn fulfils a contract (Classic mode).
pub fn meets_contract(darts: &[Dart], contract: Contract) -> bool {
    let Some(turn) = full_turn(darts) else {
        return false;
    };

    if let Some(target) = contract.target_number() {
        return turn.iter().any(|d| d.number() == target);
    }

    match contract {
        Contract::Capital => true,
        Contract::Side => is_side(turn),
        Contract::ThreeInARow => is_three_in_a_row(turn),
        Contract::Color => distinct_colors(turn) >= COLORS_REQUIRED,
        Contract::Double => turn.iter().any(|d| d.modifier() == Modifier::Double),
        Contract::Triple => turn.iter().any(|d| d.modifier() == Modifier::Triple),
        Contract::FiftySeven => total_score(turn) == FIFTY_SEVEN,
        Contract::Bull => turn.iter().any(Dart::is_bull),
        // Numeric contracts handled above.
        _ => false,
    }
}

/// Points a turn earns towards a contract, whether or not it qualifies.
pub fn score_contract(darts: &[Dart], contract: Contract) -> u32 {
    let Some(turn) = full_turn(darts) else {
        return 0;
    };

    if let Some(target) = contract.target_number() {
        return score_where(turn, |d| d.number() == target);
    }

    match contract {
        Contract::Double => score_where(turn, |d| d.modifier() == Modifier::Double),
        Contract::Triple => score_where(turn, |d| d.modifier() == Modifier::Triple),
        Contract::Bull => score_where(turn, Dart::is_bull),
        _ => total_score(turn),
    }
}

#[inline]
fn score_where(turn: &[Dart], keep: impl Fn(&Dart) -> bool) -> u32 {
    turn.iter().filter(|d| keep(d)).map(Dart::score).sum()
}

/// Contracts a turn qualifies for (Yahtzee mode), in play order.
///
/// `capital` is present for every complete turn, even three misses. An
/// incomplete turn yields nothing.
pub fn valid_contracts(darts: &[Dart]) -> Vec<Contract> {
    if full_turn(darts).is_none() {
        return Vec::new();
    }
    CONTRACT_ORDER
        .iter()
        .copied()
        .filter(|&c| meets_contract(darts, c))
        .collect()
}

/// Whether a hand-entered turn score is reachable for a contract.
pub fn validate_score(score: i32, contract: Contract) -> bool {
    if score < 0 {
        return false;
    }
    if score == 0 {
        return true;
    }
    if let Some(target) = contract.target_number() {
        return score % i32::from(target) == 0;
    }
    match contract {
        Contract::Double => score % 2 == 0,
        Contract::FiftySeven => score == FIFTY_SEVEN as i32,
        Contract::Bull => BULL_SCORES.iter().any(|&s| s as i32 == score),
        _ => true,
    }
}

/// [`validate_score`] keyed by string id; unknown ids accept any score.
pub fn validate_score_str(score: i32, contract_id: &str) -> bool {
    match contract_id.parse::<Contract>() {
        Ok(contract) => validate_score(score, contract),
        Err(_) => true,
    }
}

/// Every dart touches at least one other dart on the board.
///
/// The outer bull touches everything; the inner bull only touches the
/// outer bull. Two darts in the same wedge do not touch each other, but a
/// repeated wedge still counts if it touches a third dart.
fn is_side(turn: &[Dart]) -> bool {
    let touches = |a: &Dart, b: &Dart| {
        a.is_single_bull() || b.is_single_bull() || are_adjacent(a.number(), b.number())
    };

    turn.iter().enumerate().all(|(i, a)| {
        turn.iter()
            .enumerate()
            .any(|(j, b)| i != j && touches(a, b))
    })
}

/// Three distinct board numbers forming a run, in any order.
fn is_three_in_a_row(turn: &[Dart]) -> bool {
    let numbers: BTreeSet<u8> = turn
        .iter()
        .filter(|d| !d.is_miss() && d.number() != BULL)
        .map(Dart::number)
        .collect();

    if numbers.len() != DARTS_PER_TURN {
        return false;
    }

    let (Some(&low), Some(&high)) = (numbers.first(), numbers.last()) else {
        return false;
    };
    high - low == 2
}

fn distinct_colors(turn: &[Dart]) -> usize {
    turn.iter()
        .filter_map(Dart::color)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(n: u8) -> Dart {
        Dart::single(n)
    }

    fn d(n: u8) -> Dart {
        Dart::double(n)
    }

    fn t(n: u8) -> Dart {
        Dart::triple(n).unwrap()
    }

    #[test]
    fn test_contract_order_and_ids() {
        let ids: Vec<&str> = CONTRACT_ORDER.iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            [
                "capital", "20", "side", "19", "3row", "18", "color", "17", "double", "16",
                "triple", "15", "57", "14", "bull"
            ]
        );
        for contract in CONTRACT_ORDER {
            assert_eq!(contract.id().parse::<Contract>(), Ok(contract));
        }
        assert_eq!(Contract::Capital.next(), Some(Contract::Twenty));
        assert_eq!(Contract::Bull.next(), None);
        assert!("4row".parse::<Contract>().is_err());
    }

    #[test]
    fn test_contract_serde_ids() {
        assert_eq!(serde_json::to_string(&Contract::ThreeInARow).unwrap(), "\"3row\"");
        let c: Contract = serde_json::from_str("\"57\"").unwrap();
        assert_eq!(c, Contract::FiftySeven);
    }

    #[test]
    fn test_short_turns_fail_and_score_zero() {
        for contract in CONTRACT_ORDER {
            assert!(!meets_contract(&[], contract));
            assert_eq!(score_contract(&[], contract), 0);
            assert!(!meets_contract(&[s(20), s(20)], contract));
            assert_eq!(score_contract(&[s(20), s(20)], contract), 0);
        }
    }

    #[test]
    fn test_capital() {
        let turn = [s(20), t(5), Dart::miss()];
        assert!(meets_contract(&turn, Contract::Capital));
        assert_eq!(score_contract(&turn, Contract::Capital), 35);
    }

    #[test]
    fn test_numeric_scores_matching_only() {
        let turn = [s(20), d(20), s(19)];
        assert!(meets_contract(&turn, Contract::Twenty));
        assert_eq!(score_contract(&turn, Contract::Twenty), 60);
        assert!(meets_contract(&turn, Contract::Nineteen));
        assert_eq!(score_contract(&turn, Contract::Nineteen), 19);
        assert!(!meets_contract(&turn, Contract::Eighteen));
        assert_eq!(score_contract(&turn, Contract::Eighteen), 0);
    }

    #[test]
    fn test_side() {
        // 20-1-18 is a contiguous arc.
        assert!(meets_contract(&[s(20), s(1), s(18)], Contract::Side));
        assert!(meets_contract(&[s(5), s(20), s(1)], Contract::Side));
        // 20 and 3 are far apart, outer bull bridges them.
        assert!(meets_contract(&[s(20), s(BULL), s(3)], Contract::Side));
        assert!(meets_contract(&[s(BULL), s(BULL), Dart::miss()], Contract::Side));
        // Inner bull bridges nothing.
        assert!(!meets_contract(&[s(20), d(BULL), s(3)], Contract::Side));
        assert!(!meets_contract(&[s(20), s(1), s(3)], Contract::Side));
        assert!(!meets_contract(&[s(20), s(20), s(20)], Contract::Side));
        // A doubled-up wedge counts when its neighbor is also hit.
        assert!(meets_contract(&[s(20), s(20), s(1)], Contract::Side));
        assert!(meets_contract(&[s(20), t(1), s(1)], Contract::Side));
        assert!(!meets_contract(&[s(20), s(20), s(3)], Contract::Side));
        assert!(meets_contract(&[s(BULL), s(20), s(20)], Contract::Side));
        assert_eq!(score_contract(&[s(20), s(1), s(18)], Contract::Side), 39);
    }

    #[test]
    fn test_three_in_a_row() {
        assert!(meets_contract(&[s(16), s(14), s(15)], Contract::ThreeInARow));
        assert!(meets_contract(&[s(14), t(15), d(16)], Contract::ThreeInARow));
        assert!(!meets_contract(&[s(14), s(15), s(15)], Contract::ThreeInARow));
        assert!(!meets_contract(&[s(14), s(15), s(BULL)], Contract::ThreeInARow));
        assert!(!meets_contract(&[Dart::miss(), s(1), s(2)], Contract::ThreeInARow));
        assert!(!meets_contract(&[s(1), s(2), s(4)], Contract::ThreeInARow));
    }

    #[test]
    fn test_color() {
        // black, red, green
        assert!(meets_contract(&[s(20), d(20), d(1)], Contract::Color));
        // white, green, red via bulls
        assert!(meets_contract(&[s(1), s(BULL), d(BULL)], Contract::Color));
        // miss adds nothing
        assert!(!meets_contract(&[s(20), d(20), Dart::miss()], Contract::Color));
        assert!(!meets_contract(&[s(20), s(18), d(20)], Contract::Color));
    }

    #[test]
    fn test_double_and_triple() {
        let turn = [d(BULL), d(3), s(7)];
        assert!(meets_contract(&turn, Contract::Double));
        assert_eq!(score_contract(&turn, Contract::Double), 56);
        assert!(!meets_contract(&turn, Contract::Triple));
        assert_eq!(score_contract(&turn, Contract::Triple), 0);

        let turn = [t(3), t(7), s(7)];
        assert!(meets_contract(&turn, Contract::Triple));
        assert_eq!(score_contract(&turn, Contract::Triple), 30);
    }

    #[test]
    fn test_fifty_seven() {
        let hit = [s(20), s(20), s(17)];
        assert!(meets_contract(&hit, Contract::FiftySeven));
        assert_eq!(score_contract(&hit, Contract::FiftySeven), 57);

        let over = [s(20), s(20), s(18)];
        assert!(!meets_contract(&over, Contract::FiftySeven));
        assert_eq!(score_contract(&over, Contract::FiftySeven), 58);
    }

    #[test]
    fn test_bull() {
        let turn = [s(BULL), d(BULL), s(20)];
        assert!(meets_contract(&turn, Contract::Bull));
        assert_eq!(score_contract(&turn, Contract::Bull), 75);
        assert!(!meets_contract(&[s(20), s(1), s(5)], Contract::Bull));
    }

    #[test]
    fn test_extra_darts_ignored() {
        let turn = [s(1), s(2), s(3), s(20)];
        assert!(!meets_contract(&turn, Contract::Twenty));
        assert_eq!(score_contract(&turn, Contract::Capital), 6);
    }

    #[test]
    fn test_valid_contracts() {
        assert!(valid_contracts(&[]).is_empty());

        let misses = [Dart::miss(); 3];
        assert_eq!(valid_contracts(&misses), vec![Contract::Capital]);

        let turn = [s(20), s(20), s(17)];
        assert_eq!(
            valid_contracts(&turn),
            vec![Contract::Capital, Contract::Twenty, Contract::Seventeen, Contract::FiftySeven]
        );
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(123, Contract::Capital));
        assert!(validate_score(7, Contract::Triple));
        assert!(!validate_score(-1, Contract::Capital));

        assert!(validate_score(0, Contract::Twenty));
        assert!(validate_score(120, Contract::Twenty));
        assert!(!validate_score(30, Contract::Twenty));

        assert!(validate_score(34, Contract::Double));
        assert!(!validate_score(33, Contract::Double));

        assert!(validate_score(57, Contract::FiftySeven));
        assert!(!validate_score(56, Contract::FiftySeven));

        assert!(validate_score(75, Contract::Bull));
        assert!(!validate_score(60, Contract::Bull));

        assert!(validate_score_str(31, "mystery"));
        assert!(!validate_score_str(31, "57"));
    }
}
