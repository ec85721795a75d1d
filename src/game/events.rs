//! Killer Events
//!
//! Life changes produced while resolving a Killer turn. Events are the only
//! output of dart resolution; the snapshot is rebuilt from them afterwards.

use serde::{Deserialize, Serialize};

use crate::game::player::PlayerId;

/// Why a player's lives changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HitReason {
    /// Thrower hit their own number
    Own,
    /// Thrower hit a number beside their own
    Adjacent,
    /// A killer hit this player's number
    Killed,
    /// A killer hit a number beside this player's
    AdjKilled,
}

impl HitReason {
    /// Whether this is damage dealt by a killer.
    #[inline]
    pub const fn is_attack(self) -> bool {
        matches!(self, HitReason::Killed | HitReason::AdjKilled)
    }
}

/// One life change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillerEvent {
    /// Player whose lives change
    pub player: PlayerId,
    /// Signed life change
    pub delta: i32,
    /// Cause
    pub reason: HitReason,
}

impl KillerEvent {
    /// Create a new event.
    pub fn new(player: PlayerId, delta: i32, reason: HitReason) -> Self {
        Self { player, delta, reason }
    }

    /// Life gained by the thrower.
    pub fn gain(player: PlayerId, amount: i32, reason: HitReason) -> Self {
        Self::new(player, amount, reason)
    }

    /// Life taken from an opponent.
    pub fn damage(player: PlayerId, amount: i32, reason: HitReason) -> Self {
        Self::new(player, -amount, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_wire_names() {
        let names: Vec<String> = [
            HitReason::Own,
            HitReason::Adjacent,
            HitReason::Killed,
            HitReason::AdjKilled,
        ]
        .iter()
        .map(|r| serde_json::to_string(r).unwrap())
        .collect();
        assert_eq!(names, ["\"own\"", "\"adjacent\"", "\"killed\"", "\"adj-killed\""]);
    }

    #[test]
    fn test_damage_is_negative() {
        let event = KillerEvent::damage(PlayerId::from("bob"), 6, HitReason::Killed);
        assert_eq!(event.delta, -6);
        assert!(event.reason.is_attack());
        assert!(!HitReason::Own.is_attack());
    }

    #[test]
    fn test_event_json_shape() {
        let event = KillerEvent::gain(PlayerId::from("ann"), 3, HitReason::Own);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({"player": "ann", "delta": 3, "reason": "own"}));
    }
}
