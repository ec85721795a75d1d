//! Dart Model
//!
//! A single thrown dart: the segment it landed in, the ring, and the points
//! it is worth. Darts are immutable once built; the only invalid ring
//! combination (a triple bull) is rejected at construction so nothing
//! downstream has to handle it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{multiplier_ring_color, single_ring_color, Color, BULL, MISS};

/// Points for the outer bull.
pub const SINGLE_BULL_SCORE: u32 = 25;

/// Points for the inner bull.
pub const DOUBLE_BULL_SCORE: u32 = 50;

/// Ring a dart landed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Wide single area (or outer bull)
    #[default]
    Single,
    /// Outer narrow ring (or inner bull)
    Double,
    /// Inner narrow ring
    Triple,
}

impl Modifier {
    /// Score multiplier (1, 2 or 3).
    #[inline]
    pub const fn multiplier(self) -> u32 {
        match self {
            Modifier::Single => 1,
            Modifier::Double => 2,
            Modifier::Triple => 3,
        }
    }

    /// Lowercase name, as used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Modifier::Single => "single",
            Modifier::Double => "double",
            Modifier::Triple => "triple",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown ring name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown modifier: {0}")]
pub struct ParseModifierError(pub String);

impl FromStr for Modifier {
    type Err = ParseModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Modifier::Single),
            "double" => Ok(Modifier::Double),
            "triple" => Ok(Modifier::Triple),
            other => Err(ParseModifierError(other.to_string())),
        }
    }
}

/// Errors building a dart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DartError {
    /// The bull has no triple ring.
    #[error("triple bull is not a board position")]
    TripleBull,
}

/// One thrown dart.
///
/// The segment number is 1-20, [`BULL`] or [`MISS`]; nothing else is
/// validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDart")]
pub struct Dart {
    number: u8,
    modifier: Modifier,
    score: u32,
}

/// Wire form of a dart; `score` is derived when absent.
#[derive(Deserialize)]
struct RawDart {
    number: u8,
    #[serde(default)]
    modifier: Modifier,
    #[serde(default)]
    score: Option<u32>,
}

impl TryFrom<RawDart> for Dart {
    type Error = DartError;

    fn try_from(raw: RawDart) -> Result<Self, Self::Error> {
        match raw.score {
            Some(score) => Dart::with_score(raw.number, raw.modifier, score),
            None => Dart::new(raw.number, raw.modifier),
        }
    }
}

impl Dart {
    /// Build a dart with its derived score.
    pub fn new(number: u8, modifier: Modifier) -> Result<Self, DartError> {
        Self::with_score(number, modifier, derived_score(number, modifier))
    }

    /// Build a dart with an explicit score (manual scoring flows).
    pub fn with_score(number: u8, modifier: Modifier, score: u32) -> Result<Self, DartError> {
        if number == BULL && modifier == Modifier::Triple {
            return Err(DartError::TripleBull);
        }
        Ok(Self { number, modifier, score })
    }

    /// Single-ring dart.
    pub const fn single(number: u8) -> Self {
        Self {
            number,
            modifier: Modifier::Single,
            score: derived_score(number, Modifier::Single),
        }
    }

    /// Double-ring dart; `double(25)` is the inner bull.
    pub const fn double(number: u8) -> Self {
        Self {
            number,
            modifier: Modifier::Double,
            score: derived_score(number, Modifier::Double),
        }
    }

    /// Triple-ring dart.
    pub fn triple(number: u8) -> Result<Self, DartError> {
        Self::new(number, Modifier::Triple)
    }

    /// A dart that missed the board.
    pub const fn miss() -> Self {
        Self::single(MISS)
    }

    /// Segment number.
    #[inline]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Ring.
    #[inline]
    pub const fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Points scored.
    #[inline]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Score multiplier of the ring.
    #[inline]
    pub const fn multiplier(&self) -> u32 {
        self.modifier.multiplier()
    }

    /// Missed the board entirely.
    #[inline]
    pub const fn is_miss(&self) -> bool {
        self.number == MISS
    }

    /// Hit either bull ring.
    #[inline]
    pub const fn is_bull(&self) -> bool {
        self.number == BULL
    }

    /// Hit the outer (single) bull.
    #[inline]
    pub fn is_single_bull(&self) -> bool {
        self.is_bull() && self.modifier == Modifier::Single
    }

    /// Color of the area the dart landed in; `None` for a miss or an
    /// unknown segment.
    pub fn color(&self) -> Option<Color> {
        if self.is_miss() {
            return None;
        }
        if self.is_bull() {
            return match self.modifier {
                Modifier::Single => Some(Color::Green),
                Modifier::Double => Some(Color::Red),
                // Unreachable through the constructors.
                Modifier::Triple => None,
            };
        }
        match self.modifier {
            Modifier::Single => single_ring_color(self.number),
            Modifier::Double | Modifier::Triple => multiplier_ring_color(self.number),
        }
    }
}

impl fmt::Display for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.number, self.modifier) {
            (MISS, _) => f.write_str("miss"),
            (BULL, Modifier::Double) => f.write_str("DB"),
            (BULL, _) => f.write_str("SB"),
            (n, Modifier::Single) => write!(f, "S{n}"),
            (n, Modifier::Double) => write!(f, "D{n}"),
            (n, Modifier::Triple) => write!(f, "T{n}"),
        }
    }
}

/// Points for a segment and ring.
pub const fn derived_score(number: u8, modifier: Modifier) -> u32 {
    match number {
        MISS => 0,
        BULL => match modifier {
            Modifier::Double => DOUBLE_BULL_SCORE,
            _ => SINGLE_BULL_SCORE,
        },
        n => n as u32 * modifier.multiplier(),
    }
}

/// Color of a dart, `None` for a miss.
#[inline]
pub fn dart_color(dart: &Dart) -> Option<Color> {
    dart.color()
}

/// Sum of the scores of `darts`.
#[inline]
pub fn total_score(darts: &[Dart]) -> u32 {
    darts.iter().map(Dart::score).sum()
}
