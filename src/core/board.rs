//! Dartboard Geometry
//!
//! The fixed clockwise ordering of the twenty wedges and the ring color
//! tables derived from it. The sequence is the only source of adjacency
//! truth; every neighbor lookup goes through it.
//!
//! ```text
//!                 20
//!            5         1
//!         12              18
//!       9                    4
//!      14        (25)        13
//!       11                   6
//!         8               10
//!           16         15
//!              7   2 17
//!               19  3
//! ```

use serde::{Deserialize, Serialize};

/// Segment number used for a dart that missed the board.
pub const MISS: u8 = 0;

/// Segment number used for the bullseye (single and double ring).
pub const BULL: u8 = 25;

/// Number of wedges on the board.
pub const SEGMENT_COUNT: usize = 20;

/// Wedges in clockwise order, starting at the top.
pub const BOARD_SEQUENCE: [u8; SEGMENT_COUNT] = [
    20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5,
];

/// Ring color as painted on a standard board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Single-ring color of even board positions
    Black,
    /// Single-ring color of odd board positions
    White,
    /// Double/triple ring on black wedges, and the inner bull
    Red,
    /// Double/triple ring on white wedges, and the outer bull
    Green,
}

impl Color {
    /// Lowercase name, as used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

use Color::{Black as B, Green as G, Red as R, White as W};

/// Single-ring colors indexed by segment number (index 0 unused).
pub const SINGLE_RING_COLORS: [Option<Color>; SEGMENT_COUNT + 1] = [
    None,
    Some(W), Some(B), Some(B), Some(W), Some(W), // 1-5
    Some(W), Some(B), Some(B), Some(W), Some(B), // 6-10
    Some(W), Some(B), Some(B), Some(B), Some(W), // 11-15
    Some(W), Some(W), Some(B), Some(W), Some(B), // 16-20
];

/// Double and triple ring colors indexed by segment number (index 0 unused).
///
/// Red rings sit on black wedges, green rings on white ones.
pub const MULTIPLIER_RING_COLORS: [Option<Color>; SEGMENT_COUNT + 1] = [
    None,
    Some(G), Some(R), Some(R), Some(G), Some(G), // 1-5
    Some(G), Some(R), Some(R), Some(G), Some(R), // 6-10
    Some(G), Some(R), Some(R), Some(R), Some(G), // 11-15
    Some(G), Some(G), Some(R), Some(G), Some(R), // 16-20
];

/// Position of a segment number in [`BOARD_SEQUENCE`].
#[inline]
pub fn board_index(number: i32) -> Option<usize> {
    BOARD_SEQUENCE
        .iter()
        .position(|&segment| i32::from(segment) == number)
}

/// Neighbors of a wedge as `[counter_clockwise, clockwise]`.
///
/// Returns `None` for the miss and bull sentinels and for anything not on
/// the board.
pub fn adjacent_numbers(number: i32) -> Option<[u8; 2]> {
    let index = board_index(number)?;
    let counter_clockwise = BOARD_SEQUENCE[(index + SEGMENT_COUNT - 1) % SEGMENT_COUNT];
    let clockwise = BOARD_SEQUENCE[(index + 1) % SEGMENT_COUNT];
    Some([counter_clockwise, clockwise])
}

/// Whether two wedges touch on the board.
#[inline]
pub fn are_adjacent(a: u8, b: u8) -> bool {
    adjacent_numbers(i32::from(a)).is_some_and(|pair| pair.contains(&b))
}

/// Single-ring color of a wedge.
#[inline]
pub fn single_ring_color(number: u8) -> Option<Color> {
    SINGLE_RING_COLORS.get(number as usize).copied().flatten()
}

/// Double/triple ring color of a wedge.
#[inline]
pub fn multiplier_ring_color(number: u8) -> Option<Color> {
    MULTIPLIER_RING_COLORS.get(number as usize).copied().flatten()
}
