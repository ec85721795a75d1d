//! Core board primitives.
//!
//! Fixed lookup tables and the dart record every rule engine consumes.
//! Nothing in here holds state.

pub mod board;
pub mod dart;

// Re-export core types
pub use board::{adjacent_numbers, are_adjacent, Color, BOARD_SEQUENCE, BULL, MISS};
pub use dart::{dart_color, Dart, DartError, Modifier};
