//! # Oche
//!
//! Rules engine for three darts scoring games: Halve-It (Classic and
//! Yahtzee variants), Killer, and Around the Clock.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          OCHE                                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Board primitives                          │
//! │  ├── board.rs    - Wedge order, adjacency, ring colors       │
//! │  └── dart.rs     - Dart record, scoring, color               │
//! │                                                              │
//! │  game/           - Rule engines                              │
//! │  ├── contract.rs - Halve-It contracts                        │
//! │  ├── halve_it.rs - Classic / Yahtzee scorecards              │
//! │  ├── killer.rs   - Killer resolution and reducer             │
//! │  ├── events.rs   - Killer life-change events                 │
//! │  ├── clock.rs    - Around the Clock                          │
//! │  └── player.rs   - Player ids                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//!
//! Every engine call takes a complete snapshot and returns a new one (or a
//! result record). Nothing is shared or mutated behind the caller's back,
//! so undo and replay are a matter of keeping old snapshots. Per-player
//! maps are `BTreeMap`s and rosters are `Vec`s, so iteration order is
//! always deterministic.
//!
//! Malformed input never fails a scoring call: unknown segments have no
//! neighbors or color, short turns meet no contract and score zero.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::board::{adjacent_numbers, Color, BOARD_SEQUENCE, BULL, MISS};
pub use core::dart::{Dart, DartError, Modifier};
pub use game::clock::{ClockConfig, ClockResult, ClockState, ClockTurn};
pub use game::contract::{
    meets_contract, score_contract, valid_contracts, validate_score, Contract, CONTRACT_ORDER,
};
pub use game::events::{HitReason, KillerEvent};
pub use game::halve_it::{ClassicCard, HalveItConfig, YahtzeeCard};
pub use game::killer::{KillerConfig, KillerPlayer, KillerState, KillerTurn};
pub use game::player::PlayerId;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
