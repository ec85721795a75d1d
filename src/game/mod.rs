//! Rule Engines
//!
//! One module per game mode, all pure functions over immutable snapshots.
//!
//! ## Module Structure
//!
//! - `contract`: Halve-It contract qualification, scoring, score validation
//! - `halve_it`: Classic and Yahtzee scorecards built on the contracts
//! - `killer`: Killer turn resolution and the snapshot reducer
//! - `events`: Life-change events emitted by Killer turns
//! - `clock`: Around-the-clock advancement and winner selection
//! - `player`: Player identifiers

pub mod clock;
pub mod contract;
pub mod events;
pub mod halve_it;
pub mod killer;
pub mod player;

// Re-export key types
pub use clock::{ClockResult, ClockState, ClockTurn};
pub use contract::{Contract, CONTRACT_ORDER};
pub use events::{HitReason, KillerEvent};
pub use halve_it::{ClassicCard, YahtzeeCard};
pub use killer::{KillerState, KillerTurn};
pub use player::PlayerId;
