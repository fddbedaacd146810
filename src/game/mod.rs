//! The Rummy game layer: configuration, turn loop, and the input
//! boundary.

pub mod boundary;
pub mod config;
pub mod events;
pub mod rummy;
pub mod seat;

pub use boundary::{DrawChoice, MeldChoice, MeldView, PlayerInput, ScriptedInput, TurnView};
pub use config::{RummyConfig, DEFAULT_WINNING_SCORE, MAX_PLAYERS, MIN_PLAYERS};
pub use events::GameEvent;
pub use rummy::{GameOutcome, RoundOutcome, RummyGame, TableMeld, TurnOutcome};
pub use seat::Seat;
