//! Core engine types: comparison policy, errors, players, RNG.

pub mod compare;
pub mod error;
pub mod player;
pub mod rng;

pub use compare::{CompareOn, ComparePolicy};
pub use error::GameError;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
