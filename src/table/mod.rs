//! Piles and the card custody arena.

pub mod pile;
pub mod table;

pub use pile::{InsertAt, PileConfig, PileId, PileKind};
pub use table::Table;
