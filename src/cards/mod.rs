//! Card values: ranks, suits, faces, and per-card state.
//!
//! ## Key Types
//!
//! - `Rank` / `Suit`: closed enumerations with intrinsic orders and
//!   scoring weights
//! - `CardFace`: immutable rank + suit value
//! - `Card`: a face plus orientation and persistence tag
//! - `CardId`: stable identifier for a card held by a `Table`
//! - `CardView`: snapshot for the display boundary
//!
//! Card identity is policy-driven; see `crate::core::ComparePolicy`.

pub mod card;
pub mod rank;
pub mod suit;

pub use card::{Card, CardFace, CardId, CardView, Orientation, Persistence, PersistenceFilter};
pub use rank::{Rank, PLAYING_RANKS};
pub use suit::{Suit, PLAYING_SUITS};
