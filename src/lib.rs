//! # rummy-engine
//!
//! A turn-based card-game engine built around card custody: every card
//! is in exactly one pile at all times, and the engine can prove it.
//!
//! ## Design Principles
//!
//! 1. **Custody By Construction**: Cards live in an arena addressed by
//!    stable ids; piles are ordered id lists. Moving a card is an index
//!    relocation, so duplication is impossible by construction.
//!
//! 2. **Policy Over Global State**: Equality, ordering, and matching
//!    take an explicit `ComparePolicy`; there is no process-wide
//!    comparison switch to trip over.
//!
//! 3. **Provable Integrity**: Each deck keeps an immutable template of
//!    the cards it supplied. Teardown reconciles the live population
//!    against it and reports every missing or stray card.
//!
//! ## Modules
//!
//! - `cards`: Ranks, suits, faces, orientation, persistence tags
//! - `core`: Comparison policy, errors, players, deterministic RNG
//! - `table`: Piles and the custody arena
//! - `deck`: Standard 54-card decks and integrity reconciliation
//! - `meld`: Set/Run classification and extension
//! - `game`: The Rummy round/game loop and its input boundary

pub mod cards;
pub mod core;
pub mod deck;
pub mod game;
pub mod meld;
pub mod table;

// Re-export commonly used types
pub use crate::cards::{Card, CardFace, CardId, CardView, Orientation, Persistence, Rank, Suit};
pub use crate::core::{CompareOn, ComparePolicy, GameError, GameRng, PlayerId, PlayerMap};
pub use crate::deck::{Deck, CARDS_PER_DECK, JOKERS_PER_DECK};
pub use crate::game::{
    DrawChoice, GameEvent, GameOutcome, MeldChoice, PlayerInput, RoundOutcome, RummyConfig,
    RummyGame, ScriptedInput, TurnOutcome, TurnView,
};
pub use crate::meld::{MeldKind, MeldRules};
pub use crate::table::{InsertAt, PileConfig, PileId, PileKind, Table};
