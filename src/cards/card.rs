//! Card values and per-card runtime state.
//!
//! A [`Card`] is a [`CardFace`] (immutable rank + suit) plus two bits
//! of runtime state: an [`Orientation`] that display code may flip at
//! will, and a [`Persistence`] tag that governs which piles will
//! accept the card.
//!
//! `CardFace` deliberately does **not** derive `PartialEq` or `Hash`:
//! card identity is policy-driven (see [`crate::core::ComparePolicy`])
//! and may be disabled outright, in which case any comparison must
//! fail loudly rather than fall back to structural equality. Code that
//! genuinely needs a policy-free structural check (error reporting,
//! tests) uses [`CardFace::same_face`].

use serde::{Deserialize, Serialize};

use super::rank::Rank;
use super::suit::Suit;

/// Unique identifier for a card instance held by a [`crate::table::Table`].
///
/// Ids are stable for the life of the table; "moving" a card between
/// piles relocates its id, never the card data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Face-up / face-down state. Display-only; game logic never branches
/// on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    FaceUp,
    FaceDown,
}

impl Orientation {
    /// The opposite orientation.
    #[must_use]
    pub const fn flipped(self) -> Orientation {
        match self {
            Orientation::FaceUp => Orientation::FaceDown,
            Orientation::FaceDown => Orientation::FaceUp,
        }
    }
}

/// Governs which piles a card may enter.
///
/// - `Template`: reference cards used only for integrity checks; play
///   piles reject them.
/// - `Permanent`: live playing cards.
/// - `Temporary`: short-lived lookup cards; play piles reject them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persistence {
    Template,
    Permanent,
    Temporary,
}

/// A pile's acceptance filter over [`Persistence`] tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceFilter {
    template: bool,
    permanent: bool,
    temporary: bool,
}

impl PersistenceFilter {
    /// Accept every persistence tag (scratch piles).
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            template: true,
            permanent: true,
            temporary: true,
        }
    }

    /// Accept exactly one tag.
    #[must_use]
    pub const fn only(persistence: Persistence) -> Self {
        Self {
            template: matches!(persistence, Persistence::Template),
            permanent: matches!(persistence, Persistence::Permanent),
            temporary: matches!(persistence, Persistence::Temporary),
        }
    }

    /// Check whether a tag passes the filter.
    #[must_use]
    pub const fn accepts(self, persistence: Persistence) -> bool {
        match persistence {
            Persistence::Template => self.template,
            Persistence::Permanent => self.permanent,
            Persistence::Temporary => self.temporary,
        }
    }
}

/// Immutable rank + suit value of a card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CardFace {
    pub rank: Rank,
    pub suit: Suit,
}

impl CardFace {
    /// Build a face from rank and suit.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// A joker face (`Na` suit).
    #[must_use]
    pub const fn joker() -> Self {
        Self::new(Rank::Joker, Suit::Na)
    }

    /// Canonical two-character label, rank code then suit code
    /// (e.g. `"7C"`, `"R-"`).
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.rank.code(), self.suit.code())
    }

    /// Structural rank-and-suit check, independent of any comparison
    /// policy. For error reporting and tests only; game logic goes
    /// through [`crate::core::ComparePolicy`].
    #[must_use]
    pub fn same_face(&self, other: &CardFace) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// A card instance: immutable face, mutable orientation, persistence tag.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Card {
    face: CardFace,
    orientation: Orientation,
    persistence: Persistence,
}

impl Card {
    /// Create a card, initially face down.
    #[must_use]
    pub const fn new(face: CardFace, persistence: Persistence) -> Self {
        Self {
            face,
            orientation: Orientation::FaceDown,
            persistence,
        }
    }

    /// The card's immutable face.
    #[must_use]
    pub const fn face(&self) -> CardFace {
        self.face
    }

    /// Current orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Persistence tag, fixed at creation.
    #[must_use]
    pub const fn persistence(&self) -> Persistence {
        self.persistence
    }

    /// Set the orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Flip the card over.
    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
    }
}

/// Read-only snapshot of one card for the display boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub rank: Rank,
    pub suit: Suit,
    pub orientation: Orientation,
    pub label: String,
}

impl CardView {
    /// Snapshot a card.
    #[must_use]
    pub fn of(card: &Card) -> Self {
        Self {
            rank: card.face().rank,
            suit: card.face().suit,
            orientation: card.orientation(),
            label: card.face().label(),
        }
    }
}
