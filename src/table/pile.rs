//! Pile identity and configuration.
//!
//! Piles are uniform at the custody level; a [`PileConfig`] carries the
//! per-pile rules (default orientation on insert, persistence
//! acceptance) and a [`PileKind`] tag that the game layer uses to apply
//! pile-specific access conventions (draw from top, peek at top,
//! insert anywhere).

use serde::{Deserialize, Serialize};

use crate::cards::{Orientation, Persistence, PersistenceFilter};

/// Unique identifier for a pile held by a [`crate::table::Table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub u16);

impl PileId {
    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// Position for inserting a card into a pile. Index 0 is the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertAt {
    Top,
    Bottom,
    /// Insert at a specific index, clamped to the pile size.
    Index(usize),
}

/// What role a pile plays. The `Table` treats every kind identically;
/// the game layer drives access conventions off this tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileKind {
    /// A source deck ("the box" cards came from).
    Deck,
    /// The never-played reference population used for validation.
    Template,
    /// The face-down draw pile.
    Stock,
    /// The face-up pile of played cards.
    Discard,
    /// A player's hand.
    Hand,
    /// A Set or Run on the table.
    Meld,
    /// Short-lived working pile.
    Scratch,
}

/// Per-pile configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileConfig {
    pub name: String,
    pub kind: PileKind,
    /// Orientation applied to cards on insert; `None` leaves cards as-is.
    pub default_orientation: Option<Orientation>,
    /// Which persistence tags this pile accepts.
    pub accepts: PersistenceFilter,
}

impl PileConfig {
    /// A source deck: cards enter face down, live cards only.
    #[must_use]
    pub fn deck(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PileKind::Deck,
            default_orientation: Some(Orientation::FaceDown),
            accepts: PersistenceFilter::only(Persistence::Permanent),
        }
    }

    /// A template pile: reference cards only, never played.
    #[must_use]
    pub fn template(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PileKind::Template,
            default_orientation: Some(Orientation::FaceDown),
            accepts: PersistenceFilter::only(Persistence::Template),
        }
    }

    /// The stock: face-down draw pile.
    #[must_use]
    pub fn stock() -> Self {
        Self {
            name: "stock".into(),
            kind: PileKind::Stock,
            default_orientation: Some(Orientation::FaceDown),
            accepts: PersistenceFilter::only(Persistence::Permanent),
        }
    }

    /// The discard pile: cards enter face up.
    #[must_use]
    pub fn discard() -> Self {
        Self {
            name: "discard".into(),
            kind: PileKind::Discard,
            default_orientation: Some(Orientation::FaceUp),
            accepts: PersistenceFilter::only(Persistence::Permanent),
        }
    }

    /// A player's hand: orientation left as dealt.
    #[must_use]
    pub fn hand(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PileKind::Hand,
            default_orientation: None,
            accepts: PersistenceFilter::only(Persistence::Permanent),
        }
    }

    /// A meld on the table: cards enter face up.
    #[must_use]
    pub fn meld(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PileKind::Meld,
            default_orientation: Some(Orientation::FaceUp),
            accepts: PersistenceFilter::only(Persistence::Permanent),
        }
    }

    /// A scratch pile: accepts anything, touches nothing.
    #[must_use]
    pub fn scratch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PileKind::Scratch,
            default_orientation: None,
            accepts: PersistenceFilter::unrestricted(),
        }
    }
}
