//! Standard 54-card decks and deck integrity reconciliation.
//!
//! A [`Deck`] is two piles plus a face list: the deck pile holding the
//! live cards, a template pile of reference cards that never enter
//! play, and the ordered template faces used for reconciliation. A
//! fresh deck holds the 52 playing cards (each suit in rank order) and
//! two jokers.
//!
//! ## Validation
//!
//! [`Deck::validate`] reconciles the live pile against the template by
//! draining it into a scratch pile and pulling each template face back
//! by value. Faces that cannot be pulled are **missing**; cards left in
//! the scratch afterwards are **strays**. Strays are returned to the
//! deck before the error surfaces, so the table never loses custody of
//! a card, even a foreign one.

use tracing::debug;

use crate::cards::{CardFace, Persistence, PLAYING_RANKS, PLAYING_SUITS};
use crate::core::compare::ComparePolicy;
use crate::core::error::GameError;
use crate::table::{InsertAt, PileConfig, PileId, Table};

/// Jokers in a fresh deck.
pub const JOKERS_PER_DECK: usize = 2;

/// Total cards in a fresh deck, jokers included.
pub const CARDS_PER_DECK: usize = 52 + JOKERS_PER_DECK;

/// A boxed deck: live pile, template pile, and the reference face list.
#[derive(Clone, Debug)]
pub struct Deck {
    name: String,
    pile: PileId,
    template_pile: PileId,
    template: Vec<CardFace>,
}

impl Deck {
    /// Open a fresh deck on the table.
    ///
    /// Creates the deck and template piles, spawns the 54 template
    /// faces into both (template cards in the template pile, live
    /// copies in the deck pile), and returns the handle.
    pub fn open(table: &mut Table, name: impl Into<String>) -> Result<Self, GameError> {
        let name = name.into();
        let pile = table.create_pile(PileConfig::deck(name.clone()));
        let template_pile = table.create_pile(PileConfig::template(format!("{name}-template")));

        let template = fresh_faces();
        for &face in &template {
            table.spawn_card(template_pile, face, Persistence::Template)?;
            table.spawn_card(pile, face, Persistence::Permanent)?;
        }

        debug!(deck = %name, cards = template.len(), "opened deck");

        Ok(Self {
            name,
            pile,
            template_pile,
            template,
        })
    }

    /// The live pile.
    #[must_use]
    pub fn pile(&self) -> PileId {
        self.pile
    }

    /// The deck's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pile holding the reference cards.
    #[must_use]
    pub fn template_pile(&self) -> PileId {
        self.template_pile
    }

    /// The reference faces, in template order.
    #[must_use]
    pub fn template_faces(&self) -> &[CardFace] {
        &self.template
    }

    /// Reconcile the live pile against the template.
    ///
    /// On success the deck pile ends up in template order. On failure
    /// the error reports every missing face and every stray card; the
    /// strays are back in the deck pile (below the reconciled cards)
    /// when the error returns.
    pub fn validate(&self, table: &mut Table, policy: &ComparePolicy) -> Result<(), GameError> {
        // Reconciliation needs by-value lookups; fail before draining
        // so a disabled policy leaves the deck untouched.
        if !policy.enabled() {
            return Err(GameError::IllegalComparison);
        }

        let scratch = table.create_pile(PileConfig::scratch(format!("{}-audit", self.name)));
        table.move_all_to_bottom(scratch, self.pile)?;

        let mut missing = Vec::new();
        for face in &self.template {
            match table.remove_exact(scratch, face, policy)? {
                Some(card) => table.add(card, self.pile, InsertAt::Bottom)?,
                None => missing.push(*face),
            }
        }

        let strays: Vec<CardFace> = table.faces_in(scratch);
        table.move_all_to_bottom(self.pile, scratch)?;
        table.remove_pile(scratch);

        if missing.is_empty() && strays.is_empty() {
            debug!(deck = %self.name, "deck validated");
            Ok(())
        } else {
            Err(GameError::IntegrityViolation { missing, strays })
        }
    }
}

/// The 54 faces of a fresh deck: each suit in rank order, then the
/// jokers.
#[must_use]
pub fn fresh_faces() -> Vec<CardFace> {
    let mut faces = Vec::with_capacity(CARDS_PER_DECK);
    for suit in PLAYING_SUITS {
        for rank in PLAYING_RANKS {
            faces.push(CardFace::new(rank, suit));
        }
    }
    for _ in 0..JOKERS_PER_DECK {
        faces.push(CardFace::joker());
    }
    faces
}
