//! Engine error taxonomy.
//!
//! Structural errors (`IntegrityViolation`, `PersistenceRejected`) are
//! always propagated; player-shaped errors (`InvalidMeld`) are caught
//! at the turn loop and re-prompted without ending the round.

use thiserror::Error;

use crate::cards::{CardFace, CardId};
use crate::table::PileId;

/// Errors raised by the custody core and game loop.
#[derive(Debug, Error)]
pub enum GameError {
    /// Pop/peek on an empty pile, or an index past the end.
    #[error("no cards available")]
    EmptyPile,

    /// An operation addressed a card id the table does not hold.
    #[error("card {0} not found")]
    CardNotFound(CardId),

    /// An operation addressed a pile id the table does not hold.
    #[error("pile {0} not found")]
    UnknownPile(PileId),

    /// Insertion of a card whose persistence tag the pile rejects.
    #[error("pile {pile} does not accept {card} ({persistence:?} persistence)")]
    PersistenceRejected {
        pile: PileId,
        card: CardFace,
        persistence: crate::cards::Persistence,
    },

    /// Deck reconciliation failed; the deck can no longer be trusted.
    #[error("deck validation failed; missing: {}; strays: {}",
        format_faces(missing), format_faces(strays))]
    IntegrityViolation {
        missing: Vec<CardFace>,
        strays: Vec<CardFace>,
    },

    /// A comparison was attempted while the compare policy is disabled.
    #[error("comparisons are disabled")]
    IllegalComparison,

    /// A candidate group is neither a Set nor a Run, or an extension
    /// does not fit. Recoverable: the turn loop re-prompts.
    #[error("invalid meld: {0}")]
    InvalidMeld(&'static str),
}

fn format_faces(faces: &[CardFace]) -> String {
    if faces.is_empty() {
        return "none".to_string();
    }
    faces
        .iter()
        .map(CardFace::label)
        .collect::<Vec<_>>()
        .join(" ")
}
