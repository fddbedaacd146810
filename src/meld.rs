//! Meld classification: Sets and Runs.
//!
//! A candidate group of faces is classified Set-first: three or more
//! cards of one rank make a Set; otherwise three or more cards of one
//! suit with contiguous rank order make a Run. Jokers never qualify.
//!
//! Classification is pure over faces. Laying the cards on the table is
//! the game layer's job; this module only answers "is this group
//! legal" and "does this card fit an existing group".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardFace;
use crate::core::error::GameError;

/// The two legal meld shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldKind {
    /// Three or more cards of the same rank.
    Set,
    /// Three or more cards of the same suit with contiguous ranks.
    Run,
}

/// Table rules for meld legality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldRules {
    /// Whether a Set may repeat a suit (possible with multiple decks).
    pub allow_duplicate_suits_in_set: bool,
}

impl Default for MeldRules {
    fn default() -> Self {
        Self {
            allow_duplicate_suits_in_set: true,
        }
    }
}

/// Classify a candidate group, Set-first.
///
/// Input order is irrelevant; a Run candidate is sorted internally.
pub fn classify(faces: &[CardFace], rules: &MeldRules) -> Result<MeldKind, GameError> {
    if faces.len() < 3 {
        return Err(GameError::InvalidMeld("a meld needs at least three cards"));
    }
    if faces.iter().any(|f| f.rank.is_joker()) {
        return Err(GameError::InvalidMeld("jokers cannot be melded"));
    }

    if is_set(faces, rules) {
        return Ok(MeldKind::Set);
    }
    if is_run(faces) {
        return Ok(MeldKind::Run);
    }
    Err(GameError::InvalidMeld("neither a set nor a run"))
}

/// Check whether a card fits an existing meld.
///
/// Sets take any card of the meld's rank (subject to the suit rule);
/// Runs take only the card one step below their lowest or one step
/// above their highest rank, in the same suit.
#[must_use]
pub fn can_extend(meld: &[CardFace], candidate: &CardFace, rules: &MeldRules) -> bool {
    if meld.is_empty() || candidate.rank.is_joker() {
        return false;
    }

    let mut extended: SmallVec<[CardFace; 8]> = SmallVec::from_slice(meld);
    extended.push(*candidate);

    match classify(meld, rules) {
        Ok(MeldKind::Set) => is_set(&extended, rules),
        Ok(MeldKind::Run) => is_run(&extended),
        Err(_) => false,
    }
}

fn is_set(faces: &[CardFace], rules: &MeldRules) -> bool {
    let rank = faces[0].rank;
    if !faces.iter().all(|f| f.rank == rank) {
        return false;
    }
    if rules.allow_duplicate_suits_in_set {
        return true;
    }
    let mut suits: SmallVec<[_; 8]> = faces.iter().map(|f| f.suit).collect();
    suits.sort_by_key(|s| s.priority());
    suits.windows(2).all(|w| w[0] != w[1])
}

fn is_run(faces: &[CardFace]) -> bool {
    let suit = faces[0].suit;
    if !faces.iter().all(|f| f.suit == suit) {
        return false;
    }
    let mut orders: SmallVec<[u8; 8]> = faces.iter().map(|f| f.rank.order()).collect();
    orders.sort_unstable();
    orders.windows(2).all(|w| w[1] == w[0] + 1)
}
