//! Card ranks.
//!
//! Ranks carry two orderings:
//! - **primary order**: Ace = 1 .. King = 13. Runs are checked against
//!   this order and never wrap around.
//! - **alternate order**: identical except Ace = 14, for games that
//!   treat the Ace as the highest card.
//!
//! The Joker sits outside both playing orders. It still reports order
//! values above the King so that full piles (which hold jokers at
//! teardown) sort deterministically.

use serde::{Deserialize, Serialize};

/// Rank of a standard playing card, plus the Joker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

/// The thirteen playing ranks, in primary order. Excludes the Joker.
pub const PLAYING_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

impl Rank {
    /// Primary order: Ace = 1 through King = 13.
    ///
    /// The Joker reports 14 so mixed piles sort deterministically, but
    /// run detection only ever consults orders 1..=13.
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Joker => 14,
        }
    }

    /// Alternate order: same as [`order`](Self::order) but Ace = 14.
    #[must_use]
    pub const fn alt_order(self) -> u8 {
        match self {
            Rank::Ace => 14,
            Rank::Joker => 15,
            other => other.order(),
        }
    }

    /// Scoring weight: face cards are worth 10, the Ace 1, numerals
    /// their own value, the Joker nothing.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Joker => 0,
            other => other.order() as u32,
        }
    }

    /// One-character short code (`A 2 3 4 5 6 7 8 9 T J Q K R`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Joker => 'R',
        }
    }

    /// Parse a short code, case-insensitively.
    #[must_use]
    pub fn from_code(code: char) -> Option<Rank> {
        let code = code.to_ascii_uppercase();
        PLAYING_RANKS
            .iter()
            .copied()
            .chain(std::iter::once(Rank::Joker))
            .find(|r| r.code() == code)
    }

    /// Check whether this is the Joker.
    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::Joker)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
