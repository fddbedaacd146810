//! Card suits.
//!
//! `Na` is the placeholder suit carried by jokers. Suit priority is a
//! tertiary sort key only; no game rule in this crate ranks one suit
//! above another.

use serde::{Deserialize, Serialize};

/// Suit of a standard playing card. `Na` marks suitless cards (jokers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    Na,
}

/// The four playing suits, in priority order. Excludes `Na`.
pub const PLAYING_SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

impl Suit {
    /// Sort priority, alphabetical: Clubs < Diamonds < Hearts < Spades,
    /// with `Na` last.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
            Suit::Na => 4,
        }
    }

    /// One-character short code (`C D H S`, `-` for `Na`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Na => '-',
        }
    }

    /// Parse a short code, case-insensitively.
    #[must_use]
    pub fn from_code(code: char) -> Option<Suit> {
        let code = code.to_ascii_uppercase();
        PLAYING_SUITS
            .iter()
            .copied()
            .chain(std::iter::once(Suit::Na))
            .find(|s| s.code() == code)
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
