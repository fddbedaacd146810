//! Per-player table state.

use crate::table::{PileId, Table};

/// One player's seat: a name, a hand pile, and a running score.
///
/// Melds are not owned by the seat; once laid they belong to the table
/// and any player may extend them. The seat only tracks what stays
/// private.
#[derive(Clone, Debug)]
pub struct Seat {
    name: String,
    hand: PileId,
    score: u32,
}

impl Seat {
    pub(crate) fn new(name: String, hand: PileId) -> Self {
        Self {
            name,
            hand,
            score: 0,
        }
    }

    /// The player's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The hand pile.
    #[must_use]
    pub fn hand(&self) -> PileId {
        self.hand
    }

    /// Cumulative score across rounds.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Deadwood value of the current hand.
    #[must_use]
    pub fn hand_points(&self, table: &Table) -> u32 {
        table
            .faces_in(self.hand)
            .iter()
            .map(|f| f.rank.points())
            .sum()
    }
}
