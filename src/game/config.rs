//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::meld::MeldRules;

/// Minimum players at the table.
pub const MIN_PLAYERS: usize = 3;

/// Maximum players at the table.
pub const MAX_PLAYERS: usize = 5;

/// Cumulative score that ends the game.
pub const DEFAULT_WINNING_SCORE: u32 = 100;

/// Configuration for a game of Rummy.
///
/// Deck count and hand size are derived from the table size: five
/// players play two decks at six cards each, smaller tables one deck
/// at seven.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RummyConfig {
    pub player_names: Vec<String>,
    pub winning_score: u32,
    pub seed: u64,
    pub meld_rules: MeldRules,
}

impl RummyConfig {
    /// Build a configuration with the standard winning score.
    ///
    /// Panics unless the table seats 3 to 5 players.
    #[must_use]
    pub fn new(player_names: Vec<String>, seed: u64) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_names.len()),
            "Rummy seats {MIN_PLAYERS}-{MAX_PLAYERS} players"
        );
        Self {
            player_names,
            winning_score: DEFAULT_WINNING_SCORE,
            seed,
            meld_rules: MeldRules::default(),
        }
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Decks in play: two for a full table, otherwise one.
    #[must_use]
    pub fn deck_count(&self) -> usize {
        if self.player_count() == MAX_PLAYERS {
            2
        } else {
            1
        }
    }

    /// Cards dealt to each hand.
    #[must_use]
    pub fn cards_per_hand(&self) -> usize {
        if self.player_count() == MAX_PLAYERS {
            6
        } else {
            7
        }
    }
}
