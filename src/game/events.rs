//! Game event history.
//!
//! Every state transition the display boundary cares about is appended
//! to an immutable event log. Cards appear as their canonical labels
//! (`"7C"`), never as live references, so the log can outlive the
//! table.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::meld::MeldKind;

use super::boundary::DrawChoice;

/// One entry in the game's ordered event feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        first_player: PlayerId,
    },
    Drew {
        player: PlayerId,
        from: DrawChoice,
    },
    /// The stock ran dry and the discard pile (minus its top) was
    /// shuffled back in.
    StockReplenished {
        cards: usize,
    },
    MeldLaid {
        player: PlayerId,
        kind: MeldKind,
        cards: Vec<String>,
    },
    MeldExtended {
        player: PlayerId,
        meld_index: usize,
        card: String,
    },
    /// An illegal meld or discard attempt; the turn continues.
    PlayRejected {
        player: PlayerId,
        reason: String,
    },
    Discarded {
        player: PlayerId,
        card: String,
    },
    RoundWon {
        winner: PlayerId,
        points: u32,
    },
    /// Stock and discard exhausted; nobody scores.
    RoundDrawn,
    GameWon {
        winner: PlayerId,
        score: u32,
    },
}
