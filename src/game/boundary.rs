//! The input boundary.
//!
//! The engine never reads a console; it asks a [`PlayerInput`] for each
//! decision and hands it a [`TurnView`] snapshot to decide from. Every
//! method returns `Option`: `None` means the input source is exhausted
//! (quit, end of script) and the engine unwinds the game cleanly, never
//! mid-transfer.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::cards::CardView;
use crate::core::PlayerId;
use crate::meld::MeldKind;

/// Where to draw from at the start of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawChoice {
    Stock,
    Discard,
}

/// One meld-phase decision. The phase repeats until `Pass`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldChoice {
    /// Stop melding and move on to the discard.
    Pass,
    /// Lay a new meld from the given hand indices (0 = leftmost card).
    NewMeld(Vec<usize>),
    /// Add one hand card to a meld already on the table.
    Extend { hand_index: usize, meld_index: usize },
}

/// Snapshot of one meld on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldView {
    pub owner: PlayerId,
    pub kind: MeldKind,
    pub cards: Vec<CardView>,
}

/// Everything a player may see when deciding: their own hand, every
/// meld on the table, the discard top, and the stock size. Other hands
/// are not exposed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnView {
    pub player: PlayerId,
    pub name: String,
    pub hand: Vec<CardView>,
    pub melds: Vec<MeldView>,
    pub discard_top: Option<CardView>,
    pub stock_size: usize,
}

/// Decision source for one or more players.
pub trait PlayerInput {
    /// Pick a draw source. `None` quits the game.
    fn choose_draw(&mut self, view: &TurnView) -> Option<DrawChoice>;

    /// Pick a meld action; called repeatedly until `Pass`. `None`
    /// quits the game.
    fn choose_meld(&mut self, view: &TurnView) -> Option<MeldChoice>;

    /// Pick a hand index to discard. `None` quits the game.
    fn choose_discard(&mut self, view: &TurnView) -> Option<usize>;
}

/// Replays queued choices; for tests and demos.
///
/// With `fall_through_play` set, exhausted queues yield the simplest
/// legal play (draw from stock, pass the meld phase, discard the
/// leftmost card) instead of quitting, so a scripted opening can run
/// to a natural round end.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    draws: VecDeque<DrawChoice>,
    melds: VecDeque<MeldChoice>,
    discards: VecDeque<usize>,
    fall_through_play: bool,
}

impl ScriptedInput {
    /// An input source that quits once its queues run dry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An input source that keeps making the simplest legal play once
    /// its queues run dry.
    #[must_use]
    pub fn with_fall_through_play() -> Self {
        Self {
            fall_through_play: true,
            ..Self::default()
        }
    }

    /// Queue a draw choice.
    pub fn push_draw(&mut self, choice: DrawChoice) {
        self.draws.push_back(choice);
    }

    /// Queue a meld-phase choice.
    pub fn push_meld(&mut self, choice: MeldChoice) {
        self.melds.push_back(choice);
    }

    /// Queue a discard index.
    pub fn push_discard(&mut self, index: usize) {
        self.discards.push_back(index);
    }
}

impl PlayerInput for ScriptedInput {
    fn choose_draw(&mut self, _view: &TurnView) -> Option<DrawChoice> {
        match self.draws.pop_front() {
            Some(choice) => Some(choice),
            None if self.fall_through_play => Some(DrawChoice::Stock),
            None => None,
        }
    }

    fn choose_meld(&mut self, _view: &TurnView) -> Option<MeldChoice> {
        match self.melds.pop_front() {
            Some(choice) => Some(choice),
            None if self.fall_through_play => Some(MeldChoice::Pass),
            None => None,
        }
    }

    fn choose_discard(&mut self, _view: &TurnView) -> Option<usize> {
        match self.discards.pop_front() {
            Some(index) => Some(index),
            None if self.fall_through_play => Some(0),
            None => None,
        }
    }
}
