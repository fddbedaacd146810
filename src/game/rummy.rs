//! The Rummy round and game loop.
//!
//! `Setup → Deal → Turn(draw → meld → discard) → … → Scoring →
//! (next round | game over)`.
//!
//! All card movement goes through the [`Table`], so the custody
//! invariant holds across the whole game: every card the decks
//! supplied is in exactly one pile at every step, and teardown proves
//! it by re-boxing and validating every deck.

use im::Vector;
use tracing::{debug, info, warn};

use crate::cards::{CardFace, CardView};
use crate::core::compare::ComparePolicy;
use crate::core::error::GameError;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::deck::Deck;
use crate::meld::{self, MeldKind};
use crate::table::{InsertAt, PileConfig, PileId, Table};

use super::boundary::{DrawChoice, MeldChoice, MeldView, PlayerInput, TurnView};
use super::config::RummyConfig;
use super::events::GameEvent;
use super::seat::Seat;

/// A meld lying on the table, open to extension by any player.
#[derive(Clone, Copy, Debug)]
pub struct TableMeld {
    pub pile: PileId,
    pub owner: PlayerId,
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A player went out and collected the other hands' deadwood.
    Won { winner: PlayerId, points: u32 },
    /// Stock and discard exhausted; nobody scores.
    Drawn,
    /// The input boundary quit mid-round.
    Abandoned,
}

/// How the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Won { winner: PlayerId, score: u32 },
    Abandoned,
}

/// Result of a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Play passes to the next player.
    Continue,
    RoundOver(RoundOutcome),
}

enum TurnEnd {
    Continue,
    HandEmpty,
    Exhausted,
    Quit,
}

/// A running game of Rummy.
pub struct RummyGame {
    config: RummyConfig,
    policy: ComparePolicy,
    table: Table,
    rng: GameRng,
    decks: Vec<Deck>,
    stock: PileId,
    discard: PileId,
    seats: PlayerMap<Seat>,
    melds: Vec<TableMeld>,
    history: Vector<GameEvent>,
    round: u32,
    turn: usize,
}

impl RummyGame {
    /// Set up the table: open the decks, box the jokers back up, and
    /// pour everything else into the stock.
    pub fn new(config: RummyConfig) -> Result<Self, GameError> {
        let policy = ComparePolicy::default();
        let mut table = Table::new();
        let rng = GameRng::new(config.seed);

        let stock = table.create_pile(PileConfig::stock());
        let discard = table.create_pile(PileConfig::discard());

        let mut decks = Vec::with_capacity(config.deck_count());
        for i in 0..config.deck_count() {
            let deck = Deck::open(&mut table, format!("deck-{i}"))?;
            // Rummy plays without jokers: everything but the jokers
            // goes to the stock, the jokers stay in the box face up.
            table.move_all_to_bottom(stock, deck.pile())?;
            table.move_all_matching(stock, deck.pile(), &CardFace::joker(), &policy)?;
            table.reveal_all(deck.pile())?;
            decks.push(deck);
        }

        let hands: Vec<PileId> = config
            .player_names
            .iter()
            .map(|name| table.create_pile(PileConfig::hand(format!("hand-{name}"))))
            .collect();
        let seats = PlayerMap::new(config.player_count(), |p| {
            Seat::new(config.player_names[p.index()].clone(), hands[p.index()])
        });

        info!(
            players = config.player_count(),
            decks = config.deck_count(),
            stock = table.len(stock),
            "table set up"
        );

        Ok(Self {
            config,
            policy,
            table,
            rng,
            decks,
            stock,
            discard,
            seats,
            melds: Vec::new(),
            history: Vector::new(),
            round: 0,
            turn: 0,
        })
    }

    // === Accessors ===

    /// The custody table.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The event feed, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// A player's seat.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> &Seat {
        &self.seats[player]
    }

    /// Rounds played or in progress.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The stock pile.
    #[must_use]
    pub fn stock(&self) -> PileId {
        self.stock
    }

    /// The discard pile.
    #[must_use]
    pub fn discard(&self) -> PileId {
        self.discard
    }

    /// Melds currently on the table.
    #[must_use]
    pub fn melds(&self) -> &[TableMeld] {
        &self.melds
    }

    fn player_count(&self) -> usize {
        self.seats.player_count()
    }

    fn first_player(&self) -> PlayerId {
        // Dealer rotation: the opening seat advances each round.
        PlayerId::new(((self.round.saturating_sub(1)) as usize % self.player_count()) as u8)
    }

    // === Round lifecycle ===

    /// Shuffle, deal, and flip the opening discard.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        self.round += 1;
        self.turn = 0;
        self.table.shuffle(self.stock, &mut self.rng)?;

        let first = self.first_player();
        for _ in 0..self.config.cards_per_hand() {
            for offset in 0..self.player_count() {
                let player = self.nth_from(first, offset);
                let card = self.table.remove_top(self.stock)?;
                self.table
                    .add(card, self.seats[player].hand(), InsertAt::Bottom)?;
            }
        }
        for player in PlayerId::all(self.player_count()) {
            self.table.sort(self.seats[player].hand(), &self.policy)?;
        }

        let opener = self.table.remove_top(self.stock)?;
        self.table.add(opener, self.discard, InsertAt::Top)?;

        info!(round = self.round, %first, "round started");
        self.push(GameEvent::RoundStarted {
            round: self.round,
            first_player: first,
        });
        Ok(())
    }

    /// The player whose turn comes next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.nth_from(self.first_player(), self.turn)
    }

    /// Play a single turn for the current player. Scoring is applied
    /// before a winning outcome returns.
    pub fn play_turn(&mut self, input: &mut dyn PlayerInput) -> Result<TurnOutcome, GameError> {
        let player = self.current_player();
        match self.take_turn(player, input)? {
            TurnEnd::Continue => {
                self.turn += 1;
                Ok(TurnOutcome::Continue)
            }
            TurnEnd::HandEmpty => {
                let points = self.score_round(player);
                Ok(TurnOutcome::RoundOver(RoundOutcome::Won {
                    winner: player,
                    points,
                }))
            }
            TurnEnd::Exhausted => {
                info!(round = self.round, "stock and discard exhausted");
                self.push(GameEvent::RoundDrawn);
                Ok(TurnOutcome::RoundOver(RoundOutcome::Drawn))
            }
            TurnEnd::Quit => {
                info!(round = self.round, "input exhausted, abandoning game");
                Ok(TurnOutcome::RoundOver(RoundOutcome::Abandoned))
            }
        }
    }

    /// Play one round to completion.
    pub fn play_round(&mut self, input: &mut dyn PlayerInput) -> Result<RoundOutcome, GameError> {
        loop {
            if let TurnOutcome::RoundOver(outcome) = self.play_turn(input)? {
                return Ok(outcome);
            }
        }
    }

    /// Play rounds until a player reaches the winning score or the
    /// input quits. The table is left reset (all cards in the stock)
    /// between rounds and after the final one.
    pub fn play_game(&mut self, input: &mut dyn PlayerInput) -> Result<GameOutcome, GameError> {
        loop {
            self.start_round()?;
            let outcome = self.play_round(input)?;
            self.reset_round()?;

            if matches!(outcome, RoundOutcome::Abandoned) {
                return Ok(GameOutcome::Abandoned);
            }

            // Game over is evaluated between rounds only.
            if let Some(winner) = self.champion() {
                let score = self.seats[winner].score();
                info!(%winner, score, "game over");
                self.push(GameEvent::GameWon { winner, score });
                return Ok(GameOutcome::Won { winner, score });
            }
        }
    }

    /// Return every card to the boxes it came from and prove none went
    /// missing.
    ///
    /// Consumes the game: reset, sort the stock, re-box round-robin,
    /// and validate each deck against its template. An
    /// [`GameError::IntegrityViolation`] halts teardown.
    pub fn teardown(mut self) -> Result<(), GameError> {
        self.reset_round()?;
        self.table.sort(self.stock, &self.policy)?;

        // Round-robin re-boxing: after the sort, duplicate faces sit
        // adjacent, so each deck receives one copy.
        while !self.table.is_empty(self.stock) {
            for deck in &self.decks {
                if self.table.is_empty(self.stock) {
                    break;
                }
                let card = self.table.remove_top(self.stock)?;
                self.table.add(card, deck.pile(), InsertAt::Bottom)?;
            }
        }

        for deck in &self.decks {
            deck.validate(&mut self.table, &self.policy)?;
        }
        info!(decks = self.decks.len(), "teardown complete, decks intact");
        Ok(())
    }

    /// Move every card outside the stock back into it.
    pub fn reset_round(&mut self) -> Result<(), GameError> {
        self.table.move_all_to_bottom(self.stock, self.discard)?;
        for player in PlayerId::all(self.player_count()) {
            let hand = self.seats[player].hand();
            self.table.move_all_to_bottom(self.stock, hand)?;
        }
        for meld in std::mem::take(&mut self.melds) {
            self.table.move_all_to_bottom(self.stock, meld.pile)?;
            self.table.remove_pile(meld.pile);
        }
        self.table.hide_all(self.stock)?;
        Ok(())
    }

    // === Turn phases ===

    fn take_turn(
        &mut self,
        player: PlayerId,
        input: &mut dyn PlayerInput,
    ) -> Result<TurnEnd, GameError> {
        match self.draw_phase(player, input)? {
            TurnEnd::Continue => {}
            end => return Ok(end),
        }
        match self.meld_phase(player, input)? {
            TurnEnd::Continue => {}
            end => return Ok(end),
        }
        self.discard_phase(player, input)
    }

    fn draw_phase(
        &mut self,
        player: PlayerId,
        input: &mut dyn PlayerInput,
    ) -> Result<TurnEnd, GameError> {
        if self.table.is_empty(self.stock) {
            if self.table.len(self.discard) > 1 {
                self.replenish_stock()?;
            } else {
                // Nothing left to reshuffle: one face-up card does not
                // make a game.
                return Ok(TurnEnd::Exhausted);
            }
        }

        let view = self.view_for(player);
        let Some(choice) = input.choose_draw(&view) else {
            return Ok(TurnEnd::Quit);
        };

        let hand = self.seats[player].hand();
        let drawn = match choice {
            DrawChoice::Discard if !self.table.is_empty(self.discard) => {
                self.table.remove_top(self.discard)?
            }
            DrawChoice::Discard => {
                self.push(GameEvent::PlayRejected {
                    player,
                    reason: "discard pile is empty".into(),
                });
                self.table.remove_top(self.stock)?
            }
            DrawChoice::Stock => self.table.remove_top(self.stock)?,
        };
        self.table.add(drawn, hand, InsertAt::Bottom)?;
        self.table.sort(hand, &self.policy)?;

        debug!(%player, ?choice, "drew");
        self.push(GameEvent::Drew {
            player,
            from: choice,
        });
        Ok(TurnEnd::Continue)
    }

    fn meld_phase(
        &mut self,
        player: PlayerId,
        input: &mut dyn PlayerInput,
    ) -> Result<TurnEnd, GameError> {
        loop {
            let hand = self.seats[player].hand();
            if self.table.is_empty(hand) {
                return Ok(TurnEnd::HandEmpty);
            }

            let view = self.view_for(player);
            let Some(choice) = input.choose_meld(&view) else {
                return Ok(TurnEnd::Quit);
            };

            match choice {
                MeldChoice::Pass => return Ok(TurnEnd::Continue),
                MeldChoice::NewMeld(indices) => self.try_new_meld(player, &indices),
                MeldChoice::Extend {
                    hand_index,
                    meld_index,
                } => self.try_extend(player, hand_index, meld_index),
            }?;
        }
    }

    fn try_new_meld(&mut self, player: PlayerId, indices: &[usize]) -> Result<(), GameError> {
        let hand = self.seats[player].hand();
        let hand_faces = self.table.faces_in(hand);

        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != indices.len() || sorted.iter().any(|&i| i >= hand_faces.len()) {
            self.reject(player, "meld indices out of range");
            return Ok(());
        }

        let faces: Vec<CardFace> = sorted.iter().map(|&i| hand_faces[i]).collect();
        let kind = match meld::classify(&faces, &self.config.meld_rules) {
            Ok(kind) => kind,
            Err(err) => {
                self.reject(player, &err.to_string());
                return Ok(());
            }
        };

        let pile = self
            .table
            .create_pile(PileConfig::meld(format!("meld-{}", self.melds.len())));
        // Highest index first so earlier removals do not shift later ones.
        for &i in sorted.iter().rev() {
            let card = self.table.remove_at(hand, i)?;
            self.table.add(card, pile, InsertAt::Top)?;
        }
        if kind == MeldKind::Run {
            self.table.sort(pile, &self.policy)?;
        }
        self.melds.push(TableMeld { pile, owner: player });

        let labels: Vec<String> = faces.iter().map(CardFace::label).collect();
        debug!(%player, ?kind, cards = ?labels, "meld laid");
        self.push(GameEvent::MeldLaid {
            player,
            kind,
            cards: labels,
        });
        Ok(())
    }

    fn try_extend(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        meld_index: usize,
    ) -> Result<(), GameError> {
        let hand = self.seats[player].hand();
        let hand_len = self.table.len(hand);
        if hand_index >= hand_len || meld_index >= self.melds.len() {
            self.reject(player, "extension indices out of range");
            return Ok(());
        }

        let meld_pile = self.melds[meld_index].pile;
        let meld_faces = self.table.faces_in(meld_pile);
        let candidate = self.table.faces_in(hand)[hand_index];

        if !meld::can_extend(&meld_faces, &candidate, &self.config.meld_rules) {
            self.reject(player, "card does not fit the meld");
            return Ok(());
        }

        let card = self.table.remove_at(hand, hand_index)?;
        self.table.add(card, meld_pile, InsertAt::Bottom)?;
        // Only a Run's ordering is rank-sensitive; a Set stays as laid.
        if matches!(
            meld::classify(&meld_faces, &self.config.meld_rules),
            Ok(MeldKind::Run)
        ) {
            self.table.sort(meld_pile, &self.policy)?;
        }

        debug!(%player, meld_index, card = %candidate, "meld extended");
        self.push(GameEvent::MeldExtended {
            player,
            meld_index,
            card: candidate.label(),
        });
        Ok(())
    }

    fn discard_phase(
        &mut self,
        player: PlayerId,
        input: &mut dyn PlayerInput,
    ) -> Result<TurnEnd, GameError> {
        let hand = self.seats[player].hand();
        loop {
            let view = self.view_for(player);
            let Some(index) = input.choose_discard(&view) else {
                return Ok(TurnEnd::Quit);
            };
            if index >= self.table.len(hand) {
                self.reject(player, "discard index out of range");
                continue;
            }

            let card = self.table.remove_at(hand, index)?;
            let label = self
                .table
                .face(card)
                .map(|f| f.label())
                .unwrap_or_default();
            self.table.add(card, self.discard, InsertAt::Top)?;

            debug!(%player, card = %label, "discarded");
            self.push(GameEvent::Discarded {
                player,
                card: label,
            });
            break;
        }

        if self.table.is_empty(hand) {
            Ok(TurnEnd::HandEmpty)
        } else {
            Ok(TurnEnd::Continue)
        }
    }

    // === Helpers ===

    /// Shuffle the discard pile, minus its visible top card, back into
    /// the stock.
    fn replenish_stock(&mut self) -> Result<(), GameError> {
        let top = self.table.remove_top(self.discard)?;
        let cards = self.table.move_all_to_bottom(self.stock, self.discard)?;
        self.table.hide_all(self.stock)?;
        self.table.shuffle(self.stock, &mut self.rng)?;
        self.table.add(top, self.discard, InsertAt::Top)?;

        info!(cards, "stock replenished from discard");
        self.push(GameEvent::StockReplenished { cards });
        Ok(())
    }

    fn score_round(&mut self, winner: PlayerId) -> u32 {
        let points: u32 = self
            .seats
            .iter()
            .filter(|&(p, _)| p != winner)
            .map(|(_, seat)| seat.hand_points(&self.table))
            .sum();
        self.seats[winner].add_score(points);

        info!(%winner, points, round = self.round, "round won");
        self.push(GameEvent::RoundWon { winner, points });
        points
    }

    fn champion(&self) -> Option<PlayerId> {
        self.seats
            .iter()
            .filter(|(_, seat)| seat.score() >= self.config.winning_score)
            .max_by_key(|(_, seat)| seat.score())
            .map(|(player, _)| player)
    }

    fn nth_from(&self, first: PlayerId, offset: usize) -> PlayerId {
        PlayerId::new(((first.index() + offset) % self.player_count()) as u8)
    }

    fn reject(&mut self, player: PlayerId, reason: &str) {
        warn!(%player, reason, "play rejected");
        self.push(GameEvent::PlayRejected {
            player,
            reason: reason.to_string(),
        });
    }

    fn push(&mut self, event: GameEvent) {
        self.history.push_back(event);
    }

    fn view_for(&self, player: PlayerId) -> TurnView {
        let seat = &self.seats[player];
        TurnView {
            player,
            name: seat.name().to_string(),
            hand: self.table.snapshot(seat.hand()),
            melds: self
                .melds
                .iter()
                .map(|m| MeldView {
                    owner: m.owner,
                    kind: meld::classify(
                        &self.table.faces_in(m.pile),
                        &self.config.meld_rules,
                    )
                    .unwrap_or(MeldKind::Set),
                    cards: self.table.snapshot(m.pile),
                })
                .collect(),
            discard_top: self
                .table
                .top(self.discard)
                .and_then(|id| self.table.get(id))
                .map(CardView::of),
            stock_size: self.table.len(self.stock),
        }
    }
}
