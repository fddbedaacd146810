//! Card custody: the table.
//!
//! The `Table` owns every card in play and tracks which pile each one
//! sits in. Cards live in an arena keyed by [`CardId`]; piles are
//! ordered id lists. "Moving" a card is an index relocation, so a card
//! can never be duplicated by construction:
//!
//! - a card id is in **at most one** pile at any instant;
//! - removal operations return the id "in flight" — the card stays in
//!   the arena but has no location until the caller re-inserts it;
//! - inserting an id that is already located somewhere is a custody
//!   defect and panics.
//!
//! Operations that cannot proceed (empty source, rejected persistence)
//! fail with a typed error *before* any mutation, so a failed call
//! never leaves a pile partially moved.
//!
//! Index 0 of a pile is its top.

use rustc_hash::FxHashMap;

use crate::cards::{Card, CardFace, CardId, CardView, Persistence};
use crate::core::compare::ComparePolicy;
use crate::core::error::GameError;
use crate::core::rng::GameRng;

use super::pile::{InsertAt, PileConfig, PileId};

#[derive(Clone, Debug)]
struct PileState {
    config: PileConfig,
    /// Card ids from top (index 0) to bottom.
    order: Vec<CardId>,
}

/// Owns all cards and piles; every custody mutation goes through here.
#[derive(Clone, Debug, Default)]
pub struct Table {
    cards: FxHashMap<CardId, Card>,
    /// Current pile of each card. Absent = in flight.
    locations: FxHashMap<CardId, PileId>,
    piles: FxHashMap<PileId, PileState>,
    next_card: u32,
    next_pile: u16,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Piles ===

    /// Create a pile with the given configuration.
    pub fn create_pile(&mut self, config: PileConfig) -> PileId {
        let id = PileId(self.next_pile);
        self.next_pile += 1;
        self.piles.insert(
            id,
            PileState {
                config,
                order: Vec::new(),
            },
        );
        id
    }

    /// Remove an empty pile.
    ///
    /// Panics if the pile still holds cards; dropping a populated pile
    /// would lose custody of them.
    pub fn remove_pile(&mut self, pile: PileId) {
        if let Some(state) = self.piles.get(&pile) {
            assert!(
                state.order.is_empty(),
                "{pile} still holds {} card(s)",
                state.order.len()
            );
            self.piles.remove(&pile);
        }
    }

    /// Get a pile's configuration.
    pub fn config(&self, pile: PileId) -> Result<&PileConfig, GameError> {
        Ok(&self.state(pile)?.config)
    }

    // === Card creation ===

    /// Create a brand-new card at the bottom of a pile.
    ///
    /// The pile's persistence filter applies exactly as it does for
    /// [`add`](Self::add).
    pub fn spawn_card(
        &mut self,
        pile: PileId,
        face: CardFace,
        persistence: Persistence,
    ) -> Result<CardId, GameError> {
        // Acceptance first: a rejected spawn leaves no trace.
        let state = self.state(pile)?;
        if !state.config.accepts.accepts(persistence) {
            return Err(GameError::PersistenceRejected {
                pile,
                card: face,
                persistence,
            });
        }
        let orientation = state.config.default_orientation;

        let id = CardId(self.next_card);
        self.next_card += 1;

        let mut card = Card::new(face, persistence);
        if let Some(orientation) = orientation {
            card.set_orientation(orientation);
        }

        self.cards.insert(id, card);
        self.locations.insert(id, pile);
        self.state_mut(pile)?.order.push(id);

        Ok(id)
    }

    // === Custody transfers ===

    /// Insert an in-flight card into a pile.
    ///
    /// Fails with `PersistenceRejected` if the pile's filter excludes
    /// the card; applies the pile's default orientation unless the
    /// pile is configured as-is. Panics if the card is already located
    /// in some pile — custody requires remove-then-insert.
    pub fn add(&mut self, card: CardId, pile: PileId, at: InsertAt) -> Result<(), GameError> {
        let (face, persistence) = {
            let c = self.cards.get(&card).ok_or(GameError::CardNotFound(card))?;
            (c.face(), c.persistence())
        };

        let state = self.state(pile)?;
        if !state.config.accepts.accepts(persistence) {
            return Err(GameError::PersistenceRejected {
                pile,
                card: face,
                persistence,
            });
        }

        if let Some(current) = self.locations.get(&card) {
            panic!("{card} is already in {current}; remove it before inserting");
        }

        let orientation = state.config.default_orientation;
        if let Some(orientation) = orientation {
            if let Some(c) = self.cards.get_mut(&card) {
                c.set_orientation(orientation);
            }
        }

        self.locations.insert(card, pile);
        let order = &mut self.state_mut(pile)?.order;
        let index = match at {
            InsertAt::Top => 0,
            InsertAt::Bottom => order.len(),
            InsertAt::Index(i) => i.min(order.len()),
        };
        order.insert(index, card);

        Ok(())
    }

    /// Atomically relocate a located card to another pile.
    ///
    /// Acceptance is checked before the card leaves its source, so a
    /// rejected move leaves the source pile untouched.
    pub fn move_to(&mut self, card: CardId, dst: PileId, at: InsertAt) -> Result<(), GameError> {
        let (face, persistence) = {
            let c = self.cards.get(&card).ok_or(GameError::CardNotFound(card))?;
            (c.face(), c.persistence())
        };
        let src = *self
            .locations
            .get(&card)
            .ok_or(GameError::CardNotFound(card))?;

        if !self.state(dst)?.config.accepts.accepts(persistence) {
            return Err(GameError::PersistenceRejected {
                pile: dst,
                card: face,
                persistence,
            });
        }

        self.detach(card, src)?;
        self.add(card, dst, at)
    }

    /// Remove and return the top card.
    pub fn remove_top(&mut self, pile: PileId) -> Result<CardId, GameError> {
        self.remove_at(pile, 0)
    }

    /// Remove and return the card at `index` (0 = top).
    ///
    /// Fails with `EmptyPile` if the pile is empty or the index is out
    /// of range.
    pub fn remove_at(&mut self, pile: PileId, index: usize) -> Result<CardId, GameError> {
        let order = &mut self.state_mut(pile)?.order;
        if index >= order.len() {
            return Err(GameError::EmptyPile);
        }
        let card = order.remove(index);
        self.locations.remove(&card);
        Ok(card)
    }

    /// Remove the first card (in pile order) that **matches** the
    /// target under the policy.
    ///
    /// Absence is `Ok(None)`, not an error: callers poll this until no
    /// match remains.
    pub fn remove_card(
        &mut self,
        pile: PileId,
        target: &CardFace,
        policy: &ComparePolicy,
    ) -> Result<Option<CardId>, GameError> {
        let index = self.find_first(pile, target, policy, /* exact */ false)?;
        match index {
            Some(i) => Ok(Some(self.remove_at(pile, i)?)),
            None => Ok(None),
        }
    }

    /// Remove the first card (in pile order) **equal** to the target
    /// under the policy.
    ///
    /// By-value lookup for reconciliation; absence is `Ok(None)`.
    pub fn remove_exact(
        &mut self,
        pile: PileId,
        target: &CardFace,
        policy: &ComparePolicy,
    ) -> Result<Option<CardId>, GameError> {
        let index = self.find_first(pile, target, policy, /* exact */ true)?;
        match index {
            Some(i) => Ok(Some(self.remove_at(pile, i)?)),
            None => Ok(None),
        }
    }

    /// Move every card matching the target from `src` to the bottom of
    /// `dst`, preserving their relative order.
    ///
    /// Acceptance is pre-checked for every match before anything
    /// leaves `src`; on rejection nothing moves. Zero matches is
    /// `Ok(0)`, not an error.
    pub fn move_all_matching(
        &mut self,
        src: PileId,
        dst: PileId,
        target: &CardFace,
        policy: &ComparePolicy,
    ) -> Result<usize, GameError> {
        let dst_config = self.state(dst)?.config.clone();

        let mut matched = Vec::new();
        for &id in &self.state(src)?.order {
            let face = self.cards[&id].face();
            if policy.matches(&face, target)? {
                matched.push(id);
            }
        }
        for &id in &matched {
            let card = &self.cards[&id];
            if !dst_config.accepts.accepts(card.persistence()) {
                return Err(GameError::PersistenceRejected {
                    pile: dst,
                    card: card.face(),
                    persistence: card.persistence(),
                });
            }
        }

        for &id in &matched {
            self.detach(id, src)?;
            self.add(id, dst, InsertAt::Bottom)?;
        }
        Ok(matched.len())
    }

    /// Transfer the entirety of `src` to the bottom of `dst`, in source
    /// order, leaving `src` empty.
    ///
    /// Acceptance is pre-checked for every card; on rejection nothing
    /// moves.
    pub fn move_all_to_bottom(&mut self, dst: PileId, src: PileId) -> Result<usize, GameError> {
        if dst == src {
            return Ok(0);
        }

        let dst_config = self.state(dst)?.config.clone();
        let source_order = self.state(src)?.order.clone();

        for &card in &source_order {
            let c = self.cards.get(&card).ok_or(GameError::CardNotFound(card))?;
            if !dst_config.accepts.accepts(c.persistence()) {
                return Err(GameError::PersistenceRejected {
                    pile: dst,
                    card: c.face(),
                    persistence: c.persistence(),
                });
            }
        }

        self.state_mut(src)?.order.clear();
        for &card in &source_order {
            if let Some(orientation) = dst_config.default_orientation {
                if let Some(c) = self.cards.get_mut(&card) {
                    c.set_orientation(orientation);
                }
            }
            self.locations.insert(card, dst);
        }
        self.state_mut(dst)?.order.extend(source_order.iter().copied());

        Ok(source_order.len())
    }

    // === Reordering ===

    /// Shuffle a pile uniformly at random.
    pub fn shuffle(&mut self, pile: PileId, rng: &mut GameRng) -> Result<(), GameError> {
        let order = &mut self.state_mut(pile)?.order;
        rng.shuffle(order);
        Ok(())
    }

    /// Stable-sort a pile by the policy's ordering.
    ///
    /// Stability means that after a policy change, any visible
    /// reordering is attributable only to the attribute that changed.
    pub fn sort(&mut self, pile: PileId, policy: &ComparePolicy) -> Result<(), GameError> {
        if !policy.enabled() {
            return Err(GameError::IllegalComparison);
        }

        let Table { cards, piles, .. } = self;
        let state = piles.get_mut(&pile).ok_or(GameError::UnknownPile(pile))?;
        state.order.sort_by(|a, b| {
            let fa = cards[a].face();
            let fb = cards[b].face();
            // Infallible here: the policy was checked enabled above.
            policy.compare(&fa, &fb).unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(())
    }

    // === Orientation ===

    /// Turn every card in the pile face up. Order and custody unchanged.
    pub fn reveal_all(&mut self, pile: PileId) -> Result<(), GameError> {
        self.orient_all(pile, crate::cards::Orientation::FaceUp)
    }

    /// Turn every card in the pile face down. Order and custody unchanged.
    pub fn hide_all(&mut self, pile: PileId) -> Result<(), GameError> {
        self.orient_all(pile, crate::cards::Orientation::FaceDown)
    }

    /// Flip a single card over.
    pub fn flip(&mut self, card: CardId) -> Result<(), GameError> {
        self.cards
            .get_mut(&card)
            .ok_or(GameError::CardNotFound(card))?
            .flip();
        Ok(())
    }

    /// Set a single card's orientation.
    pub fn set_orientation(
        &mut self,
        card: CardId,
        orientation: crate::cards::Orientation,
    ) -> Result<(), GameError> {
        self.cards
            .get_mut(&card)
            .ok_or(GameError::CardNotFound(card))?
            .set_orientation(orientation);
        Ok(())
    }

    // === Reads ===

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, card: CardId) -> Option<&Card> {
        self.cards.get(&card)
    }

    /// Get a card's face by id.
    #[must_use]
    pub fn face(&self, card: CardId) -> Option<CardFace> {
        self.cards.get(&card).map(Card::face)
    }

    /// Card ids in a pile, top (index 0) to bottom. Empty for unknown
    /// piles.
    #[must_use]
    pub fn cards_in(&self, pile: PileId) -> &[CardId] {
        self.piles.get(&pile).map_or(&[], |s| s.order.as_slice())
    }

    /// Faces in a pile, top to bottom.
    #[must_use]
    pub fn faces_in(&self, pile: PileId) -> Vec<CardFace> {
        self.cards_in(pile)
            .iter()
            .filter_map(|&id| self.face(id))
            .collect()
    }

    /// The top card of a pile, if any.
    #[must_use]
    pub fn top(&self, pile: PileId) -> Option<CardId> {
        self.cards_in(pile).first().copied()
    }

    /// Number of cards in a pile.
    #[must_use]
    pub fn len(&self, pile: PileId) -> usize {
        self.cards_in(pile).len()
    }

    /// Check whether a pile is empty.
    #[must_use]
    pub fn is_empty(&self, pile: PileId) -> bool {
        self.cards_in(pile).is_empty()
    }

    /// The pile a card currently sits in; `None` while in flight.
    #[must_use]
    pub fn location_of(&self, card: CardId) -> Option<PileId> {
        self.locations.get(&card).copied()
    }

    /// Total cards in the arena, located or in flight.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Number of located cards (excludes in-flight ids).
    #[must_use]
    pub fn located_cards(&self) -> usize {
        self.locations.len()
    }

    /// Ordered snapshot of a pile for the display boundary.
    #[must_use]
    pub fn snapshot(&self, pile: PileId) -> Vec<CardView> {
        self.cards_in(pile)
            .iter()
            .filter_map(|id| self.cards.get(id))
            .map(CardView::of)
            .collect()
    }

    // === Internals ===

    fn state(&self, pile: PileId) -> Result<&PileState, GameError> {
        self.piles.get(&pile).ok_or(GameError::UnknownPile(pile))
    }

    fn state_mut(&mut self, pile: PileId) -> Result<&mut PileState, GameError> {
        self.piles.get_mut(&pile).ok_or(GameError::UnknownPile(pile))
    }

    fn detach(&mut self, card: CardId, pile: PileId) -> Result<(), GameError> {
        let order = &mut self.state_mut(pile)?.order;
        order.retain(|&c| c != card);
        self.locations.remove(&card);
        Ok(())
    }

    fn orient_all(
        &mut self,
        pile: PileId,
        orientation: crate::cards::Orientation,
    ) -> Result<(), GameError> {
        let order = self.state(pile)?.order.clone();
        for card in order {
            if let Some(c) = self.cards.get_mut(&card) {
                c.set_orientation(orientation);
            }
        }
        Ok(())
    }

    fn find_first(
        &self,
        pile: PileId,
        target: &CardFace,
        policy: &ComparePolicy,
        exact: bool,
    ) -> Result<Option<usize>, GameError> {
        for (i, &id) in self.state(pile)?.order.iter().enumerate() {
            let face = self.cards[&id].face();
            let hit = if exact {
                policy.equals(&face, target)?
            } else {
                policy.matches(&face, target)?
            };
            if hit {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Orientation, Rank, Suit};
    use crate::core::compare::CompareOn;
    use crate::table::PileConfig;

    fn face(rank: Rank, suit: Suit) -> CardFace {
        CardFace::new(rank, suit)
    }

    fn policy() -> ComparePolicy {
        ComparePolicy::new(CompareOn::SuitAndRank)
    }

    #[test]
    fn test_spawn_and_read() {
        let mut table = Table::new();
        let stock = table.create_pile(PileConfig::stock());

        let a = table
            .spawn_card(stock, face(Rank::Ace, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let b = table
            .spawn_card(stock, face(Rank::Two, Suit::Clubs), Persistence::Permanent)
            .unwrap();

        assert_eq!(table.cards_in(stock), &[a, b]);
        assert_eq!(table.top(stock), Some(a));
        assert_eq!(table.len(stock), 2);
        assert_eq!(table.location_of(a), Some(stock));
        assert_eq!(table.total_cards(), 2);
    }

    #[test]
    fn test_insert_positions() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::scratch("s"));

        let a = table
            .spawn_card(pile, face(Rank::Ace, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let b = table
            .spawn_card(pile, face(Rank::Two, Suit::Clubs), Persistence::Permanent)
            .unwrap();

        let scratch = table.create_pile(PileConfig::scratch("staging"));

        // Spawn appends at the bottom: [a, b].
        let c = table
            .spawn_card(scratch, face(Rank::Three, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let d = table
            .spawn_card(scratch, face(Rank::Four, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let e = table
            .spawn_card(scratch, face(Rank::Five, Suit::Clubs), Persistence::Permanent)
            .unwrap();

        table.move_to(c, pile, InsertAt::Top).unwrap();
        assert_eq!(table.cards_in(pile), &[c, a, b]);

        table.move_to(d, pile, InsertAt::Index(1)).unwrap();
        assert_eq!(table.cards_in(pile), &[c, d, a, b]);

        // Out-of-range index clamps to bottom.
        table.move_to(e, pile, InsertAt::Index(99)).unwrap();
        assert_eq!(table.cards_in(pile), &[c, d, a, b, e]);
    }

    #[test]
    fn test_remove_top_empty_fails() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::stock());

        assert!(matches!(table.remove_top(pile), Err(GameError::EmptyPile)));
        assert!(matches!(table.remove_at(pile, 3), Err(GameError::EmptyPile)));
    }

    #[test]
    fn test_persistence_rejection_is_atomic() {
        let mut table = Table::new();
        let scratch = table.create_pile(PileConfig::scratch("s"));
        let hand = table.create_pile(PileConfig::hand("h"));

        let lookup = table
            .spawn_card(scratch, face(Rank::Ace, Suit::Clubs), Persistence::Temporary)
            .unwrap();

        // A rejected move leaves the source untouched.
        let err = table.move_to(lookup, hand, InsertAt::Top);
        assert!(matches!(err, Err(GameError::PersistenceRejected { .. })));
        assert_eq!(table.location_of(lookup), Some(scratch));
        assert_eq!(table.len(scratch), 1);
        assert!(table.is_empty(hand));
    }

    #[test]
    #[should_panic(expected = "already in")]
    fn test_double_insert_panics() {
        let mut table = Table::new();
        let a_pile = table.create_pile(PileConfig::scratch("a"));
        let b_pile = table.create_pile(PileConfig::scratch("b"));

        let card = table
            .spawn_card(a_pile, face(Rank::Ace, Suit::Clubs), Persistence::Permanent)
            .unwrap();

        // Located card inserted without removal: custody defect.
        table.add(card, b_pile, InsertAt::Top).unwrap();
    }

    #[test]
    fn test_remove_card_matches_first_in_pile_order() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::scratch("s"));

        let seven_c = table
            .spawn_card(pile, face(Rank::Seven, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let seven_h = table
            .spawn_card(pile, face(Rank::Seven, Suit::Hearts), Persistence::Permanent)
            .unwrap();

        // Under rank-only, both match; pile order decides.
        let rank_only = ComparePolicy::new(CompareOn::RankOnly);
        let target = face(Rank::Seven, Suit::Spades);

        let first = table.remove_card(pile, &target, &rank_only).unwrap();
        assert_eq!(first, Some(seven_c));
        let second = table.remove_card(pile, &target, &rank_only).unwrap();
        assert_eq!(second, Some(seven_h));
        let third = table.remove_card(pile, &target, &rank_only).unwrap();
        assert_eq!(third, None);
    }

    #[test]
    fn test_remove_exact_ignores_match_or() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::scratch("s"));

        table
            .spawn_card(pile, face(Rank::Seven, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let four_d = table
            .spawn_card(pile, face(Rank::Four, Suit::Diamonds), Persistence::Permanent)
            .unwrap();

        // 7C matches 4C by suit, but remove_exact wants rank AND suit.
        let target = face(Rank::Four, Suit::Diamonds);
        let found = table.remove_exact(pile, &target, &policy()).unwrap();
        assert_eq!(found, Some(four_d));
    }

    #[test]
    fn test_move_all_matching_preserves_order() {
        let mut table = Table::new();
        let src = table.create_pile(PileConfig::scratch("src"));
        let dst = table.create_pile(PileConfig::scratch("dst"));

        let j1 = table
            .spawn_card(src, CardFace::joker(), Persistence::Permanent)
            .unwrap();
        let ace = table
            .spawn_card(src, face(Rank::Ace, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let j2 = table
            .spawn_card(src, CardFace::joker(), Persistence::Permanent)
            .unwrap();

        let moved = table
            .move_all_matching(src, dst, &CardFace::joker(), &policy())
            .unwrap();

        assert_eq!(moved, 2);
        assert_eq!(table.cards_in(dst), &[j1, j2]);
        assert_eq!(table.cards_in(src), &[ace]);
    }

    #[test]
    fn test_move_all_to_bottom() {
        let mut table = Table::new();
        let src = table.create_pile(PileConfig::scratch("src"));
        let dst = table.create_pile(PileConfig::scratch("dst"));

        let a = table
            .spawn_card(dst, face(Rank::Ace, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let b = table
            .spawn_card(src, face(Rank::Two, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let c = table
            .spawn_card(src, face(Rank::Three, Suit::Clubs), Persistence::Permanent)
            .unwrap();

        let moved = table.move_all_to_bottom(dst, src).unwrap();

        assert_eq!(moved, 2);
        assert!(table.is_empty(src));
        assert_eq!(table.cards_in(dst), &[a, b, c]);
        assert_eq!(table.location_of(b), Some(dst));
    }

    #[test]
    fn test_move_all_matching_rejection_moves_nothing() {
        let mut table = Table::new();
        let src = table.create_pile(PileConfig::scratch("src"));
        let hand = table.create_pile(PileConfig::hand("h"));

        let card = table
            .spawn_card(src, face(Rank::Seven, Suit::Clubs), Persistence::Temporary)
            .unwrap();

        let target = face(Rank::Seven, Suit::Spades);
        let rank_only = ComparePolicy::new(CompareOn::RankOnly);
        let err = table.move_all_matching(src, hand, &target, &rank_only);
        assert!(matches!(err, Err(GameError::PersistenceRejected { .. })));

        // The rejected card never left its pile, let alone custody.
        assert_eq!(table.location_of(card), Some(src));
        assert_eq!(table.cards_in(src), &[card]);
        assert!(table.is_empty(hand));
        assert_eq!(table.located_cards(), table.total_cards());
    }

    #[test]
    fn test_move_all_to_bottom_rejection_moves_nothing() {
        let mut table = Table::new();
        let src = table.create_pile(PileConfig::scratch("src"));
        let hand = table.create_pile(PileConfig::hand("h"));

        table
            .spawn_card(src, face(Rank::Ace, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        table
            .spawn_card(src, face(Rank::Two, Suit::Clubs), Persistence::Temporary)
            .unwrap();

        let err = table.move_all_to_bottom(hand, src);
        assert!(matches!(err, Err(GameError::PersistenceRejected { .. })));
        // The acceptable first card did not move either.
        assert_eq!(table.len(src), 2);
        assert!(table.is_empty(hand));
    }

    #[test]
    fn test_sort_is_stable_and_policy_driven() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::scratch("s"));

        let seven_h = table
            .spawn_card(pile, face(Rank::Seven, Suit::Hearts), Persistence::Permanent)
            .unwrap();
        let two_s = table
            .spawn_card(pile, face(Rank::Two, Suit::Spades), Persistence::Permanent)
            .unwrap();
        let seven_c = table
            .spawn_card(pile, face(Rank::Seven, Suit::Clubs), Persistence::Permanent)
            .unwrap();

        // Rank-only: the two sevens tie and retain insertion order.
        table.sort(pile, &ComparePolicy::new(CompareOn::RankOnly)).unwrap();
        assert_eq!(table.cards_in(pile), &[two_s, seven_h, seven_c]);

        // Rank-then-suit breaks the tie.
        table.sort(pile, &policy()).unwrap();
        assert_eq!(table.cards_in(pile), &[two_s, seven_c, seven_h]);
    }

    #[test]
    fn test_sort_disabled_policy_fails() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::scratch("s"));

        let err = table.sort(pile, &ComparePolicy::new(CompareOn::Disabled));
        assert!(matches!(err, Err(GameError::IllegalComparison)));
    }

    #[test]
    fn test_reveal_and_hide_all() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::scratch("s"));

        let a = table
            .spawn_card(pile, face(Rank::Ace, Suit::Clubs), Persistence::Permanent)
            .unwrap();
        let b = table
            .spawn_card(pile, face(Rank::Two, Suit::Clubs), Persistence::Permanent)
            .unwrap();

        table.reveal_all(pile).unwrap();
        for id in [a, b] {
            assert_eq!(table.get(id).unwrap().orientation(), Orientation::FaceUp);
        }

        table.hide_all(pile).unwrap();
        for id in [a, b] {
            assert_eq!(table.get(id).unwrap().orientation(), Orientation::FaceDown);
        }

        // Order untouched.
        assert_eq!(table.cards_in(pile), &[a, b]);
    }

    #[test]
    fn test_snapshot_reports_orientation_and_label() {
        let mut table = Table::new();
        let discard = table.create_pile(PileConfig::discard());
        let stock = table.create_pile(PileConfig::stock());

        let card = table
            .spawn_card(stock, face(Rank::Queen, Suit::Hearts), Persistence::Permanent)
            .unwrap();
        table.move_to(card, discard, InsertAt::Top).unwrap();

        let snap = table.snapshot(discard);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].label, "QH");
        // Discard turns cards face up on insert.
        assert_eq!(snap[0].orientation, Orientation::FaceUp);
    }

    #[test]
    fn test_shuffle_preserves_custody() {
        let mut table = Table::new();
        let pile = table.create_pile(PileConfig::stock());

        let mut ids = Vec::new();
        for rank in crate::cards::PLAYING_RANKS {
            ids.push(
                table
                    .spawn_card(pile, face(rank, Suit::Spades), Persistence::Permanent)
                    .unwrap(),
            );
        }

        let mut rng = GameRng::new(7);
        table.shuffle(pile, &mut rng).unwrap();

        let mut after: Vec<_> = table.cards_in(pile).to_vec();
        assert_ne!(after, ids);
        after.sort_by_key(|c| c.raw());
        assert_eq!(after, ids);
        for &id in &ids {
            assert_eq!(table.location_of(id), Some(pile));
        }
    }
}
