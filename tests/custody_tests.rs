//! Custody invariant tests: no sequence of pile operations may lose or
//! duplicate a card.

use proptest::prelude::*;

use rummy_engine::{
    CardFace, CompareOn, ComparePolicy, GameRng, InsertAt, PileConfig, Rank, Suit, Table,
};
use rummy_engine::cards::{Persistence, PLAYING_RANKS, PLAYING_SUITS};

fn seeded_table(piles: usize) -> (Table, Vec<rummy_engine::PileId>) {
    let mut table = Table::new();
    let pile_ids: Vec<_> = (0..piles)
        .map(|i| table.create_pile(PileConfig::scratch(format!("p{i}"))))
        .collect();

    // One full suit's worth of cards spread across the piles.
    for (i, rank) in PLAYING_RANKS.iter().enumerate() {
        for suit in PLAYING_SUITS {
            table
                .spawn_card(
                    pile_ids[i % piles],
                    CardFace::new(*rank, suit),
                    Persistence::Permanent,
                )
                .unwrap();
        }
    }
    (table, pile_ids)
}

fn assert_custody(table: &Table, piles: &[rummy_engine::PileId], expected: usize) {
    assert_eq!(table.total_cards(), expected);
    assert_eq!(table.located_cards(), expected);

    let spread: usize = piles.iter().map(|&p| table.len(p)).sum();
    assert_eq!(spread, expected);

    for &pile in piles {
        for &card in table.cards_in(pile) {
            assert_eq!(table.location_of(card), Some(pile));
        }
    }
}

#[derive(Clone, Debug)]
enum Op {
    MoveTop { src: usize, dst: usize },
    MoveAll { src: usize, dst: usize },
    Shuffle(usize),
    Sort(usize),
    Reveal(usize),
}

fn op_strategy(piles: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..piles, 0..piles).prop_map(|(src, dst)| Op::MoveTop { src, dst }),
        (0..piles, 0..piles).prop_map(|(src, dst)| Op::MoveAll { src, dst }),
        (0..piles).prop_map(Op::Shuffle),
        (0..piles).prop_map(Op::Sort),
        (0..piles).prop_map(Op::Reveal),
    ]
}

proptest! {
    #[test]
    fn custody_survives_any_operation_sequence(
        ops in prop::collection::vec(op_strategy(4), 1..60),
        seed in 0u64..1000,
    ) {
        let (mut table, piles) = seeded_table(4);
        let expected = table.total_cards();
        let mut rng = GameRng::new(seed);
        let policy = ComparePolicy::new(CompareOn::SuitAndRank);

        for op in ops {
            match op {
                Op::MoveTop { src, dst } => {
                    if let Some(card) = table.top(piles[src]) {
                        table.move_to(card, piles[dst], InsertAt::Top).unwrap();
                    }
                }
                Op::MoveAll { src, dst } => {
                    if src != dst {
                        table.move_all_to_bottom(piles[dst], piles[src]).unwrap();
                    }
                }
                Op::Shuffle(p) => table.shuffle(piles[p], &mut rng).unwrap(),
                Op::Sort(p) => table.sort(piles[p], &policy).unwrap(),
                Op::Reveal(p) => table.reveal_all(piles[p]).unwrap(),
            }
            assert_custody(&table, &piles, expected);
        }
    }
}

#[test]
fn removed_card_is_in_flight_until_reinserted() {
    let (mut table, piles) = seeded_table(2);
    let expected = table.total_cards();

    let card = table.remove_top(piles[0]).unwrap();
    assert_eq!(table.location_of(card), None);
    assert_eq!(table.located_cards(), expected - 1);

    table.add(card, piles[1], InsertAt::Bottom).unwrap();
    assert_custody(&table, &piles, expected);
}

#[test]
fn matching_removal_drains_exactly_the_matches() {
    let mut table = Table::new();
    let src = table.create_pile(PileConfig::scratch("src"));
    let dst = table.create_pile(PileConfig::scratch("dst"));

    for suit in PLAYING_SUITS {
        table
            .spawn_card(src, CardFace::new(Rank::Seven, suit), Persistence::Permanent)
            .unwrap();
        table
            .spawn_card(src, CardFace::new(Rank::Two, suit), Persistence::Permanent)
            .unwrap();
    }

    // Rank-only match pulls all four sevens and nothing else.
    let rank_only = ComparePolicy::new(CompareOn::RankOnly);
    let target = CardFace::new(Rank::Seven, Suit::Clubs);
    let moved = table
        .move_all_matching(src, dst, &target, &rank_only)
        .unwrap();

    assert_eq!(moved, 4);
    assert_eq!(table.len(src), 4);
    assert!(table
        .faces_in(dst)
        .iter()
        .all(|f| f.rank == Rank::Seven));
    assert_eq!(table.located_cards(), 8);
}
