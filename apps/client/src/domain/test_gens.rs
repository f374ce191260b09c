// Proptest generators for card-model types.

use proptest::prelude::*;

use crate::domain::{Card, Rank, Suit, ALL_RANKS, ALL_SUITS};

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    proptest::sample::select(ALL_SUITS.to_vec())
}

/// Generate a random Rank
pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(ALL_RANKS.to_vec())
}

/// Generate a single Card
pub fn card() -> impl Strategy<Value = Card> {
    (rank(), suit()).prop_map(|(rank, suit)| Card { rank, suit })
}

/// Generate up to `max_count` distinct cards in arbitrary order
pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence(Card::all().collect::<Vec<_>>(), 0..=max_count)
        .prop_shuffle()
}

/// Generate a board together with a combination drawn from it
pub fn board_with_combination() -> impl Strategy<Value = (Vec<Card>, Vec<Card>)> {
    unique_cards_up_to(20).prop_flat_map(|board| {
        let len = board.len();
        (
            Just(board.clone()),
            proptest::sample::subsequence(board, 0..=len.min(5)),
        )
    })
}
