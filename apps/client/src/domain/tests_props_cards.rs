//! Property tests for the card model, selection set and round derivation.
//!
//! Properties tested:
//! - Identity strings round-trip for every card
//! - The canonical order is a strict total order without ties
//! - Toggling twice restores membership
//! - The playable board is exactly board minus combination

use std::cmp::Ordering;
use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::round::{Board, Combination, RoundPayload, RoundState};
use crate::domain::{compare, decode, encode, test_gens, Card, SelectionSet};

proptest! {
    /// Property: decode(encode(c)) == c
    #[test]
    fn prop_identity_roundtrip(card in test_gens::card()) {
        prop_assert_eq!(decode(&encode(&card)).unwrap(), card);
    }

    /// Property: wire serde is lossless
    #[test]
    fn prop_wire_roundtrip(card in test_gens::card()) {
        let json = serde_json::to_string(&card).unwrap();
        prop_assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
    }

    /// Property: comparison is antisymmetric and only ties on equal cards
    #[test]
    fn prop_compare_strict(a in test_gens::card(), b in test_gens::card()) {
        let ab = compare(&a, &b);
        prop_assert_eq!(ab, compare(&b, &a).reverse());
        prop_assert_eq!(ab == Ordering::Equal, a == b);
    }

    /// Property: toggle is its own inverse
    #[test]
    fn prop_toggle_involution(
        preselected in test_gens::unique_cards_up_to(6),
        card in test_gens::card(),
    ) {
        let mut sel = SelectionSet::new();
        for c in &preselected {
            sel.toggle_card(*c);
        }
        let before = sel.clone();
        let id = encode(&card);

        let first = sel.toggle(&id).unwrap();
        prop_assert_ne!(first, before.contains(&id));
        sel.toggle(&id).unwrap();
        prop_assert_eq!(sel, before);
    }

    /// Property: playable board = board \ combination, sorted, no duplicates
    #[test]
    fn prop_playable_is_difference((board, comb) in test_gens::board_with_combination()) {
        let state = RoundState::apply(RoundPayload::Active(Board {
            comb: Combination { cards: comb.clone() },
            cards: board.clone(),
        }));

        let playable = state.playable();
        prop_assert_eq!(playable.len(), board.len() - comb.len());
        prop_assert!(playable.windows(2).all(|w| w[0] < w[1]));

        let expected: HashSet<Card> = board
            .iter()
            .filter(|c| !comb.contains(c))
            .copied()
            .collect();
        let actual: HashSet<Card> = playable.iter().copied().collect();
        prop_assert_eq!(actual, expected);
    }
}

#[test]
fn full_deck_has_no_ties() {
    let mut deck: Vec<Card> = Card::all().collect();
    deck.reverse();
    deck.sort_by(compare);
    for pair in deck.windows(2) {
        assert_eq!(compare(&pair[0], &pair[1]), Ordering::Less);
    }
    let keys: HashSet<u8> = deck.iter().map(|c| c.order_key()).collect();
    assert_eq!(keys.len(), 52);
}
