//! Round initialization: shuffle, indicator selection, dealing.

use rand::Rng;

use crate::engine::hand::Hand;
use crate::engine::tile::{build_deck, derive_joker, shuffle, JokerSpec, Tile};

pub const HAND_SIZE: usize = 14;
pub const DEALER_HAND_SIZE: usize = 15;

/// Everything a fresh round starts from. `hands[0]` belongs to the dealer
/// and holds 15 tiles; the dealer discards first.
#[derive(Debug, Clone)]
pub struct RoundSetup {
    pub hands: Vec<Hand>,
    pub indicator: Tile,
    pub joker: JokerSpec,
    pub draw_pile: Vec<Tile>,
}

/// Build and shuffle a fresh deck, pick the indicator, derive the joker and
/// deal. The indicator is the 5th tile from the end of the shuffled deck,
/// removed before any dealing happens.
pub fn setup_round<R: Rng>(player_count: usize, rng: &mut R) -> Result<RoundSetup, String> {
    if !(2..=4).contains(&player_count) {
        return Err(format!("player_count must be 2-4, got {player_count}"));
    }

    let mut deck = build_deck();
    shuffle(&mut deck, rng);

    let indicator = deck.remove(deck.len() - 5);
    let joker = derive_joker(&indicator);

    let mut hands = Vec::with_capacity(player_count);
    for seat in 0..player_count {
        let count = if seat == 0 { DEALER_HAND_SIZE } else { HAND_SIZE };
        let mut hand = Hand::new();
        for _ in 0..count {
            // Worst case deals 57 of the 105 remaining tiles.
            if let Some(tile) = deck.pop() {
                hand.add(tile);
            }
        }
        hands.push(hand);
    }

    tracing::debug!(
        player_count,
        pile = deck.len(),
        indicator = ?indicator,
        joker = ?joker,
        "round dealt"
    );

    Ok(RoundSetup {
        hands,
        indicator,
        joker,
        draw_pile: deck,
    })
}
