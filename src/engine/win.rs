//! Win-condition detection over a 14-tile hand.
//!
//! Checked in priority order: Pairs, then Okey, then Normal. Normal wins use
//! exact-cover backtracking over the candidate groups from the validator, so
//! hands that only partition under a non-greedy assignment are still found.

use crate::engine::models::WinType;
use crate::engine::tile::{JokerSpec, PieceType, Tile, TileColor};
use crate::engine::validator::{find_all_valid_sequences, find_all_valid_sets};

pub const WINNING_HAND_SIZE: usize = 14;

/// First matching win type for a 14-tile hand, or None. `last_obtained` is
/// the most recent tile the player drew or took from discard; a Normal win
/// upgraded to Okey when that tile is a joker.
pub fn check_win_condition(
    hand: &[Tile],
    joker: JokerSpec,
    last_obtained: Option<&Tile>,
) -> Option<WinType> {
    if hand.len() != WINNING_HAND_SIZE {
        return None;
    }
    if is_pairs_win(hand) {
        return Some(WinType::Pairs);
    }
    if has_full_partition(hand, joker) {
        let okey = last_obtained.is_some_and(|t| t.is_joker(joker));
        return Some(if okey { WinType::Okey } else { WinType::Normal });
    }
    None
}

/// Exactly 7 distinct faces, each appearing exactly twice. Wildcards get no
/// exemption here: a false joker only pairs with the other false joker.
pub fn is_pairs_win(hand: &[Tile]) -> bool {
    if hand.len() != WINNING_HAND_SIZE {
        return false;
    }
    let mut counts: std::collections::HashMap<(u8, TileColor, PieceType), usize> =
        std::collections::HashMap::new();
    for tile in hand {
        *counts
            .entry((tile.number, tile.color, tile.piece_type))
            .or_insert(0) += 1;
    }
    counts.len() == 7 && counts.values().all(|&c| c == 2)
}

/// True if the hand partitions exactly (no leftover, no reuse) into valid
/// sets and sequences.
pub fn has_full_partition(hand: &[Tile], joker: JokerSpec) -> bool {
    if hand.len() != WINNING_HAND_SIZE {
        return false;
    }
    let mut groups = find_all_valid_sets(hand, joker);
    groups.extend(find_all_valid_sequences(hand, joker));
    if groups.is_empty() {
        return false;
    }

    // Bitmask per group over hand positions, indexed by unique_id.
    let index_of = |id: u8| hand.iter().position(|t| t.unique_id == id);
    let masks: Vec<u16> = groups
        .iter()
        .map(|g| {
            g.iter()
                .filter_map(|t| index_of(t.unique_id))
                .fold(0u16, |m, i| m | (1 << i))
        })
        .collect();

    let full: u16 = (1 << WINNING_HAND_SIZE) - 1;
    cover(full, &masks)
}

/// Exact-cover DFS: always branch on the lowest uncovered tile, trying each
/// group that contains it and fits entirely inside the remaining tiles.
fn cover(remaining: u16, masks: &[u16]) -> bool {
    if remaining == 0 {
        return true;
    }
    let pivot = remaining & remaining.wrapping_neg();
    masks
        .iter()
        .any(|&m| m & pivot != 0 && m & !remaining == 0 && cover(remaining & !m, masks))
}
