//! Hand-strength evaluation and action-value heuristics for the AI tiers.

use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::models::{GameState, PlayerAction};
use crate::engine::tile::{JokerSpec, Tile};
use crate::engine::validator::{find_all_valid_sequences, find_all_valid_sets};

/// Tunable heuristic weights. Loaded per AI profile; see `ai::profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Per tile covered by a complete set/sequence.
    pub complete_group: f64,
    /// Per connected-but-incomplete tile pair among uncovered tiles.
    pub partial_group: f64,
    /// Per exact face pair among uncovered tiles (pairs-win potential).
    pub pair_bonus: f64,
    /// Extra usefulness attributed to holding a joker.
    pub joker_value: f64,
    /// Extra usefulness of middle-value tiles (4-10) when discarding.
    pub middle_tile_penalty: f64,
    /// Advanced tier: weight on opponent discard-risk when discarding.
    pub discard_risk_weight: f64,
    /// Advanced tier: amplitude of the noise in opponent estimates.
    pub noise: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS.clone()
    }
}

pub static DEFAULT_WEIGHTS: Lazy<EvalWeights> = Lazy::new(|| EvalWeights {
    complete_group: 0.7,
    partial_group: 0.15,
    pair_bonus: 0.25,
    joker_value: 3.0,
    middle_tile_penalty: 0.5,
    discard_risk_weight: 1.5,
    noise: 0.5,
});

static PRESETS: Lazy<HashMap<&'static str, EvalWeights>> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert("default", DEFAULT_WEIGHTS.clone());
    presets.insert(
        "aggressive",
        EvalWeights {
            partial_group: 0.25,
            pair_bonus: 0.35,
            discard_risk_weight: 0.5,
            ..DEFAULT_WEIGHTS.clone()
        },
    );
    presets.insert(
        "defensive",
        EvalWeights {
            discard_risk_weight: 3.0,
            middle_tile_penalty: 0.8,
            ..DEFAULT_WEIGHTS.clone()
        },
    );
    presets
});

pub fn preset(name: &str) -> Option<&'static EvalWeights> {
    PRESETS.get(name)
}

/// Score a hand on a 0-10 scale: tiles locked into complete groups dominate,
/// with smaller credit for near-groups and face pairs among the rest.
pub fn hand_strength(tiles: &[Tile], joker: JokerSpec, weights: &EvalWeights) -> f64 {
    let covered = greedy_cover(tiles, joker);
    let uncovered: Vec<&Tile> = tiles
        .iter()
        .filter(|t| !covered.contains(&t.unique_id))
        .collect();

    let mut partials = 0usize;
    let mut pairs = 0usize;
    for (i, a) in uncovered.iter().enumerate() {
        for b in &uncovered[i + 1..] {
            if a.same_face(b) {
                pairs += 1;
            } else if connected(a, b) {
                partials += 1;
            }
        }
    }

    let score = covered.len() as f64 * weights.complete_group
        + partials as f64 * weights.partial_group
        + pairs as f64 * weights.pair_bonus;
    score.clamp(0.0, 10.0)
}

/// Unique ids of tiles claimed by a disjoint selection of discovered groups,
/// largest groups first. Greedy is fine here: this feeds a heuristic, not
/// the win check.
fn greedy_cover(tiles: &[Tile], joker: JokerSpec) -> std::collections::HashSet<u8> {
    let mut groups = find_all_valid_sets(tiles, joker);
    groups.extend(find_all_valid_sequences(tiles, joker));
    groups.sort_by_key(|g| std::cmp::Reverse(g.len()));

    let mut used = std::collections::HashSet::new();
    for group in groups {
        if group.iter().all(|t| !used.contains(&t.unique_id)) {
            used.extend(group.iter().map(|t| t.unique_id));
        }
    }
    used
}

/// Two tiles that could grow into the same group: same number in different
/// colors, or same color within two steps.
fn connected(a: &Tile, b: &Tile) -> bool {
    if a.number == 0 || b.number == 0 {
        return false;
    }
    if a.number == b.number && a.color != b.color {
        return true;
    }
    a.color == b.color && a.number.abs_diff(b.number) <= 2
}

/// How much a tile is worth keeping: strength drop when it leaves the hand,
/// plus flat bonuses for jokers and middle values (4-10).
pub fn discard_usefulness(
    tiles: &[Tile],
    joker: JokerSpec,
    tile: &Tile,
    weights: &EvalWeights,
) -> f64 {
    let without: Vec<Tile> = tiles
        .iter()
        .filter(|t| t.unique_id != tile.unique_id)
        .copied()
        .collect();
    let mut usefulness =
        hand_strength(tiles, joker, weights) - hand_strength(&without, joker, weights);
    if tile.is_joker(joker) {
        usefulness += weights.joker_value;
    }
    if (4..=10).contains(&tile.number) {
        usefulness += weights.middle_tile_penalty;
    }
    usefulness
}

/// Heuristic value of one legal action for the given seat. Draw values and
/// discard values never compete (different phases), so their scales are
/// independent.
pub fn calculate_action_value(
    state: &GameState,
    player_idx: usize,
    action: &PlayerAction,
    weights: &EvalWeights,
) -> f64 {
    let tiles = state.players[player_idx].hand.tiles();
    match action {
        PlayerAction::DeclareWin { .. } => 1000.0,
        PlayerAction::Pass { .. } => -1000.0,
        PlayerAction::ShowIndicator { .. } => 1.0,
        PlayerAction::DrawFromPile { .. } => 0.1,
        PlayerAction::DrawFromDiscard { .. } => {
            let pile = &state.discard_piles[state.previous_player()];
            match pile.last() {
                Some(&top) => {
                    let mut with: Vec<Tile> = tiles.to_vec();
                    with.push(top);
                    hand_strength(&with, state.joker, weights)
                        - hand_strength(tiles, state.joker, weights)
                }
                None => -1000.0,
            }
        }
        PlayerAction::Discard { tile, .. } => {
            -discard_usefulness(tiles, state.joker, tile, weights)
        }
    }
}

/// Crude opponent-hand-strength estimate: the game clock (their discard
/// count) pushed up or down by a little noise. Real hand contents are
/// hidden, so this is deliberately fuzzy.
pub fn opponent_strength_estimate<R: Rng>(
    state: &GameState,
    opponent_idx: usize,
    weights: &EvalWeights,
    rng: &mut R,
) -> f64 {
    let discards = state.discard_piles[opponent_idx].len() as f64;
    let noise = if weights.noise > 0.0 {
        rng.gen_range(-weights.noise..=weights.noise)
    } else {
        0.0
    };
    (3.0 + discards * 0.25 + noise).clamp(0.0, 10.0)
}

/// Risk that a discarded tile feeds an opponent, in [0, 1]. Tiles related to
/// faces already thrown away are safer; jokers are always maximally risky.
pub fn discard_risk(state: &GameState, player_idx: usize, tile: &Tile) -> f64 {
    if tile.is_joker(state.joker) {
        return 1.0;
    }
    let mut risk = 1.0f64;
    for (seat, pile) in state.discard_piles.iter().enumerate() {
        if seat == player_idx {
            continue;
        }
        for seen in pile {
            if seen.number == 0 {
                continue;
            }
            let related = seen.number == tile.number
                || (seen.color == tile.color && seen.number.abs_diff(tile.number) <= 2);
            if related {
                risk -= 0.25;
            }
        }
    }
    risk.clamp(0.0, 1.0)
}
