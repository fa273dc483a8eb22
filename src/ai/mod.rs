//! AI decision strategies: three difficulty tiers dispatched by tag.
//!
//! Each tier is a pure function over a `GameState` snapshot plus an RNG.
//! `decide_action` wraps them in a degradation chain: a tier that produces
//! nothing, or an action the rules reject, falls through to the next tier,
//! ending at the `Pass` sentinel. The caller treats `Pass` as "AI could not
//! act, force end turn".

pub mod evaluator;
pub mod profiles;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::ai::evaluator::{
    calculate_action_value, discard_risk, hand_strength, opponent_strength_estimate, EvalWeights,
};
use crate::engine::models::{AiDifficulty, GameState, PlayerAction};
use crate::engine::rules::{get_valid_actions, validate_player_move};

const AGGRESSIVE_THRESHOLD: f64 = 7.0;
const DEFENSIVE_THRESHOLD: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stance {
    Aggressive,
    Defensive,
    Balanced,
}

/// Pick an action for the given seat at the given difficulty. Never panics;
/// falls back tier by tier and finally to `Pass`.
pub fn decide_action<R: Rng>(
    difficulty: AiDifficulty,
    state: &GameState,
    player_id: &str,
    weights: &EvalWeights,
    rng: &mut R,
) -> PlayerAction {
    let tiers: &[AiDifficulty] = match difficulty {
        AiDifficulty::Advanced => &[
            AiDifficulty::Advanced,
            AiDifficulty::Intermediate,
            AiDifficulty::Beginner,
        ],
        AiDifficulty::Intermediate => &[AiDifficulty::Intermediate, AiDifficulty::Beginner],
        AiDifficulty::Beginner => &[AiDifficulty::Beginner],
    };

    for &tier in tiers {
        let candidate = match tier {
            AiDifficulty::Beginner => decide_beginner(state, player_id, rng),
            AiDifficulty::Intermediate => decide_intermediate(state, player_id, weights, rng),
            AiDifficulty::Advanced => decide_advanced(state, player_id, weights, rng),
        };
        match candidate {
            Some(action) if validate_player_move(state, &action) => return action,
            Some(action) => {
                tracing::warn!(
                    ?tier,
                    ?action,
                    "AI tier produced an invalid action, degrading"
                );
            }
            None => {}
        }
    }

    PlayerAction::Pass {
        player_id: player_id.to_string(),
    }
}

/// Beginner: uniform-random choice among the legal actions.
fn decide_beginner<R: Rng>(state: &GameState, player_id: &str, rng: &mut R) -> Option<PlayerAction> {
    let valid = get_valid_actions(state, player_id);
    valid.choose(rng).cloned()
}

/// Intermediate: argmax of the action-value heuristic, random tie-break.
fn decide_intermediate<R: Rng>(
    state: &GameState,
    player_id: &str,
    weights: &EvalWeights,
    rng: &mut R,
) -> Option<PlayerAction> {
    let idx = state.player_index(player_id)?;
    let valid = get_valid_actions(state, player_id);
    pick_best(valid, rng, |action| {
        calculate_action_value(state, idx, action, weights)
    })
}

/// Advanced: intermediate scoring plus opponent modeling. Own hand strength
/// selects a stance (aggressive >= 7, defensive <= 3); discards are taxed by
/// their risk of feeding the strongest opponent.
fn decide_advanced<R: Rng>(
    state: &GameState,
    player_id: &str,
    weights: &EvalWeights,
    rng: &mut R,
) -> Option<PlayerAction> {
    let idx = state.player_index(player_id)?;
    let valid = get_valid_actions(state, player_id);
    if valid.is_empty() {
        return None;
    }

    let own = hand_strength(state.players[idx].hand.tiles(), state.joker, weights);
    let stance = if own >= AGGRESSIVE_THRESHOLD {
        Stance::Aggressive
    } else if own <= DEFENSIVE_THRESHOLD {
        Stance::Defensive
    } else {
        Stance::Balanced
    };

    let threat = state
        .players
        .iter()
        .enumerate()
        .filter(|(i, p)| *i != idx && !p.eliminated)
        .map(|(i, _)| opponent_strength_estimate(state, i, weights, rng))
        .fold(0.0f64, f64::max);

    let risk_scale = match stance {
        Stance::Aggressive => 0.25,
        Stance::Balanced => 0.5,
        Stance::Defensive => 1.0,
    } * weights.discard_risk_weight
        * (threat / 10.0);

    pick_best(valid, rng, |action| {
        let mut value = calculate_action_value(state, idx, action, weights);
        match action {
            PlayerAction::Discard { tile, .. } => {
                value -= discard_risk(state, idx, tile) * risk_scale;
            }
            PlayerAction::DrawFromDiscard { .. } if stance == Stance::Aggressive => {
                value += 0.5;
            }
            _ => {}
        }
        value
    })
}

/// Argmax with a tiny random jitter so equal-valued actions are chosen
/// uniformly rather than positionally.
fn pick_best<R: Rng>(
    actions: Vec<PlayerAction>,
    rng: &mut R,
    mut value: impl FnMut(&PlayerAction) -> f64,
) -> Option<PlayerAction> {
    actions
        .into_iter()
        .map(|a| {
            let v = value(&a) + rng.gen_range(0.0..1e-6);
            (a, v)
        })
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(a, _)| a)
}
