//! Turn/action rules: capability predicates, legal-action enumeration and
//! move validation.
//!
//! Everything here is fail-closed: malformed or out-of-turn actions are
//! rejected with `false`, never a panic. Capability predicates are meant to
//! be checked *before* attempting an action, so the executor never tries an
//! impossible draw.

use crate::engine::models::{GamePhase, GameState, Player, PlayerAction, WinType};
use crate::engine::tile::Tile;
use crate::engine::win::check_win_condition;

pub fn can_draw_from_pile(state: &GameState) -> bool {
    !state.draw_pile.is_empty()
}

/// Drawing from discard takes the top of the previous seat's pile.
pub fn can_draw_from_discard(state: &GameState) -> bool {
    !state.discard_piles[state.previous_player()].is_empty()
}

/// A player may only discard a tile instance they actually hold.
pub fn can_discard(player: &Player, tile: &Tile) -> bool {
    player.hand.contains_id(tile.unique_id)
}

/// Showing the indicator requires holding a tile with the indicator's face.
pub fn can_show_indicator(player: &Player, indicator: &Tile) -> bool {
    player.hand.contains_face(indicator)
}

/// Discards from a 15-tile hand that leave a winning 14, with the win type
/// each one produces.
pub fn winning_discards(state: &GameState, player_idx: usize) -> Vec<(Tile, WinType)> {
    let player = &state.players[player_idx];
    let tiles = player.hand.tiles();
    if tiles.len() != 15 {
        return Vec::new();
    }
    let last = state.last_obtained[player_idx];
    let mut out = Vec::new();
    for (i, &candidate) in tiles.iter().enumerate() {
        let mut rest: Vec<Tile> = tiles.to_vec();
        rest.remove(i);
        if let Some(win_type) = check_win_condition(&rest, state.joker, last.as_ref()) {
            out.push((candidate, win_type));
        }
    }
    out
}

/// All currently-legal actions for the given player. Empty unless it is that
/// player's turn.
pub fn get_valid_actions(state: &GameState, player_id: &str) -> Vec<PlayerAction> {
    let Some(idx) = state.player_index(player_id) else {
        return Vec::new();
    };
    if idx != state.current_player || state.players[idx].eliminated {
        return Vec::new();
    }

    let pid = || player_id.to_string();
    let mut actions = Vec::new();
    match state.phase {
        GamePhase::AwaitingDraw => {
            if can_draw_from_pile(state) {
                actions.push(PlayerAction::DrawFromPile { player_id: pid() });
            }
            if can_draw_from_discard(state) {
                actions.push(PlayerAction::DrawFromDiscard { player_id: pid() });
            }
        }
        GamePhase::AwaitingDiscard => {
            let player = &state.players[idx];
            for &tile in player.hand.tiles() {
                actions.push(PlayerAction::Discard {
                    player_id: pid(),
                    tile,
                });
            }
            if !state.indicator_shown[idx] && can_show_indicator(player, &state.indicator) {
                if let Some(&tile) = player
                    .hand
                    .tiles()
                    .iter()
                    .find(|t| t.same_face(&state.indicator))
                {
                    actions.push(PlayerAction::ShowIndicator {
                        player_id: pid(),
                        tile,
                    });
                }
            }
            if let Some(&(_, win_type)) = winning_discards(state, idx).first() {
                actions.push(PlayerAction::DeclareWin {
                    player_id: pid(),
                    win_type,
                });
            }
        }
        GamePhase::RoundOver => {}
    }
    actions
}

/// Validate a proposed action against the current state. Requires the
/// action's player to be the current player; dispatches per action type.
pub fn validate_player_move(state: &GameState, action: &PlayerAction) -> bool {
    let Some(idx) = state.player_index(action.player_id()) else {
        return false;
    };
    if idx != state.current_player || state.players[idx].eliminated {
        return false;
    }
    if state.phase == GamePhase::RoundOver {
        return false;
    }

    match action {
        PlayerAction::DrawFromPile { .. } => {
            state.phase == GamePhase::AwaitingDraw && can_draw_from_pile(state)
        }
        PlayerAction::DrawFromDiscard { .. } => {
            state.phase == GamePhase::AwaitingDraw && can_draw_from_discard(state)
        }
        PlayerAction::Discard { tile, .. } => {
            state.phase == GamePhase::AwaitingDiscard && can_discard(&state.players[idx], tile)
        }
        PlayerAction::ShowIndicator { tile, .. } => {
            state.phase == GamePhase::AwaitingDiscard
                && !state.indicator_shown[idx]
                && tile.same_face(&state.indicator)
                && can_discard(&state.players[idx], tile)
        }
        PlayerAction::DeclareWin { win_type, .. } => {
            state.phase == GamePhase::AwaitingDiscard
                && winning_discards(state, idx)
                    .iter()
                    .any(|&(_, wt)| wt == *win_type)
        }
        // Pass is always acceptable as the no-op fallback on your own turn.
        PlayerAction::Pass { .. } => true,
    }
}
