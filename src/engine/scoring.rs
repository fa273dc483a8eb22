//! Scoring: win payout, remaining-tile penalties and the running ledger.
//!
//! One consolidated table: `BASE_WIN_SCORE` times a per-win-type multiplier
//! for the winner, and a face-value penalty (25 per wildcard) times a
//! per-win-type factor for each loser. A player whose cumulative score drops
//! to the elimination threshold is flagged out of the game.

use crate::engine::models::{Player, ScoreBreakdown, WinType};
use crate::engine::tile::{PieceType, Tile};

pub const BASE_WIN_SCORE: i32 = 2;
pub const FALSE_JOKER_PENALTY: i32 = 25;
pub const ELIMINATION_THRESHOLD: i32 = -100;

/// Winner payout by win type: 2 / 8 / 16.
pub fn win_score(win_type: WinType) -> i32 {
    BASE_WIN_SCORE * win_multiplier(win_type)
}

fn win_multiplier(win_type: WinType) -> i32 {
    match win_type {
        WinType::Normal => 1,
        WinType::Pairs => 4,
        WinType::Okey => 8,
    }
}

fn penalty_multiplier(win_type: WinType) -> f32 {
    match win_type {
        WinType::Normal => 1.0,
        WinType::Pairs => 1.5,
        WinType::Okey => 2.0,
    }
}

/// Penalty carried by one remaining tile: face value, or 25 for a wildcard.
pub fn tile_penalty(tile: &Tile) -> i32 {
    match tile.piece_type {
        PieceType::FalseJoker => FALSE_JOKER_PENALTY,
        PieceType::Normal => tile.number as i32,
    }
}

/// Total penalty for a losing hand under the given win type. An empty hand
/// contributes zero.
pub fn player_penalty(hand: &[Tile], winner_win_type: WinType) -> i32 {
    let raw: i32 = hand.iter().map(tile_penalty).sum();
    (raw as f32 * penalty_multiplier(winner_win_type)).round() as i32
}

/// +1 per winner tile showing the indicator's exact face.
pub fn indicator_bonus(hand: &[Tile], indicator: &Tile) -> i32 {
    hand.iter().filter(|t| t.same_face(indicator)).count() as i32
}

/// Apply a win to the table: credit the winner, debit every other active
/// player, update running scores and elimination flags. Returns one ledger
/// entry per player. Unknown winner ids yield an empty ledger.
pub fn apply_win(
    players: &mut [Player],
    winner_id: &str,
    win_type: WinType,
    indicator: &Tile,
) -> Vec<ScoreBreakdown> {
    if !players.iter().any(|p| p.id == winner_id) {
        tracing::warn!(winner_id, "apply_win called with unknown winner");
        return Vec::new();
    }

    let mut ledger = Vec::with_capacity(players.len());
    for player in players.iter_mut() {
        let entry = if player.id == winner_id {
            let base = win_score(win_type);
            let bonus = indicator_bonus(player.hand.tiles(), indicator);
            player.score += base + bonus;
            ScoreBreakdown {
                player_id: player.id.clone(),
                win_score: base,
                indicator_bonus: bonus,
                tile_penalty: 0,
                delta: base + bonus,
                new_total: player.score,
                eliminated: false,
            }
        } else if player.eliminated {
            // Already out; no further debits.
            ScoreBreakdown {
                player_id: player.id.clone(),
                win_score: 0,
                indicator_bonus: 0,
                tile_penalty: 0,
                delta: 0,
                new_total: player.score,
                eliminated: true,
            }
        } else {
            let penalty = player_penalty(player.hand.tiles(), win_type);
            player.score -= penalty;
            if player.score <= ELIMINATION_THRESHOLD {
                player.eliminated = true;
            }
            ScoreBreakdown {
                player_id: player.id.clone(),
                win_score: 0,
                indicator_bonus: 0,
                tile_penalty: penalty,
                delta: -penalty,
                new_total: player.score,
                eliminated: player.eliminated,
            }
        };
        ledger.push(entry);
    }
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::hand::Hand;
    use crate::engine::tile::TileColor;

    fn tile(number: u8, color: TileColor, unique_id: u8) -> Tile {
        Tile {
            number,
            color,
            piece_type: PieceType::Normal,
            unique_id,
        }
    }

    fn false_joker(unique_id: u8) -> Tile {
        Tile {
            number: 0,
            color: TileColor::Black,
            piece_type: PieceType::FalseJoker,
            unique_id,
        }
    }

    #[test]
    fn test_win_score_table() {
        assert_eq!(win_score(WinType::Normal), 2);
        assert_eq!(win_score(WinType::Pairs), 8);
        assert_eq!(win_score(WinType::Okey), 16);
    }

    #[test]
    fn test_tile_penalty() {
        assert_eq!(tile_penalty(&tile(7, TileColor::Red, 0)), 7);
        assert_eq!(tile_penalty(&false_joker(1)), 25);
    }

    #[test]
    fn test_player_penalty_scales_with_win_type() {
        let hand = [tile(10, TileColor::Red, 0), false_joker(1)]; // 35 raw
        assert_eq!(player_penalty(&hand, WinType::Normal), 35);
        assert_eq!(player_penalty(&hand, WinType::Pairs), 53); // 52.5 rounded
        assert_eq!(player_penalty(&hand, WinType::Okey), 70);
    }

    #[test]
    fn test_empty_hand_contributes_zero() {
        assert_eq!(player_penalty(&[], WinType::Okey), 0);
    }

    #[test]
    fn test_scoring_round_trip() {
        let indicator = tile(5, TileColor::Black, 99);
        let mut players = vec![
            Player::human("w", "winner"),
            Player::human("l", "loser"),
        ];
        players[0].score = 20;
        players[1].score = 20;
        players[1].hand = Hand::from_tiles(vec![
            tile(3, TileColor::Red, 0),
            tile(9, TileColor::Blue, 1),
        ]);

        let ledger = apply_win(&mut players, "w", WinType::Normal, &indicator);
        assert_eq!(players[0].score, 20 + 2);
        assert_eq!(players[1].score, 20 - 12);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].delta, 2);
        assert_eq!(ledger[1].delta, -12);
        assert!(!ledger[1].eliminated);
    }

    #[test]
    fn test_indicator_bonus_counts_exact_faces() {
        let indicator = tile(5, TileColor::Black, 99);
        let hand = [
            tile(5, TileColor::Black, 0),
            tile(5, TileColor::Black, 1),
            tile(5, TileColor::Red, 2),
        ];
        assert_eq!(indicator_bonus(&hand, &indicator), 2);
    }

    #[test]
    fn test_elimination_threshold() {
        let indicator = tile(5, TileColor::Black, 99);
        let mut players = vec![Player::human("w", "winner"), Player::human("l", "loser")];
        players[1].score = -80;
        players[1].hand = Hand::from_tiles(vec![false_joker(0)]); // 25 penalty
        let ledger = apply_win(&mut players, "w", WinType::Normal, &indicator);
        assert_eq!(players[1].score, -105);
        assert!(players[1].eliminated);
        assert!(ledger[1].eliminated);
    }

    #[test]
    fn test_eliminated_players_are_not_debited() {
        let indicator = tile(5, TileColor::Black, 99);
        let mut players = vec![Player::human("w", "winner"), Player::human("out", "gone")];
        players[1].eliminated = true;
        players[1].score = -120;
        players[1].hand = Hand::from_tiles(vec![false_joker(0)]);
        apply_win(&mut players, "w", WinType::Okey, &indicator);
        assert_eq!(players[1].score, -120);
    }

    #[test]
    fn test_unknown_winner_is_a_noop() {
        let indicator = tile(5, TileColor::Black, 99);
        let mut players = vec![Player::human("a", "a")];
        let ledger = apply_win(&mut players, "ghost", WinType::Normal, &indicator);
        assert!(ledger.is_empty());
        assert_eq!(players[0].score, 0);
    }
}
