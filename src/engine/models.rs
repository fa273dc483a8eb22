//! Core data types shared across the rules engine.

use serde::{Deserialize, Serialize};

use crate::engine::hand::Hand;
use crate::engine::tile::{JokerSpec, Tile};

pub type PlayerId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for AiDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" | "easy" => Ok(AiDifficulty::Beginner),
            "intermediate" | "medium" => Ok(AiDifficulty::Intermediate),
            "advanced" | "hard" => Ok(AiDifficulty::Advanced),
            other => Err(format!("unknown AI difficulty: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    #[serde(default)]
    pub difficulty: Option<AiDifficulty>,
    /// Running score across rounds; may go negative.
    pub score: i32,
    pub hand: Hand,
    pub eliminated: bool,
}

impl Player {
    pub fn human(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_ai: false,
            difficulty: None,
            score: 0,
            hand: Hand::new(),
            eliminated: false,
        }
    }

    pub fn ai(id: impl Into<PlayerId>, name: impl Into<String>, difficulty: AiDifficulty) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_ai: true,
            difficulty: Some(difficulty),
            score: 0,
            hand: Hand::new(),
            eliminated: false,
        }
    }
}

/// Configuration consumed by the core. The outer application owns timers and
/// pacing; the core only validates the values it is handed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfiguration {
    pub player_count: usize,
    pub starting_score: i32,
    #[serde(default)]
    pub enable_timer: bool,
    #[serde(default = "default_turn_time_limit")]
    pub turn_time_limit: f32,
    /// Difficulty per seat; `None` marks a human seat.
    #[serde(default)]
    pub ai_difficulty: Vec<Option<AiDifficulty>>,
    #[serde(default)]
    pub random_seed: Option<u64>,
}

fn default_turn_time_limit() -> f32 {
    30.0
}

impl GameConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=4).contains(&self.player_count) {
            return Err(format!(
                "player_count must be 2-4, got {}",
                self.player_count
            ));
        }
        if self.starting_score < 1 {
            return Err(format!(
                "starting_score must be >= 1, got {}",
                self.starting_score
            ));
        }
        if self.enable_timer && self.turn_time_limit < 10.0 {
            return Err(format!(
                "turn_time_limit must be >= 10, got {}",
                self.turn_time_limit
            ));
        }
        if !self.ai_difficulty.is_empty() && self.ai_difficulty.len() != self.player_count {
            return Err("ai_difficulty must have one entry per seat".into());
        }
        Ok(())
    }
}

impl Default for GameConfiguration {
    fn default() -> Self {
        Self {
            player_count: 4,
            starting_score: 20,
            enable_timer: false,
            turn_time_limit: default_turn_time_limit(),
            ai_difficulty: Vec::new(),
            random_seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinType {
    Normal,
    Pairs,
    Okey,
}

/// A proposed move, produced by the rules/AI layers and consumed by the turn
/// executor. `Pass` is the no-op sentinel for "could not act".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    DrawFromPile { player_id: PlayerId },
    DrawFromDiscard { player_id: PlayerId },
    Discard { player_id: PlayerId, tile: Tile },
    ShowIndicator { player_id: PlayerId, tile: Tile },
    DeclareWin { player_id: PlayerId, win_type: WinType },
    Pass { player_id: PlayerId },
}

impl PlayerAction {
    pub fn player_id(&self) -> &str {
        match self {
            PlayerAction::DrawFromPile { player_id }
            | PlayerAction::DrawFromDiscard { player_id }
            | PlayerAction::Discard { player_id, .. }
            | PlayerAction::ShowIndicator { player_id, .. }
            | PlayerAction::DeclareWin { player_id, .. }
            | PlayerAction::Pass { player_id } => player_id,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, PlayerAction::Pass { .. })
    }
}

/// One ledger entry produced by applying a win to the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub player_id: PlayerId,
    /// Base win score x win-type multiplier; zero for losers.
    pub win_score: i32,
    /// +1 per winner tile matching the indicator face; zero for losers.
    pub indicator_bonus: i32,
    /// Remaining-tile penalty (wildcards count 25); zero for the winner.
    pub tile_penalty: i32,
    /// Net change applied to the running score.
    pub delta: i32,
    pub new_total: i32,
    pub eliminated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Current player must draw (pile or previous player's discard).
    AwaitingDraw,
    /// Current player holds 15 tiles and must discard or declare a win.
    AwaitingDiscard,
    RoundOver,
}

/// Snapshot of one round's authoritative state. The rules and AI layers read
/// it; only the simulator (or the embedding application) mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub current_player: usize,
    pub draw_pile: Vec<Tile>,
    /// One discard pile per seat; drawing from discard takes the top of the
    /// previous seat's pile.
    pub discard_piles: Vec<Vec<Tile>>,
    pub indicator: Tile,
    pub joker: JokerSpec,
    pub phase: GamePhase,
    /// Last tile each player obtained (drawn or taken from discard), used for
    /// Okey-win detection.
    pub last_obtained: Vec<Option<Tile>>,
    /// Whether each player has already claimed the show-indicator bonus.
    pub indicator_shown: Vec<bool>,
}

impl GameState {
    pub fn current_player_id(&self) -> &str {
        &self.players[self.current_player].id
    }

    pub fn player_index(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    /// Seat whose discard pile the current player may draw from.
    pub fn previous_player(&self) -> usize {
        (self.current_player + self.players.len() - 1) % self.players.len()
    }

    pub fn advance_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.players.len();
        self.phase = GamePhase::AwaitingDraw;
    }
}
