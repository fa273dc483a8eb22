//! AI-vs-AI arena runner: seeded self-play rounds with aggregated stats.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::ai::evaluator::EvalWeights;
use crate::engine::models::{AiDifficulty, Player};
use crate::engine::simulator::{play_round, RoundOutcome};

/// One named contestant occupying a seat.
#[derive(Debug, Clone)]
pub struct Contestant {
    pub name: String,
    pub difficulty: AiDifficulty,
}

/// Aggregated results from an arena run.
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: HashMap<String, usize>,
    pub draws: usize,
    pub total_scores: HashMap<String, Vec<f64>>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_score(&self, name: &str) -> f64 {
        match self.total_scores.get(name) {
            Some(s) if !s.is_empty() => s.iter().sum::<f64>() / s.len() as f64,
            _ => 0.0,
        }
    }

    pub fn score_stddev(&self, name: &str) -> f64 {
        let scores = match self.total_scores.get(name) {
            Some(s) if s.len() >= 2 => s,
            _ => return 0.0,
        };
        let avg = self.avg_score(name);
        let variance =
            scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / (scores.len() - 1) as f64;
        variance.sqrt()
    }

    /// Wilson score interval on the win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(name);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} rounds)", self.num_games)];
        lines.push("=".repeat(60));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            let wr = self.win_rate(name);
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  avg={:6.1} +/- {:5.1}",
                name,
                self.wins[name],
                wr * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                self.avg_score(name),
                self.score_stddev(name),
            ));
        }
        lines.push(format!("  {:>12}: {}", "Draws", self.draws));
        if !self.game_durations_ms.is_empty() {
            let avg_ms =
                self.game_durations_ms.iter().sum::<f64>() / self.game_durations_ms.len() as f64;
            let total_s = self.game_durations_ms.iter().sum::<f64>() / 1000.0;
            lines.push(format!("  Avg round: {avg_ms:.1}ms  |  Total: {total_s:.1}s"));
        }
        lines.join("\n")
    }
}

struct GameRecord {
    duration_ms: f64,
    winner: Option<String>,
    scores: Vec<(String, f64)>,
}

/// Run `num_games` seeded rounds between the contestants. Rounds run in
/// parallel; seat assignment rotates per game when `alternate_seats` is set
/// so no contestant keeps the dealer advantage.
pub fn run_arena(
    contestants: &[Contestant],
    num_games: usize,
    base_seed: u64,
    weights: &EvalWeights,
    alternate_seats: bool,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ArenaResult {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let n = contestants.len();
    assert!((2..=4).contains(&n), "arena needs 2-4 contestants");

    let completed = AtomicUsize::new(0);
    let records: Vec<GameRecord> = (0..num_games)
        .into_par_iter()
        .map(|game_idx| {
            let seed = base_seed + game_idx as u64;
            let rotation = if alternate_seats { game_idx % n } else { 0 };
            let seats: Vec<&Contestant> =
                (0..n).map(|i| &contestants[(i + rotation) % n]).collect();

            let players: Vec<Player> = seats
                .iter()
                .enumerate()
                .map(|(i, c)| Player::ai(format!("p{i}"), c.name.clone(), c.difficulty))
                .collect();
            let difficulties: Vec<AiDifficulty> = seats.iter().map(|c| c.difficulty).collect();

            let mut rng = StdRng::seed_from_u64(seed);
            let t0 = Instant::now();
            let outcome = play_round(players, &difficulties, weights, &mut rng);
            let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

            let record = match outcome {
                Ok((state, RoundOutcome::Won { winner, .. })) => {
                    let winner_name = state
                        .players
                        .iter()
                        .find(|p| p.id == winner)
                        .map(|p| p.name.clone());
                    GameRecord {
                        duration_ms,
                        winner: winner_name,
                        scores: state
                            .players
                            .iter()
                            .map(|p| (p.name.clone(), p.score as f64))
                            .collect(),
                    }
                }
                Ok((state, RoundOutcome::Exhausted)) => GameRecord {
                    duration_ms,
                    winner: None,
                    scores: state
                        .players
                        .iter()
                        .map(|p| (p.name.clone(), p.score as f64))
                        .collect(),
                },
                Err(e) => {
                    tracing::error!(game_idx, error = %e, "arena round failed");
                    GameRecord {
                        duration_ms,
                        winner: None,
                        scores: Vec::new(),
                    }
                }
            };

            if let Some(cb) = progress_callback {
                cb(completed.fetch_add(1, Ordering::Relaxed) + 1, num_games);
            }
            record
        })
        .collect();

    let mut result = ArenaResult {
        num_games,
        wins: contestants.iter().map(|c| (c.name.clone(), 0)).collect(),
        draws: 0,
        total_scores: contestants
            .iter()
            .map(|c| (c.name.clone(), Vec::new()))
            .collect(),
        game_durations_ms: Vec::with_capacity(num_games),
    };
    for record in records {
        result.game_durations_ms.push(record.duration_ms);
        match record.winner {
            Some(name) => {
                if let Some(count) = result.wins.get_mut(&name) {
                    *count += 1;
                }
            }
            None => result.draws += 1,
        }
        for (name, score) in record.scores {
            if let Some(scores) = result.total_scores.get_mut(&name) {
                scores.push(score);
            }
        }
    }
    result
}
