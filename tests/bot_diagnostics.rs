//! AI-vs-AI diagnostic simulations.
//!
//! The heavy runs are NOT for CI. Use them locally to verify tier strength
//! and catch integration issues (e.g. wrong weights, broken fallback chain).
//!
//! Run with:
//!     cargo test --release --test bot_diagnostics -- --ignored --nocapture

use okey_engine::ai::evaluator::{preset, EvalWeights};
use okey_engine::engine::arena::{run_arena, Contestant};
use okey_engine::engine::models::AiDifficulty;

fn contestant(name: &str, difficulty: AiDifficulty) -> Contestant {
    Contestant {
        name: name.into(),
        difficulty,
    }
}

/// Quick smoke run: outcome counts always add up, all tiers finish rounds.
#[test]
fn arena_smoke_all_tiers() {
    let contestants = vec![
        contestant("beginner", AiDifficulty::Beginner),
        contestant("intermediate", AiDifficulty::Intermediate),
        contestant("advanced", AiDifficulty::Advanced),
    ];
    let result = run_arena(&contestants, 6, 42, &EvalWeights::default(), true, None);
    let total = result.wins.values().sum::<usize>() + result.draws;
    assert_eq!(total, 6);
}

/// Advanced vs Beginner over a real sample. The heuristic tiers should not
/// lose to uniform-random play.
#[test]
#[ignore]
fn advanced_beats_beginner() {
    let contestants = vec![
        contestant("advanced", AiDifficulty::Advanced),
        contestant("beginner", AiDifficulty::Beginner),
    ];
    let num_games = 200;
    let result = run_arena(
        &contestants,
        num_games,
        42,
        &EvalWeights::default(),
        true,
        Some(&|done, total| {
            if done % 50 == 0 {
                eprintln!("  round {done}/{total}");
            }
        }),
    );

    println!("\n{}", result.summary());

    let adv = result.win_rate("advanced");
    let beg = result.win_rate("beginner");
    assert!(
        adv >= beg,
        "advanced win rate {:.0}% below beginner {:.0}%",
        adv * 100.0,
        beg * 100.0
    );
}

/// Intermediate vs Beginner: the heuristic should at least break even.
#[test]
#[ignore]
fn intermediate_beats_beginner() {
    let contestants = vec![
        contestant("intermediate", AiDifficulty::Intermediate),
        contestant("beginner", AiDifficulty::Beginner),
    ];
    let result = run_arena(&contestants, 200, 7, &EvalWeights::default(), true, None);
    println!("\n{}", result.summary());
    assert!(result.win_rate("intermediate") >= result.win_rate("beginner"));
}

/// Weight presets must actually change behavior: the defensive preset should
/// produce different outcomes than the aggressive one on identical seeds.
#[test]
#[ignore]
fn presets_change_outcomes() {
    let contestants = vec![
        contestant("advanced", AiDifficulty::Advanced),
        contestant("intermediate", AiDifficulty::Intermediate),
    ];
    let defensive = run_arena(&contestants, 100, 11, preset("defensive").unwrap(), true, None);
    let aggressive = run_arena(&contestants, 100, 11, preset("aggressive").unwrap(), true, None);
    println!("defensive:\n{}", defensive.summary());
    println!("aggressive:\n{}", aggressive.summary());
    let same = defensive.wins == aggressive.wins && defensive.draws == aggressive.draws;
    assert!(!same, "presets produced identical outcomes on every seed");
}
