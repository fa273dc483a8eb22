//! Okey rules engine: the logic core of the Okey tile-matching game.
//!
//! This crate contains the portable game logic only: tile/deck construction,
//! indicator/joker derivation, set/sequence validation, win-condition
//! detection, scoring, turn rules and AI decision strategies. Rendering,
//! input, networking and persistence are the caller's problem.
//!
//! The `engine::simulator` and `engine::arena` modules are headless harnesses
//! used to exercise the rules end-to-end in tests and self-play experiments.

pub mod ai;
pub mod engine;
