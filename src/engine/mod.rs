pub mod arena;
pub mod hand;
pub mod models;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod simulator;
pub mod tile;
pub mod validator;
pub mod win;
