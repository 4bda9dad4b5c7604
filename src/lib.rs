pub mod engine;
pub mod game;
pub mod settlement;
pub mod tui;
