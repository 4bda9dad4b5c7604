//! Command-line interface for the match binary.
//! This module is not part of the public library API.

pub mod args;
pub mod commands;

pub use args::ChessMatch;
