//! Core game logic for the word-transformation card game.
//!
//! The engine operates on a single [`engine::Room`] at a time; callers are
//! responsible for serializing access per room (see [`crate::room`]).

pub mod deck;
pub mod dictionary;
pub mod engine;
pub mod entities;
pub mod var;

/// Number of letters in the center word. Every move replaces exactly one of
/// them.
pub const WORD_LEN: usize = 3;

/// Maximum number of seated players per room.
pub const MAX_PLAYERS: usize = 4;

/// Minimum number of players required to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Minimum number of players required to open a VAR challenge.
pub const MIN_VAR_PLAYERS: usize = 3;
