//! # Harf
//!
//! The server-side engine for a turn-based, multiplayer word-transformation
//! card game. Two to four players in a shared room collaboratively mutate a
//! 3-letter Arabic center word, one letter per turn, by playing two-faced
//! letter cards; the first player to empty their hand wins.
//!
//! ## Architecture
//!
//! - [`game`]: the room game-state machine — dictionary, card generation,
//!   turn/move logic, and the VAR challenge-and-vote sub-protocol.
//! - [`room`]: per-room actors (one task per room, commands applied in
//!   arrival order) and the process-wide [`RoomRegistry`].
//!
//! Rooms are in-memory only; a process restart loses all of them.
//!
//! ## Example
//!
//! ```
//! use harf::{Dictionary, game::entities::Player, game::engine::Room};
//!
//! let dictionary = Dictionary::from_word_lists("كتب", "كتب\nلتب").unwrap();
//! let host = Player::new_host("Host");
//! let room = Room::new("AB12", host);
//! assert_eq!(room.players.len(), 1);
//! ```

/// Core game logic: dictionary, deck, entities, engine, and VAR.
pub mod game;

/// Per-room actor and process-wide room registry.
pub mod room;

pub use game::{
    dictionary::Dictionary,
    engine::{MoveOutcome, Room},
    entities::{
        Card, Face, GameError, GameEvent, GamePhase, GameSettings, Player, PlayerId, RoomView,
    },
    var::{VarSession, VoteChoice},
};
pub use room::{actor::RoomHandle, manager::RoomRegistry, messages::RoomMessage};
