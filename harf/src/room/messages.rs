//! Room actor message types.

use tokio::sync::{mpsc, oneshot};

use crate::game::{
    engine::MoveOutcome,
    entities::{Face, GameError, GameEvent, GameSettings, Player, PlayerId, RoomView},
    var::VoteChoice,
};

/// Commands that can be sent to a room actor. Every fallible command carries
/// a oneshot for its acknowledgement; broadcasts travel separately over the
/// subscriber channels.
#[derive(Debug)]
pub enum RoomMessage {
    /// Seat a new player
    Join {
        player: Player,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Player leaves voluntarily
    Leave {
        player_id: PlayerId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Host updates room settings
    ChangeSettings {
        player_id: PlayerId,
        settings: GameSettings,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Host removes another player
    RemovePlayer {
        player_id: PlayerId,
        target_id: PlayerId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Host hands the host role to another player
    PromoteToHost {
        player_id: PlayerId,
        target_id: PlayerId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Host starts the game
    StartGame {
        player_id: PlayerId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Play one face of one card into one slot of the center word
    PlayCard {
        player_id: PlayerId,
        card_index: usize,
        face: Face,
        target_slot: usize,
        /// The center word the client thinks it is acting on, for optimistic
        /// concurrency.
        observed_word: Option<String>,
        response: oneshot::Sender<Result<MoveOutcome, GameError>>,
    },

    /// Host resets the room to the lobby
    ResetToLobby {
        player_id: PlayerId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Open a VAR challenge against the last accepted move
    VarStart {
        player_id: PlayerId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Accused submits their explanation
    VarExplain {
        player_id: PlayerId,
        explanation: String,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Cast a vote on the open challenge
    VarVote {
        player_id: PlayerId,
        choice: VoteChoice,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Transport-level connection status change, fire and forget
    SetConnected { player_id: PlayerId, connected: bool },

    /// Personalized snapshot for one player; `None` if they are not seated
    GetView {
        player_id: PlayerId,
        response: oneshot::Sender<Option<RoomView>>,
    },

    /// Subscribe to state broadcasts
    Subscribe {
        player_id: PlayerId,
        sender: mpsc::Sender<RoomBroadcast>,
    },

    /// Unsubscribe from state broadcasts
    Unsubscribe { player_id: PlayerId },
}

/// One push to one subscriber: their personalized snapshot plus the events
/// that caused it. `view` is `None` when the subscriber is no longer seated,
/// which doubles as the kick notification.
#[derive(Clone, Debug)]
pub struct RoomBroadcast {
    pub view: Option<RoomView>,
    pub events: Vec<GameEvent>,
}
