//! Entities shared across the game engine: players, cards, settings, state,
//! history, events, and the error taxonomy.

use std::{collections::VecDeque, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::var::VarSession;

/// Stable player identity, kept across reconnects.
pub type PlayerId = Uuid;

/// Opaque card identity, unique for the lifetime of the card. Used to track
/// a card through animations and VAR challenges.
pub type CardId = Uuid;

/// Which of a card's two printed letters a play applies.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    A,
    B,
}

/// A two-faced letter card. Invariant: `face_a != face_b`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub face_a: char,
    pub face_b: char,
}

impl Card {
    pub fn new(face_a: char, face_b: char) -> Self {
        debug_assert_ne!(face_a, face_b);
        Self {
            id: Uuid::new_v4(),
            face_a,
            face_b,
        }
    }

    /// The letter printed on the named face.
    pub fn face(&self, face: Face) -> char {
        match face {
            Face::A => self.face_a,
            Face::B => self.face_b,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.face_a, self.face_b)
    }
}

/// A seated player. Hand order is insertion order and is visible to the
/// owning player only; snapshots redact opponents' hands to a count.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub hand: Vec<Card>,
    pub connected: bool,
    pub has_used_var: bool,
    pub joined_at: DateTime<Utc>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_host: false,
            hand: Vec::new(),
            connected: false,
            has_used_var: false,
            joined_at: Utc::now(),
        }
    }

    pub fn new_host(name: impl Into<String>) -> Self {
        let mut player = Self::new(name);
        player.is_host = true;
        player
    }
}

/// Room configuration. Host-writable at any time; `starting_cards` takes
/// effect on the next game start.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct GameSettings {
    /// Turn clock in seconds.
    pub time_per_turn: u64,
    /// Cards dealt to each player at game start.
    pub starting_cards: usize,
    /// Whether VAR challenges are enabled.
    pub allow_var: bool,
    /// VAR voting window in seconds.
    pub var_vote_duration: u64,
    /// VAR explanation window in seconds.
    pub var_explanation_duration: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            time_per_turn: 15,
            starting_cards: 7,
            allow_var: true,
            var_vote_duration: 15,
            var_explanation_duration: 15,
        }
    }
}

impl GameSettings {
    pub const MIN_DURATION_SECS: u64 = 5;
    pub const MAX_DURATION_SECS: u64 = 600;
    pub const MIN_STARTING_CARDS: usize = 1;
    pub const MAX_STARTING_CARDS: usize = 20;

    /// Bounds-check every field. Settings arrive straight off the wire and
    /// the duration fields feed timer arithmetic, so nothing out of range
    /// may ever be stored on a room.
    pub fn validate(&self) -> Result<(), GameError> {
        let durations = [
            self.time_per_turn,
            self.var_vote_duration,
            self.var_explanation_duration,
        ];
        if durations
            .iter()
            .any(|d| !(Self::MIN_DURATION_SECS..=Self::MAX_DURATION_SECS).contains(d))
        {
            return Err(GameError::InvalidSettings);
        }
        if !(Self::MIN_STARTING_CARDS..=Self::MAX_STARTING_CARDS).contains(&self.starting_cards) {
            return Err(GameError::InvalidSettings);
        }
        Ok(())
    }
}

/// Top-level game lifecycle phase.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Lobby,
    InGame,
    Var,
    GameOver,
}

/// A fully recorded accepted move: the challengeable unit of history.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MoveRecord {
    pub player_id: PlayerId,
    pub before: String,
    pub after: String,
    pub card: Card,
    pub face: Face,
    pub slot: usize,
    pub at: DateTime<Utc>,
}

/// Why a VAR session resolved.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarReason {
    Majority,
    AllVoted,
    Timeout,
}

/// Append-only log of past moves and events. Entries are immutable once
/// appended; the log backs replay, VAR snapshotting, and auditing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry {
    ValidMove(MoveRecord),
    /// An attempted non-word. Deliberately records no card identity: the
    /// played card stays in the player's hand and history is broadcast, so
    /// only the attempted word and slot may appear here.
    InvalidMove {
        player_id: PlayerId,
        attempted: String,
        slot: usize,
        at: DateTime<Utc>,
    },
    Timeout {
        player_id: PlayerId,
        at: DateTime<Utc>,
    },
    VarResult {
        accepted: bool,
        reason: VarReason,
        accept_votes: usize,
        reject_votes: usize,
        disputed: MoveRecord,
        at: DateTime<Utc>,
    },
}

/// Typed transient events emitted alongside state snapshots, intended for
/// client-side effects rather than state sync.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJoined { player_id: PlayerId, name: String },
    PlayerLeft { player_id: PlayerId, name: String },
    PlayerRemoved { player_id: PlayerId },
    HostChanged { player_id: PlayerId },
    ConnectionChanged { player_id: PlayerId, connected: bool },
    SettingsChanged,
    GameStarted,
    MoveApplied { player_id: PlayerId, valid: bool },
    TurnTimedOut { player_id: PlayerId },
    GameWon { winner_id: PlayerId },
    VarStarted { challenger_id: PlayerId, accused_id: PlayerId },
    VarVotingOpened,
    VarResolved { accepted: bool },
    ResetToLobby,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PlayerJoined { name, .. } => format!("{name} joined the room"),
            Self::PlayerLeft { name, .. } => format!("{name} left the room"),
            Self::PlayerRemoved { player_id } => format!("{player_id} was removed by the host"),
            Self::HostChanged { player_id } => format!("{player_id} is now the host"),
            Self::ConnectionChanged {
                player_id,
                connected,
            } => format!(
                "{player_id} {}",
                if *connected { "connected" } else { "disconnected" }
            ),
            Self::SettingsChanged => "settings changed".to_string(),
            Self::GameStarted => "game started".to_string(),
            Self::MoveApplied { valid: true, .. } => "move applied".to_string(),
            Self::MoveApplied { valid: false, .. } => "invalid move penalized".to_string(),
            Self::TurnTimedOut { player_id } => format!("{player_id} ran out of time"),
            Self::GameWon { winner_id } => format!("{winner_id} won the game"),
            Self::VarStarted { .. } => "VAR challenge opened".to_string(),
            Self::VarVotingOpened => "VAR voting opened".to_string(),
            Self::VarResolved { accepted: true } => "VAR upheld the move".to_string(),
            Self::VarResolved { accepted: false } => "VAR rejected the move".to_string(),
            Self::ResetToLobby => "room reset to lobby".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Coarse classification of rejections, used by the transport layer to map
/// errors onto status codes.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    InvalidInput,
    StaleState,
    Conflict,
    Expired,
    Internal,
}

/// Errors that can occur during room and game operations. Every rejection is
/// local: validation happens before any mutation, so a rejected command never
/// corrupts room state.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameError {
    #[error("room not found")]
    RoomNotFound,
    #[error("player not found")]
    PlayerNotFound,
    #[error("room is full")]
    RoomFull,
    #[error("only the host can do that")]
    NotHost,
    #[error("not your turn")]
    NotYourTurn,
    #[error("game is not running")]
    NotRunning,
    #[error("game already in progress")]
    GameInProgress,
    #[error("need {0}+ players")]
    NotEnoughPlayers(usize),
    #[error("your view of the board is out of date")]
    StaleState,
    #[error("card index out of range")]
    InvalidCardIndex,
    #[error("target slot out of range")]
    InvalidTargetSlot,
    #[error("that letter is already in place")]
    NoOpMove,
    #[error("settings out of range")]
    InvalidSettings,
    #[error("a VAR challenge is already active")]
    VarActive,
    #[error("VAR is disabled in this room")]
    VarDisabled,
    #[error("no challengeable move")]
    NoChallengeableMove,
    #[error("can't challenge your own move")]
    OwnMove,
    #[error("you already used your VAR this game")]
    VarTokenSpent,
    #[error("no VAR session is active")]
    NoVarSession,
    #[error("only the accused can explain")]
    NotAccused,
    #[error("explanation window is closed")]
    NotAwaitingExplanation,
    #[error("voting is not open")]
    NotVoting,
    #[error("you are not an eligible voter")]
    NotEligible,
    #[error("you already voted")]
    AlreadyVoted,
    #[error("the VAR window has expired")]
    VarExpired,
    #[error("internal state error")]
    Internal,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RoomNotFound | Self::PlayerNotFound => ErrorKind::NotFound,
            Self::NotHost | Self::NotYourTurn | Self::NotAccused => ErrorKind::Unauthorized,
            Self::InvalidCardIndex
            | Self::InvalidTargetSlot
            | Self::NoOpMove
            | Self::InvalidSettings => ErrorKind::InvalidInput,
            Self::StaleState => ErrorKind::StaleState,
            Self::RoomFull
            | Self::NotRunning
            | Self::GameInProgress
            | Self::NotEnoughPlayers(_)
            | Self::VarActive
            | Self::VarDisabled
            | Self::NoChallengeableMove
            | Self::OwnMove
            | Self::VarTokenSpent
            | Self::NoVarSession
            | Self::NotAwaitingExplanation
            | Self::NotVoting
            | Self::NotEligible
            | Self::AlreadyVoted => ErrorKind::Conflict,
            Self::VarExpired => ErrorKind::Expired,
            Self::Internal => ErrorKind::Internal,
        }
    }
}

/// The live game state of a room. One struct with every field defined up
/// front and explicit defaults; the transient event queue is server-side
/// only and never part of a broadcast snapshot.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub center_word: Option<String>,
    pub current_player_index: Option<usize>,
    pub started_at: Option<DateTime<Utc>>,
    pub turn_started_at: Option<DateTime<Utc>>,
    pub history: Vec<HistoryEntry>,
    pub winner_id: Option<PlayerId>,
    pub var_session: Option<VarSession>,
    pub settings: GameSettings,
    #[serde(skip, default)]
    pub(crate) events: VecDeque<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Lobby,
            center_word: None,
            current_player_index: None,
            started_at: None,
            turn_started_at: None,
            history: Vec::new(),
            winner_id: None,
            var_session: None,
            settings: GameSettings::default(),
            events: VecDeque::new(),
        }
    }
}

impl GameState {
    /// The most recent challengeable move: the last history entry that is a
    /// valid move with both before/after words recorded. Timeouts and
    /// invalid attempts are not challengeable.
    pub fn last_valid_move(&self) -> Option<&MoveRecord> {
        self.history.iter().rev().find_map(|entry| match entry {
            HistoryEntry::ValidMove(record) => Some(record),
            _ => None,
        })
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}

/// A player as seen in a broadcast snapshot: the requesting player sees
/// their own hand, opponents are redacted to a card count.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub connected: bool,
    pub has_used_var: bool,
    pub card_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

/// Full immutable snapshot of a room, personalized for one member and
/// broadcast after every successful mutation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RoomView {
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub players: Vec<PlayerView>,
    pub state: GameState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_face_selection() {
        let card = Card::new('ب', 'ت');
        assert_eq!(card.face(Face::A), 'ب');
        assert_eq!(card.face(Face::B), 'ت');
    }

    #[test]
    fn default_settings_match_room_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.time_per_turn, 15);
        assert_eq!(settings.starting_cards, 7);
        assert!(settings.allow_var);
    }

    #[test]
    fn settings_validation_bounds() {
        assert!(GameSettings::default().validate().is_ok());

        let mut settings = GameSettings::default();
        settings.time_per_turn = 9_300_000_000_000_000;
        assert_eq!(settings.validate(), Err(GameError::InvalidSettings));

        let mut settings = GameSettings::default();
        settings.var_vote_duration = 0;
        assert_eq!(settings.validate(), Err(GameError::InvalidSettings));

        let mut settings = GameSettings::default();
        settings.starting_cards = 0;
        assert_eq!(settings.validate(), Err(GameError::InvalidSettings));

        let mut settings = GameSettings::default();
        settings.starting_cards = 100;
        assert_eq!(settings.validate(), Err(GameError::InvalidSettings));
    }

    #[test]
    fn error_kinds_cover_taxonomy() {
        assert_eq!(GameError::PlayerNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(GameError::NotYourTurn.kind(), ErrorKind::Unauthorized);
        assert_eq!(GameError::NoOpMove.kind(), ErrorKind::InvalidInput);
        assert_eq!(GameError::StaleState.kind(), ErrorKind::StaleState);
        assert_eq!(GameError::VarActive.kind(), ErrorKind::Conflict);
        assert_eq!(GameError::VarExpired.kind(), ErrorKind::Expired);
    }

    #[test]
    fn last_valid_move_skips_timeouts_and_invalid_attempts() {
        let player_id = Uuid::new_v4();
        let card = Card::new('ل', 'م');
        let mut state = GameState::default();
        assert!(state.last_valid_move().is_none());

        state.history.push(HistoryEntry::ValidMove(MoveRecord {
            player_id,
            before: "كتب".into(),
            after: "لتب".into(),
            card,
            face: Face::A,
            slot: 0,
            at: Utc::now(),
        }));
        state.history.push(HistoryEntry::Timeout {
            player_id,
            at: Utc::now(),
        });
        state.history.push(HistoryEntry::InvalidMove {
            player_id,
            attempted: "متب".into(),
            slot: 0,
            at: Utc::now(),
        });

        let record = state.last_valid_move().unwrap();
        assert_eq!(record.after, "لتب");
    }
}
