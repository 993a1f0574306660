//! The room aggregate and its turn/move state machine.
//!
//! All mutation on a [`Room`] must be serialized by the caller (the room
//! actor); the engine itself is synchronous and validates every command
//! before mutating anything, so a rejection never leaves partial state.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    MAX_PLAYERS, MIN_PLAYERS, WORD_LEN, deck,
    dictionary::Dictionary,
    entities::{
        Face, GameError, GameEvent, GamePhase, GameSettings, GameState, HistoryEntry, MoveRecord,
        Player, PlayerId, PlayerView, RoomView,
    },
};

/// Acknowledgement returned to the acting player for a `play_card` command.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MoveOutcome {
    /// Whether the substitution produced a legal word.
    pub valid: bool,
    /// The authoritative center word after the move.
    pub word: String,
    /// Set when the move emptied the acting player's hand.
    pub winner: Option<PlayerId>,
}

/// A game session: player roster, live [`GameState`], and configuration.
/// Looked up by a short alphanumeric code.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Room {
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
    pub state: GameState,
}

/// Replace the letter at `slot`, leaving every other position untouched.
fn substitute(word: &str, slot: usize, letter: char) -> String {
    word.chars()
        .enumerate()
        .map(|(i, c)| if i == slot { letter } else { c })
        .collect()
}

impl Room {
    pub fn new(code: impl Into<String>, host: Player) -> Self {
        Self {
            code: code.into(),
            created_at: Utc::now(),
            players: vec![host],
            state: GameState::default(),
        }
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    fn player_index(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    fn require_host(&self, player_id: PlayerId) -> Result<(), GameError> {
        let player = self.player(player_id).ok_or(GameError::PlayerNotFound)?;
        if player.is_host {
            Ok(())
        } else {
            Err(GameError::NotHost)
        }
    }

    /// Drain the transient events accumulated since the last broadcast.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.events.drain(..).collect()
    }

    // ------------------------------------------------------------------
    // Roster operations
    // ------------------------------------------------------------------

    /// Seat a new player. Mid-game joiners are dealt a starting hand so the
    /// round-robin rotation over the live roster stays meaningful.
    pub fn join(&mut self, mut player: Player) -> Result<(), GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::RoomFull);
        }
        if matches!(self.state.phase, GamePhase::InGame | GamePhase::Var) {
            player.hand = deck::deal_hand(self.state.settings.starting_cards);
        }
        self.state.push_event(GameEvent::PlayerJoined {
            player_id: player.id,
            name: player.name.clone(),
        });
        self.players.push(player);
        Ok(())
    }

    /// A player leaves of their own accord.
    pub fn leave(&mut self, player_id: PlayerId, now: DateTime<Utc>) -> Result<(), GameError> {
        let index = self
            .player_index(player_id)
            .ok_or(GameError::PlayerNotFound)?;
        self.remove_at(index, now);
        Ok(())
    }

    /// Host removes another player from the room.
    pub fn remove_player(
        &mut self,
        host_id: PlayerId,
        target_id: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        self.require_host(host_id)?;
        let index = self
            .player_index(target_id)
            .ok_or(GameError::PlayerNotFound)?;
        self.state
            .push_event(GameEvent::PlayerRemoved { player_id: target_id });
        self.remove_at(index, now);
        Ok(())
    }

    /// Host hands the host role to another player. Exactly one host exists
    /// at all times.
    pub fn promote_to_host(
        &mut self,
        host_id: PlayerId,
        target_id: PlayerId,
    ) -> Result<(), GameError> {
        self.require_host(host_id)?;
        if self.player_index(target_id).is_none() {
            return Err(GameError::PlayerNotFound);
        }
        for player in &mut self.players {
            player.is_host = player.id == target_id;
        }
        self.state
            .push_event(GameEvent::HostChanged { player_id: target_id });
        Ok(())
    }

    pub fn change_settings(
        &mut self,
        host_id: PlayerId,
        settings: GameSettings,
    ) -> Result<(), GameError> {
        self.require_host(host_id)?;
        settings.validate()?;
        self.state.settings = settings;
        self.state.push_event(GameEvent::SettingsChanged);
        Ok(())
    }

    pub fn set_connected(
        &mut self,
        player_id: PlayerId,
        connected: bool,
    ) -> Result<(), GameError> {
        let index = self
            .player_index(player_id)
            .ok_or(GameError::PlayerNotFound)?;
        self.players[index].connected = connected;
        self.state
            .push_event(GameEvent::ConnectionChanged { player_id, connected });
        Ok(())
    }

    /// Remove the player at `index`, re-targeting the live turn and
    /// preserving the exactly-one-host invariant.
    fn remove_at(&mut self, index: usize, now: DateTime<Utc>) {
        let removed = self.players.remove(index);
        self.state.push_event(GameEvent::PlayerLeft {
            player_id: removed.id,
            name: removed.name.clone(),
        });

        if self.players.is_empty() {
            self.state.current_player_index = None;
            return;
        }

        if removed.is_host {
            self.players[0].is_host = true;
            self.state.push_event(GameEvent::HostChanged {
                player_id: self.players[0].id,
            });
        }

        if let Some(current) = self.state.current_player_index {
            if index < current {
                // The live player's effective position shifted left.
                self.state.current_player_index = Some(current - 1);
            } else if index == current {
                // The turn passes immediately and the new holder gets a
                // full timer.
                self.state.current_player_index = Some(index % self.players.len());
                self.state.turn_started_at = Some(now);
            }
        }
    }

    // ------------------------------------------------------------------
    // Game lifecycle
    // ------------------------------------------------------------------

    /// Host starts (or restarts) the game: deal hands, seed the center word,
    /// pick a random first player, reset clocks and VAR tokens.
    pub fn start_game(
        &mut self,
        host_id: PlayerId,
        dictionary: &Dictionary,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        self.require_host(host_id)?;
        if matches!(self.state.phase, GamePhase::InGame | GamePhase::Var) {
            return Err(GameError::GameInProgress);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers(MIN_PLAYERS));
        }

        let starting_cards = self.state.settings.starting_cards;
        for player in &mut self.players {
            player.hand = deck::deal_hand(starting_cards);
            player.has_used_var = false;
        }

        self.state.phase = GamePhase::InGame;
        self.state.center_word = Some(dictionary.pick_center_word().to_string());
        self.state.current_player_index =
            Some(rand::rng().random_range(0..self.players.len()));
        self.state.started_at = Some(now);
        self.state.turn_started_at = Some(now);
        self.state.history.clear();
        self.state.winner_id = None;
        self.state.var_session = None;
        self.state.push_event(GameEvent::GameStarted);
        log::info!("room {}: game started", self.code);
        Ok(())
    }

    /// Host resets the room to the lobby, discarding hands, history, and any
    /// open VAR session. Fully idempotent.
    pub fn reset_to_lobby(&mut self, host_id: PlayerId) -> Result<(), GameError> {
        self.require_host(host_id)?;
        for player in &mut self.players {
            player.hand.clear();
        }
        self.state.phase = GamePhase::Lobby;
        self.state.center_word = None;
        self.state.current_player_index = None;
        self.state.started_at = None;
        self.state.turn_started_at = None;
        self.state.history.clear();
        self.state.winner_id = None;
        self.state.var_session = None;
        self.state.push_event(GameEvent::ResetToLobby);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// The central operation: substitute one letter of the center word.
    ///
    /// Invalid words are penalized (the card stays, one card is drawn) but
    /// the turn still advances; valid words consume the card and may win the
    /// game. Rotation happens on every non-winning outcome.
    pub fn play_card(
        &mut self,
        player_id: PlayerId,
        card_index: usize,
        face: Face,
        target_slot: usize,
        observed_word: Option<&str>,
        dictionary: &Dictionary,
        now: DateTime<Utc>,
    ) -> Result<MoveOutcome, GameError> {
        if self.state.phase != GamePhase::InGame {
            return Err(GameError::NotRunning);
        }
        let center = self
            .state
            .center_word
            .clone()
            .ok_or(GameError::Internal)?;
        if let Some(observed) = observed_word
            && observed != center
        {
            return Err(GameError::StaleState);
        }
        let current = self
            .state
            .current_player_index
            .ok_or(GameError::Internal)?;
        if self.players[current].id != player_id {
            return Err(GameError::NotYourTurn);
        }
        if card_index >= self.players[current].hand.len() {
            return Err(GameError::InvalidCardIndex);
        }
        if target_slot >= WORD_LEN {
            return Err(GameError::InvalidTargetSlot);
        }

        let card = self.players[current].hand[card_index];
        let chosen_letter = card.face(face);
        let occupant = center
            .chars()
            .nth(target_slot)
            .ok_or(GameError::Internal)?;
        if chosen_letter == occupant {
            // A move must actually change the word.
            return Err(GameError::NoOpMove);
        }

        let candidate = substitute(&center, target_slot, chosen_letter);
        let valid = dictionary.is_valid_word(&candidate);

        if !valid {
            // Penalty: the played card stays, one fresh card is added, and
            // the turn still advances.
            self.players[current].hand.push(deck::draw_card());
            self.state.history.push(HistoryEntry::InvalidMove {
                player_id,
                attempted: candidate,
                slot: target_slot,
                at: now,
            });
            self.state
                .push_event(GameEvent::MoveApplied { player_id, valid: false });
            self.advance_turn(now);
            return Ok(MoveOutcome {
                valid: false,
                word: center,
                winner: None,
            });
        }

        self.players[current].hand.remove(card_index);
        self.state.center_word = Some(candidate.clone());
        self.state.history.push(HistoryEntry::ValidMove(MoveRecord {
            player_id,
            before: center,
            after: candidate.clone(),
            card,
            face,
            slot: target_slot,
            at: now,
        }));
        self.state
            .push_event(GameEvent::MoveApplied { player_id, valid: true });

        if self.players[current].hand.is_empty() {
            self.state.phase = GamePhase::GameOver;
            self.state.winner_id = Some(player_id);
            self.state.current_player_index = None;
            self.state.turn_started_at = None;
            self.state
                .push_event(GameEvent::GameWon { winner_id: player_id });
            log::info!("room {}: {player_id} won", self.code);
            return Ok(MoveOutcome {
                valid: true,
                word: candidate,
                winner: Some(player_id),
            });
        }

        self.advance_turn(now);
        Ok(MoveOutcome {
            valid: true,
            word: candidate,
            winner: None,
        })
    }

    /// Strict circular increment over the current roster, recomputed from
    /// the live player array each time. Resetting `turn_started_at` on every
    /// rotation is what makes the timeout sweep idempotent.
    pub(crate) fn advance_turn(&mut self, now: DateTime<Utc>) {
        if let Some(current) = self.state.current_player_index
            && !self.players.is_empty()
        {
            self.state.current_player_index = Some((current + 1) % self.players.len());
            self.state.turn_started_at = Some(now);
        }
    }

    /// Penalize the current player for an elapsed turn clock and pass the
    /// turn. Returns whether a timeout fired. Only runs in `InGame`; the
    /// clock is frozen during a VAR session.
    pub fn sweep_turn_timer(&mut self, now: DateTime<Utc>) -> bool {
        if self.state.phase != GamePhase::InGame {
            return false;
        }
        let (Some(turn_started), Some(current)) =
            (self.state.turn_started_at, self.state.current_player_index)
        else {
            return false;
        };
        let limit = Duration::seconds(self.state.settings.time_per_turn as i64);
        if now.signed_duration_since(turn_started) < limit {
            return false;
        }

        let player_id = self.players[current].id;
        self.players[current].hand.push(deck::draw_card());
        self.state
            .history
            .push(HistoryEntry::Timeout { player_id, at: now });
        self.state.push_event(GameEvent::TurnTimedOut { player_id });
        self.advance_turn(now);
        log::debug!("room {}: {player_id} timed out", self.code);
        true
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Build the snapshot broadcast to `player_id`: their own hand visible,
    /// opponents redacted to counts. `None` if the player is not seated.
    pub fn view_for(&self, player_id: PlayerId) -> Option<RoomView> {
        self.player(player_id)?;
        let players = self
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                name: p.name.clone(),
                is_host: p.is_host,
                connected: p.connected,
                has_used_var: p.has_used_var,
                card_count: p.hand.len(),
                hand: (p.id == player_id).then(|| p.hand.clone()),
            })
            .collect();
        Some(RoomView {
            code: self.code.clone(),
            created_at: self.created_at,
            players,
            state: self.state.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Card;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn dict() -> Dictionary {
        Dictionary::from_word_lists("كتب", "كتب\nلتب\nكتف\nذهب").unwrap()
    }

    fn card(a: char, b: char) -> Card {
        Card::new(a, b)
    }

    /// Room with players A, B, C; game started, A to act on "كتب".
    fn started_room() -> (Room, Dictionary, DateTime<Utc>) {
        let dictionary = dict();
        let now = Utc::now();
        let host = Player::new_host("A");
        let host_id = host.id;
        let mut room = Room::new("AB12", host);
        room.join(Player::new("B")).unwrap();
        room.join(Player::new("C")).unwrap();
        room.start_game(host_id, &dictionary, now).unwrap();
        room.state.current_player_index = Some(0);
        room.state.turn_started_at = Some(now);
        (room, dictionary, now)
    }

    #[test]
    fn start_game_requires_host_and_two_players() {
        let dictionary = dict();
        let now = Utc::now();
        let host = Player::new_host("A");
        let host_id = host.id;
        let mut room = Room::new("AB12", host);
        assert_eq!(
            room.start_game(host_id, &dictionary, now),
            Err(GameError::NotEnoughPlayers(2))
        );

        let guest = Player::new("B");
        let guest_id = guest.id;
        room.join(guest).unwrap();
        assert_eq!(
            room.start_game(guest_id, &dictionary, now),
            Err(GameError::NotHost)
        );

        room.start_game(host_id, &dictionary, now).unwrap();
        assert_eq!(room.state.phase, GamePhase::InGame);
        assert_eq!(room.state.center_word.as_deref(), Some("كتب"));
        assert!(room.players.iter().all(|p| p.hand.len() == 7));
        assert_eq!(
            room.start_game(host_id, &dictionary, now),
            Err(GameError::GameInProgress)
        );
    }

    #[test]
    fn valid_move_consumes_card_and_rotates() {
        let (mut room, dictionary, now) = started_room();
        let a = room.players[0].id;
        room.players[0].hand = vec![card('ل', 'م'), card('س', 'ش')];

        let outcome = room
            .play_card(a, 0, Face::A, 0, Some("كتب"), &dictionary, now)
            .unwrap();
        assert!(outcome.valid);
        assert_eq!(outcome.word, "لتب");
        assert_eq!(outcome.winner, None);
        assert_eq!(room.state.center_word.as_deref(), Some("لتب"));
        assert_eq!(room.players[0].hand.len(), 1);
        assert_eq!(room.state.current_player_index, Some(1));
    }

    #[test]
    fn invalid_move_penalizes_but_still_rotates() {
        let (mut room, dictionary, now) = started_room();
        let a = room.players[0].id;
        room.players[0].hand = vec![card('ز', 'ص')];

        let outcome = room
            .play_card(a, 0, Face::A, 0, Some("كتب"), &dictionary, now)
            .unwrap();
        assert!(!outcome.valid);
        assert_eq!(outcome.word, "كتب");
        assert_eq!(room.state.center_word.as_deref(), Some("كتب"));
        // The attempted card stays and one penalty card was drawn.
        assert_eq!(room.players[0].hand.len(), 2);
        assert_eq!(room.state.current_player_index, Some(1));
        assert!(matches!(
            room.state.history.last(),
            Some(HistoryEntry::InvalidMove { .. })
        ));
    }

    #[test]
    fn noop_move_is_rejected() {
        let (mut room, dictionary, now) = started_room();
        let a = room.players[0].id;
        room.players[0].hand = vec![card('ك', 'م')];
        assert_eq!(
            room.play_card(a, 0, Face::A, 0, None, &dictionary, now),
            Err(GameError::NoOpMove)
        );
        // Rejection mutated nothing.
        assert_eq!(room.players[0].hand.len(), 1);
        assert_eq!(room.state.current_player_index, Some(0));
    }

    #[test]
    fn stale_observed_word_is_rejected() {
        let (mut room, dictionary, now) = started_room();
        let a = room.players[0].id;
        assert_eq!(
            room.play_card(a, 0, Face::A, 0, Some("ذهب"), &dictionary, now),
            Err(GameError::StaleState)
        );
    }

    #[test]
    fn out_of_turn_and_out_of_range_are_rejected() {
        let (mut room, dictionary, now) = started_room();
        let a = room.players[0].id;
        let b = room.players[1].id;
        assert_eq!(
            room.play_card(b, 0, Face::A, 0, None, &dictionary, now),
            Err(GameError::NotYourTurn)
        );
        assert_eq!(
            room.play_card(a, 99, Face::A, 0, None, &dictionary, now),
            Err(GameError::InvalidCardIndex)
        );
        room.players[0].hand = vec![card('ل', 'م')];
        assert_eq!(
            room.play_card(a, 0, Face::A, 5, None, &dictionary, now),
            Err(GameError::InvalidTargetSlot)
        );
    }

    #[test]
    fn emptying_the_hand_wins() {
        let (mut room, dictionary, now) = started_room();
        let a = room.players[0].id;
        room.players[0].hand = vec![card('ل', 'م')];

        let outcome = room
            .play_card(a, 0, Face::A, 0, None, &dictionary, now)
            .unwrap();
        assert_eq!(outcome.winner, Some(a));
        assert_eq!(room.state.phase, GamePhase::GameOver);
        assert_eq!(room.state.winner_id, Some(a));
        assert_eq!(room.state.current_player_index, None);
        assert_eq!(room.state.turn_started_at, None);
    }

    #[test]
    fn timeout_sweep_penalizes_once_per_elapsed_timer() {
        let (mut room, _dictionary, now) = started_room();
        let later = now + Duration::seconds(16);

        assert!(!room.sweep_turn_timer(now + Duration::seconds(5)));
        assert!(room.sweep_turn_timer(later));
        assert_eq!(room.players[0].hand.len(), 8);
        assert_eq!(room.state.current_player_index, Some(1));
        assert_eq!(room.state.turn_started_at, Some(later));
        assert!(matches!(
            room.state.history.last(),
            Some(HistoryEntry::Timeout { .. })
        ));
        // The rotation reset the clock, so the same instant cannot fire
        // twice.
        assert!(!room.sweep_turn_timer(later));
    }

    #[test]
    fn removal_before_current_shifts_index_left() {
        let (mut room, _dictionary, now) = started_room();
        room.state.current_player_index = Some(2);
        let b = room.players[1].id;
        room.leave(b, now).unwrap();
        assert_eq!(room.state.current_player_index, Some(1));
    }

    #[test]
    fn removing_the_current_player_passes_the_turn_with_a_full_timer() {
        let (mut room, _dictionary, now) = started_room();
        room.state.current_player_index = Some(2);
        let c = room.players[2].id;
        let later = now + Duration::seconds(3);
        room.leave(c, later).unwrap();
        // removed_index mod new_player_count = 2 mod 2 = 0
        assert_eq!(room.state.current_player_index, Some(0));
        assert_eq!(room.state.turn_started_at, Some(later));
    }

    #[test]
    fn host_departure_promotes_first_remaining_player() {
        let (mut room, _dictionary, now) = started_room();
        let a = room.players[0].id;
        room.leave(a, now).unwrap();
        assert!(room.players[0].is_host);
        assert_eq!(room.players.iter().filter(|p| p.is_host).count(), 1);
    }

    #[test]
    fn promote_to_host_keeps_exactly_one_host() {
        let (mut room, _dictionary, _now) = started_room();
        let a = room.players[0].id;
        let c = room.players[2].id;
        room.promote_to_host(a, c).unwrap();
        assert_eq!(room.players.iter().filter(|p| p.is_host).count(), 1);
        assert!(room.player(c).unwrap().is_host);
        // The demoted host can no longer act as one.
        assert_eq!(
            room.promote_to_host(a, a),
            Err(GameError::NotHost)
        );
    }

    #[test]
    fn join_caps_at_four_players_and_deals_mid_game() {
        let (mut room, _dictionary, _now) = started_room();
        let late = Player::new("D");
        room.join(late).unwrap();
        assert_eq!(room.players[3].hand.len(), 7);
        assert_eq!(room.join(Player::new("E")), Err(GameError::RoomFull));
    }

    #[test]
    fn out_of_range_settings_are_rejected_before_storage() {
        let (mut room, _dictionary, now) = started_room();
        let a = room.players[0].id;

        // A duration this large would overflow the timer arithmetic if it
        // ever reached the sweep.
        let mut settings = GameSettings::default();
        settings.time_per_turn = 9_300_000_000_000_000;
        assert_eq!(
            room.change_settings(a, settings),
            Err(GameError::InvalidSettings)
        );
        assert_eq!(room.state.settings.time_per_turn, 15);

        let mut settings = GameSettings::default();
        settings.starting_cards = 0;
        assert_eq!(
            room.change_settings(a, settings),
            Err(GameError::InvalidSettings)
        );

        // The room keeps ticking normally after the rejections.
        assert!(room.sweep_turn_timer(now + Duration::seconds(16)));
    }

    #[test]
    fn invalid_move_history_reveals_no_card_identity() {
        let (mut room, dictionary, now) = started_room();
        let a = room.players[0].id;
        let b = room.players[1].id;
        room.players[0].hand = vec![card('ز', 'ص')];
        room.players[1].hand = vec![card('ب', 'ت')];

        room.play_card(a, 0, Face::A, 0, None, &dictionary, now)
            .unwrap();

        // The attempted card stays in A's hand; an opponent's snapshot must
        // not carry its identity anywhere, history included.
        let retained_ids: Vec<String> = room.players[0]
            .hand
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        let snapshot = serde_json::to_string(&room.view_for(b).unwrap()).unwrap();
        for id in retained_ids {
            assert!(!snapshot.contains(&id));
        }
        assert!(!snapshot.contains('ص'));
    }

    #[test]
    fn reset_to_lobby_is_idempotent() {
        let (mut room, _dictionary, _now) = started_room();
        let a = room.players[0].id;
        room.reset_to_lobby(a).unwrap();
        room.reset_to_lobby(a).unwrap();
        assert_eq!(room.state.phase, GamePhase::Lobby);
        assert!(room.state.center_word.is_none());
        assert!(room.state.history.is_empty());
        assert!(room.players.iter().all(|p| p.hand.is_empty()));
    }

    #[test]
    fn views_redact_opponent_hands() {
        let (room, _dictionary, _now) = started_room();
        let a = room.players[0].id;
        let view = room.view_for(a).unwrap();
        assert!(view.players[0].hand.is_some());
        assert!(view.players[1].hand.is_none());
        assert_eq!(view.players[1].card_count, 7);
        assert!(room.view_for(Uuid::new_v4()).is_none());
    }

    proptest! {
        /// For any accepted substitution, the result differs from the input
        /// in exactly one character position, and that position is the slot.
        #[test]
        fn substitute_changes_exactly_one_position(
            word_idx in 0usize..3,
            letter_idx in 0usize..29,
        ) {
            let word = "كتب";
            let letter = crate::game::dictionary::ALPHABET[letter_idx];
            let occupant = word.chars().nth(word_idx).unwrap();
            prop_assume!(letter != occupant);

            let candidate = substitute(word, word_idx, letter);
            let diffs: Vec<usize> = word
                .chars()
                .zip(candidate.chars())
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(i, _)| i)
                .collect();
            prop_assert_eq!(diffs, vec![word_idx]);
        }
    }
}
