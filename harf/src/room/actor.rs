//! Room actor with async message handling.

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::{
    sync::mpsc,
    time::{Duration, interval},
};

use super::messages::{RoomBroadcast, RoomMessage};
use crate::game::{dictionary::Dictionary, engine::Room, entities::PlayerId};

/// Room actor handle for sending commands.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    code: String,
}

impl RoomHandle {
    pub fn new(sender: mpsc::Sender<RoomMessage>, code: String) -> Self {
        Self { sender, code }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Send a command to the room. Fails only when the room has shut down.
    pub async fn send(&self, message: RoomMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .await
            .map_err(|_| "Room is closed".to_string())
    }
}

/// Actor owning a single room. All game state mutation happens on this task.
pub struct RoomActor {
    /// The room state, owned exclusively
    room: Room,

    /// Shared read-only word lists
    dictionary: Arc<Dictionary>,

    /// Command inbox
    inbox: mpsc::Receiver<RoomMessage>,

    /// How often the turn and VAR deadlines are swept
    sweep_interval: Duration,

    /// Subscribers for state broadcasts
    subscribers: HashMap<PlayerId, mpsc::Sender<RoomBroadcast>>,

    /// Set when the last player leaves; the run loop exits on the next pass
    is_closed: bool,
}

impl RoomActor {
    pub fn new(
        room: Room,
        dictionary: Arc<Dictionary>,
        sweep_interval: Duration,
    ) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let handle = RoomHandle::new(sender, room.code.clone());
        let actor = Self {
            room,
            dictionary,
            inbox,
            sweep_interval,
            subscribers: HashMap::new(),
            is_closed: false,
        };
        (actor, handle)
    }

    /// Run the room actor event loop: apply commands in arrival order and
    /// sweep the turn/VAR deadlines on a fixed tick.
    pub async fn run(mut self) {
        log::info!("Room {} starting", self.room.code);

        let mut sweep = interval(self.sweep_interval);

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    let Some(message) = message else {
                        break;
                    };
                    self.handle_message(message);
                    self.broadcast();

                    if self.is_closed {
                        break;
                    }
                }

                _ = sweep.tick() => {
                    let now = Utc::now();
                    let turn_fired = self.room.sweep_turn_timer(now);
                    let var_fired = self.room.sweep_var_timer(now);
                    if turn_fired || var_fired {
                        self.broadcast();
                    }
                }
            }
        }

        log::info!("Room {} closed", self.room.code);
    }

    fn handle_message(&mut self, message: RoomMessage) {
        let now = Utc::now();
        match message {
            RoomMessage::Join { player, response } => {
                let _ = response.send(self.room.join(player));
            }

            RoomMessage::Leave {
                player_id,
                response,
            } => {
                let result = self.room.leave(player_id, now);
                self.subscribers.remove(&player_id);
                self.is_closed = self.room.players.is_empty();
                let _ = response.send(result);
            }

            RoomMessage::ChangeSettings {
                player_id,
                settings,
                response,
            } => {
                let _ = response.send(self.room.change_settings(player_id, settings));
            }

            RoomMessage::RemovePlayer {
                player_id,
                target_id,
                response,
            } => {
                let result = self.room.remove_player(player_id, target_id, now);
                self.is_closed = self.room.players.is_empty();
                let _ = response.send(result);
            }

            RoomMessage::PromoteToHost {
                player_id,
                target_id,
                response,
            } => {
                let _ = response.send(self.room.promote_to_host(player_id, target_id));
            }

            RoomMessage::StartGame {
                player_id,
                response,
            } => {
                let _ = response.send(self.room.start_game(player_id, &self.dictionary, now));
            }

            RoomMessage::PlayCard {
                player_id,
                card_index,
                face,
                target_slot,
                observed_word,
                response,
            } => {
                let result = self.room.play_card(
                    player_id,
                    card_index,
                    face,
                    target_slot,
                    observed_word.as_deref(),
                    &self.dictionary,
                    now,
                );
                let _ = response.send(result);
            }

            RoomMessage::ResetToLobby {
                player_id,
                response,
            } => {
                let _ = response.send(self.room.reset_to_lobby(player_id));
            }

            RoomMessage::VarStart {
                player_id,
                response,
            } => {
                let _ = response.send(self.room.start_challenge(player_id, now));
            }

            RoomMessage::VarExplain {
                player_id,
                explanation,
                response,
            } => {
                let _ = response.send(self.room.submit_explanation(player_id, explanation, now));
            }

            RoomMessage::VarVote {
                player_id,
                choice,
                response,
            } => {
                let _ = response.send(self.room.vote(player_id, choice, now));
            }

            RoomMessage::SetConnected {
                player_id,
                connected,
            } => {
                let _ = self.room.set_connected(player_id, connected);
            }

            RoomMessage::GetView {
                player_id,
                response,
            } => {
                let _ = response.send(self.room.view_for(player_id));
            }

            RoomMessage::Subscribe { player_id, sender } => {
                self.subscribers.insert(player_id, sender);
                log::debug!("Player {} subscribed to room {}", player_id, self.room.code);
            }

            RoomMessage::Unsubscribe { player_id } => {
                self.subscribers.remove(&player_id);
                log::debug!(
                    "Player {} unsubscribed from room {}",
                    player_id,
                    self.room.code
                );
            }
        }
    }

    /// Push personalized snapshots to every subscriber. A subscriber who is
    /// no longer seated receives one final broadcast with `view: None` and
    /// is then dropped.
    fn broadcast(&mut self) {
        let events = self.room.drain_events();
        if events.is_empty() {
            return;
        }

        let room = &self.room;
        let code = room.code.clone();
        self.subscribers.retain(|player_id, sender| {
            let broadcast = RoomBroadcast {
                view: room.view_for(*player_id),
                events: events.clone(),
            };
            let still_seated = broadcast.view.is_some();
            match sender.try_send(broadcast) {
                Ok(()) => still_seated,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {player_id} channel full, dropping broadcast");
                    still_seated
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {player_id} disconnected, removing from {code}");
                    false
                }
            }
        });
    }
}
