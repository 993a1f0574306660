//! WebSocket handler for real-time room communication.
//!
//! # Connection Flow
//!
//! 1. Client joins a room over HTTP and receives a `player_id`
//! 2. Client connects via `GET /ws/{code}?player_id=<uuid>`
//! 3. Server validates the seat, subscribes the player to room broadcasts,
//!    and pushes an initial snapshot
//! 4. Commands flow client-to-server as JSON; every state change comes back
//!    as a personalized snapshot frame
//! 5. On disconnect the player stays seated but is marked disconnected, so
//!    they can reconnect with the same `player_id`
//!
//! # Frames
//!
//! Server frames are tagged JSON: `snapshot` (room state plus the events
//! that caused it, `room: null` means the player was removed), `played`
//! (acknowledgement of a card play), `ack`, and `error`.

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use harf::{
    GameError, GameEvent, PlayerId, RoomMessage, RoomView, VoteChoice,
    game::entities::{ErrorKind, Face, GameSettings},
    room::{actor::RoomHandle, messages::RoomBroadcast},
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    player_id: PlayerId,
}

/// Client commands received via WebSocket. Joining happens over HTTP before
/// the socket is opened.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    /// Host starts the game
    StartGame,
    /// Play one face of one card into one slot of the center word
    PlayCard {
        card_index: usize,
        face: Face,
        target_slot: usize,
        observed_word: Option<String>,
    },
    /// Host updates room settings
    ChangeSettings { settings: GameSettings },
    /// Host removes another player
    RemovePlayer { target_id: PlayerId },
    /// Host hands the host role to another player
    PromoteToHost { target_id: PlayerId },
    /// Leave the room for good
    Leave,
    /// Host resets the room to the lobby
    ResetToLobby,
    /// Open a VAR challenge against the last accepted move
    VarStart,
    /// Accused submits their explanation
    VarExplain { explanation: String },
    /// Cast a vote on the open challenge
    VarVote { choice: VoteChoice },
}

/// Frames sent to the client
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerFrame {
    /// Personalized room state; `room: null` means the player is no longer
    /// seated
    Snapshot {
        room: Option<RoomView>,
        events: Vec<GameEvent>,
    },
    /// Acknowledgement of a card play
    Played {
        valid: bool,
        word: String,
        winner: Option<PlayerId>,
    },
    /// Command succeeded
    Ack,
    /// Command rejected
    Error { code: ErrorKind, message: String },
}

impl ServerFrame {
    fn from_result(result: Result<(), GameError>) -> Self {
        match result {
            Ok(()) => ServerFrame::Ack,
            Err(error) => ServerFrame::Error {
                code: error.kind(),
                message: error.to_string(),
            },
        }
    }
}

/// Upgrade HTTP connection to WebSocket for real-time room communication.
///
/// The `player_id` query parameter must belong to a seated player of the
/// room; anything else is rejected before the upgrade.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(code): Path<String>,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> Response {
    let Some(handle) = state.registry.get_room(&code).await else {
        return (StatusCode::NOT_FOUND, "Room not found").into_response();
    };

    let (tx, rx) = oneshot::channel();
    let seated = handle
        .send(RoomMessage::GetView {
            player_id: query.player_id,
            response: tx,
        })
        .await
        .is_ok()
        && matches!(rx.await, Ok(Some(_)));
    if !seated {
        return (StatusCode::FORBIDDEN, "Not a player in this room").into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, handle, query.player_id))
}

/// Drive an established WebSocket connection until either side closes it.
async fn handle_socket(socket: WebSocket, handle: RoomHandle, player_id: PlayerId) {
    let (mut sink, mut stream) = socket.split();

    info!("WebSocket connected: room={}, player={}", handle.code(), player_id);

    let (broadcast_tx, mut broadcast_rx) = mpsc::channel::<RoomBroadcast>(32);
    if handle
        .send(RoomMessage::Subscribe {
            player_id,
            sender: broadcast_tx,
        })
        .await
        .is_err()
    {
        return;
    }
    let _ = handle
        .send(RoomMessage::SetConnected {
            player_id,
            connected: true,
        })
        .await;

    // Initial snapshot so the client renders before anything happens.
    let (tx, rx) = oneshot::channel();
    if handle
        .send(RoomMessage::GetView {
            player_id,
            response: tx,
        })
        .await
        .is_ok()
        && let Ok(view) = rx.await
        && send_frame(
            &mut sink,
            &ServerFrame::Snapshot {
                room: view,
                events: Vec::new(),
            },
        )
        .await
        .is_err()
    {
        return;
    }

    // Set when the player leaves or is removed; no disconnect bookkeeping
    // is owed for a player who is gone.
    let mut left_room = false;

    loop {
        tokio::select! {
            broadcast = broadcast_rx.recv() => {
                let Some(broadcast) = broadcast else {
                    // Room actor shut down.
                    break;
                };
                let removed = broadcast.view.is_none();
                let frame = ServerFrame::Snapshot {
                    room: broadcast.view,
                    events: broadcast.events,
                };
                if send_frame(&mut sink, &frame).await.is_err() {
                    break;
                }
                if removed {
                    left_room = true;
                    break;
                }
            }

            message = stream.next() => {
                let Some(Ok(message)) = message else {
                    break;
                };
                match message {
                    Message::Text(text) => {
                        let frame = match serde_json::from_str::<ClientMessage>(text.as_str()) {
                            Ok(command) => {
                                let is_leave = matches!(command, ClientMessage::Leave);
                                let frame = dispatch(&handle, player_id, command).await;
                                if is_leave && matches!(frame, ServerFrame::Ack) {
                                    left_room = true;
                                }
                                frame
                            }
                            Err(error) => {
                                warn!("Malformed client message: {error}");
                                ServerFrame::Error {
                                    code: ErrorKind::InvalidInput,
                                    message: "Malformed message".to_string(),
                                }
                            }
                        };
                        if send_frame(&mut sink, &frame).await.is_err() {
                            break;
                        }
                        if left_room {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    }

    if !left_room {
        let _ = handle
            .send(RoomMessage::SetConnected {
                player_id,
                connected: false,
            })
            .await;
        let _ = handle.send(RoomMessage::Unsubscribe { player_id }).await;
    }

    debug!("WebSocket closed: room={}, player={}", handle.code(), player_id);
}

async fn send_frame(
    sink: &mut SplitSink<WebSocket, Message>,
    frame: &ServerFrame,
) -> Result<(), axum::Error> {
    let text = serde_json::to_string(frame).expect("server frames serialize");
    sink.send(Message::Text(text.into())).await
}

/// Forward one client command to the room actor and shape its reply.
async fn dispatch(handle: &RoomHandle, player_id: PlayerId, command: ClientMessage) -> ServerFrame {
    match command {
        ClientMessage::StartGame => {
            simple_command(handle, |response| RoomMessage::StartGame {
                player_id,
                response,
            })
            .await
        }

        ClientMessage::PlayCard {
            card_index,
            face,
            target_slot,
            observed_word,
        } => {
            let (tx, rx) = oneshot::channel();
            let sent = handle
                .send(RoomMessage::PlayCard {
                    player_id,
                    card_index,
                    face,
                    target_slot,
                    observed_word,
                    response: tx,
                })
                .await;
            match (sent, rx.await) {
                (Ok(()), Ok(Ok(outcome))) => ServerFrame::Played {
                    valid: outcome.valid,
                    word: outcome.word,
                    winner: outcome.winner,
                },
                (Ok(()), Ok(Err(error))) => ServerFrame::Error {
                    code: error.kind(),
                    message: error.to_string(),
                },
                _ => internal_error(),
            }
        }

        ClientMessage::ChangeSettings { settings } => {
            simple_command(handle, |response| RoomMessage::ChangeSettings {
                player_id,
                settings,
                response,
            })
            .await
        }

        ClientMessage::RemovePlayer { target_id } => {
            simple_command(handle, |response| RoomMessage::RemovePlayer {
                player_id,
                target_id,
                response,
            })
            .await
        }

        ClientMessage::PromoteToHost { target_id } => {
            simple_command(handle, |response| RoomMessage::PromoteToHost {
                player_id,
                target_id,
                response,
            })
            .await
        }

        ClientMessage::Leave => {
            simple_command(handle, |response| RoomMessage::Leave {
                player_id,
                response,
            })
            .await
        }

        ClientMessage::ResetToLobby => {
            simple_command(handle, |response| RoomMessage::ResetToLobby {
                player_id,
                response,
            })
            .await
        }

        ClientMessage::VarStart => {
            simple_command(handle, |response| RoomMessage::VarStart {
                player_id,
                response,
            })
            .await
        }

        ClientMessage::VarExplain { explanation } => {
            simple_command(handle, |response| RoomMessage::VarExplain {
                player_id,
                explanation,
                response,
            })
            .await
        }

        ClientMessage::VarVote { choice } => {
            simple_command(handle, |response| RoomMessage::VarVote {
                player_id,
                choice,
                response,
            })
            .await
        }
    }
}

async fn simple_command(
    handle: &RoomHandle,
    build: impl FnOnce(oneshot::Sender<Result<(), GameError>>) -> RoomMessage,
) -> ServerFrame {
    let (tx, rx) = oneshot::channel();
    if handle.send(build(tx)).await.is_err() {
        return internal_error();
    }
    match rx.await {
        Ok(result) => ServerFrame::from_result(result),
        Err(_) => internal_error(),
    }
}

fn internal_error() -> ServerFrame {
    ServerFrame::Error {
        code: ErrorKind::Internal,
        message: "Room is closed".to_string(),
    }
}
