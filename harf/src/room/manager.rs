//! Room registry for spawning and looking up room actors.

use std::{collections::HashMap, sync::Arc};

use rand::seq::IndexedRandom;
use tokio::{sync::RwLock, time::Duration};

use super::actor::{RoomActor, RoomHandle};
use crate::game::{
    dictionary::Dictionary,
    engine::Room,
    entities::{Player, PlayerId},
};

const CODE_LEN: usize = 4;
const CODE_CHARS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// Process-wide registry mapping room codes to live actor handles. Cheap to
/// clone; all clones share the same map.
#[derive(Clone)]
pub struct RoomRegistry {
    /// Active room handles
    rooms: Arc<RwLock<HashMap<String, RoomHandle>>>,

    /// Shared word lists handed to every room
    dictionary: Arc<Dictionary>,

    /// Tick period for room deadline sweeps
    sweep_interval: Duration,
}

impl RoomRegistry {
    pub fn new(dictionary: Arc<Dictionary>, sweep_interval: Duration) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            dictionary,
            sweep_interval,
        }
    }

    /// Create a room with a fresh code, spawn its actor, and seat the host.
    /// Returns the room code and the host's player id.
    pub async fn create_room(&self, host_name: impl Into<String>) -> (String, PlayerId) {
        let host = Player::new_host(host_name);
        let host_id = host.id;

        let mut rooms = self.rooms.write().await;
        let code = loop {
            let candidate: String = {
                let mut rng = rand::rng();
                (0..CODE_LEN)
                    .map(|_| *CODE_CHARS.choose(&mut rng).expect("charset is non-empty"))
                    .collect()
            };
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        let room = Room::new(code.clone(), host);
        let (actor, handle) =
            RoomActor::new(room, self.dictionary.clone(), self.sweep_interval);
        rooms.insert(code.clone(), handle);
        drop(rooms);

        // Remove the handle once the actor's run loop exits, whatever the
        // reason.
        let rooms = self.rooms.clone();
        let actor_code = code.clone();
        tokio::spawn(async move {
            actor.run().await;
            rooms.write().await.remove(&actor_code);
            log::info!("Room {actor_code} removed from registry");
        });

        log::info!("Room {code} created by {host_id}");
        (code, host_id)
    }

    /// Look up a room by code. Codes are case-insensitive.
    pub async fn get_room(&self, code: &str) -> Option<RoomHandle> {
        self.rooms.read().await.get(&code.to_uppercase()).cloned()
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
