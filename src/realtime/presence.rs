//! In-memory presence registry.
//!
//! Maps each authenticated user to the handle of their currently active
//! connection. The map is process-local state: it starts empty, is mutated
//! only through [`PresenceRegistry::connect`] and
//! [`PresenceRegistry::disconnect`], and is gone on restart, so every user
//! appears offline until they reconnect.
//!
//! The registry is shared across a multi-threaded runtime, so the map sits
//! behind a `Mutex`. Critical sections are short and never await.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::realtime::events::OutboundEvent;

/// Handle to one live connection: an id for removal-by-value plus the
/// sending half of the connection's outbound event channel.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    connection_id: Uuid,
    sender: mpsc::UnboundedSender<OutboundEvent>,
}

impl ClientHandle {
    pub fn new(connection_id: Uuid, sender: mpsc::UnboundedSender<OutboundEvent>) -> Self {
        Self {
            connection_id,
            sender,
        }
    }

    pub fn connection_id(&self) -> Uuid {
        self.connection_id
    }

    /// Push an event to this connection. Delivery is best-effort: a closed
    /// channel just reports `false`, it is never an error.
    pub fn push(&self, event: OutboundEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Registry of online users.
#[derive(Clone, Default)]
pub struct PresenceRegistry {
    inner: Arc<Mutex<HashMap<Uuid, ClientHandle>>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection for `user_id`, replacing any previous one.
    ///
    /// Overwrite-on-connect means only the most recent connection of a user
    /// is addressable; there is no multi-device fan-out.
    pub fn connect(&self, user_id: Uuid, handle: ClientHandle) {
        let mut map = self.inner.lock().unwrap();
        if map.insert(user_id, handle).is_some() {
            tracing::debug!("Replaced existing connection for user {user_id}");
        }
        tracing::info!("User {user_id} connected, {} online", map.len());
    }

    /// Remove whatever entry currently maps to `connection_id`.
    ///
    /// Disconnects are reported per-connection, not per-user, so this is a
    /// lookup by value. Returns whether an entry was removed; a stale
    /// connection that was already replaced by a newer one removes nothing.
    pub fn disconnect(&self, connection_id: Uuid) -> bool {
        let mut map = self.inner.lock().unwrap();
        let user_id = map
            .iter()
            .find(|(_, handle)| handle.connection_id() == connection_id)
            .map(|(user_id, _)| *user_id);

        match user_id {
            Some(user_id) => {
                map.remove(&user_id);
                tracing::info!("User {user_id} disconnected, {} online", map.len());
                true
            }
            None => false,
        }
    }

    /// The handle for `user_id`, if they are online.
    pub fn lookup(&self, user_id: Uuid) -> Option<ClientHandle> {
        self.inner.lock().unwrap().get(&user_id).cloned()
    }

    /// Push an event to one user. Returns `false` when the user is offline
    /// or their channel is already closed.
    pub fn push(&self, user_id: Uuid, event: OutboundEvent) -> bool {
        match self.lookup(user_id) {
            Some(handle) => handle.push(event),
            None => false,
        }
    }

    /// Ids of all currently online users.
    pub fn online_ids(&self) -> Vec<Uuid> {
        self.inner.lock().unwrap().keys().copied().collect()
    }

    /// Send an event to every connected client. Closed channels are skipped
    /// silently; their connections are cleaned up by their own socket tasks.
    pub fn broadcast(&self, event: OutboundEvent) {
        let handles: Vec<ClientHandle> = self.inner.lock().unwrap().values().cloned().collect();
        for handle in handles {
            handle.push(event.clone());
        }
    }

    /// Broadcast the full online-id set to all connected clients.
    pub fn broadcast_online_status(&self) {
        self.broadcast(OutboundEvent::OnlineStatusUpdate {
            online: self.online_ids(),
        });
    }
}
