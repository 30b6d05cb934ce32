//! Wire events for the real-time channel.
//!
//! Frames are JSON objects tagged by an `event` field, e.g.
//! `{"event": "private_message", "recipient_id": "...", "content": "hi"}`.
//! The routing layer only ever deals in these types, never in a concrete
//! transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messaging::db::Message;

/// Events a connected client may send to the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Send a message to one recipient.
    PrivateMessage {
        recipient_id: Uuid,
        content: String,
        #[serde(default)]
        is_media: bool,
    },
}

/// Events the server pushes to connected clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// Complete set of currently online user ids, broadcast to everyone
    /// after each connect and disconnect.
    OnlineStatusUpdate { online: Vec<Uuid> },

    /// A message addressed to this connection's user.
    NewMessage {
        id: Uuid,
        sender_id: Uuid,
        content: String,
        is_media: bool,
        timestamp: DateTime<Utc>,
    },

    /// A new account was registered, broadcast to everyone.
    NewUserJoined { id: Uuid, username: String },
}

impl OutboundEvent {
    /// The push payload for a freshly persisted message.
    pub fn from_message(message: &Message) -> Self {
        OutboundEvent::NewMessage {
            id: message.id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            is_media: message.is_media,
            timestamp: message.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_event_wire_format() {
        let recipient = Uuid::new_v4();
        let json = format!(
            r#"{{"event":"private_message","recipient_id":"{recipient}","content":"hi"}}"#
        );
        let event: InboundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(
            event,
            InboundEvent::PrivateMessage {
                recipient_id: recipient,
                content: "hi".to_string(),
                is_media: false,
            }
        );
    }

    #[test]
    fn test_outbound_event_tag() {
        let event = OutboundEvent::OnlineStatusUpdate { online: vec![] };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"online_status_update""#));
    }
}
