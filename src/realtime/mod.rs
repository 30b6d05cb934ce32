//! Real-time channel: presence tracking and the WebSocket endpoint.

pub mod events;
pub mod presence;
pub mod socket;

pub use events::{InboundEvent, OutboundEvent};
pub use presence::{ClientHandle, PresenceRegistry};
