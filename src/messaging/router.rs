//! Message routing: durable persistence first, then best-effort live push.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::messaging::db::{insert_message, Message};
use crate::realtime::events::OutboundEvent;
use crate::realtime::presence::PresenceRegistry;

/// Route one outbound message.
///
/// The message is persisted before any delivery is attempted, so a
/// recipient fetching history concurrently never misses it; presence is
/// consulted only afterwards. If the recipient is offline, or the push to
/// their handle fails, nothing further happens: the persisted row is the
/// only guarantee, and the recipient discovers it on their next history
/// fetch. There is no acknowledgment and no retry.
pub async fn send_direct_message(
    pool: &SqlitePool,
    presence: &PresenceRegistry,
    sender_id: Uuid,
    recipient_id: Uuid,
    content: &str,
    is_media: bool,
) -> Result<Message, ApiError> {
    get_user_by_id(pool, recipient_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipient does not exist.".to_string()))?;

    let message = insert_message(pool, sender_id, recipient_id, content, is_media).await?;

    let delivered = presence.push(recipient_id, OutboundEvent::from_message(&message));
    tracing::debug!(
        "Message {} from {sender_id} to {recipient_id}: {}",
        message.id,
        if delivered {
            "pushed to live connection"
        } else {
            "recipient offline, stored only"
        }
    );

    Ok(message)
}
