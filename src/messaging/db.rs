//! Database operations for messages.
//!
//! Messages are immutable after creation except for the read flag, which
//! flips false to true exactly once, when the receiver first fetches the
//! conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A persisted direct message.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    /// Text content or a media reference, per `is_media`.
    pub content: String,
    pub is_media: bool,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
}

/// Persist a new message with a server-assigned id and timestamp. Every
/// message starts unread.
pub async fn insert_message(
    pool: &SqlitePool,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: &str,
    is_media: bool,
) -> Result<Message, sqlx::Error> {
    let message = Message {
        id: Uuid::new_v4(),
        content: content.to_string(),
        is_media,
        is_read: false,
        timestamp: Utc::now(),
        sender_id,
        receiver_id,
    };

    sqlx::query(
        r#"
        INSERT INTO messages (id, content, is_media, is_read, timestamp, sender_id, receiver_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(message.id)
    .bind(&message.content)
    .bind(message.is_media)
    .bind(message.is_read)
    .bind(message.timestamp)
    .bind(message.sender_id)
    .bind(message.receiver_id)
    .execute(pool)
    .await?;

    Ok(message)
}

/// Mark every unread message from `peer_id` to `viewer_id` as read.
/// Returns how many rows flipped.
pub async fn mark_conversation_read(
    pool: &SqlitePool,
    viewer_id: Uuid,
    peer_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE messages
        SET is_read = 1
        WHERE sender_id = $1 AND receiver_id = $2 AND is_read = 0
        "#,
    )
    .bind(peer_id)
    .bind(viewer_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Full two-way conversation between `viewer_id` and `peer_id`, ascending
/// by timestamp.
pub async fn get_conversation(
    pool: &SqlitePool,
    viewer_id: Uuid,
    peer_id: Uuid,
) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, content, is_media, is_read, timestamp, sender_id, receiver_id
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY timestamp ASC
        "#,
    )
    .bind(viewer_id)
    .bind(peer_id)
    .fetch_all(pool)
    .await
}

/// Count of unread messages from `peer_id` to `viewer_id`.
pub async fn count_unread(
    pool: &SqlitePool,
    viewer_id: Uuid,
    peer_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM messages
        WHERE sender_id = $1 AND receiver_id = $2 AND is_read = 0
        "#,
    )
    .bind(peer_id)
    .bind(viewer_id)
    .fetch_one(pool)
    .await
}

/// Unread counts towards `viewer_id`, grouped by sending peer. Peers with
/// no unread messages are absent.
pub async fn count_unread_by_peer(
    pool: &SqlitePool,
    viewer_id: Uuid,
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (Uuid, i64)>(
        r#"
        SELECT sender_id, COUNT(*)
        FROM messages
        WHERE receiver_id = $1 AND is_read = 0
        GROUP BY sender_id
        "#,
    )
    .bind(viewer_id)
    .fetch_all(pool)
    .await
}
