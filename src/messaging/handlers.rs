//! HTTP handlers for conversation listing and history retrieval.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::{get_user_by_id, list_peers};
use crate::error::ApiError;
use crate::messaging::db::{count_unread_by_peer, get_conversation, mark_conversation_read};
use crate::middleware::auth::AuthUser;

/// One row of the conversation listing: a peer plus the unread badge count.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub user: UserResponse,
    pub unread_count: i64,
}

/// Message payload returned by the history endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub is_media: bool,
    pub is_read: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// `GET /api/conversations` - every other user with the viewer's unread
/// count for them.
pub async fn list_conversations(
    State(pool): State<SqlitePool>,
    AuthUser(viewer): AuthUser,
) -> Result<Json<Vec<ConversationSummary>>, ApiError> {
    let peers = list_peers(&pool, viewer.user_id).await?;
    let unread: std::collections::HashMap<Uuid, i64> = count_unread_by_peer(&pool, viewer.user_id)
        .await?
        .into_iter()
        .collect();

    let summaries = peers
        .into_iter()
        .map(|peer| {
            let unread_count = unread.get(&peer.id).copied().unwrap_or(0);
            ConversationSummary {
                user: peer.into(),
                unread_count,
            }
        })
        .collect();

    Ok(Json(summaries))
}

/// `GET /api/conversations/{peer_id}/messages` - the full two-way history
/// with `peer_id`, ascending by timestamp.
///
/// Fetching always marks the peer's messages read first; there is no
/// separate acknowledgment step. The two steps are not wrapped in a
/// transaction: a message arriving between them simply stays unread until
/// the next fetch.
pub async fn fetch_conversation(
    State(pool): State<SqlitePool>,
    AuthUser(viewer): AuthUser,
    Path(peer_id): Path<Uuid>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    get_user_by_id(&pool, peer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No such user.".to_string()))?;

    let flipped = mark_conversation_read(&pool, viewer.user_id, peer_id).await?;
    if flipped > 0 {
        tracing::debug!(
            "Marked {flipped} messages from {peer_id} to {} as read",
            viewer.user_id
        );
    }

    let messages = get_conversation(&pool, viewer.user_id, peer_id).await?;

    Ok(Json(
        messages
            .into_iter()
            .map(|m| MessageResponse {
                id: m.id,
                sender_id: m.sender_id,
                receiver_id: m.receiver_id,
                content: m.content,
                is_media: m.is_media,
                is_read: m.is_read,
                timestamp: m.timestamp,
            })
            .collect(),
    ))
}
