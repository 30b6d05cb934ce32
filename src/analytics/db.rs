//! Database operations for the daily analytics summary.
//!
//! The count queries take a connection rather than the pool so the job can
//! run its whole unit of work inside one transaction.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

/// One `daily_analytics` row: usage counts for a single calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub new_users_count: i64,
    pub messages_sent_count: i64,
}

/// UTC day bounds for `date`: `[midnight, next midnight)`.
fn day_bounds(date: NaiveDate) -> (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + chrono::Duration::days(1))
}

/// Number of users whose account was created on `date`.
pub async fn count_users_created_on(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let (start, end) = day_bounds(date);
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM users
        WHERE created_at >= $1 AND created_at < $2
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(conn)
    .await
}

/// Number of messages sent on `date`.
pub async fn count_messages_sent_on(
    conn: &mut SqliteConnection,
    date: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let (start, end) = day_bounds(date);
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM messages
        WHERE timestamp >= $1 AND timestamp < $2
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(conn)
    .await
}

/// Write the summary row for `date`, replacing any existing one. At most
/// one row per date ever exists.
pub async fn upsert_daily_summary(
    conn: &mut SqliteConnection,
    summary: &DailySummary,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO daily_analytics (id, date, new_users_count, messages_sent_count)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT(date) DO UPDATE SET
            new_users_count = excluded.new_users_count,
            messages_sent_count = excluded.messages_sent_count
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(summary.date)
    .bind(summary.new_users_count)
    .bind(summary.messages_sent_count)
    .execute(conn)
    .await?;

    Ok(())
}

/// The stored summary for `date`, if the job has run for it.
pub async fn get_daily_summary(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Option<DailySummary>, sqlx::Error> {
    sqlx::query_as::<_, DailySummary>(
        r#"
        SELECT date, new_users_count, messages_sent_count
        FROM daily_analytics
        WHERE date = $1
        "#,
    )
    .bind(date)
    .fetch_optional(pool)
    .await
}

/// How many summary rows exist for `date`. Exists to assert the upsert
/// invariant.
pub async fn count_summary_rows(pool: &SqlitePool, date: NaiveDate) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM daily_analytics
        WHERE date = $1
        "#,
    )
    .bind(date)
    .fetch_one(pool)
    .await
}
