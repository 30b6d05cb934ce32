//! The daily aggregation job.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::analytics::db::{
    count_messages_sent_on, count_users_created_on, upsert_daily_summary, DailySummary,
};

/// Aggregate usage counts for today's calendar date.
pub async fn run_daily_aggregation(pool: &SqlitePool) -> Result<DailySummary, sqlx::Error> {
    aggregate_for_date(pool, Utc::now().date_naive()).await
}

/// Aggregate usage counts for one calendar date and upsert its summary row.
///
/// The counts and the upsert run in a single transaction: any failure rolls
/// the whole unit back, so there is never a partial write. Re-running for
/// the same date replaces the previous counts.
pub async fn aggregate_for_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<DailySummary, sqlx::Error> {
    tracing::info!("Starting aggregation for {date}");

    let mut tx = pool.begin().await?;

    let new_users_count = count_users_created_on(&mut tx, date).await?;
    tracing::info!("Found {new_users_count} new users on {date}");

    let messages_sent_count = count_messages_sent_on(&mut tx, date).await?;
    tracing::info!("Found {messages_sent_count} messages sent on {date}");

    let summary = DailySummary {
        date,
        new_users_count,
        messages_sent_count,
    };
    upsert_daily_summary(&mut tx, &summary).await?;

    tx.commit().await?;
    tracing::info!("Summary row written for {date}");

    Ok(summary)
}
