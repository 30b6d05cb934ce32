//! Daily usage analytics: count queries and the batch aggregation job.

pub mod db;
pub mod job;

pub use db::DailySummary;
pub use job::{aggregate_for_date, run_daily_aggregation};
