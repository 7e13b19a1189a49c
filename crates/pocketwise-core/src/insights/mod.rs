//! Insight Engine - heuristic spending analysis
//!
//! Pure functions over month-partitioned expense records. The host (see
//! [`crate::store::Store`]) partitions records by calendar month and calls
//! these after each mutation.
//!
//! ## Components
//!
//! - **Aggregator** - calendar-month partitioning and per-category sums
//! - **Generator** - month-over-month warnings, achievements and a tip
//! - **Forecaster** - end-of-month projection per category
//! - **Advisor** - budget cuts when the forecast exceeds income
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pocketwise_core::insights::{partition_by_month, predict_end_of_month};
//!
//! let months = partition_by_month(&records, now);
//! let forecast = predict_end_of_month(&months.current, &months.previous, now);
//! ```

pub mod advisor;
pub mod aggregate;
pub mod forecaster;
pub mod generator;
pub mod types;

pub use advisor::{
    category_warnings, suggest_budget_adjustments, suggest_budget_adjustments_at,
    suggest_from_predictions,
};
pub use aggregate::{
    aggregate_by_category, carbon_by_category, carbon_totals, category_totals, days_in_month,
    month_start, partition_by_month, previous_month_start, MonthPartition,
};
pub use forecaster::predict_end_of_month;
pub use generator::{generate_insights, FixedTip, InsightGenerator, RandomTips, TipSelector};
pub use types::{BudgetSuggestion, CategoryWarning, Insight, InsightKind, PredictedSpending};
