//! Pocketwise Core Library
//!
//! Budgeting analysis for the Pocketwise dashboard:
//! - Closed category taxonomy with carbon weights and saving tips
//! - Calendar-month aggregation of expense records
//! - Insight generation, end-of-month forecasting and budget advice
//! - Store that owns records and re-derives insights after each change
//! - TOML configuration and JSON/CSV records loading

pub mod config;
pub mod demo;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod store;

pub use config::{Config, ConfigSource};
pub use error::{Error, Result};
pub use import::{load_records, RecordFormat};
pub use insights::{
    aggregate_by_category, generate_insights, predict_end_of_month, suggest_budget_adjustments,
    BudgetSuggestion, Insight, InsightKind, PredictedSpending,
};
pub use models::{Budget, BudgetLimit, Category, ExpenseRecord, NewExpense, UserProfile};
pub use store::Store;
