//! Core types for the insight engine

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Category, CategoryAmounts};

/// Forecast of full-month spending per category
pub type PredictedSpending = CategoryAmounts;

/// Kind of observation an insight carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Spending moved in a worrying direction
    Warning,
    /// Advice for the heaviest category
    Tip,
    /// Spending dropped noticeably
    Achievement,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Tip => "tip",
            InsightKind::Achievement => "achievement",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "tip" => Ok(InsightKind::Tip),
            "achievement" => Ok(InsightKind::Achievement),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A generated observation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub kind: InsightKind,
    pub message: String,
    pub created_at: NaiveDateTime,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at,
        }
    }
}

/// Proposed new limit for a discretionary category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSuggestion {
    pub category: Category,
    pub suggested_limit: f64,
}

/// A budgeted category whose forecast exceeds its limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWarning {
    pub category: Category,
    pub predicted: f64,
    pub limit: f64,
    pub overage: f64,
    pub percent_over: f64,
}
