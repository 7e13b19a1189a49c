//! Spending Forecaster
//!
//! Projects each category's current partial-month total to a full month.
//! With at least a week of data the observed daily run-rate is extrapolated;
//! before that, last month's daily rate fills the remaining days.

use chrono::{Datelike, NaiveDateTime};

use crate::models::{Category, ExpenseRecord};

use super::aggregate::{category_totals, days_in_month};
use super::types::PredictedSpending;

/// Day of month from which the current month's own run-rate is trusted
pub const MIN_DAYS_FOR_RUN_RATE: u32 = 7;

/// Predict end-of-month spending for every category.
///
/// Pure: the same inputs and `now` always give the same mapping.
pub fn predict_end_of_month(
    current: &[ExpenseRecord],
    previous: &[ExpenseRecord],
    now: NaiveDateTime,
) -> PredictedSpending {
    let day_of_month = now.day();
    let days_in_month = days_in_month(now);
    let remaining_days = days_in_month.saturating_sub(day_of_month) as f64;

    let current_totals = category_totals(current);
    let mut predictions = PredictedSpending::zeroed();

    if day_of_month >= MIN_DAYS_FOR_RUN_RATE {
        for (category, amount) in current_totals.iter() {
            let daily_average = amount / day_of_month as f64;
            predictions.set(category, amount + daily_average * remaining_days);
        }
    } else {
        let previous_totals = category_totals(previous);
        for category in Category::ALL {
            let projected = previous_totals.get(category) * remaining_days / days_in_month as f64;
            predictions.set(category, current_totals.get(category) + projected);
        }
    }

    tracing::debug!(
        day_of_month,
        days_in_month,
        total = predictions.total(),
        "Predicted end-of-month spending"
    );

    predictions
}
