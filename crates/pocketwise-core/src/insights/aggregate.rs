//! Record aggregation by calendar month and category

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::models::{Category, CategoryAmounts, ExpenseRecord};

/// First day of the month containing `now`
pub fn month_start(now: NaiveDateTime) -> NaiveDate {
    now.date().with_day(1).unwrap_or(now.date())
}

/// First day of the month before the one containing `now`
pub fn previous_month_start(now: NaiveDateTime) -> NaiveDate {
    let start = month_start(now);
    start.checked_sub_months(Months::new(1)).unwrap_or(start)
}

/// Number of days in the month containing `now` (28..=31)
pub fn days_in_month(now: NaiveDateTime) -> u32 {
    let start = month_start(now);
    match start.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(start).num_days() as u32,
        None => 31,
    }
}

/// Records split into the current and previous calendar month
#[derive(Debug, Clone, Default)]
pub struct MonthPartition {
    pub current: Vec<ExpenseRecord>,
    pub previous: Vec<ExpenseRecord>,
}

/// Whether a record falls on/after the first day of `now`'s month.
/// There is no upper bound, so future-dated records count as current.
pub fn is_current_month(record: &ExpenseRecord, now: NaiveDateTime) -> bool {
    record.occurred_at.date() >= month_start(now)
}

pub fn is_previous_month(record: &ExpenseRecord, now: NaiveDateTime) -> bool {
    let date = record.occurred_at.date();
    date >= previous_month_start(now) && date < month_start(now)
}

/// Split records into current and previous calendar month; older ones are dropped
pub fn partition_by_month(records: &[ExpenseRecord], now: NaiveDateTime) -> MonthPartition {
    let mut partition = MonthPartition::default();
    for record in records {
        if is_current_month(record, now) {
            partition.current.push(record.clone());
        } else if is_previous_month(record, now) {
            partition.previous.push(record.clone());
        }
    }
    partition
}

/// Sum of current-month amounts for one category
pub fn aggregate_by_category(
    records: &[ExpenseRecord],
    category: Category,
    now: NaiveDateTime,
) -> f64 {
    sum_current(records, category, now, |r| r.amount)
}

/// Sum of current-month carbon impact for one category
pub fn carbon_by_category(
    records: &[ExpenseRecord],
    category: Category,
    now: NaiveDateTime,
) -> f64 {
    sum_current(records, category, now, |r| r.carbon_impact)
}

fn sum_current(
    records: &[ExpenseRecord],
    category: Category,
    now: NaiveDateTime,
    value: impl Fn(&ExpenseRecord) -> f64,
) -> f64 {
    records
        .iter()
        .filter(|r| r.category == category && is_current_month(r, now))
        .map(value)
        .sum()
}

/// Per-category amount totals over an already-partitioned collection
pub fn category_totals(records: &[ExpenseRecord]) -> CategoryAmounts {
    let mut totals = CategoryAmounts::zeroed();
    for record in records {
        totals.add(record.category, record.amount);
    }
    totals
}

/// Per-category carbon totals over an already-partitioned collection
pub fn carbon_totals(records: &[ExpenseRecord]) -> CategoryAmounts {
    let mut totals = CategoryAmounts::zeroed();
    for record in records {
        totals.add(record.category, record.carbon_impact);
    }
    totals
}
