//! Insight Generator
//!
//! Compares current-month against previous-month category totals and emits:
//! - a warning per category that grew by more than 25%
//! - an achievement per category that shrank by more than 20%
//! - one combined overspend warning for categories that jumped 1.5x past a
//!   significance floor
//! - one saving tip for the heaviest category this month

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Category, CategoryAmounts, ExpenseRecord};

use super::aggregate::category_totals;
use super::types::{Insight, InsightKind};

/// Percent increase above which a category gets a warning (exclusive)
pub const INCREASE_WARNING_PERCENT: f64 = 25.0;
/// Percent decrease below which a category gets an achievement (exclusive)
pub const DECREASE_ACHIEVEMENT_PERCENT: f64 = -20.0;
/// Growth factor marking a category as high spending
pub const HIGH_SPENDING_FACTOR: f64 = 1.5;
/// Current total a high-spending category must exceed
pub const HIGH_SPENDING_FLOOR: f64 = 1000.0;

/// Source of tip indices. Injected so callers can pin the chosen tip.
pub trait TipSelector {
    /// Return an index in `0..len`; `len` is never 0
    fn select(&mut self, len: usize) -> usize;
}

/// Uniform random tip choice
pub struct RandomTips {
    rng: StdRng,
}

impl RandomTips {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTips {
    fn default() -> Self {
        Self::new()
    }
}

impl TipSelector for RandomTips {
    fn select(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always picks the same index (clamped to the list)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTip(pub usize);

impl TipSelector for FixedTip {
    fn select(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

/// Produces insights from two month-partitioned record collections
#[derive(Debug, Clone)]
pub struct InsightGenerator {
    currency_symbol: String,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator {
    pub fn new() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }

    /// Use a different symbol in the overspend message
    pub fn with_currency_symbol(symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: symbol.into(),
        }
    }

    pub fn generate(
        &self,
        current: &[ExpenseRecord],
        previous: &[ExpenseRecord],
        now: NaiveDateTime,
        tips: &mut dyn TipSelector,
    ) -> Vec<Insight> {
        let current_totals = category_totals(current);
        let previous_totals = category_totals(previous);
        let mut insights = Vec::new();

        for (category, amount) in current_totals.iter() {
            let previous_amount = previous_totals.get(category);
            if previous_amount == 0.0 {
                continue;
            }

            let percent_change = (amount - previous_amount) / previous_amount * 100.0;
            if percent_change > INCREASE_WARNING_PERCENT {
                insights.push(Insight::new(
                    InsightKind::Warning,
                    format!(
                        "You spent {:.0}% more on {} this month compared to last month.",
                        percent_change, category
                    ),
                    now,
                ));
            } else if percent_change < DECREASE_ACHIEVEMENT_PERCENT {
                insights.push(Insight::new(
                    InsightKind::Achievement,
                    format!(
                        "Great job! You reduced your {} expenses by {:.0}% this month.",
                        category,
                        percent_change.abs()
                    ),
                    now,
                ));
            }
        }

        let high_spending: Vec<(Category, f64)> = current_totals
            .iter()
            .filter_map(|(category, amount)| {
                let previous_amount = previous_totals.get(category);
                (amount > previous_amount * HIGH_SPENDING_FACTOR && amount > HIGH_SPENDING_FLOOR)
                    .then_some((category, amount - previous_amount))
            })
            .collect();

        if !high_spending.is_empty() {
            let overspend: f64 = high_spending.iter().map(|(_, delta)| delta).sum();
            let names: Vec<&str> = high_spending.iter().map(|(c, _)| c.as_str()).collect();
            insights.push(Insight::new(
                InsightKind::Warning,
                format!(
                    "You might overspend {}{:.0} unless you cut back on {}.",
                    self.currency_symbol,
                    overspend.trunc(),
                    names.join(", ")
                ),
                now,
            ));
        }

        if let Some(category) = heaviest_category(&current_totals) {
            let options = category.saving_tips();
            let index = tips.select(options.len()).min(options.len() - 1);
            insights.push(Insight::new(InsightKind::Tip, options[index], now));
        }

        tracing::debug!(
            current = current.len(),
            previous = previous.len(),
            generated = insights.len(),
            "Generated insights"
        );

        insights
    }
}

/// Category with the largest current total, if any total is above zero.
/// Ties go to the earlier category.
fn heaviest_category(totals: &CategoryAmounts) -> Option<Category> {
    let mut best: Option<(Category, f64)> = None;
    for (category, amount) in totals.iter() {
        let max = best.map(|(_, a)| a).unwrap_or(0.0);
        if amount > max {
            best = Some((category, amount));
        }
    }
    best.map(|(category, _)| category)
}

/// Generate insights stamped with the local wall clock, choosing tips at random
pub fn generate_insights(current: &[ExpenseRecord], previous: &[ExpenseRecord]) -> Vec<Insight> {
    let now = chrono::Local::now().naive_local();
    InsightGenerator::new().generate(current, previous, now, &mut RandomTips::new())
}
