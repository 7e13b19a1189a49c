//! Store - owner of the dashboard's mutable state
//!
//! Holds the expense records, budget, user profile, challenges and the most
//! recent insights. Every mutation of the record collection re-derives
//! insights and predicted spending through the pure functions in
//! [`crate::insights`], using a single "now" for the whole pass.

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::insights::{
    self, aggregate_by_category, carbon_totals, partition_by_month, BudgetSuggestion,
    CategoryWarning, Insight, InsightGenerator, MonthPartition, PredictedSpending, RandomTips,
    TipSelector,
};
use crate::models::{
    Budget, CarbonRating, Category, CategoryAmounts, CategoryProgress, Challenge, ExpenseRecord,
    NewExpense, ProfileUpdate, UserProfile,
};

/// Insights kept after merging, newest first
pub const MAX_RETAINED_INSIGHTS: usize = 10;

pub struct Store {
    user: UserProfile,
    budget: Budget,
    challenges: Vec<Challenge>,
    /// Newest first
    expenses: Vec<ExpenseRecord>,
    /// Newest first, at most [`MAX_RETAINED_INSIGHTS`]
    insights: Vec<Insight>,
    predicted: PredictedSpending,
    generator: InsightGenerator,
    tips: Box<dyn TipSelector>,
}

impl Store {
    pub fn new(user: UserProfile, budget: Budget) -> Self {
        Self {
            user,
            budget,
            challenges: Vec::new(),
            expenses: Vec::new(),
            insights: Vec::new(),
            predicted: PredictedSpending::zeroed(),
            generator: InsightGenerator::new(),
            tips: Box::new(RandomTips::new()),
        }
    }

    /// Build a store from the profile, budget, challenges and display options
    pub fn from_config(config: &Config) -> Self {
        let mut store = Self::new(config.profile.clone(), config.budget.clone());
        store.challenges = config.challenges.clone();
        store.generator = InsightGenerator::with_currency_symbol(&config.display.currency_symbol);
        store
    }

    /// Replace the tip selector (e.g. with a fixed or seeded one)
    pub fn with_tip_selector(mut self, tips: Box<dyn TipSelector>) -> Self {
        self.tips = tips;
        self
    }

    pub fn with_challenges(mut self, challenges: Vec<Challenge>) -> Self {
        self.challenges = challenges;
        self
    }

    /// Record a new expense and re-derive insights and predictions
    pub fn add_expense(
        &mut self,
        expense: NewExpense,
        now: NaiveDateTime,
    ) -> Result<&ExpenseRecord> {
        expense.validate()?;
        let record = ExpenseRecord::create(self.user.id.clone(), expense);
        self.expenses.insert(0, record);
        self.refresh(now);
        Ok(&self.expenses[0])
    }

    /// Record a batch of expenses with a single recomputation.
    ///
    /// The whole batch is validated first; nothing is added if any entry is
    /// invalid.
    pub fn add_expenses(
        &mut self,
        expenses: impl IntoIterator<Item = NewExpense>,
        now: NaiveDateTime,
    ) -> Result<usize> {
        let expenses: Vec<NewExpense> = expenses.into_iter().collect();
        for expense in &expenses {
            expense.validate()?;
        }
        let count = expenses.len();
        for expense in expenses {
            let record = ExpenseRecord::create(self.user.id.clone(), expense);
            self.expenses.insert(0, record);
        }
        if count > 0 {
            self.refresh(now);
        }
        Ok(count)
    }

    /// Recompute derived state for the month containing `now`
    pub fn refresh(&mut self, now: NaiveDateTime) {
        let months = partition_by_month(&self.expenses, now);

        let generated =
            self.generator
                .generate(&months.current, &months.previous, now, self.tips.as_mut());
        let generated_count = generated.len();
        let mut merged = generated;
        merged.append(&mut self.insights);
        merged.truncate(MAX_RETAINED_INSIGHTS);
        self.insights = merged;

        self.predicted = insights::predict_end_of_month(&months.current, &months.previous, now);

        tracing::debug!(
            records = self.expenses.len(),
            current = months.current.len(),
            previous = months.previous.len(),
            generated = generated_count,
            retained = self.insights.len(),
            "Store refreshed"
        );
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// All records, newest first
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// Retained insights, newest first
    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    /// Predictions from the last recomputation
    pub fn predicted_spending(&self) -> &PredictedSpending {
        &self.predicted
    }

    pub fn month_partition(&self, now: NaiveDateTime) -> MonthPartition {
        partition_by_month(&self.expenses, now)
    }

    pub fn current_month_expenses(&self, now: NaiveDateTime) -> Vec<ExpenseRecord> {
        self.month_partition(now).current
    }

    pub fn previous_month_expenses(&self, now: NaiveDateTime) -> Vec<ExpenseRecord> {
        self.month_partition(now).previous
    }

    pub fn category_total(&self, category: Category, now: NaiveDateTime) -> f64 {
        aggregate_by_category(&self.expenses, category, now)
    }

    pub fn total_spent(&self, now: NaiveDateTime) -> f64 {
        self.current_month_expenses(now).iter().map(|r| r.amount).sum()
    }

    /// Percent of the total budget spent this month; `None` without a budget
    pub fn budget_progress(&self, now: NaiveDateTime) -> Option<f64> {
        let total_limit = self.budget.total_limit();
        if total_limit <= 0.0 {
            return None;
        }
        Some(self.total_spent(now) / total_limit * 100.0)
    }

    /// Spent vs. limit per budgeted category, in budget order
    pub fn category_progress(&self, now: NaiveDateTime) -> Vec<CategoryProgress> {
        self.budget
            .limits()
            .iter()
            .map(|limit| {
                let spent = self.category_total(limit.category, now);
                CategoryProgress {
                    category: limit.category,
                    limit: limit.limit,
                    spent,
                    percentage: spent / limit.limit * 100.0,
                }
            })
            .collect()
    }

    /// Total carbon impact of this month's records
    pub fn carbon_impact(&self, now: NaiveDateTime) -> f64 {
        self.current_month_expenses(now)
            .iter()
            .map(|r| r.carbon_impact)
            .sum()
    }

    pub fn carbon_breakdown(&self, now: NaiveDateTime) -> CategoryAmounts {
        carbon_totals(&self.current_month_expenses(now))
    }

    pub fn carbon_rating(&self) -> CarbonRating {
        CarbonRating::from_score(self.user.carbon_score)
    }

    /// Budget cuts against the user's monthly income
    pub fn budget_suggestions(&self, now: NaiveDateTime) -> Vec<BudgetSuggestion> {
        let months = self.month_partition(now);
        insights::suggest_budget_adjustments_at(
            &months.current,
            &months.previous,
            self.user.monthly_income,
            now,
        )
    }

    /// Budgeted categories whose last prediction overruns the limit
    pub fn category_warnings(&self) -> Vec<CategoryWarning> {
        insights::category_warnings(&self.predicted, &self.budget)
    }

    pub fn update_user(&mut self, update: ProfileUpdate) -> &UserProfile {
        self.user.apply(update);
        &self.user
    }

    pub fn set_budget_limit(&mut self, category: Category, limit: f64) -> Result<()> {
        self.budget.set_limit(category, limit)
    }

    /// Mark a challenge completed and award its points.
    ///
    /// Returns the points awarded: 0 if it was already completed.
    pub fn complete_challenge(&mut self, id: &str) -> Result<u32> {
        let challenge = self
            .challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("challenge {}", id)))?;

        if challenge.completed {
            return Ok(0);
        }
        challenge.completed = true;
        self.user.points += challenge.points;
        tracing::debug!(challenge = id, points = challenge.points, "Challenge completed");
        Ok(challenge.points)
    }
}
