//! Domain models for Pocketwise

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Tips shown when a category has no specific advice
const GENERIC_TIPS: &[&str] = &["Review your budget to find areas where you can reduce spending."];

/// Spending category (closed set)
///
/// Declaration order is the canonical iteration order used by every
/// per-category report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Utilities,
    Healthcare,
    Entertainment,
    Clothing,
    Education,
    Personal,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Self::Food,
        Self::Transportation,
        Self::Housing,
        Self::Utilities,
        Self::Healthcare,
        Self::Entertainment,
        Self::Clothing,
        Self::Education,
        Self::Personal,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Healthcare => "healthcare",
            Self::Entertainment => "entertainment",
            Self::Clothing => "clothing",
            Self::Education => "education",
            Self::Personal => "personal",
            Self::Other => "other",
        }
    }

    /// Display label (capitalized)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Entertainment => "Entertainment",
            Self::Clothing => "Clothing",
            Self::Education => "Education",
            Self::Personal => "Personal",
            Self::Other => "Other",
        }
    }

    /// Estimated emissions per unit of currency spent
    pub fn carbon_weight(&self) -> f64 {
        match self {
            Self::Food => 0.5,
            Self::Transportation => 0.8,
            Self::Housing => 0.3,
            Self::Utilities => 0.6,
            Self::Healthcare => 0.2,
            Self::Entertainment => 0.4,
            Self::Clothing => 0.7,
            Self::Education => 0.1,
            Self::Personal => 0.4,
            Self::Other => 0.3,
        }
    }

    /// Saving tips for this category, falling back to the generic list
    pub fn saving_tips(&self) -> &'static [&'static str] {
        match self {
            Self::Food => &[
                "Try meal planning to reduce food expenses.",
                "Consider cooking at home more often to save on restaurant bills.",
            ],
            Self::Transportation => &[
                "Look into carpooling or public transportation to reduce costs.",
                "Plan your trips more efficiently to save on fuel.",
            ],
            Self::Entertainment => &[
                "Consider free or low-cost entertainment options.",
                "Look for deals and discounts for entertainment activities.",
            ],
            Self::Healthcare => &[
                "Check if you're using in-network providers to reduce healthcare costs.",
                "Ask about generic medication options to save on prescriptions.",
            ],
            _ => GENERIC_TIPS,
        }
    }

    /// Housing and utilities are never proposed for reduction
    pub fn is_discretionary(&self) -> bool {
        !matches!(self, Self::Housing | Self::Utilities)
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An amount for every category, zero-filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAmounts(BTreeMap<Category, f64>);

impl CategoryAmounts {
    pub fn zeroed() -> Self {
        Self(Category::ALL.into_iter().map(|c| (c, 0.0)).collect())
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, category: Category, amount: f64) {
        self.0.insert(category, amount);
    }

    pub fn add(&mut self, category: Category, amount: f64) {
        *self.0.entry(category).or_insert(0.0) += amount;
    }

    /// Iterate in canonical category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(c, a)| (*c, *a))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl Default for CategoryAmounts {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Expense as submitted by a form or voice input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: Category,
    /// Local wall-clock time
    pub occurred_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewExpense {
    pub fn new(amount: f64, category: Category, occurred_at: NaiveDateTime) -> Self {
        Self {
            amount,
            category,
            occurred_at,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "expense amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// A recorded expense. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub amount: f64,
    pub category: Category,
    pub occurred_at: NaiveDateTime,
    pub notes: Option<String>,
    /// `amount * carbon_weight(category)`, fixed at creation
    pub carbon_impact: f64,
}

impl ExpenseRecord {
    /// Create a record, deriving its carbon impact once
    pub fn create(owner_id: impl Into<String>, expense: NewExpense) -> Self {
        let carbon_impact = expense.amount * expense.category.carbon_weight();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            amount: expense.amount,
            category: expense.category,
            occurred_at: expense.occurred_at,
            notes: expense.notes,
            carbon_impact,
        }
    }
}

/// Spending limit for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: Category,
    pub limit: f64,
}

/// Monthly budget: one limit per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BudgetLimit>", into = "Vec<BudgetLimit>")]
pub struct Budget {
    limits: Vec<BudgetLimit>,
}

impl Budget {
    /// Build a budget, rejecting duplicate categories and non-positive limits
    pub fn new(limits: Vec<BudgetLimit>) -> Result<Self> {
        let mut budget = Self { limits: Vec::new() };
        for limit in limits {
            if budget.limit_for(limit.category).is_some() {
                return Err(Error::InvalidData(format!(
                    "duplicate budget limit for {}",
                    limit.category
                )));
            }
            budget.set_limit(limit.category, limit.limit)?;
        }
        Ok(budget)
    }

    pub fn empty() -> Self {
        Self { limits: Vec::new() }
    }

    /// Insert or replace the limit for a category
    pub fn set_limit(&mut self, category: Category, limit: f64) -> Result<()> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(Error::InvalidData(format!(
                "budget limit for {} must be positive, got {}",
                category, limit
            )));
        }
        match self.limits.iter_mut().find(|l| l.category == category) {
            Some(existing) => existing.limit = limit,
            None => self.limits.push(BudgetLimit { category, limit }),
        }
        Ok(())
    }

    pub fn limit_for(&self, category: Category) -> Option<f64> {
        self.limits
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.limit)
    }

    pub fn limits(&self) -> &[BudgetLimit] {
        &self.limits
    }

    /// Always derived from the per-category limits
    pub fn total_limit(&self) -> f64 {
        self.limits.iter().map(|l| l.limit).sum()
    }
}

impl TryFrom<Vec<BudgetLimit>> for Budget {
    type Error = Error;

    fn try_from(limits: Vec<BudgetLimit>) -> Result<Self> {
        Self::new(limits)
    }
}

impl From<Budget> for Vec<BudgetLimit> {
    fn from(budget: Budget) -> Self {
        budget.limits
    }
}

/// Spent vs. limit for one budgeted category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub category: Category,
    pub limit: f64,
    pub spent: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Teen,
    #[default]
    Adult,
    Senior,
}

/// The dashboard's single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age_group: AgeGroup,
    pub monthly_income: f64,
    #[serde(default)]
    pub financial_goal: String,
    #[serde(default)]
    pub target_amount: Option<f64>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub carbon_score: i32,
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age_group: Option<AgeGroup>,
    pub monthly_income: Option<f64>,
    pub financial_goal: Option<String>,
    pub target_amount: Option<f64>,
    pub carbon_score: Option<i32>,
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age_group) = update.age_group {
            self.age_group = age_group;
        }
        if let Some(income) = update.monthly_income {
            self.monthly_income = income;
        }
        if let Some(goal) = update.financial_goal {
            self.financial_goal = goal;
        }
        if let Some(target) = update.target_amount {
            self.target_amount = Some(target);
        }
        if let Some(score) = update.carbon_score {
            self.carbon_score = score;
        }
    }
}

/// Carbon score bucket shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarbonRating {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl CarbonRating {
    pub fn from_score(score: i32) -> Self {
        match score.max(0) {
            s if s >= 80 => Self::Excellent,
            s if s >= 60 => Self::Good,
            s if s >= 40 => Self::Average,
            _ => Self::NeedsImprovement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for CarbonRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Budget,
    Eco,
    Daily,
}

/// Gamified saving challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub kind: ChallengeKind,
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_category_round_trip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(" Food ".parse::<Category>().unwrap(), Category::Food);
        assert!(matches!(
            "shopping".parse::<Category>(),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_only_housing_and_utilities_are_fixed() {
        let fixed: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| !c.is_discretionary())
            .collect();
        assert_eq!(fixed, vec![Category::Housing, Category::Utilities]);
    }

    #[test]
    fn test_generic_tips_for_unmapped_categories() {
        assert_eq!(Category::Clothing.saving_tips(), GENERIC_TIPS);
        assert_eq!(Category::Food.saving_tips().len(), 2);
    }

    #[test]
    fn test_carbon_impact_fixed_at_creation() {
        let record = ExpenseRecord::create(
            "1",
            NewExpense::new(200.0, Category::Transportation, at(2026, 3, 4)),
        );
        assert!((record.carbon_impact - 160.0).abs() < 1e-9);
        assert_eq!(record.owner_id, "1");
    }

    #[test]
    fn test_new_expense_rejects_negative_amount() {
        assert!(NewExpense::new(-1.0, Category::Food, at(2026, 3, 4))
            .validate()
            .is_err());
        assert!(NewExpense::new(0.0, Category::Food, at(2026, 3, 4))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_category_amounts_zero_filled() {
        let mut amounts = CategoryAmounts::zeroed();
        amounts.add(Category::Food, 10.0);
        amounts.add(Category::Food, 5.0);
        assert_eq!(amounts.iter().count(), 10);
        assert_eq!(amounts.get(Category::Food), 15.0);
        assert_eq!(amounts.get(Category::Other), 0.0);
        assert_eq!(amounts.total(), 15.0);
    }

    #[test]
    fn test_budget_total_is_derived() {
        let mut budget = Budget::new(vec![
            BudgetLimit {
                category: Category::Food,
                limit: 600.0,
            },
            BudgetLimit {
                category: Category::Housing,
                limit: 1500.0,
            },
        ])
        .unwrap();
        assert_eq!(budget.total_limit(), 2100.0);

        budget.set_limit(Category::Food, 400.0).unwrap();
        assert_eq!(budget.total_limit(), 1900.0);
        assert_eq!(budget.limits().len(), 2);
    }

    #[test]
    fn test_budget_rejects_duplicates_and_non_positive() {
        let dup = Budget::new(vec![
            BudgetLimit {
                category: Category::Food,
                limit: 1.0,
            },
            BudgetLimit {
                category: Category::Food,
                limit: 2.0,
            },
        ]);
        assert!(dup.is_err());

        let mut budget = Budget::empty();
        assert!(budget.set_limit(Category::Food, 0.0).is_err());
        assert_eq!(budget.total_limit(), 0.0);
    }

    #[test]
    fn test_carbon_rating_buckets() {
        assert_eq!(CarbonRating::from_score(82), CarbonRating::Excellent);
        assert_eq!(CarbonRating::from_score(60), CarbonRating::Good);
        assert_eq!(CarbonRating::from_score(40), CarbonRating::Average);
        assert_eq!(CarbonRating::from_score(-5), CarbonRating::NeedsImprovement);
    }

    #[test]
    fn test_profile_partial_update() {
        let mut user = UserProfile {
            id: "1".into(),
            name: "Alex".into(),
            age_group: AgeGroup::Adult,
            monthly_income: 5000.0,
            financial_goal: "Save".into(),
            target_amount: None,
            points: 10,
            carbon_score: 82,
        };
        user.apply(ProfileUpdate {
            monthly_income: Some(6000.0),
            ..Default::default()
        });
        assert_eq!(user.monthly_income, 6000.0);
        assert_eq!(user.name, "Alex");
        assert_eq!(user.points, 10);
    }
}
