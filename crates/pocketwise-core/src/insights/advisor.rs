//! Budget Advisor
//!
//! When forecast spending exceeds income, proposes lower limits for the
//! largest discretionary categories. Also flags budgeted categories whose
//! forecast already overruns the limit.

use chrono::NaiveDateTime;

use crate::models::{Budget, Category, ExpenseRecord};

use super::forecaster::predict_end_of_month;
use super::types::{BudgetSuggestion, CategoryWarning, PredictedSpending};

/// Largest cut proposed for a single category, as a share of its forecast
pub const MAX_CUT_SHARE: f64 = 0.15;
/// Weight applied to a category's share of total forecast spending
pub const SHARE_WEIGHT: f64 = 2.0;
/// Cuts at or below this amount are not worth suggesting
pub const MIN_SUGGESTED_CUT: f64 = 100.0;
/// Category warnings shown at most
pub const MAX_CATEGORY_WARNINGS: usize = 3;

/// Suggest reduced limits from an existing forecast
pub fn suggest_from_predictions(
    predictions: &PredictedSpending,
    income: f64,
) -> Vec<BudgetSuggestion> {
    let total_predicted = predictions.total();
    if total_predicted <= income {
        return Vec::new();
    }

    let mut candidates: Vec<(Category, f64)> = predictions
        .iter()
        .filter(|(category, _)| category.is_discretionary())
        .collect();
    // Stable, so equal forecasts keep category order
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let reduction_needed = total_predicted - income;
    let mut reduction_assigned = 0.0;
    let mut suggestions = Vec::new();

    for (category, predicted) in candidates {
        let share = predicted / total_predicted * SHARE_WEIGHT;
        let reduction =
            (predicted * MAX_CUT_SHARE).min((reduction_needed - reduction_assigned) * share);

        if reduction > MIN_SUGGESTED_CUT {
            suggestions.push(BudgetSuggestion {
                category,
                suggested_limit: predicted - reduction,
            });
        }
        reduction_assigned += reduction;
    }

    tracing::debug!(
        total_predicted,
        income,
        suggestions = suggestions.len(),
        "Computed budget suggestions"
    );

    suggestions
}

/// Suggest budget cuts for the month containing `now`
pub fn suggest_budget_adjustments_at(
    current: &[ExpenseRecord],
    previous: &[ExpenseRecord],
    income: f64,
    now: NaiveDateTime,
) -> Vec<BudgetSuggestion> {
    let predictions = predict_end_of_month(current, previous, now);
    suggest_from_predictions(&predictions, income)
}

/// Suggest budget cuts using the local wall clock as "now"
pub fn suggest_budget_adjustments(
    current: &[ExpenseRecord],
    previous: &[ExpenseRecord],
    income: f64,
) -> Vec<BudgetSuggestion> {
    let now = chrono::Local::now().naive_local();
    suggest_budget_adjustments_at(current, previous, income, now)
}

/// Budgeted categories forecast to exceed their limit, worst overage first
pub fn category_warnings(predictions: &PredictedSpending, budget: &Budget) -> Vec<CategoryWarning> {
    let mut warnings: Vec<CategoryWarning> = budget
        .limits()
        .iter()
        .filter_map(|limit| {
            let predicted = predictions.get(limit.category);
            if predicted <= limit.limit {
                return None;
            }
            let overage = predicted - limit.limit;
            Some(CategoryWarning {
                category: limit.category,
                predicted,
                limit: limit.limit,
                overage,
                percent_over: overage / limit.limit * 100.0,
            })
        })
        .collect();

    warnings.sort_by(|a, b| {
        b.overage
            .partial_cmp(&a.overage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    warnings.truncate(MAX_CATEGORY_WARNINGS);
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetLimit, NewExpense};
    use chrono::NaiveDate;

    fn predictions(entries: &[(Category, f64)]) -> PredictedSpending {
        let mut p = PredictedSpending::zeroed();
        for (category, amount) in entries {
            p.set(*category, *amount);
        }
        p
    }

    fn scenario() -> PredictedSpending {
        predictions(&[
            (Category::Food, 1200.0),
            (Category::Transportation, 800.0),
            (Category::Housing, 1500.0),
            (Category::Entertainment, 600.0),
        ])
    }

    #[test]
    fn test_no_suggestions_within_income() {
        assert!(suggest_from_predictions(&scenario(), 4100.0).is_empty());
        assert!(suggest_from_predictions(&scenario(), 9000.0).is_empty());
    }

    #[test]
    fn test_scenario_suggestions() {
        let predicted = scenario();
        let suggestions = suggest_from_predictions(&predicted, 3000.0);

        let categories: Vec<_> = suggestions.iter().map(|s| s.category).collect();
        assert_eq!(categories, vec![Category::Food, Category::Transportation]);
        assert!((suggestions[0].suggested_limit - 1020.0).abs() < 1e-9);
        assert!((suggestions[1].suggested_limit - 680.0).abs() < 1e-9);

        for suggestion in &suggestions {
            let original = predicted.get(suggestion.category);
            assert!(suggestion.suggested_limit <= original);
            assert!(original - suggestion.suggested_limit > MIN_SUGGESTED_CUT);
        }
    }

    #[test]
    fn test_never_suggests_fixed_costs() {
        let predicted = predictions(&[
            (Category::Housing, 20000.0),
            (Category::Utilities, 9000.0),
            (Category::Food, 5000.0),
        ]);
        let suggestions = suggest_from_predictions(&predicted, 0.0);
        assert!(suggestions.iter().all(|s| s.category.is_discretionary()));
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, Category::Food);
    }

    #[test]
    fn test_share_cap_limits_cut() {
        // Needed 200; food share = 1000/3000*2, so cut = min(150, 133.3)
        let predicted = predictions(&[(Category::Food, 1000.0), (Category::Housing, 2000.0)]);
        let suggestions = suggest_from_predictions(&predicted, 2800.0);
        assert_eq!(suggestions.len(), 1);
        assert!((suggestions[0].suggested_limit - (1000.0 - 400.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_small_categories_fall_below_floor() {
        let predicted = predictions(&[
            (Category::Food, 3000.0),
            (Category::Personal, 500.0),
            (Category::Clothing, 400.0),
            (Category::Housing, 2000.0),
        ]);
        let suggestions = suggest_from_predictions(&predicted, 4000.0);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, Category::Food);
        assert!((suggestions[0].suggested_limit - 2550.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_income_still_follows_formula() {
        let predicted = predictions(&[(Category::Food, 1000.0)]);
        let suggestions = suggest_from_predictions(&predicted, -500.0);
        assert_eq!(suggestions.len(), 1);
        assert!((suggestions[0].suggested_limit - 850.0).abs() < 1e-9);
    }

    #[test]
    fn test_suggest_from_records() {
        let now = NaiveDate::from_ymd_opt(2026, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let current: Vec<_> = [
            (Category::Food, 600.0),
            (Category::Transportation, 400.0),
            (Category::Housing, 750.0),
            (Category::Entertainment, 300.0),
        ]
        .into_iter()
        .map(|(c, a)| ExpenseRecord::create("1", NewExpense::new(a, c, now)))
        .collect();

        let suggestions = suggest_budget_adjustments_at(&current, &[], 3000.0, now);
        assert_eq!(suggestions.len(), 2);
        assert!((suggestions[0].suggested_limit - 1020.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_warnings_sorted_and_capped() {
        let budget = Budget::new(vec![
            BudgetLimit { category: Category::Food, limit: 600.0 },
            BudgetLimit { category: Category::Transportation, limit: 300.0 },
            BudgetLimit { category: Category::Housing, limit: 1500.0 },
            BudgetLimit { category: Category::Entertainment, limit: 150.0 },
            BudgetLimit { category: Category::Clothing, limit: 100.0 },
        ])
        .unwrap();
        let predicted = predictions(&[
            (Category::Food, 900.0),
            (Category::Transportation, 800.0),
            (Category::Housing, 1500.0),
            (Category::Entertainment, 200.0),
            (Category::Clothing, 150.0),
        ]);

        let warnings = category_warnings(&predicted, &budget);
        let order: Vec<_> = warnings.iter().map(|w| w.category).collect();
        assert_eq!(
            order,
            vec![Category::Transportation, Category::Food, Category::Entertainment]
        );
        assert!((warnings[1].percent_over - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_wall_clock_suggestions_within_income() {
        let today = chrono::Local::now().naive_local();
        let current = vec![ExpenseRecord::create(
            "1",
            NewExpense::new(5000.0, Category::Food, today),
        )];
        assert!(suggest_budget_adjustments(&current, &[], f64::MAX).is_empty());
    }
}
