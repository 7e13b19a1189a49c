//! Report command implementations

use anyhow::Result;
use chrono::NaiveDateTime;
use pocketwise_core::insights::{BudgetSuggestion, CategoryWarning};
use pocketwise_core::models::{CarbonRating, CategoryAmounts, CategoryProgress, ProfileUpdate};
use pocketwise_core::{Category, Insight, InsightKind, Store};
use serde::Serialize;

use super::{print_json, truncate};

#[derive(Serialize)]
struct SummaryReport<'a> {
    name: &'a str,
    monthly_income: f64,
    total_spent: f64,
    budget_total: f64,
    budget_progress: Option<f64>,
    predicted_total: f64,
    carbon_impact: f64,
    carbon_rating: CarbonRating,
    points: u32,
    expenses_this_month: usize,
    insights: &'a [Insight],
}

#[derive(Serialize)]
struct ForecastReport<'a> {
    total: f64,
    categories: &'a CategoryAmounts,
}

#[derive(Serialize)]
struct SuggestReport {
    income: f64,
    predicted_total: f64,
    suggestions: Vec<BudgetSuggestion>,
}

#[derive(Serialize)]
struct BudgetReport {
    total_limit: f64,
    total_spent: f64,
    progress: Option<f64>,
    categories: Vec<CategoryProgress>,
    warnings: Vec<CategoryWarning>,
}

#[derive(Serialize)]
struct CarbonReport {
    total: f64,
    score: i32,
    rating: CarbonRating,
    categories: CategoryAmounts,
}

fn insight_icon(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Warning => "⚠️ ",
        InsightKind::Tip => "💡",
        InsightKind::Achievement => "🏆",
    }
}

fn print_insights(insights: &[Insight]) {
    for insight in insights {
        println!("   {} {}", insight_icon(insight.kind), insight.message);
    }
}

pub fn cmd_summary(store: &Store, symbol: &str, now: NaiveDateTime, json: bool) -> Result<()> {
    let user = store.user();
    let report = SummaryReport {
        name: &user.name,
        monthly_income: user.monthly_income,
        total_spent: store.total_spent(now),
        budget_total: store.budget().total_limit(),
        budget_progress: store.budget_progress(now),
        predicted_total: store.predicted_spending().total(),
        carbon_impact: store.carbon_impact(now),
        carbon_rating: store.carbon_rating(),
        points: user.points,
        expenses_this_month: store.current_month_expenses(now).len(),
        insights: store.insights(),
    };

    if json {
        return print_json(&report);
    }

    println!();
    println!("📊 Pocketwise Dashboard - {}", report.name);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Monthly income:      {}{:.2}", symbol, report.monthly_income);
    println!(
        "   Spent this month:    {}{:.2} ({} expenses)",
        symbol, report.total_spent, report.expenses_this_month
    );
    match report.budget_progress {
        Some(progress) => println!(
            "   Budget:              {}{:.2} ({:.1}% used)",
            symbol, report.budget_total, progress
        ),
        None => println!("   Budget:              (none set)"),
    }
    println!(
        "   Forecast:            {}{:.2} by month end",
        symbol, report.predicted_total
    );
    println!(
        "   Carbon impact:       {:.1} ({})",
        report.carbon_impact, report.carbon_rating
    );
    println!("   Points:              {}", report.points);

    if !report.insights.is_empty() {
        println!();
        println!("💬 Insights");
        print_insights(report.insights);
    }

    if report.predicted_total > report.monthly_income {
        println!();
        println!("⚠️  Forecast exceeds income. Run 'pocketwise suggest' for budget cuts.");
    }

    Ok(())
}

pub fn cmd_insights(store: &Store, json: bool) -> Result<()> {
    let insights = store.insights();
    if json {
        return print_json(&insights);
    }

    println!();
    println!("💬 Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   No insights yet. Add some expenses for this month.");
        return Ok(());
    }

    print_insights(insights);

    Ok(())
}

pub fn cmd_forecast(store: &Store, symbol: &str, json: bool) -> Result<()> {
    let predicted = store.predicted_spending();
    let report = ForecastReport {
        total: predicted.total(),
        categories: predicted,
    };

    if json {
        return print_json(&report);
    }

    println!();
    println!("🔮 End-of-Month Forecast");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:20} │ {:>12}", "Category", "Predicted");
    println!("   ─────────────────────┼─────────────");
    for (category, amount) in predicted.iter().filter(|(_, a)| *a > 0.0) {
        println!("   {:20} │ {:>12.2}", category.label(), amount);
    }
    println!("   ─────────────────────┼─────────────");
    println!("   {:20} │ {:>12}", "Total", format!("{}{:.2}", symbol, report.total));

    Ok(())
}

/// Budget cuts against the profile's income, or `income` when given
pub fn cmd_suggest(
    store: &mut Store,
    income: Option<f64>,
    symbol: &str,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    if let Some(income) = income {
        store.update_user(ProfileUpdate {
            monthly_income: Some(income),
            ..Default::default()
        });
    }

    let report = SuggestReport {
        income: store.user().monthly_income,
        predicted_total: store.predicted_spending().total(),
        suggestions: store.budget_suggestions(now),
    };

    if json {
        return print_json(&report);
    }

    println!();
    println!("✂️  Budget Suggestions");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Income: {}{:.2}   Forecast: {}{:.2}",
        symbol, report.income, symbol, report.predicted_total
    );
    println!();

    if report.predicted_total <= report.income {
        println!("✅ Forecast is within income. No cuts needed.");
        return Ok(());
    }

    if report.suggestions.is_empty() {
        println!("   Forecast exceeds income, but no single category cut is large enough.");
        return Ok(());
    }

    let predicted = store.predicted_spending();
    println!(
        "   {:20} │ {:>12} │ {:>12}",
        "Category", "Forecast", "Suggested"
    );
    println!("   ─────────────────────┼──────────────┼─────────────");
    for suggestion in &report.suggestions {
        println!(
            "   {:20} │ {:>12.2} │ {:>12.2}",
            suggestion.category.label(),
            predicted.get(suggestion.category),
            suggestion.suggested_limit
        );
    }

    Ok(())
}

pub fn cmd_budget(store: &Store, symbol: &str, now: NaiveDateTime, json: bool) -> Result<()> {
    let report = BudgetReport {
        total_limit: store.budget().total_limit(),
        total_spent: store.total_spent(now),
        progress: store.budget_progress(now),
        categories: store.category_progress(now),
        warnings: store.category_warnings(),
    };

    if json {
        return print_json(&report);
    }

    println!();
    println!("💰 Budget");
    println!("   ─────────────────────────────────────────────────────────────");

    let Some(progress) = report.progress else {
        println!("   No budget set. Add [[budget]] entries to your config.");
        return Ok(());
    };

    println!(
        "   Spent {}{:.2} of {}{:.2} ({:.1}%)",
        symbol, report.total_spent, symbol, report.total_limit, progress
    );
    println!();
    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>7}",
        "Category", "Spent", "Limit", "%"
    );
    println!("   ─────────────────────┼────────────┼────────────┼────────");
    for row in &report.categories {
        let marker = if row.spent > row.limit { " ❗" } else { "" };
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>6.1}%{}",
            truncate(row.category.label(), 20),
            row.spent,
            row.limit,
            row.percentage,
            marker
        );
    }

    if !report.warnings.is_empty() {
        println!();
        println!("⚠️  Forecast overruns");
        for warning in &report.warnings {
            println!(
                "   {} is on track for {}{:.2}, {}{:.2} over its limit ({:.0}%)",
                warning.category.label(),
                symbol,
                warning.predicted,
                symbol,
                warning.overage,
                warning.percent_over
            );
        }
    }

    Ok(())
}

pub fn cmd_carbon(store: &Store, now: NaiveDateTime, json: bool) -> Result<()> {
    let report = CarbonReport {
        total: store.carbon_impact(now),
        score: store.user().carbon_score,
        rating: store.carbon_rating(),
        categories: store.carbon_breakdown(now),
    };

    if json {
        return print_json(&report);
    }

    println!();
    println!("🌱 Carbon Footprint");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Impact this month: {:.1}", report.total);
    println!("   Score: {} ({})", report.score, report.rating);
    println!();

    if report.total <= 0.0 {
        println!("   No expenses this month.");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>10} │ {:>7} │ {:>6}",
        "Category", "Impact", "Share", "Weight"
    );
    println!("   ─────────────────────┼────────────┼─────────┼───────");
    for (category, impact) in report.categories.iter().filter(|(_, i)| *i > 0.0) {
        println!(
            "   {:20} │ {:>10.1} │ {:>6.1}% │ {:>6.1}",
            category.label(),
            impact,
            impact / report.total * 100.0,
            category.carbon_weight()
        );
    }

    if let Some(category) = top_carbon_category(&report.categories) {
        println!();
        println!(
            "💡 {} contributes the most. {}",
            category.label(),
            category.saving_tips()[0]
        );
    }

    Ok(())
}

/// Category with the largest share of the carbon breakdown
fn top_carbon_category(breakdown: &CategoryAmounts) -> Option<Category> {
    breakdown
        .iter()
        .filter(|(_, impact)| *impact > 0.0)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(category, _)| category)
}
