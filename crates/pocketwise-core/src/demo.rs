//! Mock expense generator for demos and manual testing

use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::models::{Category, NewExpense};

/// Days back from "now" that generated expenses are spread over
pub const DEMO_WINDOW_DAYS: i64 = 30;

/// Generate `count` random expenses dated within the 30 days ending at `now`.
///
/// Amounts are whole units in `[10, 210)`; roughly 30% carry notes.
pub fn generate_expenses<R: Rng>(
    count: usize,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<NewExpense> {
    (0..count)
        .map(|i| {
            let days_ago = rng.gen_range(0..DEMO_WINDOW_DAYS);
            let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
            let amount = f64::from(rng.gen_range(10u32..210));
            let expense = NewExpense::new(amount, category, now - Duration::days(days_ago));
            if rng.gen_bool(0.3) {
                expense.with_notes(format!("Expense {} notes", i))
            } else {
                expense
            }
        })
        .collect()
}
