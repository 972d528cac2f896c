use anyhow::Result;
use chrono::Local;

use bulk_core::analytics;
use bulk_core::models::TrackerData;
use bulk_core::store::Store;

use super::helpers::{cup_row, mood_label, today_key};

/// The dashboard: today's meals, hydration, sleep, mood and macros.
/// Viewing today also creates its day record, so the first access of a new
/// day materializes the log.
pub(crate) fn cmd_today(store: &Store, data: &mut TrackerData, json: bool) -> Result<()> {
    let today = today_key();
    data.ensure_day(&today);
    store.save(data)?;

    let total = analytics::daily_calories(data, &today);
    let log = &data.logs[&today];

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "date": today,
                "log": log,
                "totalCalories": total,
            }))?
        );
        return Ok(());
    }

    let weekday = Local::now().format("%A");
    println!("=== {today} ({weekday}) ===\n");

    println!("  MEALS");
    for (meal_type, meal) in log.meals.iter() {
        let mark = if meal.done { 'x' } else { ' ' };
        let label = meal_type.label();
        let calories = meal.calories;
        let sub = meal
            .substitution_from
            .map(|src| format!("  (includes substitution from {})", src.label()))
            .unwrap_or_default();
        println!("    [{mark}] {label:<10} {calories:>5} kcal{sub}");
    }
    println!("    TOTAL: {total} kcal\n");

    let goal = data.user_settings.hydration_goal;
    let cups = log.water_cups;
    println!("  HYDRATION  {}  {cups}/{goal} cups", cup_row(cups, goal));

    if log.sleep.from.is_empty() || log.sleep.to.is_empty() {
        println!("  SLEEP      not logged");
    } else {
        let hours = log.sleep.hours;
        let (from, to) = (&log.sleep.from, &log.sleep.to);
        println!("  SLEEP      {from} to {to} ({hours:.1} h)");
    }

    if log.mood == 0 {
        println!("  MOOD       not rated");
    } else {
        let mood = log.mood;
        println!("  MOOD       {mood}/5 ({})", mood_label(mood));
    }

    if log.protein > 0 || log.carbs > 0 {
        let (protein, carbs) = (log.protein, log.carbs);
        println!("  MACROS     P:{protein}g C:{carbs}g");
    }

    if !log.notes.is_empty() {
        let notes = &log.notes;
        println!("  NOTES      {notes}");
    }

    Ok(())
}
