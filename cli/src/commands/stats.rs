use anyhow::Result;

use bulk_core::analytics::{self, STATS_WINDOW_DAYS};
use bulk_core::models::TrackerData;

use crate::charts::{self, ChartKind};

pub(crate) fn cmd_stats(data: &TrackerData, json: bool) -> Result<()> {
    let stats = analytics::stats(data);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("=== Stats (last {STATS_WINDOW_DAYS} logged days) ===\n");
    let avg_calories = stats.avg_calories;
    let avg_sleep = stats.avg_sleep;
    let streak = stats.streak;
    let total_meals = stats.total_meals;
    println!("  Avg calories:    {avg_calories} kcal");
    println!("  Avg sleep:       {avg_sleep:.1} h");
    println!("  Current streak:  {streak} days");
    println!("  Meals completed: {total_meals}");

    for kind in [ChartKind::Calories, ChartKind::Sleep] {
        let (labels, values) = series(data, kind, STATS_WINDOW_DAYS);
        println!("\n  {}", kind.title());
        print!("{}", charts::render(&labels, &values, kind));
    }

    Ok(())
}

pub(crate) fn cmd_chart(data: &TrackerData, kind: &str, days: usize) -> Result<()> {
    let kind = ChartKind::parse(kind)?;
    let (labels, values) = series(data, kind, days);

    println!("  {} (last {days} days)", kind.title());
    print!("{}", charts::render(&labels, &values, kind));
    Ok(())
}

/// Assemble the trailing `days` points of a trend series in calendar order.
fn series(data: &TrackerData, kind: ChartKind, days: usize) -> (Vec<String>, Vec<f64>) {
    match kind {
        ChartKind::Weight => {
            let mut entries: Vec<(String, f64)> = data
                .weight_logs
                .iter()
                .map(|(d, w)| (d.clone(), *w))
                .collect();
            let skip = entries.len().saturating_sub(days);
            entries.drain(..skip);
            entries.into_iter().unzip()
        }
        ChartKind::Calories | ChartKind::Sleep => {
            let mut dates: Vec<&String> = data.logs.keys().rev().take(days).collect();
            dates.reverse();
            let values = dates
                .iter()
                .map(|date| match kind {
                    ChartKind::Calories => f64::from(analytics::daily_calories(data, date)),
                    _ => data.logs[date.as_str()].sleep.hours,
                })
                .collect();
            (dates.into_iter().cloned().collect(), values)
        }
    }
}
