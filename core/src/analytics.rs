//! Derived statistics over a validated document. Everything here is a pure
//! function of the document; nothing mutates or persists.

use anyhow::Result;
use serde::Serialize;

use crate::models::{FitnessGoal, TrackerData};
use crate::validate;

/// Energy content of one kilogram of body mass.
pub const ENERGY_PER_KG: f64 = 7700.0;

/// Days that count toward a streak need at least this many meals done.
pub const STREAK_MEAL_THRESHOLD: u32 = 3;

/// How many trailing logged days feed the rolling averages.
pub const STATS_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub avg_calories: u32,
    /// Mean sleep hours, one decimal.
    pub avg_sleep: f64,
    pub streak: u32,
    pub total_meals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub target_daily: i64,
    /// Negative for a cutting goal (a required deficit).
    pub daily_surplus_required: i64,
    pub avg_actual: i64,
    pub progress: f64,
    /// `progress` bounded to [0, 100] for display.
    pub clamped_progress: f64,
}

/// Calorie total for one day. A completed meal contributes its recorded
/// calories; an uncompleted meal contributes only the excess over its
/// configured default, so a pre-logged substitution is not counted twice
/// once the meal is later completed.
#[must_use]
pub fn daily_calories(data: &TrackerData, date: &str) -> u32 {
    let Some(log) = data.logs.get(date) else {
        return 0;
    };
    let defaults = &data.user_settings.default_meal_calories;

    let mut total = 0;
    for (meal_type, meal) in log.meals.iter() {
        let default = defaults.for_meal(meal_type);
        if meal.done {
            total += meal.calories;
        } else if meal.calories > default {
            total += meal.calories - default;
        }
    }
    total
}

/// Consecutive trailing days (most recent first) with at least
/// [`STREAK_MEAL_THRESHOLD`] meals done. Stops at the first day that
/// misses the threshold.
#[must_use]
pub fn streak(data: &TrackerData) -> u32 {
    let mut streak = 0;
    for log in data.logs.values().rev() {
        if log.meals.completed() >= STREAK_MEAL_THRESHOLD {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Rolling statistics over the last [`STATS_WINDOW_DAYS`] logged dates
/// (calendar order, not necessarily contiguous).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn stats(data: &TrackerData) -> Stats {
    let dates: Vec<&String> = recent_dates(data);
    if dates.is_empty() {
        return Stats {
            avg_calories: 0,
            avg_sleep: 0.0,
            streak: 0,
            total_meals: 0,
        };
    }

    let n = dates.len() as f64;
    let avg_calories = dates
        .iter()
        .map(|d| f64::from(daily_calories(data, d)))
        .sum::<f64>()
        / n;
    let avg_sleep = dates
        .iter()
        .map(|d| data.logs[d.as_str()].sleep.hours)
        .sum::<f64>()
        / n;
    let total_meals = dates
        .iter()
        .map(|d| data.logs[d.as_str()].meals.completed())
        .sum();

    Stats {
        avg_calories: avg_calories.round() as u32,
        avg_sleep: (avg_sleep * 10.0).round() / 10.0,
        streak: streak(data),
        total_meals,
    }
}

/// Goal projection: required daily surplus (or deficit when cutting) to
/// hit the target weight delta in the target timeframe, against the actual
/// 7-day average. A zero-week target yields a zero requirement rather than
/// dividing by zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn goal_progress(data: &TrackerData) -> GoalProgress {
    let settings = &data.user_settings;
    let maintenance = f64::from(settings.maintenance_calories);

    if settings.target_weeks == 0 {
        return GoalProgress {
            target_daily: maintenance.round() as i64,
            daily_surplus_required: 0,
            avg_actual: 0,
            progress: 0.0,
            clamped_progress: 0.0,
        };
    }

    let mut required = settings.target_kg * ENERGY_PER_KG / (f64::from(settings.target_weeks) * 7.0);
    if settings.fitness_goal == FitnessGoal::Cut {
        required = -required;
    }
    let target_daily = maintenance + required;

    let dates = recent_dates(data);
    let avg_actual = if dates.is_empty() {
        0.0
    } else {
        dates
            .iter()
            .map(|d| f64::from(daily_calories(data, d)))
            .sum::<f64>()
            / dates.len() as f64
    };

    let actual_surplus = avg_actual - maintenance;
    let progress = if required == 0.0 {
        0.0
    } else {
        actual_surplus / required * 100.0
    };

    GoalProgress {
        target_daily: target_daily.round() as i64,
        daily_surplus_required: required.round() as i64,
        avg_actual: avg_actual.round() as i64,
        progress,
        clamped_progress: progress.clamp(0.0, 100.0),
    }
}

/// Duration in hours between two "HH:MM" wall-clock times, wrapping across
/// midnight, rounded to one decimal.
#[allow(clippy::cast_precision_loss)]
pub fn sleep_hours(from: &str, to: &str) -> Result<f64> {
    let from_min = validate::time_of_day(from)?;
    let to_min = validate::time_of_day(to)?;
    let mut diff = i64::from(to_min) - i64::from(from_min);
    if diff < 0 {
        diff += 24 * 60;
    }
    Ok((diff as f64 / 60.0 * 10.0).round() / 10.0)
}

fn recent_dates(data: &TrackerData) -> Vec<&String> {
    // BTreeMap keys are already in calendar order for YYYY-MM-DD keys.
    let mut dates: Vec<&String> = data.logs.keys().rev().take(STATS_WINDOW_DAYS).collect();
    dates.reverse();
    dates
}
