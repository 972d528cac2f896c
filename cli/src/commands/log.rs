//! Day-scoped quick logging: sleep window, hydration cups, mood, notes and
//! macro grams. These always target today, matching the dashboard widgets
//! they replace.

use anyhow::Result;

use bulk_core::analytics;
use bulk_core::models::{Sleep, TrackerData};
use bulk_core::store::Store;
use bulk_core::validate;

use super::celebrate_new_badges;
use super::helpers::{cup_row, mood_label, today_key};

pub(crate) fn cmd_sleep(
    store: &Store,
    data: &mut TrackerData,
    from: &str,
    to: &str,
) -> Result<()> {
    let hours = analytics::sleep_hours(from, to)?;
    let today = today_key();

    data.ensure_day(&today).sleep = Sleep {
        from: from.trim().to_string(),
        to: to.trim().to_string(),
        hours,
    };
    celebrate_new_badges(data, &today);
    store.save(data)?;

    println!("Logged sleep {} to {} ({hours:.1} h)", from.trim(), to.trim());
    Ok(())
}

/// Tap a cup. Tapping the highest filled cup empties it; tapping any other
/// fills up to and including it.
pub(crate) fn cmd_water_cup(store: &Store, data: &mut TrackerData, index: &str) -> Result<()> {
    let goal = data.user_settings.hydration_goal;
    let index = validate::cup_index(index, goal)?;
    let today = today_key();

    let log = data.ensure_day(&today);
    log.water_cups = next_cup_count(log.water_cups, index);
    let cups = log.water_cups;

    celebrate_new_badges(data, &today);
    store.save(data)?;

    println!("{}  {cups}/{goal} cups", cup_row(cups, goal));
    Ok(())
}

pub(crate) fn cmd_water_reset(store: &Store, data: &mut TrackerData) -> Result<()> {
    let today = today_key();
    data.ensure_day(&today).water_cups = 0;
    store.save(data)?;

    let goal = data.user_settings.hydration_goal;
    println!("{}  0/{goal} cups", cup_row(0, goal));
    Ok(())
}

pub(crate) fn cmd_mood(store: &Store, data: &mut TrackerData, value: &str) -> Result<()> {
    let value = validate::mood(value)?;
    let today = today_key();

    data.ensure_day(&today).mood = value;
    store.save(data)?;

    println!("Mood set to {value}/5 ({})", mood_label(value));
    Ok(())
}

pub(crate) fn cmd_notes(store: &Store, data: &mut TrackerData, text: &str) -> Result<()> {
    let today = today_key();
    data.ensure_day(&today).notes = text.to_string();
    store.save(data)?;

    println!("Notes saved for {today}");
    Ok(())
}

pub(crate) fn cmd_macros(
    store: &Store,
    data: &mut TrackerData,
    protein: Option<String>,
    carbs: Option<String>,
) -> Result<()> {
    if protein.is_none() && carbs.is_none() {
        anyhow::bail!("Nothing to log. Pass --protein and/or --carbs");
    }
    let protein = protein.as_deref().map(validate::grams).transpose()?;
    let carbs = carbs.as_deref().map(validate::grams).transpose()?;

    let today = today_key();
    let log = data.ensure_day(&today);
    if let Some(grams) = protein {
        log.protein = grams;
    }
    if let Some(grams) = carbs {
        log.carbs = grams;
    }
    let (p, c) = (log.protein, log.carbs);
    store.save(data)?;

    println!("Macros for {today}: P:{p}g C:{c}g");
    Ok(())
}

fn next_cup_count(current: u32, index: u32) -> u32 {
    if index + 1 == current { index } else { index + 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cup_fills_up_to_index() {
        assert_eq!(next_cup_count(0, 2), 3);
        assert_eq!(next_cup_count(5, 7), 8);
    }

    #[test]
    fn test_toggle_highest_filled_cup_empties_it() {
        // Tapping cup 2 when three cups are filled drops back to two.
        assert_eq!(next_cup_count(3, 2), 2);
        assert_eq!(next_cup_count(1, 0), 0);
    }

    #[test]
    fn test_toggle_below_current_refills_to_index() {
        assert_eq!(next_cup_count(5, 1), 2);
    }
}
