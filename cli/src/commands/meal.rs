use anyhow::{Result, bail};

use bulk_core::analytics;
use bulk_core::models::{MealType, TrackerData};
use bulk_core::store::Store;
use bulk_core::validate;

use super::celebrate_new_badges;
use super::helpers::{date_key, parse_date, parse_substitution};

pub(crate) fn cmd_meal_done(
    store: &Store,
    data: &mut TrackerData,
    meal: &str,
    date: Option<String>,
) -> Result<()> {
    let meal = validate::meal_type(meal)?;
    let date = date_key(parse_date(date)?);

    let log = data.ensure_day(&date);
    if log.meals.get(meal).done {
        eprintln!("{} is already marked as done.", meal.label());
        return Ok(());
    }
    let slot = log.meals.get_mut(meal);
    slot.done = true;
    let calories = slot.calories;

    celebrate_new_badges(data, &date);
    store.save(data)?;

    let total = analytics::daily_calories(data, &date);
    println!(
        "{} marked as done ({calories} kcal). Total for {date}: {total} kcal",
        meal.label()
    );
    Ok(())
}

pub(crate) fn cmd_meal_undo(
    store: &Store,
    data: &mut TrackerData,
    meal: &str,
    substitute: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let meal = validate::meal_type(meal)?;
    let date = date_key(parse_date(date)?);

    let log = data.ensure_day(&date);
    if !log.meals.get(meal).done {
        eprintln!("{} is not marked as done.", meal.label());
        return Ok(());
    }
    log.meals.get_mut(meal).done = false;

    if let Some(raw) = substitute {
        let (target, calories) = parse_substitution(&raw)?;
        if target == meal {
            bail!("Substitution target must be a different meal than the one being unmarked");
        }
        let slot = log.meals.get_mut(target);
        slot.calories = slot.calories.saturating_add(calories);
        slot.substitution_from = Some(meal);
        store.save(data)?;
        println!(
            "{} unmarked; added {calories} kcal to {}.",
            meal.label(),
            target.label()
        );
    } else {
        store.save(data)?;
        println!("{} unmarked.", meal.label());
        eprintln!("Tip: attribute replacement calories with --substitute, for example:");
        for (target, calories) in substitution_options(meal) {
            eprintln!("  --substitute {}:{calories}", target.as_str());
        }
    }
    Ok(())
}

pub(crate) fn cmd_meal_set(
    store: &Store,
    data: &mut TrackerData,
    meal: &str,
    calories: &str,
    date: Option<String>,
) -> Result<()> {
    let meal = validate::meal_type(meal)?;
    let calories = validate::calories(calories)?;
    let date = date_key(parse_date(date)?);

    data.ensure_day(&date).meals.get_mut(meal).calories = calories;
    store.save(data)?;

    println!("{} set to {calories} kcal for {date}", meal.label());
    Ok(())
}

/// The fixed substitution menu, minus the slot being unmarked.
fn substitution_options(undone: MealType) -> Vec<(MealType, u32)> {
    [
        (MealType::Snacks, 150),
        (MealType::Lunch, 250),
        (MealType::Dinner, 400),
    ]
    .into_iter()
    .filter(|(target, _)| *target != undone)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution_options_exclude_undone_meal() {
        let options = substitution_options(MealType::Lunch);
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|(m, _)| *m != MealType::Lunch));

        let options = substitution_options(MealType::Breakfast);
        assert_eq!(options.len(), 3);
    }
}
