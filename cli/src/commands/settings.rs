use anyhow::{Result, bail};

use bulk_core::models::{MealType, Theme, TrackerData};
use bulk_core::store::Store;
use bulk_core::validate;

use super::helpers::today_key;

pub(crate) fn cmd_settings_show(data: &TrackerData, json: bool) -> Result<()> {
    let settings = &data.user_settings;

    if json {
        // The PIN hash never leaves the document file.
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "theme": settings.theme,
                "defaultMealCalories": settings.default_meal_calories,
                "hydrationGoal": settings.hydration_goal,
                "notificationsEnabled": settings.notifications_enabled,
                "pinSet": settings.pin_hash.is_some(),
            }))?
        );
        return Ok(());
    }

    println!("=== Settings ===\n");
    println!("  Default meal calories");
    for meal in MealType::ALL {
        let calories = settings.default_meal_calories.for_meal(meal);
        let label = meal.label();
        println!("    {label:<10} {calories:>5} kcal");
    }
    let goal = settings.hydration_goal;
    let theme = match settings.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    let notifications = if settings.notifications_enabled {
        "on"
    } else {
        "off"
    };
    let pin = if settings.pin_hash.is_some() {
        "set"
    } else {
        "not set"
    };
    println!("\n  Hydration goal: {goal} cups");
    println!("  Theme:          {theme}");
    println!("  Notifications:  {notifications}");
    println!("  PIN:            {pin}");

    Ok(())
}

/// Update default meal calories. Today's slots that are still untouched
/// (not done and sitting at the old default) follow the new default, so the
/// dashboard reflects the change immediately.
pub(crate) fn cmd_settings_meals(
    store: &Store,
    data: &mut TrackerData,
    breakfast: Option<String>,
    lunch: Option<String>,
    dinner: Option<String>,
    snacks: Option<String>,
) -> Result<()> {
    let updates = [
        (MealType::Breakfast, breakfast),
        (MealType::Lunch, lunch),
        (MealType::Dinner, dinner),
        (MealType::Snacks, snacks),
    ];
    if updates.iter().all(|(_, v)| v.is_none()) {
        bail!("Nothing to set. Pass at least one of --breakfast, --lunch, --dinner, --snacks");
    }

    let mut validated = Vec::new();
    for (meal, raw) in updates {
        if let Some(raw) = raw {
            validated.push((meal, validate::calories(&raw)?));
        }
    }

    let today = today_key();
    for (meal, calories) in validated {
        let old = data.user_settings.default_meal_calories.for_meal(meal);
        data.user_settings
            .default_meal_calories
            .set_for_meal(meal, calories);

        let slot = data.ensure_day(&today).meals.get_mut(meal);
        if !slot.done && slot.calories == old {
            slot.calories = calories;
        }
        println!("{} default set to {calories} kcal", meal.label());
    }
    store.save(data)?;

    Ok(())
}

pub(crate) fn cmd_settings_hydration(
    store: &Store,
    data: &mut TrackerData,
    goal: &str,
) -> Result<()> {
    let goal = validate::hydration_goal(goal)?;
    data.user_settings.hydration_goal = goal;
    store.save(data)?;

    println!("Hydration goal set to {goal} cups");
    Ok(())
}

pub(crate) fn cmd_settings_theme(store: &Store, data: &mut TrackerData, theme: &str) -> Result<()> {
    data.user_settings.theme = match theme.to_lowercase().as_str() {
        "light" => Theme::Light,
        "dark" => Theme::Dark,
        _ => bail!("Theme must be 'light' or 'dark' (got '{theme}')"),
    };
    store.save(data)?;

    println!("Theme set to {}", theme.to_lowercase());
    Ok(())
}

pub(crate) fn cmd_settings_notifications(
    store: &Store,
    data: &mut TrackerData,
    state: &str,
) -> Result<()> {
    let enabled = match state.to_lowercase().as_str() {
        "on" => true,
        "off" => false,
        _ => bail!("Notifications must be 'on' or 'off' (got '{state}')"),
    };
    data.user_settings.notifications_enabled = enabled;
    store.save(data)?;

    if enabled {
        println!("Notifications enabled. Pair with your system scheduler to get reminders.");
    } else {
        println!("Notifications disabled.");
    }
    Ok(())
}
