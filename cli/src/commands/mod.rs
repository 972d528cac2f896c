mod badges;
mod data;
mod goals;
mod helpers;
mod log;
mod meal;
mod pin;
mod say;
mod settings;
mod stats;
mod today;
mod weight;

use bulk_core::badges::{Badge, check_badges};
use bulk_core::models::TrackerData;

pub(crate) use badges::cmd_badges;
pub(crate) use data::{cmd_export, cmd_import, cmd_reset};
pub(crate) use goals::{cmd_goals_set, cmd_goals_show};
pub(crate) use log::{cmd_macros, cmd_mood, cmd_notes, cmd_sleep, cmd_water_cup, cmd_water_reset};
pub(crate) use meal::{cmd_meal_done, cmd_meal_set, cmd_meal_undo};
pub(crate) use pin::{cmd_pin_clear, cmd_pin_set};
pub(crate) use say::cmd_say;
pub(crate) use settings::{
    cmd_settings_hydration, cmd_settings_meals, cmd_settings_notifications, cmd_settings_show,
    cmd_settings_theme,
};
pub(crate) use stats::{cmd_chart, cmd_stats};
pub(crate) use today::cmd_today;
pub(crate) use weight::{cmd_weight_history, cmd_weight_log, cmd_weight_show};

/// Announce one unlocked badge. The CLI's confetti.
pub(super) fn celebrate(badge: &Badge) {
    println!("★ Badge unlocked: {} ({})", badge.name, badge.desc);
}

/// Re-evaluate badges after a mutation and announce anything new. The
/// caller saves afterwards, so fresh unlocks persist with the change that
/// earned them.
pub(super) fn celebrate_new_badges(data: &mut TrackerData, today: &str) {
    for badge in check_badges(data, today) {
        celebrate(badge);
    }
}
