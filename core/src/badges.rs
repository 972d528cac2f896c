//! Achievement badges. Unlock conditions are pure checks against the
//! document; unlocked ids live in `data.badges` and are never revoked.

use serde::Serialize;

use crate::analytics;
use crate::models::TrackerData;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
}

pub static BADGES: [Badge; 6] = [
    Badge {
        id: "first-day",
        name: "First Day",
        desc: "Log your first day",
    },
    Badge {
        id: "week-streak",
        name: "Week Warrior",
        desc: "7 day streak",
    },
    Badge {
        id: "hydrated",
        name: "Hydrated",
        desc: "Reach daily hydration goal",
    },
    Badge {
        id: "early-bird",
        name: "Well Rested",
        desc: "7+ hours of sleep",
    },
    Badge {
        id: "consistent",
        name: "Consistency King",
        desc: "30 days logged",
    },
    Badge {
        id: "perfect-day",
        name: "Perfect Day",
        desc: "All meals + hydration goal",
    },
];

/// Whether the condition for `badge` holds right now, judged against
/// `today`'s log where the badge is day-scoped.
#[must_use]
pub fn condition_met(data: &TrackerData, today: &str, badge: &Badge) -> bool {
    let log = data.logs.get(today);
    let goal = data.user_settings.hydration_goal;
    match badge.id {
        "first-day" => !data.logs.is_empty(),
        "week-streak" => analytics::streak(data) >= 7,
        "hydrated" => log.is_some_and(|l| l.water_cups >= goal),
        "early-bird" => log.is_some_and(|l| l.sleep.hours >= 7.0),
        "consistent" => data.logs.len() >= 30,
        "perfect-day" => log.is_some_and(|l| l.meals.completed() == 4 && l.water_cups >= goal),
        _ => false,
    }
}

/// Evaluate all badges, record any new unlocks, and return them.
pub fn check_badges(data: &mut TrackerData, today: &str) -> Vec<&'static Badge> {
    let mut unlocked = Vec::new();
    for badge in &BADGES {
        if condition_met(data, today, badge) && !data.badges.iter().any(|b| b == badge.id) {
            data.badges.push(badge.id.to_string());
            unlocked.push(badge);
        }
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    const TODAY: &str = "2024-06-15";

    #[test]
    fn test_no_badges_on_empty_document() {
        let mut data = TrackerData::default();
        assert!(check_badges(&mut data, TODAY).is_empty());
        assert!(data.badges.is_empty());
    }

    #[test]
    fn test_first_day_unlocks_on_first_log() {
        let mut data = TrackerData::default();
        data.ensure_day(TODAY);
        let unlocked = check_badges(&mut data, TODAY);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "first-day");
        assert_eq!(data.badges, vec!["first-day"]);
    }

    #[test]
    fn test_unlock_is_reported_once() {
        let mut data = TrackerData::default();
        data.ensure_day(TODAY);
        assert_eq!(check_badges(&mut data, TODAY).len(), 1);
        assert!(check_badges(&mut data, TODAY).is_empty());
        assert_eq!(data.badges.len(), 1);
    }

    #[test]
    fn test_hydrated_requires_goal_cups_today() {
        let mut data = TrackerData::default();
        data.ensure_day(TODAY).water_cups = 7;
        assert!(!condition_met(&data, TODAY, &BADGES[2]));
        data.ensure_day(TODAY).water_cups = 8;
        assert!(condition_met(&data, TODAY, &BADGES[2]));
    }

    #[test]
    fn test_well_rested_threshold() {
        let mut data = TrackerData::default();
        data.ensure_day(TODAY).sleep.hours = 6.9;
        assert!(!condition_met(&data, TODAY, &BADGES[3]));
        data.ensure_day(TODAY).sleep.hours = 7.0;
        assert!(condition_met(&data, TODAY, &BADGES[3]));
    }

    #[test]
    fn test_perfect_day_needs_all_meals_and_water() {
        let mut data = TrackerData::default();
        {
            let log = data.ensure_day(TODAY);
            for meal in MealType::ALL {
                log.meals.get_mut(meal).done = true;
            }
            log.water_cups = 8;
        }
        assert!(condition_met(&data, TODAY, &BADGES[5]));

        data.ensure_day(TODAY).meals.snacks.done = false;
        assert!(!condition_met(&data, TODAY, &BADGES[5]));
    }

    #[test]
    fn test_week_streak_and_consistency() {
        let mut data = TrackerData::default();
        for day in 1..=30 {
            let date = format!("2024-06-{day:02}");
            let log = data.ensure_day(&date);
            for meal in MealType::ALL {
                log.meals.get_mut(meal).done = true;
            }
        }
        assert!(condition_met(&data, TODAY, &BADGES[1]));
        assert!(condition_met(&data, TODAY, &BADGES[4]));
    }

    #[test]
    fn test_unlocks_are_permanent() {
        let mut data = TrackerData::default();
        data.ensure_day(TODAY).water_cups = 8;
        check_badges(&mut data, TODAY);
        assert!(data.badges.iter().any(|b| b == "hydrated"));

        // Condition no longer holds, badge stays.
        data.ensure_day(TODAY).water_cups = 0;
        check_badges(&mut data, TODAY);
        assert!(data.badges.iter().any(|b| b == "hydrated"));
    }
}
