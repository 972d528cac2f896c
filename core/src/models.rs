use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the four fixed meal slots of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snacks => "snacks",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snacks" => Some(MealType::Snacks),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessGoal {
    Bulk,
    Cut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CuttingIntensity {
    Slow,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

/// Default calorie figure for each meal slot; used to pre-fill a fresh day
/// and as the baseline for substitution accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCalories {
    pub breakfast: u32,
    pub lunch: u32,
    pub dinner: u32,
    pub snacks: u32,
}

impl Default for MealCalories {
    fn default() -> Self {
        MealCalories {
            breakfast: 600,
            lunch: 700,
            dinner: 700,
            snacks: 300,
        }
    }
}

impl MealCalories {
    #[must_use]
    pub fn for_meal(&self, meal: MealType) -> u32 {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
            MealType::Snacks => self.snacks,
        }
    }

    pub fn set_for_meal(&mut self, meal: MealType, calories: u32) {
        match meal {
            MealType::Breakfast => self.breakfast = calories,
            MealType::Lunch => self.lunch = calories,
            MealType::Dinner => self.dinner = calories,
            MealType::Snacks => self.snacks = calories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub theme: Theme,
    pub weight_kg: f64,
    pub target_kg: f64,
    pub target_weeks: u32,
    pub maintenance_calories: u32,
    pub default_meal_calories: MealCalories,
    pub hydration_goal: u32,
    pub pin_hash: Option<String>,
    pub notifications_enabled: bool,
    pub fitness_goal: FitnessGoal,
    pub cutting_intensity: CuttingIntensity,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            theme: Theme::Dark,
            weight_kg: 75.0,
            target_kg: 4.0,
            target_weeks: 8,
            maintenance_calories: 2400,
            default_meal_calories: MealCalories::default(),
            hydration_goal: 8,
            pin_hash: None,
            notifications_enabled: false,
            fitness_goal: FitnessGoal::Bulk,
            cutting_intensity: CuttingIntensity::Moderate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub done: bool,
    pub calories: u32,
    pub substitution_from: Option<MealType>,
}

impl Meal {
    #[must_use]
    pub fn with_calories(calories: u32) -> Self {
        Meal {
            done: false,
            calories,
            substitution_from: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meals {
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Meal,
}

impl Meals {
    #[must_use]
    pub fn with_defaults(defaults: &MealCalories) -> Self {
        Meals {
            breakfast: Meal::with_calories(defaults.breakfast),
            lunch: Meal::with_calories(defaults.lunch),
            dinner: Meal::with_calories(defaults.dinner),
            snacks: Meal::with_calories(defaults.snacks),
        }
    }

    #[must_use]
    pub fn get(&self, meal: MealType) -> &Meal {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snacks => &self.snacks,
        }
    }

    pub fn get_mut(&mut self, meal: MealType) -> &mut Meal {
        match meal {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snacks => &mut self.snacks,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MealType, &Meal)> {
        MealType::ALL.iter().map(move |&m| (m, self.get(m)))
    }

    /// Count of meal slots marked done.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn completed(&self) -> u32 {
        self.iter().filter(|(_, m)| m.done).count() as u32
    }
}

/// Sleep window in wall-clock "HH:MM" strings plus the derived duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sleep {
    pub from: String,
    pub to: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    pub meals: Meals,
    pub sleep: Sleep,
    pub water_cups: u32,
    /// 0 means not rated; recorded moods are 1-5.
    pub mood: u32,
    pub notes: String,
    /// Unix milliseconds at creation.
    pub timestamp: i64,
    pub protein: u32,
    pub carbs: u32,
}

impl DayLog {
    #[must_use]
    pub fn new(defaults: &MealCalories, timestamp: i64) -> Self {
        DayLog {
            meals: Meals::with_defaults(defaults),
            sleep: Sleep::default(),
            water_cups: 0,
            mood: 0,
            notes: String::new(),
            timestamp,
            protein: 0,
            carbs: 0,
        }
    }
}

/// The whole persisted document. One per user, serialized as a single JSON
/// value with camelCase keys, the backup interchange format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerData {
    pub user_settings: UserSettings,
    pub logs: BTreeMap<String, DayLog>,
    pub weight_logs: BTreeMap<String, f64>,
    pub badges: Vec<String>,
}

impl TrackerData {
    /// Get or create the day record for `date`, pre-filled with the
    /// configured default meal calories. Day records are never deleted
    /// outside a full reset or import.
    pub fn ensure_day(&mut self, date: &str) -> &mut DayLog {
        let defaults = self.user_settings.default_meal_calories.clone();
        self.logs
            .entry(date.to_string())
            .or_insert_with(|| DayLog::new(&defaults, now_millis()))
    }
}

/// Unix time in milliseconds, the timestamp unit the document stores.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Strict `YYYY-MM-DD` shape check for log keys. Pattern-only by design:
/// keys are compared lexicographically, not parsed as calendar dates.
#[must_use]
pub fn is_date_key(key: &str) -> bool {
    let b = key.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_from_name() {
        assert_eq!(MealType::from_name("breakfast"), Some(MealType::Breakfast));
        assert_eq!(MealType::from_name("LUNCH"), Some(MealType::Lunch));
        assert_eq!(MealType::from_name("Snacks"), Some(MealType::Snacks));
        assert_eq!(MealType::from_name("brunch"), None);
        assert_eq!(MealType::from_name(""), None);
    }

    #[test]
    fn test_meal_calories_lookup() {
        let defaults = MealCalories::default();
        assert_eq!(defaults.for_meal(MealType::Breakfast), 600);
        assert_eq!(defaults.for_meal(MealType::Lunch), 700);
        assert_eq!(defaults.for_meal(MealType::Dinner), 700);
        assert_eq!(defaults.for_meal(MealType::Snacks), 300);
    }

    #[test]
    fn test_ensure_day_pre_fills_defaults() {
        let mut data = TrackerData::default();
        data.user_settings.default_meal_calories.lunch = 850;

        let log = data.ensure_day("2024-06-15");
        assert_eq!(log.meals.lunch.calories, 850);
        assert!(!log.meals.lunch.done);
        assert_eq!(log.water_cups, 0);
        assert_eq!(log.mood, 0);
    }

    #[test]
    fn test_ensure_day_is_idempotent() {
        let mut data = TrackerData::default();
        data.ensure_day("2024-06-15").meals.breakfast.done = true;
        assert!(data.ensure_day("2024-06-15").meals.breakfast.done);
        assert_eq!(data.logs.len(), 1);
    }

    #[test]
    fn test_completed_count() {
        let mut meals = Meals::with_defaults(&MealCalories::default());
        assert_eq!(meals.completed(), 0);
        meals.breakfast.done = true;
        meals.dinner.done = true;
        assert_eq!(meals.completed(), 2);
    }

    #[test]
    fn test_is_date_key() {
        assert!(is_date_key("2024-06-15"));
        assert!(is_date_key("1999-01-01"));
        assert!(!is_date_key("2024-6-15"));
        assert!(!is_date_key("2024/06/15"));
        assert!(!is_date_key("not-a-date"));
        assert!(!is_date_key(""));
        assert!(!is_date_key("2024-06-15T00:00"));
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let mut data = TrackerData::default();
        data.ensure_day("2024-06-15");
        let json = serde_json::to_value(&data).unwrap();

        assert!(json.get("userSettings").is_some());
        assert!(json.get("weightLogs").is_some());
        let settings = &json["userSettings"];
        assert!(settings.get("defaultMealCalories").is_some());
        assert!(settings.get("maintenanceCalories").is_some());
        assert_eq!(settings["fitnessGoal"], "bulk");
        assert_eq!(settings["cuttingIntensity"], "moderate");

        let day = &json["logs"]["2024-06-15"];
        assert!(day.get("waterCups").is_some());
        assert!(day["meals"]["breakfast"].get("substitutionFrom").is_some());
    }
}
