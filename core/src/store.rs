//! Persistence of the tracker document and the schema migration contract.
//!
//! The document lives in a single versioned JSON file. Anything read from
//! disk or imported from a backup is untrusted and passes through
//! [`validate_and_migrate`], which repairs rather than rejects: malformed
//! pieces fall back to defaults, unknown log dates are dropped, and only an
//! outright parse failure resets the whole document.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::models::{
    CuttingIntensity, DayLog, FitnessGoal, MealCalories, MealType, Meals, Sleep, Theme,
    TrackerData, UserSettings, is_date_key, now_millis,
};

/// Current document file. The legacy file is read once and migrated.
pub const DATA_FILE: &str = "bulk-v2.json";
pub const LEGACY_FILE: &str = "bulk-v1.json";

pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Store {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    #[must_use]
    pub fn legacy_path(&self) -> PathBuf {
        self.data_dir.join(LEGACY_FILE)
    }

    /// Load the document: current file first, then one-time legacy
    /// migration, then defaults. A file that fails to parse resets to
    /// defaults rather than erroring.
    #[must_use]
    pub fn load(&self) -> TrackerData {
        if let Ok(text) = fs::read_to_string(self.data_path()) {
            return match serde_json::from_str::<Value>(&text) {
                Ok(raw) => validate_and_migrate(&raw),
                Err(_) => TrackerData::default(),
            };
        }
        self.migrate_legacy()
    }

    fn migrate_legacy(&self) -> TrackerData {
        let Ok(text) = fs::read_to_string(self.legacy_path()) else {
            return TrackerData::default();
        };
        let Ok(raw) = serde_json::from_str::<Value>(&text) else {
            return TrackerData::default();
        };
        let data = validate_and_migrate(&raw);
        // Persist under the current version; failure here is not fatal,
        // the next save will retry.
        let _ = self.save(&data);
        data
    }

    /// Write the document atomically (temp file + rename). On failure the
    /// in-memory document is still correct; the caller reports and carries on.
    pub fn save(&self, data: &TrackerData) -> Result<()> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        let json = serde_json::to_string_pretty(data)?;
        let tmp = self.data_dir.join(format!("{DATA_FILE}.tmp"));
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, self.data_path())
            .with_context(|| format!("Failed to replace {}", self.data_path().display()))?;
        Ok(())
    }

    /// Delete both versioned files. The only way day records disappear.
    pub fn reset(&self) -> Result<()> {
        for file in [self.data_path(), self.legacy_path()] {
            match fs::remove_file(&file) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove {}", file.display()));
                }
            }
        }
        Ok(())
    }
}

/// Coerce arbitrary untrusted JSON into a fully well-typed document.
///
/// Defaults first; `userSettings` shallow-merged over them with
/// `defaultMealCalories` merged one level deeper; every log entry validated
/// independently. Unknown or malformed log dates are silently dropped:
/// lenient repair, not strict validation.
#[must_use]
pub fn validate_and_migrate(raw: &Value) -> TrackerData {
    let mut data = TrackerData::default();
    let Some(obj) = raw.as_object() else {
        return data;
    };

    if let Some(settings) = obj.get("userSettings").and_then(Value::as_object) {
        merge_settings(&mut data.user_settings, settings);
    }
    if let Some(logs) = obj.get("logs").and_then(Value::as_object) {
        data.logs = repair_logs(logs, &data.user_settings.default_meal_calories);
    }
    if let Some(weights) = obj.get("weightLogs").and_then(Value::as_object) {
        for (date, value) in weights {
            if !is_date_key(date) {
                continue;
            }
            if let Some(kg) = value.as_f64() {
                if kg.is_finite() && kg > 0.0 {
                    data.weight_logs.insert(date.clone(), kg);
                }
            }
        }
    }
    if let Some(badges) = obj.get("badges").and_then(Value::as_array) {
        for badge in badges {
            if let Some(id) = badge.as_str() {
                if !data.badges.iter().any(|b| b == id) {
                    data.badges.push(id.to_string());
                }
            }
        }
    }
    data
}

/// Shallow shape check before attempting a full migration on import.
pub fn validate_import(raw: &Value) -> Result<()> {
    let Some(obj) = raw.as_object() else {
        bail!("Backup must be a JSON object");
    };
    if !obj.get("userSettings").is_some_and(Value::is_object) {
        bail!("Backup is missing a userSettings object");
    }
    if !obj.get("logs").is_some_and(Value::is_object) {
        bail!("Backup is missing a logs object");
    }
    Ok(())
}

/// Default name for an exported backup file.
#[must_use]
pub fn export_file_name(date: &str) -> String {
    format!("bulk-tracker-backup-{date}.json")
}

/// Serialize the document as pretty JSON to `path`.
pub fn export_to(data: &TrackerData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn merge_settings(out: &mut UserSettings, raw: &Map<String, Value>) {
    if let Some(theme) = raw.get("theme").and_then(Value::as_str) {
        match theme {
            "light" => out.theme = Theme::Light,
            "dark" => out.theme = Theme::Dark,
            _ => {}
        }
    }
    if let Some(v) = finite(raw.get("weightKg")) {
        out.weight_kg = v;
    }
    if let Some(v) = finite(raw.get("targetKg")) {
        out.target_kg = v;
    }
    if let Some(v) = non_negative(raw.get("targetWeeks")) {
        out.target_weeks = v;
    }
    if let Some(v) = non_negative(raw.get("maintenanceCalories")) {
        out.maintenance_calories = v;
    }
    if let Some(defaults) = raw.get("defaultMealCalories").and_then(Value::as_object) {
        for meal in MealType::ALL {
            if let Some(v) = non_negative(defaults.get(meal.as_str())) {
                out.default_meal_calories.set_for_meal(meal, v);
            }
        }
    }
    if let Some(v) = non_negative(raw.get("hydrationGoal")) {
        out.hydration_goal = v;
    }
    match raw.get("pinHash") {
        Some(Value::String(hash)) => out.pin_hash = Some(hash.clone()),
        Some(Value::Null) => out.pin_hash = None,
        _ => {}
    }
    if let Some(v) = raw.get("notificationsEnabled").and_then(Value::as_bool) {
        out.notifications_enabled = v;
    }
    if let Some(goal) = raw.get("fitnessGoal").and_then(Value::as_str) {
        match goal {
            "bulk" => out.fitness_goal = FitnessGoal::Bulk,
            "cut" => out.fitness_goal = FitnessGoal::Cut,
            _ => {}
        }
    }
    if let Some(intensity) = raw.get("cuttingIntensity").and_then(Value::as_str) {
        match intensity {
            "slow" => out.cutting_intensity = CuttingIntensity::Slow,
            "moderate" => out.cutting_intensity = CuttingIntensity::Moderate,
            "aggressive" => out.cutting_intensity = CuttingIntensity::Aggressive,
            _ => {}
        }
    }
}

fn repair_logs(raw: &Map<String, Value>, defaults: &MealCalories) -> BTreeMap<String, DayLog> {
    let mut logs = BTreeMap::new();
    for (date, value) in raw {
        if !is_date_key(date) {
            continue;
        }
        let Some(entry) = value.as_object() else {
            continue;
        };
        logs.insert(date.clone(), repair_day(entry, defaults));
    }
    logs
}

fn repair_day(raw: &Map<String, Value>, defaults: &MealCalories) -> DayLog {
    let mut meals = Meals::with_defaults(defaults);
    if let Some(raw_meals) = raw.get("meals").and_then(Value::as_object) {
        for meal_type in MealType::ALL {
            let slot = meals.get_mut(meal_type);
            let Some(m) = raw_meals.get(meal_type.as_str()).and_then(Value::as_object) else {
                continue;
            };
            slot.done = m.get("done").and_then(Value::as_bool) == Some(true);
            if let Some(calories) = non_negative(m.get("calories")) {
                slot.calories = calories;
            }
            slot.substitution_from = m
                .get("substitutionFrom")
                .and_then(Value::as_str)
                .and_then(MealType::from_name);
        }
    }

    let raw_sleep = raw.get("sleep").and_then(Value::as_object);
    let sleep = Sleep {
        from: string_field(raw_sleep, "from"),
        to: string_field(raw_sleep, "to"),
        hours: raw_sleep
            .and_then(|s| s.get("hours"))
            .and_then(Value::as_f64)
            .filter(|h| h.is_finite() && *h >= 0.0)
            .unwrap_or(0.0),
    };

    DayLog {
        meals,
        sleep,
        water_cups: non_negative(raw.get("waterCups")).unwrap_or(0),
        mood: mood_field(raw.get("mood")),
        notes: raw
            .get("notes")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        timestamp: raw
            .get("timestamp")
            .and_then(Value::as_i64)
            .unwrap_or_else(now_millis),
        protein: non_negative(raw.get("protein")).unwrap_or(0),
        carbs: non_negative(raw.get("carbs")).unwrap_or(0),
    }
}

fn string_field(obj: Option<&Map<String, Value>>, key: &str) -> String {
    obj.and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn finite(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| v.is_finite())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn non_negative(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mood_field(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_f64)
        .filter(|m| m.is_finite())
        .map_or(0, |m| m.clamp(0.0, 5.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_migrate_default_is_fixed_point() {
        let data = TrackerData::default();
        let raw = serde_json::to_value(&data).unwrap();
        assert_eq!(validate_and_migrate(&raw), data);
    }

    #[test]
    fn test_migrate_round_trips_real_document() {
        let mut data = TrackerData::default();
        data.user_settings.pin_hash = Some("abcd1234".to_string());
        data.user_settings.fitness_goal = FitnessGoal::Cut;
        {
            let log = data.ensure_day("2024-06-15");
            log.meals.breakfast.done = true;
            log.meals.lunch.calories = 950;
            log.meals.lunch.substitution_from = Some(MealType::Breakfast);
            log.sleep = Sleep {
                from: "23:30".to_string(),
                to: "07:00".to_string(),
                hours: 7.5,
            };
            log.water_cups = 5;
            log.mood = 4;
            log.notes = "leg day".to_string();
            log.protein = 140;
            log.carbs = 260;
        }
        data.weight_logs.insert("2024-06-15".to_string(), 76.4);
        data.badges.push("first-day".to_string());

        let raw = serde_json::to_value(&data).unwrap();
        assert_eq!(validate_and_migrate(&raw), data);
    }

    #[test]
    fn test_migrate_non_object_input() {
        assert_eq!(validate_and_migrate(&json!(null)), TrackerData::default());
        assert_eq!(validate_and_migrate(&json!([1, 2])), TrackerData::default());
        assert_eq!(validate_and_migrate(&json!("data")), TrackerData::default());
    }

    #[test]
    fn test_migrate_merges_partial_settings() {
        let raw = json!({
            "userSettings": {
                "maintenanceCalories": 3000,
                "defaultMealCalories": { "lunch": 900 },
                "fitnessGoal": "cut",
                "theme": "light"
            },
            "logs": {}
        });
        let data = validate_and_migrate(&raw);
        assert_eq!(data.user_settings.maintenance_calories, 3000);
        assert_eq!(data.user_settings.default_meal_calories.lunch, 900);
        // Unmentioned slots keep their defaults.
        assert_eq!(data.user_settings.default_meal_calories.breakfast, 600);
        assert_eq!(data.user_settings.fitness_goal, FitnessGoal::Cut);
        assert_eq!(data.user_settings.theme, Theme::Light);
        assert_eq!(data.user_settings.hydration_goal, 8);
    }

    #[test]
    fn test_migrate_rejects_wrongly_typed_settings() {
        let raw = json!({
            "userSettings": {
                "weightKg": "heavy",
                "targetWeeks": -3,
                "hydrationGoal": null,
                "fitnessGoal": "shred",
                "pinHash": 1234
            }
        });
        let data = validate_and_migrate(&raw);
        let defaults = UserSettings::default();
        assert!((data.user_settings.weight_kg - defaults.weight_kg).abs() < f64::EPSILON);
        assert_eq!(data.user_settings.target_weeks, defaults.target_weeks);
        assert_eq!(data.user_settings.hydration_goal, defaults.hydration_goal);
        assert_eq!(data.user_settings.fitness_goal, defaults.fitness_goal);
        assert_eq!(data.user_settings.pin_hash, None);
    }

    #[test]
    fn test_migrate_drops_malformed_log_dates() {
        let raw = json!({
            "logs": {
                "2024-06-15": {},
                "not-a-date": { "waterCups": 3 },
                "2024-6-15": {},
                "2024-06-16": "string, not an object"
            }
        });
        let data = validate_and_migrate(&raw);
        assert_eq!(data.logs.len(), 1);
        assert!(data.logs.contains_key("2024-06-15"));
    }

    #[test]
    fn test_migrate_repairs_day_fields() {
        let raw = json!({
            "userSettings": { "defaultMealCalories": { "lunch": 800 } },
            "logs": {
                "2024-06-15": {
                    "meals": {
                        "breakfast": { "done": true, "calories": 650 },
                        "lunch": { "done": "yes", "calories": -200 },
                        "dinner": { "calories": null, "substitutionFrom": "lunch" }
                    },
                    "sleep": { "from": "23:00", "to": 7, "hours": "eight" },
                    "waterCups": -4,
                    "mood": 12,
                    "notes": 42,
                    "protein": 130.6
                }
            }
        });
        let data = validate_and_migrate(&raw);
        let log = &data.logs["2024-06-15"];

        assert!(log.meals.breakfast.done);
        assert_eq!(log.meals.breakfast.calories, 650);
        // Invalid done flag and negative calories fall back.
        assert!(!log.meals.lunch.done);
        assert_eq!(log.meals.lunch.calories, 800);
        // Missing meal object keeps the pre-filled default slot.
        assert_eq!(log.meals.snacks.calories, 300);
        assert_eq!(log.meals.dinner.substitution_from, Some(MealType::Lunch));

        assert_eq!(log.sleep.from, "23:00");
        assert_eq!(log.sleep.to, "");
        assert!((log.sleep.hours - 0.0).abs() < f64::EPSILON);

        assert_eq!(log.water_cups, 0);
        assert_eq!(log.mood, 5);
        assert_eq!(log.notes, "");
        assert_eq!(log.protein, 131);
        assert!(log.timestamp > 0);
    }

    #[test]
    fn test_migrate_filters_weight_logs_and_dedups_badges() {
        let raw = json!({
            "weightLogs": {
                "2024-06-15": 76.5,
                "2024-06-16": "76kg",
                "2024-06-17": -3,
                "junk": 80.0
            },
            "badges": ["first-day", "first-day", 7, "hydrated"]
        });
        let data = validate_and_migrate(&raw);
        assert_eq!(data.weight_logs.len(), 1);
        assert!((data.weight_logs["2024-06-15"] - 76.5).abs() < f64::EPSILON);
        assert_eq!(data.badges, vec!["first-day", "hydrated"]);
    }

    #[test]
    fn test_validate_import_shape() {
        assert!(validate_import(&json!({ "userSettings": {}, "logs": {} })).is_ok());
        assert!(validate_import(&json!(null)).is_err());
        assert!(validate_import(&json!({ "logs": {} })).is_err());
        assert!(validate_import(&json!({ "userSettings": {} })).is_err());
        assert!(validate_import(&json!({ "userSettings": [], "logs": {} })).is_err());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("2024-06-15"),
            "bulk-tracker-backup-2024-06-15.json"
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());

        let mut data = TrackerData::default();
        data.ensure_day("2024-06-15").water_cups = 6;
        data.weight_logs.insert("2024-06-15".to_string(), 75.2);
        store.save(&data).unwrap();

        assert_eq!(store.load(), data);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        assert_eq!(store.load(), TrackerData::default());
    }

    #[test]
    fn test_load_corrupt_file_resets_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        fs::write(store.data_path(), "{ not json").unwrap();
        assert_eq!(store.load(), TrackerData::default());
    }

    #[test]
    fn test_load_migrates_legacy_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());

        let legacy = json!({
            "userSettings": { "maintenanceCalories": 2800 },
            "logs": { "2024-06-15": { "waterCups": 2 } }
        });
        fs::write(store.legacy_path(), legacy.to_string()).unwrap();

        let data = store.load();
        assert_eq!(data.user_settings.maintenance_calories, 2800);
        assert_eq!(data.logs["2024-06-15"].water_cups, 2);
        // Migration persisted under the current version.
        assert!(store.data_path().exists());
    }

    #[test]
    fn test_reset_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.save(&TrackerData::default()).unwrap();
        assert!(store.data_path().exists());

        store.reset().unwrap();
        assert!(!store.data_path().exists());
        // Resetting again is fine.
        store.reset().unwrap();
    }

    #[test]
    fn test_export_to_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name("2024-06-15"));
        let data = TrackerData::default();
        export_to(&data, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let raw: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(validate_and_migrate(&raw), data);
    }
}
