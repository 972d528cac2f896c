//! Field-level input validation. Every rule takes the raw user-supplied
//! string, coerces it, and either returns the typed value or a descriptive
//! error. No rule touches the document.

use anyhow::{Result, bail};

use crate::models::MealType;

pub fn weight(raw: &str) -> Result<f64> {
    let value: f64 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Weight must be between 0 and 500 kg (got '{raw}')"),
    };
    if !value.is_finite() || value <= 0.0 || value > 500.0 {
        bail!("Weight must be between 0 and 500 kg (got '{raw}')");
    }
    Ok(value)
}

pub fn calories(raw: &str) -> Result<u32> {
    let value: u32 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Calories must be between 0 and 10000 (got '{raw}')"),
    };
    if value > 10_000 {
        bail!("Calories must be between 0 and 10000 (got '{raw}')");
    }
    Ok(value)
}

pub fn weeks(raw: &str) -> Result<u32> {
    let value: u32 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Weeks must be between 1 and 104 (got '{raw}')"),
    };
    if !(1..=104).contains(&value) {
        bail!("Weeks must be between 1 and 104 (got '{raw}')");
    }
    Ok(value)
}

pub fn maintenance_calories(raw: &str) -> Result<u32> {
    let value: u32 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Maintenance calories must be between 1000 and 10000 (got '{raw}')"),
    };
    if !(1000..=10_000).contains(&value) {
        bail!("Maintenance calories must be between 1000 and 10000 (got '{raw}')");
    }
    Ok(value)
}

/// PIN codes are exactly four ASCII digits.
pub fn pin(raw: &str) -> Result<&str> {
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(raw)
    } else {
        bail!("PIN must be exactly 4 digits (0-9 only)")
    }
}

pub fn hydration_goal(raw: &str) -> Result<u32> {
    let value: u32 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Hydration goal must be between 1 and 20 cups (got '{raw}')"),
    };
    if !(1..=20).contains(&value) {
        bail!("Hydration goal must be between 1 and 20 cups (got '{raw}')");
    }
    Ok(value)
}

pub fn mood(raw: &str) -> Result<u32> {
    let value: u32 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Mood must be between 1 and 5 (got '{raw}')"),
    };
    if !(1..=5).contains(&value) {
        bail!("Mood must be between 1 and 5 (got '{raw}')");
    }
    Ok(value)
}

/// Cup index is bounded by the configured hydration goal.
pub fn cup_index(raw: &str, max: u32) -> Result<u32> {
    let upper = max.saturating_sub(1);
    let value: u32 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Cup index must be between 0 and {upper} (got '{raw}')"),
    };
    if value >= max {
        bail!("Cup index must be between 0 and {upper} (got '{raw}')");
    }
    Ok(value)
}

pub fn meal_type(raw: &str) -> Result<MealType> {
    MealType::from_name(raw).map_or_else(
        || bail!("Meal type must be: breakfast, lunch, dinner, or snacks (got '{raw}')"),
        Ok,
    )
}

/// Parse a wall-clock "HH:MM" string into minutes since midnight.
pub fn time_of_day(raw: &str) -> Result<u32> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() == 2 {
        if let (Ok(h), Ok(m)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
            if h < 24 && m < 60 {
                return Ok(h * 60 + m);
            }
        }
    }
    bail!("Time must be HH:MM, e.g. 23:30 (got '{raw}')")
}

/// Macro grams (protein/carbs) for a day.
pub fn grams(raw: &str) -> Result<u32> {
    let value: u32 = match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => bail!("Grams must be between 0 and 1000 (got '{raw}')"),
    };
    if value > 1000 {
        bail!("Grams must be between 0 and 1000 (got '{raw}')");
    }
    Ok(value)
}
