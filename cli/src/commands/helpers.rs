use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use std::io::{self, BufRead, Write};

pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            "tomorrow" => Ok(Local::now().date_naive() + chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            }),
        },
    }
}

/// The `YYYY-MM-DD` key a date is stored under.
pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn today_key() -> String {
    date_key(Local::now().date_naive())
}

/// Ask a yes/no question on stderr and read the answer from stdin.
/// Anything but y/yes counts as no.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N]: ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let Some(line) = stdin.lock().lines().next() else {
        return Ok(false);
    };
    let answer = line?.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// A fixed-width text progress bar like `[██████░░░░░░░░░░░░░░]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn progress_bar(percent: f64, width: usize) -> String {
    let filled = (percent.clamp(0.0, 100.0) / 100.0 * width as f64).round() as usize;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar.push(']');
    bar
}

/// Filled/empty cup row for the hydration display.
pub(crate) fn cup_row(filled: u32, goal: u32) -> String {
    let mut row = String::new();
    for i in 0..goal {
        if i > 0 {
            row.push(' ');
        }
        row.push(if i < filled { '●' } else { '○' });
    }
    row
}

pub(crate) fn mood_label(mood: u32) -> &'static str {
    match mood {
        1 => "Sad",
        2 => "Down",
        3 => "Okay",
        4 => "Good",
        5 => "Great",
        _ => "Not rated",
    }
}

/// Parse a `meal:calories` substitution argument, e.g. `snacks:150`.
pub(crate) fn parse_substitution(s: &str) -> Result<(bulk_core::models::MealType, u32)> {
    let parts: Vec<&str> = s.splitn(2, ':').collect();
    if parts.len() != 2 {
        bail!("Invalid substitution '{s}'. Use format 'meal:calories' (e.g. 'snacks:150')");
    }
    let meal = bulk_core::validate::meal_type(parts[0])?;
    let calories = bulk_core::validate::calories(parts[1])?;
    Ok((meal, calories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulk_core::models::MealType;

    #[test]
    fn test_parse_date_none() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(None).unwrap(), today);
    }

    #[test]
    fn test_parse_date_keywords() {
        let today = Local::now().date_naive();
        assert_eq!(parse_date(Some("today".to_string())).unwrap(), today);
        assert_eq!(
            parse_date(Some("yesterday".to_string())).unwrap(),
            today - chrono::Duration::days(1)
        );
        assert_eq!(
            parse_date(Some("tomorrow".to_string())).unwrap(),
            today + chrono::Duration::days(1)
        );
    }

    #[test]
    fn test_parse_date_iso() {
        let date = parse_date(Some("2024-01-15".to_string())).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("nope".to_string())).is_err());
    }

    #[test]
    fn test_date_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        assert_eq!(date_key(date), "2024-06-05");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "[░░░░]");
        assert_eq!(progress_bar(50.0, 4), "[██░░]");
        assert_eq!(progress_bar(100.0, 4), "[████]");
        // Out-of-range display values clamp.
        assert_eq!(progress_bar(250.0, 4), "[████]");
        assert_eq!(progress_bar(-10.0, 4), "[░░░░]");
    }

    #[test]
    fn test_cup_row() {
        assert_eq!(cup_row(2, 4), "● ● ○ ○");
        assert_eq!(cup_row(0, 2), "○ ○");
        assert_eq!(cup_row(9, 3), "● ● ●");
    }

    #[test]
    fn test_mood_label() {
        assert_eq!(mood_label(0), "Not rated");
        assert_eq!(mood_label(3), "Okay");
        assert_eq!(mood_label(5), "Great");
        assert_eq!(mood_label(42), "Not rated");
    }

    #[test]
    fn test_parse_substitution() {
        let (meal, calories) = parse_substitution("snacks:150").unwrap();
        assert_eq!(meal, MealType::Snacks);
        assert_eq!(calories, 150);
        assert!(parse_substitution("snacks").is_err());
        assert!(parse_substitution("brunch:150").is_err());
        assert!(parse_substitution("snacks:lots").is_err());
    }
}
