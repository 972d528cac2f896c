use anyhow::{Result, bail};

use bulk_core::analytics;
use bulk_core::models::{CuttingIntensity, FitnessGoal, TrackerData};
use bulk_core::store::Store;
use bulk_core::validate;

use super::helpers::progress_bar;

pub(crate) fn cmd_goals_show(data: &TrackerData, json: bool) -> Result<()> {
    let progress = analytics::goal_progress(data);
    let settings = &data.user_settings;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "weightKg": settings.weight_kg,
                "targetKg": settings.target_kg,
                "targetWeeks": settings.target_weeks,
                "maintenanceCalories": settings.maintenance_calories,
                "fitnessGoal": settings.fitness_goal,
                "cuttingIntensity": settings.cutting_intensity,
                "progress": progress,
            }))?
        );
        return Ok(());
    }

    println!("=== Goals ===\n");
    let weight = settings.weight_kg;
    let target = settings.target_kg;
    let weeks = settings.target_weeks;
    let maintenance = settings.maintenance_calories;
    println!("  Current weight:  {weight:.1} kg");
    match settings.fitness_goal {
        FitnessGoal::Bulk => {
            println!("  Plan:            bulk, gain {target:.1} kg in {weeks} weeks");
        }
        FitnessGoal::Cut => {
            let intensity = intensity_name(settings.cutting_intensity);
            println!("  Plan:            cut ({intensity}), lose {target:.1} kg in {weeks} weeks");
        }
    }
    println!("  Maintenance:     {maintenance} kcal\n");

    let target_daily = progress.target_daily;
    let avg_actual = progress.avg_actual;
    let pct = progress.progress;
    println!("  Target daily calories: {target_daily} kcal");
    if settings.fitness_goal == FitnessGoal::Cut {
        let deficit = progress.daily_surplus_required.abs();
        println!("  Required deficit:      -{deficit} kcal/day");
    } else {
        let surplus = progress.daily_surplus_required;
        println!("  Required surplus:      +{surplus} kcal/day");
    }
    println!("  Your 7-day average:    {avg_actual} kcal");
    println!(
        "  Progress: {pct:.1}%  {}",
        progress_bar(progress.clamped_progress, 20)
    );

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_goals_set(
    store: &Store,
    data: &mut TrackerData,
    weight: Option<String>,
    target: Option<String>,
    weeks: Option<String>,
    maintenance: Option<String>,
    goal: Option<String>,
    intensity: Option<String>,
) -> Result<()> {
    if weight.is_none()
        && target.is_none()
        && weeks.is_none()
        && maintenance.is_none()
        && goal.is_none()
        && intensity.is_none()
    {
        bail!(
            "Nothing to set. Pass at least one of --weight, --target, --weeks, \
             --maintenance, --goal, --intensity"
        );
    }

    // Validate everything before touching the document.
    let weight = weight.as_deref().map(validate::weight).transpose()?;
    let target = target.as_deref().map(validate::weight).transpose()?;
    let weeks = weeks.as_deref().map(validate::weeks).transpose()?;
    let maintenance = maintenance
        .as_deref()
        .map(validate::maintenance_calories)
        .transpose()?;
    let goal = goal.as_deref().map(parse_goal).transpose()?;
    let intensity = intensity.as_deref().map(parse_intensity).transpose()?;

    let settings = &mut data.user_settings;
    if let Some(v) = weight {
        settings.weight_kg = v;
    }
    if let Some(v) = target {
        settings.target_kg = v;
    }
    if let Some(v) = weeks {
        settings.target_weeks = v;
    }
    if let Some(v) = maintenance {
        settings.maintenance_calories = v;
    }
    if let Some(v) = goal {
        settings.fitness_goal = v;
    }
    if let Some(v) = intensity {
        settings.cutting_intensity = v;
    }
    store.save(data)?;

    println!("Goals saved.\n");
    cmd_goals_show(data, false)
}

fn parse_goal(raw: &str) -> Result<FitnessGoal> {
    match raw.to_lowercase().as_str() {
        "bulk" => Ok(FitnessGoal::Bulk),
        "cut" => Ok(FitnessGoal::Cut),
        _ => bail!("Fitness goal must be 'bulk' or 'cut' (got '{raw}')"),
    }
}

fn parse_intensity(raw: &str) -> Result<CuttingIntensity> {
    match raw.to_lowercase().as_str() {
        "slow" => Ok(CuttingIntensity::Slow),
        "moderate" => Ok(CuttingIntensity::Moderate),
        "aggressive" => Ok(CuttingIntensity::Aggressive),
        _ => bail!("Cutting intensity must be slow, moderate, or aggressive (got '{raw}')"),
    }
}

fn intensity_name(intensity: CuttingIntensity) -> &'static str {
    match intensity {
        CuttingIntensity::Slow => "slow",
        CuttingIntensity::Moderate => "moderate",
        CuttingIntensity::Aggressive => "aggressive",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_goal() {
        assert_eq!(parse_goal("bulk").unwrap(), FitnessGoal::Bulk);
        assert_eq!(parse_goal("CUT").unwrap(), FitnessGoal::Cut);
        assert!(parse_goal("shred").is_err());
    }

    #[test]
    fn test_parse_intensity() {
        assert_eq!(
            parse_intensity("aggressive").unwrap(),
            CuttingIntensity::Aggressive
        );
        assert!(parse_intensity("extreme").is_err());
    }
}
