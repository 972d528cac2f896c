use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use bulk_core::models::TrackerData;
use bulk_core::store::Store;
use bulk_core::validate;

use super::helpers::{date_key, parse_date};

const LBS_PER_KG: f64 = 2.20462;

pub(crate) fn cmd_weight_log(
    store: &Store,
    data: &mut TrackerData,
    value: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let weight_kg = validate::weight(value)?;
    let date = date_key(parse_date(date)?);

    data.weight_logs.insert(date.clone(), weight_kg);
    store.save(data)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "date": date, "weightKg": weight_kg })
        );
    } else {
        let lbs = weight_kg * LBS_PER_KG;
        println!("Logged {weight_kg:.1} kg ({lbs:.1} lbs) for {date}");
    }
    Ok(())
}

pub(crate) fn cmd_weight_show(
    data: &TrackerData,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = date_key(parse_date(date)?);

    if let Some(weight_kg) = data.weight_logs.get(&date) {
        if json {
            println!(
                "{}",
                serde_json::json!({ "date": date, "weightKg": weight_kg })
            );
        } else {
            let lbs = weight_kg * LBS_PER_KG;
            println!("{date}: {weight_kg:.1} kg ({lbs:.1} lbs)");
        }
    } else if json {
        println!(
            "{}",
            serde_json::json!({ "error": format!("No weight entry for {date}") })
        );
    } else {
        eprintln!("No weight entry for {date}");
    }
    Ok(())
}

pub(crate) fn cmd_weight_history(
    data: &TrackerData,
    days: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut entries: Vec<(&String, f64)> = data.weight_logs.iter().map(|(d, w)| (d, *w)).collect();
    if let Some(n) = days {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }

    if json {
        let rows: Vec<serde_json::Value> = entries
            .iter()
            .map(|(date, kg)| serde_json::json!({ "date": date, "weightKg": kg }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if entries.is_empty() {
        eprintln!("No weight entries found. Use `bulk weight log` to record your weight.");
        return Ok(());
    }

    #[derive(Tabled)]
    struct WeightRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Weight (kg)")]
        kg: String,
        #[tabled(rename = "Weight (lbs)")]
        lbs: String,
    }

    let rows: Vec<WeightRow> = entries
        .iter()
        .map(|(date, kg)| WeightRow {
            date: (*date).clone(),
            kg: format!("{kg:.1}"),
            lbs: format!("{:.1}", kg * LBS_PER_KG),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}
