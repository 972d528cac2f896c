use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bulk_core::models::TrackerData;
use bulk_core::store::{self, Store};

use super::helpers::{confirm, today_key};

pub(crate) fn cmd_export(data: &TrackerData, path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(store::export_file_name(&today_key())));
    store::export_to(data, &path)?;
    println!("Exported to {}", path.display());
    Ok(())
}

/// Replace the document with a backup file: shape check, confirm, then the
/// full migration so a hand-edited or stale backup still loads cleanly.
pub(crate) fn cmd_import(
    store: &Store,
    data: &mut TrackerData,
    file: &Path,
    yes: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;
    store::validate_import(&raw).context("Invalid backup file format")?;

    if !yes && !confirm("This will replace all your current data. Continue?")? {
        eprintln!("Import cancelled");
        return Ok(());
    }

    *data = store::validate_and_migrate(&raw);
    store.save(data)?;

    let days = data.logs.len();
    let weights = data.weight_logs.len();
    println!("Imported {days} logged days and {weights} weight entries");
    Ok(())
}

pub(crate) fn cmd_reset(store: &Store, yes: bool) -> Result<()> {
    if !yes
        && !confirm(
            "This permanently erases ALL data: meal logs, weight records, sleep, \
             hydration, mood ratings and settings. Continue?",
        )?
    {
        eprintln!("Reset cancelled");
        return Ok(());
    }

    store.reset()?;
    println!("All data has been erased.");
    Ok(())
}
