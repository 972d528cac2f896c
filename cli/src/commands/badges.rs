use anyhow::Result;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use bulk_core::badges::{BADGES, check_badges};
use bulk_core::models::TrackerData;
use bulk_core::store::Store;

use super::celebrate;
use super::helpers::today_key;

pub(crate) fn cmd_badges(store: &Store, data: &mut TrackerData, json: bool) -> Result<()> {
    let today = today_key();
    let newly_unlocked = check_badges(data, &today);
    if !newly_unlocked.is_empty() {
        store.save(data)?;
    }

    if json {
        #[derive(Serialize)]
        struct BadgeStatus {
            id: &'static str,
            name: &'static str,
            desc: &'static str,
            unlocked: bool,
        }

        let rows: Vec<BadgeStatus> = BADGES
            .iter()
            .map(|badge| BadgeStatus {
                id: badge.id,
                name: badge.name,
                desc: badge.desc,
                unlocked: data.badges.iter().any(|b| b == badge.id),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for badge in &newly_unlocked {
        celebrate(badge);
    }
    if !newly_unlocked.is_empty() {
        println!();
    }

    #[derive(Tabled)]
    struct BadgeRow {
        #[tabled(rename = "Badge")]
        name: &'static str,
        #[tabled(rename = "How")]
        desc: &'static str,
        #[tabled(rename = "Status")]
        status: &'static str,
    }

    let rows: Vec<BadgeRow> = BADGES
        .iter()
        .map(|badge| BadgeRow {
            name: badge.name,
            desc: badge.desc,
            status: if data.badges.iter().any(|b| b == badge.id) {
                "Unlocked"
            } else {
                "Locked"
            },
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..3)).with(Alignment::center()))
        .to_string();
    println!("{table}");

    Ok(())
}
