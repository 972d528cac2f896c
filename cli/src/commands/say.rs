use std::process;

use anyhow::Result;

use bulk_core::models::TrackerData;
use bulk_core::store::Store;

use crate::voice::{UNRECOGNIZED_HELP, VoiceCommand};

use super::{data, meal, stats};

/// The voice shortcut layer: takes a transcribed phrase and dispatches the
/// matching app action.
pub(crate) fn cmd_say(store: &Store, data: &mut TrackerData, transcript: &str) -> Result<()> {
    let Some(command) = VoiceCommand::parse(transcript) else {
        eprintln!("{UNRECOGNIZED_HELP}");
        process::exit(2);
    };

    match command {
        VoiceCommand::Breakfast => meal::cmd_meal_done(store, data, "breakfast", None),
        VoiceCommand::Lunch => meal::cmd_meal_done(store, data, "lunch", None),
        VoiceCommand::Dinner => meal::cmd_meal_done(store, data, "dinner", None),
        VoiceCommand::Snack => meal::cmd_meal_done(store, data, "snacks", None),
        VoiceCommand::Export | VoiceCommand::Backup => data::cmd_export(data, None),
        VoiceCommand::Stats | VoiceCommand::Statistics => stats::cmd_stats(data, false),
    }
}
