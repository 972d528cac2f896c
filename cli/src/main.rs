mod charts;
mod commands;
mod config;
mod pin;
mod voice;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{
    cmd_badges, cmd_chart, cmd_export, cmd_goals_set, cmd_goals_show, cmd_import, cmd_macros,
    cmd_meal_done, cmd_meal_set, cmd_meal_undo, cmd_mood, cmd_notes, cmd_pin_clear, cmd_pin_set,
    cmd_reset, cmd_say, cmd_settings_hydration, cmd_settings_meals, cmd_settings_notifications,
    cmd_settings_show, cmd_settings_theme, cmd_sleep, cmd_stats, cmd_today, cmd_water_cup,
    cmd_water_reset, cmd_weight_history, cmd_weight_log, cmd_weight_show,
};
use crate::config::Config;
use bulk_core::store::Store;

#[derive(Parser)]
#[command(
    name = "bulk",
    version,
    about = "A simple diet & fitness tracker CLI",
    long_about = "\n\n  ██████╗ ██╗   ██╗██╗     ██╗  ██╗
  ██╔══██╗██║   ██║██║     ██║ ██╔╝
  ██████╔╝██║   ██║██║     █████╔╝
  ██╔══██╗██║   ██║██║     ██╔═██╗
  ██████╔╝╚██████╔╝███████╗██║  ██╗
  ╚═════╝  ╚═════╝ ╚══════╝╚═╝  ╚═╝
     eat big. sleep well. log it.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's dashboard (meals, hydration, sleep, mood, macros)
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage today's meal slots
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },
    /// Log a sleep window for today (wraps across midnight)
    Sleep {
        /// Bedtime, HH:MM (e.g. 23:30)
        from: String,
        /// Wake-up time, HH:MM (e.g. 07:00)
        to: String,
    },
    /// Track hydration cups for today
    Water {
        #[command(subcommand)]
        command: WaterCommands,
    },
    /// Rate today's mood (1-5)
    Mood {
        /// Mood rating: 1 (sad) to 5 (great)
        value: String,
    },
    /// Save free-text notes for today
    Notes {
        /// The note text
        text: Vec<String>,
    },
    /// Log protein/carb grams for today
    Macros {
        /// Protein in grams
        #[arg(long)]
        protein: Option<String>,
        /// Carbs in grams
        #[arg(long)]
        carbs: Option<String>,
    },
    /// Track body weight
    Weight {
        #[command(subcommand)]
        command: WeightCommands,
    },
    /// Show 7-day statistics and trend charts
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw a trend chart: calories, sleep, or weight
    Chart {
        /// Chart type: calories, sleep, weight
        kind: String,
        /// Number of trailing days to plot
        #[arg(short, long, default_value = "7")]
        days: usize,
    },
    /// Show or set fitness goals and progress
    Goals {
        #[command(subcommand)]
        command: GoalsCommands,
    },
    /// Show or change app settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Show achievement badges
    Badges {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export all data to a JSON backup file
    Export {
        /// Destination path (default: bulk-tracker-backup-<date>.json)
        path: Option<PathBuf>,
    },
    /// Import a JSON backup, replacing all current data
    Import {
        /// Path to the backup file
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Erase all data and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Manage the startup PIN
    Pin {
        #[command(subcommand)]
        command: PinCommands,
    },
    /// Run a transcribed voice command (e.g. "mark breakfast done")
    Say {
        /// The transcript to interpret
        transcript: Vec<String>,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Mark a meal as done
    Done {
        /// Meal: breakfast, lunch, dinner, snacks
        meal: String,
        /// Date to log for (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Unmark a meal, optionally attributing substitution calories
    Undo {
        /// Meal: breakfast, lunch, dinner, snacks
        meal: String,
        /// Add calories to another slot, format 'meal:calories' (e.g. snacks:150)
        #[arg(long)]
        substitute: Option<String>,
        /// Date to log for (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Set a meal slot's calorie figure
    Set {
        /// Meal: breakfast, lunch, dinner, snacks
        meal: String,
        /// Calories for the slot
        calories: String,
        /// Date to log for (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum WaterCommands {
    /// Tap a cup (0-based index). Tapping the highest filled cup empties it
    Cup {
        /// Cup index, 0 up to the hydration goal
        index: String,
    },
    /// Empty all cups for today
    Reset,
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Log body weight in kilograms
    Log {
        /// Weight in kg
        value: String,
        /// Date (YYYY-MM-DD or today/yesterday, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show weight for a date (default: today)
    Show {
        /// Date (YYYY-MM-DD or today/yesterday, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show weight history
    History {
        /// Number of days to show (default: all)
        #[arg(short, long)]
        days: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum GoalsCommands {
    /// Show goal settings and progress
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update goal settings
    Set {
        /// Current body weight in kg
        #[arg(long)]
        weight: Option<String>,
        /// Target weight change in kg (gain for bulk, loss for cut)
        #[arg(long)]
        target: Option<String>,
        /// Timeframe in weeks (1-104)
        #[arg(long)]
        weeks: Option<String>,
        /// Maintenance calories (1000-10000)
        #[arg(long)]
        maintenance: Option<String>,
        /// Fitness goal: bulk or cut
        #[arg(long)]
        goal: Option<String>,
        /// Cutting intensity: slow, moderate, aggressive
        #[arg(long)]
        intensity: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set default calories per meal slot
    Meals {
        #[arg(long)]
        breakfast: Option<String>,
        #[arg(long)]
        lunch: Option<String>,
        #[arg(long)]
        dinner: Option<String>,
        #[arg(long)]
        snacks: Option<String>,
    },
    /// Set the daily hydration goal in cups (1-20)
    Hydration {
        /// Cups per day
        goal: String,
    },
    /// Set the color theme: light or dark
    Theme {
        /// light or dark
        theme: String,
    },
    /// Toggle the reminder preference: on or off
    Notifications {
        /// on or off
        state: String,
    },
}

#[derive(Subcommand)]
enum PinCommands {
    /// Set a 4-digit startup PIN
    Set {
        /// The PIN (exactly 4 digits)
        pin: String,
    },
    /// Remove PIN protection
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = Store::new(config.data_dir);
    let mut data = store.load();

    pin::require_pin(&data)?;

    match cli.command {
        Commands::Today { json } => cmd_today(&store, &mut data, json),
        Commands::Meal { command } => match command {
            MealCommands::Done { meal, date } => cmd_meal_done(&store, &mut data, &meal, date),
            MealCommands::Undo {
                meal,
                substitute,
                date,
            } => cmd_meal_undo(&store, &mut data, &meal, substitute, date),
            MealCommands::Set {
                meal,
                calories,
                date,
            } => cmd_meal_set(&store, &mut data, &meal, &calories, date),
        },
        Commands::Sleep { from, to } => cmd_sleep(&store, &mut data, &from, &to),
        Commands::Water { command } => match command {
            WaterCommands::Cup { index } => cmd_water_cup(&store, &mut data, &index),
            WaterCommands::Reset => cmd_water_reset(&store, &mut data),
        },
        Commands::Mood { value } => cmd_mood(&store, &mut data, &value),
        Commands::Notes { text } => cmd_notes(&store, &mut data, &text.join(" ")),
        Commands::Macros { protein, carbs } => cmd_macros(&store, &mut data, protein, carbs),
        Commands::Weight { command } => match command {
            WeightCommands::Log { value, date, json } => {
                cmd_weight_log(&store, &mut data, &value, date, json)
            }
            WeightCommands::Show { date, json } => cmd_weight_show(&data, date, json),
            WeightCommands::History { days, json } => cmd_weight_history(&data, days, json),
        },
        Commands::Stats { json } => cmd_stats(&data, json),
        Commands::Chart { kind, days } => cmd_chart(&data, &kind, days),
        Commands::Goals { command } => match command {
            GoalsCommands::Show { json } => cmd_goals_show(&data, json),
            GoalsCommands::Set {
                weight,
                target,
                weeks,
                maintenance,
                goal,
                intensity,
            } => cmd_goals_set(
                &store,
                &mut data,
                weight,
                target,
                weeks,
                maintenance,
                goal,
                intensity,
            ),
        },
        Commands::Settings { command } => match command {
            SettingsCommands::Show { json } => cmd_settings_show(&data, json),
            SettingsCommands::Meals {
                breakfast,
                lunch,
                dinner,
                snacks,
            } => cmd_settings_meals(&store, &mut data, breakfast, lunch, dinner, snacks),
            SettingsCommands::Hydration { goal } => cmd_settings_hydration(&store, &mut data, &goal),
            SettingsCommands::Theme { theme } => cmd_settings_theme(&store, &mut data, &theme),
            SettingsCommands::Notifications { state } => {
                cmd_settings_notifications(&store, &mut data, &state)
            }
        },
        Commands::Badges { json } => cmd_badges(&store, &mut data, json),
        Commands::Export { path } => cmd_export(&data, path),
        Commands::Import { file, yes } => cmd_import(&store, &mut data, &file, yes),
        Commands::Reset { yes } => cmd_reset(&store, yes),
        Commands::Pin { command } => match command {
            PinCommands::Set { pin } => cmd_pin_set(&store, &mut data, &pin),
            PinCommands::Clear { yes } => cmd_pin_clear(&store, &mut data, yes),
        },
        Commands::Say { transcript } => cmd_say(&store, &mut data, &transcript.join(" ")),
    }
}
