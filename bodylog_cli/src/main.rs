use bodylog_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bodylog")]
#[command(about = "Body measurement tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current stats (default)
    Show,

    /// Set height in centimetres
    Height {
        /// New height, replaces the previous value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Log a weight entry in kilograms
    Weight {
        /// Weight to append to the history
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Log a body-part measurement in centimetres
    Measure {
        /// Body part: chest, waist, hips, leftArm, rightArm, leftThigh, rightThigh
        part: String,

        /// Measurement to append to the part's series
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// List a series in entry order
    History {
        /// Series to list: weight (default) or a body-part key
        #[arg(default_value = "weight")]
        series: String,
    },

    /// Export all measurements to a CSV file
    Export {
        /// Destination path for the CSV snapshot
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    bodylog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = StatsStore::new(JsonFileGateway::new(&data_dir), BODY_STATS_KEY);

    match cli.command {
        Some(Commands::Show) | None => cmd_show(&store),
        Some(Commands::Height { value }) => cmd_height(&store, &value),
        Some(Commands::Weight { value }) => cmd_weight(&store, &value),
        Some(Commands::Measure { part, value }) => cmd_measure(&store, &part, &value),
        Some(Commands::History { series }) => cmd_history(&store, &series),
        Some(Commands::Export { path }) => cmd_export(&store, &path),
    }
}

fn cmd_show(store: &StatsStore<JsonFileGateway>) -> Result<()> {
    let stats = store.load();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BODY STATS");
    println!("╰─────────────────────────────────────────╯");
    println!();

    match stats.height {
        Some(height) => println!("  Height: {:.1} cm", height),
        None => println!("  Height: —"),
    }

    match stats.bmi() {
        Some(value) => {
            let category = BmiCategory::from_bmi(value);
            println!("  BMI:    {:.1} ({})", value, category.label());
        }
        None => println!("  BMI:    — (needs height and a weight entry)"),
    }

    println!();
    match stats.latest_weight() {
        Some(entry) => println!(
            "  Weight:      {:>6.1} kg  {}",
            entry.value,
            trend_marker(trend(&stats.weight_history))
        ),
        None => println!("  Weight:      —"),
    }

    for part in BodyPart::ALL {
        let series = stats.series(part);
        match latest(series) {
            Some(entry) => println!(
                "  {:<12} {:>6.1} cm  {}",
                format!("{}:", part.display_name()),
                entry.value,
                trend_marker(trend(series))
            ),
            None => println!("  {:<12}      —", format!("{}:", part.display_name())),
        }
    }
    println!();

    Ok(())
}

fn cmd_height(store: &StatsStore<JsonFileGateway>, raw: &str) -> Result<()> {
    let Some(value) = input::parse_value(raw) else {
        return reject_value(raw);
    };

    let stats = store.load();
    store.set_height(&stats, value)?;
    println!("✓ Height set to {:.1} cm", value);
    Ok(())
}

fn cmd_weight(store: &StatsStore<JsonFileGateway>, raw: &str) -> Result<()> {
    let Some(value) = input::parse_value(raw) else {
        return reject_value(raw);
    };

    let stats = store.load();
    let stats = store.add_weight(&stats, value)?;
    println!(
        "✓ Weight logged: {:.1} kg ({} entries)",
        value,
        stats.weight_history.len()
    );
    Ok(())
}

fn cmd_measure(store: &StatsStore<JsonFileGateway>, part: &str, raw: &str) -> Result<()> {
    let Some(part) = BodyPart::parse(part) else {
        eprintln!(
            "Unknown body part: {}. Expected one of: {}",
            part,
            BodyPart::ALL
                .iter()
                .map(|p| p.key())
                .collect::<Vec<_>>()
                .join(", ")
        );
        return Ok(());
    };

    let Some(value) = input::parse_value(raw) else {
        return reject_value(raw);
    };

    let stats = store.load();
    let stats = store.add_measurement(&stats, part, value)?;
    println!(
        "✓ {} logged: {:.1} cm ({} entries)",
        part.display_name(),
        value,
        stats.series(part).len()
    );
    Ok(())
}

fn cmd_history(store: &StatsStore<JsonFileGateway>, series: &str) -> Result<()> {
    let stats = store.load();

    let (name, entries) = if series.eq_ignore_ascii_case("weight") {
        ("Weight", stats.weight_history.as_slice())
    } else {
        match BodyPart::parse(series) {
            Some(part) => (part.display_name(), stats.series(part)),
            None => {
                eprintln!("Unknown series: {}. Use weight or a body-part key.", series);
                return Ok(());
            }
        }
    };

    if entries.is_empty() {
        println!("No {} entries yet.", name.to_lowercase());
        return Ok(());
    }

    println!("{} history ({} entries):", name, entries.len());
    for entry in entries {
        println!(
            "  {}  {:>7.1}",
            entry.date.format("%Y-%m-%d %H:%M"),
            entry.value
        );
    }

    Ok(())
}

fn cmd_export(store: &StatsStore<JsonFileGateway>, path: &std::path::Path) -> Result<()> {
    let stats = store.load();
    let count = export_csv(&stats, path)?;

    println!("✓ Exported {} measurements", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

/// Invalid input never reaches a store mutation; the entry is simply not
/// accepted.
fn reject_value(raw: &str) -> Result<()> {
    eprintln!("Value not accepted: {:?} (must be a positive number)", raw);
    Ok(())
}

fn trend_marker(direction: Option<Trend>) -> &'static str {
    match direction {
        Some(Trend::Up) => "↑",
        Some(Trend::Down) => "↓",
        Some(Trend::Stable) => "→",
        None => "",
    }
}
