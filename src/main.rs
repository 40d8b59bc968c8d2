use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use checklist_locations::config::AppConfig;
use checklist_locations::core::locations::{
    audit_dataset_dir, Dataset, FilterStateStore, LocationFilter, ALL_LOCATIONS,
};
use checklist_locations::core::logging::{
    self, print_count, print_heading, print_info, print_success, print_warning,
};
use checklist_locations::core::storage::FileStore;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "CHECKLIST_LOCATIONS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show item counts per available location
    Counts {
        /// Dataset directory, overriding the config
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Read or change the persisted location selection
    Selection {
        #[command(subcommand)]
        action: SelectionAction,
    },
    /// List dataset entries with an `id` but no `locations` field
    Audit {
        /// Dataset directory, overriding the config
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Print every known location in display order
    Locations,
}

#[derive(Subcommand)]
enum SelectionAction {
    /// Print the current (sanitised) selection
    Show,
    /// Replace the selection with the given values, stored verbatim
    Set { locations: Vec<String> },
    /// Check a location, or uncheck it with --off
    Toggle {
        location: String,
        #[arg(long)]
        off: bool,
    },
    /// Select every available location
    SelectAll,
    /// Empty the selection
    Clear,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, source) = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let _log_guard = logging::init(&config.logging);
    source.log();
    tracing::debug!("{} v{} starting", checklist_locations::NAME, checklist_locations::VERSION);

    match args.command {
        Command::Counts { data_dir } => run_counts(&config, data_dir),
        Command::Selection { action } => run_selection(&config, action),
        Command::Audit { data_dir } => run_audit(&config, data_dir),
        Command::Locations => {
            for location in ALL_LOCATIONS {
                println!("{location}");
            }
            Ok(())
        }
    }
}

fn build_filter(config: &AppConfig) -> Result<LocationFilter<FileStore>> {
    let store = config.state_store().into_diagnostic()?;
    let state = FilterStateStore::with_key(store, config.storage.key.clone());
    let mut filter = LocationFilter::new(state).with_empty_policy(config.filter.empty_selection);
    filter.set_available_locations(config.filter.available_locations.as_deref());
    Ok(filter)
}

fn run_counts(config: &AppConfig, data_dir: Option<PathBuf>) -> Result<()> {
    let dir = data_dir.unwrap_or_else(|| config.data_dir());
    let dataset = Dataset::load_dir(&dir, &config.data.files).into_diagnostic()?;
    let filter = build_filter(config)?;
    let counts = filter.counts(&dataset);

    print_heading(&format!("{} items in {}", dataset.item_count(), dir.display()));
    if filter.available().is_restricted() {
        print_info(&format!(
            "Showing {} of {} locations",
            filter.available().len(),
            ALL_LOCATIONS.len()
        ));
    }
    for row in filter.rows(&counts) {
        print_count(row.label, row.count, row.checked);
    }

    let unknown: Vec<_> = counts.unknown_locations().collect();
    if !unknown.is_empty() {
        print_warning("Counted names outside the known locations:");
        for (name, count) in unknown {
            print_count(name, count, false);
        }
    }
    Ok(())
}

fn run_selection(config: &AppConfig, action: SelectionAction) -> Result<()> {
    let filter = build_filter(config)?;

    match action {
        SelectionAction::Show => {}
        SelectionAction::Set { locations } => {
            filter.set_selection(&locations).into_diagnostic()?;
            print_success("Selection saved");
        }
        SelectionAction::Toggle { location, off } => {
            filter.toggle(&location, !off).into_diagnostic()?;
            print_success(&format!(
                "{} {}",
                if off { "Unchecked" } else { "Checked" },
                location
            ));
        }
        SelectionAction::SelectAll => {
            filter.select_all().into_diagnostic()?;
            print_success(&format!("Selected {} locations", filter.available().len()));
        }
        SelectionAction::Clear => {
            filter.clear().into_diagnostic()?;
            print_success("Selection cleared");
        }
    }

    let selection = filter.selection();
    if selection.is_empty() {
        print_info("No locations selected");
    } else {
        for value in selection.iter() {
            println!("{value}");
        }
    }
    Ok(())
}

fn run_audit(config: &AppConfig, data_dir: Option<PathBuf>) -> Result<()> {
    let dir = data_dir.unwrap_or_else(|| config.data_dir());
    let report = audit_dataset_dir(&dir, &config.audit).into_diagnostic()?;

    if report.is_clean() {
        print_success("No items missing \"locations\" found.");
        return Ok(());
    }

    for finding in &report.findings {
        println!("{}\t{}\t{}", finding.file, finding.id, finding.description);
    }
    println!();
    print_info(&format!("Total: {}", report.findings.len()));
    Ok(())
}
