use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tripweaver::format::{budget_by_category, format_attractions, format_hotels, format_itinerary};
use tripweaver::{
    AttractionSearcher, GroqClient, HotelSearcher, ItineraryBuilder, ItineraryExporter,
    PlannerConfig, PlannerError, PreferencesInput, TripPreferences,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Json,
    Html,
    Pdf,
}

/// Plan a trip: search hotels and attractions, build a day-by-day
/// itinerary, and optionally export it.
#[derive(Debug, Parser)]
#[command(name = "tripweaver", version, about)]
struct Cli {
    /// Path to a JSON file with trip preferences
    #[arg(long)]
    prefs: PathBuf,

    /// Path to a TOML configuration file (defaults to the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the export output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Export the itinerary in the given format (repeatable)
    #[arg(long, value_enum)]
    export: Vec<ExportFormat>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli, config: &PlannerConfig) {
    let default_level = if cli.verbose {
        "debug"
    } else {
        &config.logging.level
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tripweaver={default_level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_preferences(path: &PathBuf) -> tripweaver::Result<TripPreferences> {
    let body = std::fs::read_to_string(path)?;
    let input: PreferencesInput = serde_json::from_str(&body).map_err(|e| {
        PlannerError::validation(format!("invalid preferences file {}: {e}", path.display()))
    })?;
    TripPreferences::try_from(input)
}

fn run(cli: &Cli) -> tripweaver::Result<()> {
    let config = PlannerConfig::load_from_path(cli.config.clone())
        .map_err(|e| PlannerError::config(format!("{e:#}")))?;
    init_logging(cli, &config);

    let prefs = load_preferences(&cli.prefs)?;
    info!(
        destination = %prefs.destination,
        days = prefs.duration_days(),
        budget = prefs.budget,
        "Planning trip"
    );

    let hotels = HotelSearcher::new(&config.search)?.search(&prefs)?;
    println!("{}", format_hotels(&hotels));
    // Results are sorted by rating, so the first hotel is the pick
    let hotel = hotels.into_iter().next();

    let attractions = AttractionSearcher::new(&config.search)?.search(&prefs)?;
    println!("{}", format_attractions(&attractions));

    let llm = GroqClient::new(config.llm.clone())?;
    let builder = ItineraryBuilder::new(Box::new(llm));
    let itinerary = builder.build(&prefs, hotel, &attractions)?;

    println!("{}", format_itinerary(&itinerary));

    let by_category = budget_by_category(&itinerary);
    if !by_category.is_empty() {
        println!("Spending by category:");
        for (category, cost) in by_category {
            println!("  {category}: ${cost:.2}");
        }
    }

    if !cli.export.is_empty() {
        let output_dir = cli
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));
        let exporter = ItineraryExporter::new(output_dir)?;
        for format in &cli.export {
            let path = match format {
                ExportFormat::Json => exporter.export_json(&itinerary, None)?,
                ExportFormat::Html => exporter.export_html(&itinerary, None)?,
                ExportFormat::Pdf => exporter.export_pdf(&itinerary, None)?,
            };
            println!("Exported {}", path.display());
        }
    }

    debug!("Done");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}
