use analytics::{counts_by_name, positive_negative_ratio, Histogram, Interactions};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{CatalogLoader, ReviewLoader, ReviewTable, APP_IDS_URL};
use std::path::PathBuf;
use std::time::Instant;

/// Steam Insights - descriptive statistics over storefront review dumps
#[derive(Parser)]
#[command(name = "steam-insights")]
#[command(about = "Review counts, vote ratios, and interaction-matrix statistics", long_about = None)]
struct Cli {
    /// Directory holding the reviews*.csv files
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Location of the cached applist payload
    #[arg(long, default_value = "data/app_ids.json")]
    cache: PathBuf,

    /// Applist endpoint pulled when the cache is missing
    #[arg(long, default_value = APP_IDS_URL)]
    catalog_url: String,

    /// How many review files (path-sorted) form the training set
    #[arg(long, default_value = "5")]
    training_files: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dataset overview plus the interaction-matrix report
    Summary,

    /// Most-reviewed games by share of all reviews
    Top {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Games ranked by positive-to-negative vote ratio
    Ratio {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Interaction-matrix shape, sparsity, and occupancy extremes
    Matrix,

    /// Occupancy histogram (log10 buckets on the item axis)
    Hist {
        /// Which axis to bucket
        #[arg(long, value_enum)]
        per: Axis,

        /// Number of buckets
        #[arg(long, default_value = "10")]
        bins: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Axis {
    User,
    Item,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Catalog first (one-time fetch on a cold cache), then the review files
    let start = Instant::now();
    let catalog = CatalogLoader::new(&cli.catalog_url, &cli.cache)
        .load()
        .context("Failed to load the applist catalog")?;
    let table = ReviewLoader::new(cli.training_files)
        .load_dir(&cli.data_dir, &catalog)
        .with_context(|| format!("Failed to load review files from {}", cli.data_dir.display()))?;
    println!(
        "{} Loaded {} reviews from {} files ({} catalog entries) in {:?}",
        "✓".green(),
        table.len(),
        table.source_files,
        catalog.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Summary => handle_summary(&table)?,
        Commands::Top { limit } => handle_top(&table, limit),
        Commands::Ratio { limit } => handle_ratio(&table, limit),
        Commands::Matrix => handle_matrix(&table)?,
        Commands::Hist { per, bins } => handle_hist(&table, per, bins),
    }

    Ok(())
}

/// Handle the 'summary' command
fn handle_summary(table: &ReviewTable) -> Result<()> {
    let interactions = Interactions::build(table);
    let (users, items) = interactions.shape();

    println!("{}", "Dataset summary".bold().blue());
    println!("{}Reviews: {}", "• ".green(), table.len());
    println!("{}Distinct users: {}", "• ".green(), users);
    println!("{}Distinct games: {}", "• ".green(), items);
    println!();
    interactions.report(&mut std::io::stdout())?;
    Ok(())
}

/// Handle the 'top' command
fn handle_top(table: &ReviewTable, limit: usize) {
    println!("{}", "Most-reviewed games".bold().blue());
    for (rank, entry) in counts_by_name(table).iter().take(limit).enumerate() {
        println!(
            "{}. {} - {} reviews ({:.2}%)",
            (rank + 1).to_string().green(),
            entry.key,
            entry.count,
            entry.proportion * 100.0
        );
    }
}

/// Handle the 'ratio' command
fn handle_ratio(table: &ReviewTable, limit: usize) {
    println!("{}", "Positive/negative vote ratio".bold().blue());
    println!("(games with no negative or no positive votes do not rank)");
    for (rank, entry) in positive_negative_ratio(table).iter().take(limit).enumerate() {
        println!(
            "{}. {} - {:.2} ({} up / {} down)",
            (rank + 1).to_string().green(),
            entry.name,
            entry.ratio,
            entry.up,
            entry.down
        );
    }
}

/// Handle the 'matrix' command
fn handle_matrix(table: &ReviewTable) -> Result<()> {
    let interactions = Interactions::build(table);
    interactions.report(&mut std::io::stdout())?;
    Ok(())
}

/// Handle the 'hist' command
fn handle_hist(table: &ReviewTable, per: Axis, bins: usize) {
    let interactions = Interactions::build(table);
    let (title, hist) = match per {
        Axis::User => (
            "Reviews per user",
            Histogram::linear(interactions.ratings_per_user(), bins),
        ),
        // The per-item distribution is long-tailed; bucket it by decade
        Axis::Item => (
            "Reviews per game (log10 buckets)",
            Histogram::log10(interactions.ratings_per_item(), bins),
        ),
    };

    println!("{}", title.bold().blue());
    print!("{}", hist.render());
}
