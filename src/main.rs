use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use partitura::collate;
use partitura::config::PartituraConfig;
use partitura::importer;
use partitura::loader;
use partitura::publish;
use partitura::render;
use partitura::score;

#[derive(Parser)]
#[command(name = "partitura")]
#[command(version, about = "Builds the evaluation table for generative music AI projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./partitura.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the evaluation table page and CSV snapshot
    Report,

    /// Generate project documents from a tabular evaluation export
    Import {
        /// Export to read (overrides the configured path)
        csv: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Partitura v{}", env!("CARGO_PKG_VERSION"));

    let config = PartituraConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Report => {
            info!("Building the evaluation table");
            cmd_report(&config)?;
        }
        Commands::Import { csv } => {
            info!("Importing evaluations");
            cmd_import(&config, csv)?;
        }
    }

    Ok(())
}

fn cmd_report(config: &PartituraConfig) -> anyhow::Result<()> {
    println!("{}", "📊 Building evaluation table...".bright_cyan().bold());
    println!();

    let records = loader::load_records(&config.reporter.projects_dir)?;
    let ranked = score::rank(records);
    let collation = collate::collate(&ranked);

    let table = render::render_table(&ranked, &collation);
    let applications = render::render_applications(&collation);
    publish::publish(&config.reporter, &ranked, &table, &applications)?;

    println!("{}", "✓ Table generated successfully!".bright_green().bold());
    println!();
    println!("{}: {:?}", "Output file".bold(), config.reporter.output_html);
    println!("{}: {:?}", "Snapshot".bold(), config.reporter.output_csv);
    println!();

    Ok(())
}

fn cmd_import(config: &PartituraConfig, csv: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "📥 Importing evaluations...".bright_cyan().bold());
    println!();

    let mut importer_config = config.importer.clone();
    if let Some(csv) = csv {
        importer_config.csv_path = csv;
    }

    let written = importer::run_import(&importer_config)?;

    println!();
    println!(
        "{}",
        format!("✓ Imported {} projects", written.len())
            .bright_green()
            .bold()
    );
    println!("{}: {:?}", "Documents".bold(), importer_config.output_dir);
    println!();

    Ok(())
}
