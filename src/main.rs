use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use unicorn_curator::config::CurationConfig;
use unicorn_curator::curate::Curator;
use unicorn_curator::model::InputSource;
use unicorn_curator::{CurationError, Result, logging, sync};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init()?;
    match cli.command {
        Command::Curate(args) => execute_curate(args),
        Command::Catalog(args) => execute_catalog(args),
    }
}

fn execute_curate(args: CurateArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(CurationError::MissingInput(args.input));
    }

    let source = InputSource::from(args.source);
    let config = args.resolve_config(source)?;
    let category = args.category.as_deref();

    if args.skip_curation {
        let count = sync::import_to_workbook(&args.input, &args.output, source, category, &config)?;
        println!("Imported {count} products without curation -> {}", args.output.display());
    } else {
        let curator = Curator::new(config);
        let report =
            sync::curate_to_workbook(&args.input, &args.output, source, category, &curator)?;
        println!("{report}");
        println!("Spreadsheet saved -> {}", args.output.display());
    }

    if let Some(catalog_path) = &args.catalog {
        let catalog = sync::workbook_to_catalog(&args.output, catalog_path)?;
        println!(
            "Catalog saved -> {} ({} products, {} categories)",
            catalog_path.display(),
            catalog.products.len(),
            catalog.categories.len()
        );
    }
    Ok(())
}

fn execute_catalog(args: CatalogArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(CurationError::MissingInput(args.input));
    }
    let catalog = sync::workbook_to_catalog(&args.input, &args.output)?;
    println!(
        "Catalog saved -> {} ({} products, {} categories)",
        args.output.display(),
        catalog.products.len(),
        catalog.categories.len()
    );
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Curate supplier furniture feeds into a premium storefront catalogue."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Curate a product feed into the product spreadsheet.
    Curate(CurateArgs),
    /// Export the active products of a spreadsheet as storefront JSON.
    Catalog(CatalogArgs),
}

#[derive(clap::Args)]
struct CurateArgs {
    /// Shape of the input document.
    #[arg(long, value_enum)]
    source: SourceKind,

    /// Input file path.
    #[arg(long)]
    input: PathBuf,

    /// Spreadsheet to write.
    #[arg(long)]
    output: PathBuf,

    /// Also export the storefront catalog JSON to this path.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Category slug for API imports; guessed from titles when omitted.
    #[arg(long)]
    category: Option<String>,

    /// JSON file overriding the curation defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum quality score, overriding the configuration.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_score: Option<u8>,

    /// Import every record as-is instead of curating.
    #[arg(long)]
    skip_curation: bool,
}

impl CurateArgs {
    fn resolve_config(&self, source: InputSource) -> Result<CurationConfig> {
        let mut config = match &self.config {
            Some(path) => CurationConfig::load(path, source)?,
            None => CurationConfig::for_source(source),
        };
        if let Some(min_score) = self.min_score {
            config.min_score = min_score;
        }
        Ok(config)
    }
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Product spreadsheet to read.
    #[arg(long)]
    input: PathBuf,

    /// Catalog JSON file to write.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SourceKind {
    Api,
    Csv,
    Manual,
    Records,
}

impl From<SourceKind> for InputSource {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Api => InputSource::Api,
            SourceKind::Csv => InputSource::Csv,
            SourceKind::Manual => InputSource::Manual,
            SourceKind::Records => InputSource::Records,
        }
    }
}
