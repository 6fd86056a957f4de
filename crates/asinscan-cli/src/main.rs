mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "asinscan")]
#[command(about = "Marketplace product, offer, and competitor scraping")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape product and third-party-offer data for a list of ASINs
    Products(ProductsArgs),
    /// Discover competitor ASINs for seed ASINs via the portal search tool
    Competitors(CompetitorsArgs),
    /// Competitor discovery, then a product run over seeds ∪ competitors
    Full(FullArgs),
    /// Pull ASINs out of an advertising report, then run the products flow
    AdReport(AdReportArgs),
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Directory the workbooks are written into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Debug, Args)]
struct ProductsArgs {
    /// ASINs, comma- or space-separated
    asins: String,
    /// Marketplace alias (e.g. "in", "usa", "uk"); omit to try all in order
    #[arg(long)]
    marketplace: Option<String>,
    /// Base file name for the products workbook
    #[arg(long, default_value = "products")]
    name: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct CompetitorsArgs {
    /// Seed ASINs, comma- or space-separated
    asins: String,
    /// Marketplace alias or storefront domain (required by the portal)
    #[arg(long)]
    marketplace: String,
    /// Base file name for the competitors workbook
    #[arg(long, default_value = "competitors")]
    name: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct FullArgs {
    /// Seed ASINs, comma- or space-separated
    asins: String,
    /// Marketplace alias for discovery; the product pass reuses it when it
    /// names a configured storefront, otherwise tries all storefronts
    #[arg(long)]
    marketplace: String,
    /// Base file name for the products workbook
    #[arg(long, default_value = "products")]
    name: String,
    /// Base file name for the competitors workbook
    #[arg(long, default_value = "competitors")]
    competitors_name: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct AdReportArgs {
    /// Path to the advertising report workbook
    report: PathBuf,
    /// Marketplace alias; omit to try all in order
    #[arg(long)]
    marketplace: Option<String>,
    /// Base file name for the products workbook
    #[arg(long, default_value = "products")]
    name: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = asinscan_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match cli.command {
        Commands::Products(args) => {
            let path = commands::run_product_scrape(
                &config,
                &args.asins,
                args.marketplace.as_deref(),
                None,
                &args.output.out_dir,
                &args.name,
            )
            .await?;
            println!("products workbook: {}", path.display());
        }
        Commands::Competitors(args) => {
            let outcome = commands::run_competitor_discovery(
                &config,
                &args.asins,
                &args.marketplace,
                &args.output.out_dir,
                &args.name,
            )
            .await?;
            println!(
                "competitors workbook: {} ({} rows)",
                outcome.path.display(),
                outcome.records.len()
            );
        }
        Commands::Full(args) => {
            let (competitors_path, products_path) = commands::run_full(
                &config,
                &args.asins,
                &args.marketplace,
                &args.output.out_dir,
                &args.name,
                &args.competitors_name,
            )
            .await?;
            println!("competitors workbook: {}", competitors_path.display());
            println!("products workbook: {}", products_path.display());
        }
        Commands::AdReport(args) => {
            let path = commands::run_ad_report(
                &config,
                &args.report,
                args.marketplace.as_deref(),
                &args.output.out_dir,
                &args.name,
            )
            .await?;
            println!("products workbook: {}", path.display());
        }
    }

    Ok(())
}
