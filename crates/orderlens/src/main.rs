use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use orderlens_bucket::{sync_to_dir, S3BucketStore, S3Config};
use orderlens_pipeline::{Pipeline, PipelineConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Order and product reconciliation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download all raw objects from the remote bucket
    Fetch(FetchArgs),
    /// Reconcile the local raw files into the analytics tables
    Process(ProcessArgs),
    /// Fetch and then process, as one scheduler cycle would
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Directory the raw objects are downloaded into
    #[arg(long, default_value = "downloads")]
    downloads_dir: PathBuf,
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Root of the semicolon-delimited order files
    #[arg(long, default_value = "downloads/orders")]
    orders_dir: PathBuf,
    /// Root of the JSON product catalog fragments
    #[arg(long, default_value = "downloads/products")]
    products_dir: PathBuf,
    /// Directory the tabular artifacts are written to
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    fetch: FetchArgs,
    #[command(flatten)]
    process: ProcessArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch(args) => fetch(&args).await,
        Command::Process(args) => process(&args),
        Command::Run(args) => {
            fetch(&args.fetch).await?;
            process(&args.process)
        }
    }
}

async fn fetch(args: &FetchArgs) -> Result<()> {
    dotenvy::dotenv().ok();
    let config = S3Config::from_env().context("bucket configuration incomplete")?;
    let store = S3BucketStore::new(config)
        .await
        .context("failed to construct bucket client")?;

    let report = sync_to_dir(&store, &args.downloads_dir)
        .await
        .context("bucket listing failed")?;

    if report.failed > 0 {
        warn!(
            fetched = report.fetched,
            failed = report.failed,
            "fetch finished with failures"
        );
    } else {
        info!(fetched = report.fetched, "fetch complete");
    }
    Ok(())
}

fn process(args: &ProcessArgs) -> Result<()> {
    let pipeline = Pipeline::new(PipelineConfig {
        orders_dir: args.orders_dir.clone(),
        products_dir: args.products_dir.clone(),
        output_dir: args.output_dir.clone(),
    });

    let summary = pipeline.run().context("reconciliation run failed")?;
    info!(
        merged_rows = summary.merged_rows,
        dropped_orders = summary.orders_dropped_by_filter,
        duplicate_products = summary.duplicate_products_dropped,
        "processing complete"
    );
    Ok(())
}
