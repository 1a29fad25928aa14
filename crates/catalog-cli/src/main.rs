mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Product catalog maintenance tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Group products by seller and flag sellers with too few listings.
    Sellers {
        /// Sellers with fewer listings than this are reported as underfilled.
        #[arg(long, default_value_t = 3)]
        min_products: usize,
        /// Dataset file; defaults to `CATALOG_DATA_PATH`.
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Load and validate the dataset.
    Check {
        /// Dataset file; defaults to `CATALOG_DATA_PATH`.
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Sellers { min_products, data }) => {
            let dataset = report::load(data)?;
            let report = catalog_core::seller_report(&dataset.products, min_products);
            print!("{}", report::render_sellers(&report));
        }
        Some(Commands::Check { data }) => {
            let dataset = report::load(data)?;
            report::validate(&dataset)?;
            print!("{}", report::render_check(&dataset));
        }
        None => println!("no command given; run `catalog-cli --help`"),
    }

    Ok(())
}
