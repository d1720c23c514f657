mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::enquiry::EnquiryArgs;
use commands::inventory::{DetailArgs, ListingArgs};
use commands::lease::{MonthlyArgs, QuoteArgs};
use commands::wishlist::WishlistArgs;
use config::AppConfig;

/// Vehicle listings and leasing quotes
#[derive(Parser)]
#[command(
    name = "leasing",
    version,
    about = "Vehicle listings and leasing quotes",
    long_about = "Browse the dealer's stock, compute monthly leasing instalments \
                  rounded to 5 Rappen, manage the wishlist and validate customer \
                  enquiries."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a YAML or JSON configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly instalment for explicit leasing terms
    Monthly(MonthlyArgs),
    /// Leasing quote for a vehicle from form-style text values
    Quote(QuoteArgs),
    /// Filtered and sorted listing cards
    Listing(ListingArgs),
    /// Detail page of one vehicle
    Detail(DetailArgs),
    /// Show or toggle wishlist entries
    Wishlist(WishlistArgs),
    /// Validate an offer, leasing or test drive enquiry
    Enquiry(EnquiryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Monthly(args) => commands::lease::run_monthly(args, &config),
        Commands::Quote(args) => commands::lease::run_quote(args, &config),
        Commands::Listing(args) => commands::inventory::run_listing(args, &config),
        Commands::Detail(args) => commands::inventory::run_detail(args, &config),
        Commands::Wishlist(args) => commands::wishlist::run_wishlist(args, &config),
        Commands::Enquiry(args) => commands::enquiry::run_enquiry(args, &config),
        Commands::Version => {
            println!("leasing {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
