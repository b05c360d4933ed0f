use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use goldq::cli::quote::QuoteArgs;
use goldq::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for goldq::AppCommand {
    fn from(cmd: Commands) -> goldq::AppCommand {
        match cmd {
            Commands::Rate => goldq::AppCommand::Rate,
            Commands::Catalogue => goldq::AppCommand::Catalogue,
            Commands::Quote {
                sku,
                weight_g,
                karat,
                stone_cost,
                advance,
            } => goldq::AppCommand::Quote(QuoteArgs {
                sku,
                weight_g,
                karat,
                stone_cost,
                advance_paid: advance,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch and display the current spot gold rate
    Rate,
    /// Compute an itemized ornament quotation
    Quote {
        /// Catalogue SKU supplying weight and karat defaults
        #[arg(long)]
        sku: Option<String>,
        /// Ornament weight in grams
        #[arg(long)]
        weight_g: Option<f64>,
        /// Gold purity in karat (out of 24)
        #[arg(long)]
        karat: Option<i32>,
        /// Cost of set stones
        #[arg(long, default_value_t = 0.0)]
        stone_cost: f64,
        /// Advance already collected from the customer
        #[arg(long, default_value_t = 0.0)]
        advance: f64,
    },
    /// List the ornament catalogue with indicative prices
    Catalogue,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => goldq::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = goldq::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
rate:
  source: "free"            # free | paid
  api_key: ""
  base_currency: "INR"
  cache_ttl_secs: 600
  timeout_secs: 10
  fallback_per_gram: 6000.0

charges:
  making_pct: 12.0
  making_min: 500.0
  hallmarking: 45.0
  shipping: 150.0
  certification: 300.0
  conversion: 0.0
  insurance_pct: 1.0
  discount_pct: 0.0
  gst_pct: 3.0
  final_lock_band: 0.0
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
