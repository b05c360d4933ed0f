pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::quote::QuoteArgs;
use crate::core::config::AppConfig;
use crate::core::rate::{GoldRateProvider, RateSource};
use crate::providers::caching::CachingRateProvider;
use crate::providers::gold_api::GoldApiProvider;
use crate::providers::metals_api::MetalsApiProvider;
use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    Rate,
    Quote(QuoteArgs),
    Catalogue,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Gold quotation tool starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let ttl = Duration::from_secs(config.rate.cache_ttl_secs);
    let timeout = Duration::from_secs(config.rate.timeout_secs);

    // One provider per configured source, wrapped in the TTL cache. Commands
    // only ever see the trait object.
    match config.rate.source {
        RateSource::Paid => {
            let base_url = config
                .providers
                .gold_api
                .as_ref()
                .map_or("https://www.goldapi.io", |p| &p.base_url);
            let provider =
                CachingRateProvider::new(GoldApiProvider::new(base_url, timeout), ttl);
            dispatch(command, &config, &provider).await
        }
        RateSource::Free => {
            let base_url = config
                .providers
                .metals_api
                .as_ref()
                .map_or("https://www.metals-api.com", |p| &p.base_url);
            let provider =
                CachingRateProvider::new(MetalsApiProvider::new(base_url, timeout), ttl);
            dispatch(command, &config, &provider).await
        }
    }
}

async fn dispatch(
    command: AppCommand,
    config: &AppConfig,
    provider: &(dyn GoldRateProvider + Send + Sync),
) -> Result<()> {
    match command {
        AppCommand::Rate => cli::rate::run(config, provider).await,
        AppCommand::Quote(args) => cli::quote::run(&args, config, provider).await,
        AppCommand::Catalogue => cli::catalogue::run(config, provider).await,
    }
}
