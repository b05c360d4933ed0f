use super::ui;
use crate::core::config::AppConfig;
use crate::core::money::format_money;
use crate::core::rate::{GoldRateProvider, RateResult};
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(
    config: &AppConfig,
    provider: &(dyn GoldRateProvider + Send + Sync),
) -> Result<()> {
    let spinner = ui::new_spinner("Fetching gold rate...");
    let result = provider.fetch_rate(&config.rate.query()).await;
    spinner.finish_and_clear();

    println!(
        "{}",
        render_rate(&result, &config.rate.base_currency, config.rate.fallback_per_gram)
    );
    Ok(())
}

fn render_rate(result: &RateResult, currency: &str, fallback_per_gram: f64) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);

    let rate_cell = match result.per_gram {
        Some(per_gram) => ui::amount_cell(&format_money(per_gram, currency), false),
        None => Cell::new("N/A"),
    };
    table.add_row(vec![Cell::new("Rate per gram (24k)"), rate_cell]);
    table.add_row(vec![
        Cell::new("Source"),
        Cell::new(result.meta.source.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Provider"),
        Cell::new(result.meta.provider.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![
        Cell::new("Timestamp"),
        Cell::new(result.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    ]);
    if let Some(error) = &result.meta.error {
        table.add_row(vec![Cell::new("Error"), Cell::new(error)]);
    }

    let mut output = format!(
        "{}\n\n{}",
        ui::style_text("Spot Gold Rate", ui::StyleType::Title),
        table
    );

    if result.per_gram.is_none() {
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!(
                    "No upstream rate available. Quotes will use the fallback rate of {}/g.",
                    format_money(fallback_per_gram, currency)
                ),
                ui::StyleType::Warning
            )
        ));
    }

    output
}
