use super::ui;
use crate::core::catalogue::Catalogue;
use crate::core::config::AppConfig;
use crate::core::money::format_money;
use crate::core::pricing::{PriceBreakdown, compute_price};
use crate::core::rate::{GoldRateProvider, RateMeta};
use anyhow::{Result, bail};
use comfy_table::Cell;

/// Per-quote inputs from the command line. Anything unset falls back to the
/// catalogue record (when a SKU is given) or to a 10 g, 22 k default.
#[derive(Debug, Clone, Default)]
pub struct QuoteArgs {
    pub sku: Option<String>,
    pub weight_g: Option<f64>,
    pub karat: Option<i32>,
    pub stone_cost: f64,
    pub advance_paid: f64,
}

pub async fn run(
    args: &QuoteArgs,
    config: &AppConfig,
    provider: &(dyn GoldRateProvider + Send + Sync),
) -> Result<()> {
    let catalogue = Catalogue::with_extras(&config.catalogue);
    let seed = match &args.sku {
        Some(sku) => match catalogue.find(sku) {
            Some(item) => Some((item.weight_g, item.karat)),
            None => bail!("Unknown SKU: {sku}"),
        },
        None => None,
    };
    let weight_g = args.weight_g.or(seed.map(|(w, _)| w)).unwrap_or(10.0);
    let karat = args.karat.or(seed.map(|(_, k)| k)).unwrap_or(22);

    let spinner = ui::new_spinner("Fetching gold rate...");
    let rate = provider.fetch_rate(&config.rate.query()).await;
    spinner.finish_and_clear();

    let (per_gram, provisional) = match rate.per_gram {
        Some(value) => (value, false),
        None => (config.rate.fallback_per_gram, true),
    };

    let params = config
        .charges
        .parameters(weight_g, karat, per_gram, args.stone_cost, args.advance_paid);
    params.validate()?;
    let breakdown = compute_price(&params);

    println!(
        "{}",
        render_quote(
            &breakdown,
            &rate.meta,
            per_gram,
            provisional,
            &config.rate.base_currency,
            weight_g,
            karat,
        )
    );
    Ok(())
}

fn render_quote(
    breakdown: &PriceBreakdown,
    meta: &RateMeta,
    per_gram: f64,
    provisional: bool,
    currency: &str,
    weight_g: f64,
    karat: i32,
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Component"),
        ui::header_cell(&format!("Amount ({currency})")),
    ]);

    for item in breakdown.items() {
        table.add_row(vec![
            Cell::new(item.label),
            ui::amount_cell(&format_money(item.amount, currency), item.amount < 0.0),
        ]);
    }
    table.add_row(vec![
        ui::summary_label_cell("Subtotal"),
        ui::amount_cell(&format_money(breakdown.subtotal(), currency), false),
    ]);
    table.add_row(vec![
        ui::summary_label_cell("Total"),
        ui::amount_cell(&format_money(breakdown.total(), currency), false),
    ]);

    let title = format!("Quotation: {weight_g} g at {karat}k");
    let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));
    output.push_str(&table.to_string());

    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("Final payable:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format_money(breakdown.final_payable(), currency),
            ui::StyleType::TotalValue
        )
    ));

    if provisional {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!(
                    "Live rate unavailable. Quoted provisionally at the fallback rate of {}/g.",
                    format_money(per_gram, currency)
                ),
                ui::StyleType::Warning
            )
        ));
        if let Some(error) = &meta.error {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(&format!("Cause: {error}"), ui::StyleType::Subtle)
            ));
        }
    } else {
        let provider = meta.provider.as_deref().unwrap_or("unknown");
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!(
                    "Rate: {}/g (24k) via {provider} at {}",
                    format_money(per_gram, currency),
                    meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                ui::StyleType::Subtle
            )
        ));
    }

    output
}
