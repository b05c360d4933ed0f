use super::ui;
use crate::core::catalogue::Catalogue;
use crate::core::config::AppConfig;
use crate::core::money::format_money;
use crate::core::pricing::compute_price;
use crate::core::rate::GoldRateProvider;
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(
    config: &AppConfig,
    provider: &(dyn GoldRateProvider + Send + Sync),
) -> Result<()> {
    let catalogue = Catalogue::with_extras(&config.catalogue);

    let spinner = ui::new_spinner("Fetching gold rate...");
    let rate = provider.fetch_rate(&config.rate.query()).await;
    spinner.finish_and_clear();

    let (per_gram, provisional) = match rate.per_gram {
        Some(value) => (value, false),
        None => (config.rate.fallback_per_gram, true),
    };

    let currency = &config.rate.base_currency;
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("SKU"),
        ui::header_cell("Type"),
        ui::header_cell("Karat"),
        ui::header_cell("Weight (g)"),
        ui::header_cell("Stone"),
        ui::header_cell(&format!("Indicative price ({currency})")),
    ]);

    for item in catalogue.items() {
        // Indicative price: configured charges, no stones priced in, no advance.
        let params = config
            .charges
            .parameters(item.weight_g, item.karat, per_gram, 0.0, 0.0);
        let breakdown = compute_price(&params);

        table.add_row(vec![
            Cell::new(&item.sku),
            Cell::new(&item.kind),
            Cell::new(format!("{}k", item.karat)),
            Cell::new(format!("{:.2}", item.weight_g)),
            Cell::new(item.stone.as_deref().unwrap_or("-")),
            ui::amount_cell(&format_money(breakdown.final_payable(), currency), false),
        ]);
    }

    println!(
        "{}\n\n{table}",
        ui::style_text("Catalogue", ui::StyleType::Title)
    );

    if provisional {
        println!(
            "{}",
            ui::style_text(
                &format!(
                    "Live rate unavailable. Prices are indicative at the fallback rate of {}/g.",
                    format_money(per_gram, currency)
                ),
                ui::StyleType::Warning
            )
        );
    }

    Ok(())
}
