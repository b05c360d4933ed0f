//! Ornament pricing engine: pure computation from parameters to an itemized
//! breakdown. No I/O and no hidden state, so results are reproducible.

use crate::core::money::format_money;
use anyhow::{Result, ensure};

const TAX_LABEL: &str = "GST";

/// Purity fraction for a karat value, clamped to [0, 1]. Out-of-range karats
/// are treated as pure gold (>= 24) or worthless (<= 0) rather than rejected.
pub fn karat_to_purity(karat: i32) -> f64 {
    (karat as f64 / 24.0).clamp(0.0, 1.0)
}

/// Full parameter bundle for a quotation. Percentages are in [0, 100];
/// monetary fields are in the target currency. The engine does not validate
/// ranges, out-of-domain values propagate arithmetically. Callers wanting a
/// strict boundary use [`PricingParameters::validate`].
#[derive(Debug, Clone)]
pub struct PricingParameters {
    pub weight_g: f64,
    pub karat: i32,
    pub base_rate_per_g: f64,
    pub making_pct: f64,
    pub making_min: f64,
    pub stone_cost: f64,
    pub hallmarking: f64,
    pub shipping: f64,
    pub insurance_pct: f64,
    pub certification_fee: f64,
    pub conversion_fee: f64,
    pub discount_pct: f64,
    pub advance_paid: f64,
    pub gst_pct: f64,
    pub final_lock_band: f64,
}

impl PricingParameters {
    /// Optional strict validation for use at input boundaries. The engine
    /// itself accepts anything.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.weight_g.is_finite() && self.weight_g > 0.0,
            "weight must be positive, got {}",
            self.weight_g
        );
        ensure!(
            self.karat > 0 && self.karat <= 24,
            "karat must be in 1..=24, got {}",
            self.karat
        );
        ensure!(
            self.base_rate_per_g > 0.0,
            "base rate per gram must be positive, got {}",
            self.base_rate_per_g
        );
        for (name, pct) in [
            ("making", self.making_pct),
            ("insurance", self.insurance_pct),
            ("discount", self.discount_pct),
            ("gst", self.gst_pct),
        ] {
            ensure!(
                (0.0..=100.0).contains(&pct),
                "{name} percentage must be in 0..=100, got {pct}"
            );
        }
        for (name, amount) in [
            ("making minimum", self.making_min),
            ("stone cost", self.stone_cost),
            ("hallmarking", self.hallmarking),
            ("shipping", self.shipping),
            ("certification", self.certification_fee),
            ("conversion", self.conversion_fee),
            ("advance paid", self.advance_paid),
            ("final lock band", self.final_lock_band),
        ] {
            ensure!(amount >= 0.0, "{name} must not be negative, got {amount}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem {
    pub label: &'static str,
    pub amount: f64,
}

/// Ordered ledger of named monetary line items. Insertion order is the
/// canonical display order; discount and advance are stored negative.
/// Immutable once built, a new quote means a new breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    items: Vec<LineItem>,
}

impl PriceBreakdown {
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn amount(&self, label: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.amount)
    }

    /// Sum of every line item except the tax entry.
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.label != TAX_LABEL)
            .map(|item| item.amount)
            .sum()
    }

    /// Sum of every line item, tax included.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn final_payable(&self) -> f64 {
        self.amount("Final payable").unwrap_or(0.0)
    }

    /// Display projection: one `(label, formatted amount)` row per line item,
    /// followed by Subtotal and Total rows.
    pub fn rows(&self, currency: &str) -> Vec<(String, String)> {
        let mut rows: Vec<(String, String)> = self
            .items
            .iter()
            .map(|item| (item.label.to_string(), format_money(item.amount, currency)))
            .collect();
        rows.push(("Subtotal".to_string(), format_money(self.subtotal(), currency)));
        rows.push(("Total".to_string(), format_money(self.total(), currency)));
        rows
    }
}

/// Computes the itemized price for an ornament.
///
/// Each step consumes only already-computed quantities: making charges floor
/// at a guaranteed minimum, insurance and tax compound on running totals as
/// on a real invoice, and the final payable is floored at zero so an advance
/// larger than the bill never shows a negative amount due.
pub fn compute_price(params: &PricingParameters) -> PriceBreakdown {
    let purity = karat_to_purity(params.karat);
    let gold_value = params.weight_g * params.base_rate_per_g * purity;
    let making = f64::max(params.making_min, gold_value * params.making_pct / 100.0);
    let gross_before_insurance = gold_value
        + making
        + params.stone_cost
        + params.hallmarking
        + params.shipping
        + params.certification_fee
        + params.conversion_fee;
    let insurance = gross_before_insurance * params.insurance_pct / 100.0;
    let gross = gross_before_insurance + insurance;
    let discount = gross * params.discount_pct / 100.0;
    let net = gross - discount;
    let gst = net * params.gst_pct / 100.0;
    let total_before_advance = net + gst + params.final_lock_band;
    let final_payable = f64::max(0.0, total_before_advance - params.advance_paid);

    let items = vec![
        LineItem { label: "Gold value", amount: gold_value },
        LineItem { label: "Making charges", amount: making },
        LineItem { label: "Stone cost", amount: params.stone_cost },
        LineItem { label: "Hallmarking", amount: params.hallmarking },
        LineItem { label: "Shipping", amount: params.shipping },
        LineItem { label: "Certification", amount: params.certification_fee },
        LineItem { label: "Conversion", amount: params.conversion_fee },
        LineItem { label: "Insurance", amount: insurance },
        LineItem { label: "Discount", amount: -discount },
        LineItem { label: TAX_LABEL, amount: gst },
        LineItem { label: "Advance paid", amount: -params.advance_paid },
        LineItem { label: "Final lock band", amount: params.final_lock_band },
        LineItem { label: "Final payable", amount: final_payable },
    ];

    PriceBreakdown { items }
}
