use crate::core::rate::{GRAMS_PER_TROY_OUNCE, GoldRateProvider, RateQuery, RateResult};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const PROVIDER_NAME: &str = "metals-api";

/// Free upstream. The API returns an exchange rate from the base currency to
/// troy ounces of gold, not a price, so the quote is the inverse of the
/// reported `rates.XAU` value.
pub struct MetalsApiProvider {
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct MetalsApiResponse {
    rates: Option<Rates>,
}

#[derive(Debug, Deserialize)]
struct Rates {
    #[serde(rename = "XAU")]
    xau: Option<f64>,
}

impl MetalsApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        MetalsApiProvider {
            base_url: base_url.to_string(),
            timeout,
        }
    }

    async fn request_per_gram(&self, query: &RateQuery) -> Result<f64> {
        let url = format!("{}/api/latest", self.base_url);
        debug!("Requesting spot rate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("goldq/0.1")
            .timeout(self.timeout)
            .build()?;
        let response = client
            .get(&url)
            .query(&[
                ("access_key", query.api_key.as_str()),
                ("base", query.base_currency.as_str()),
                ("symbols", "XAU"),
            ])
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from {}", response.status(), url));
        }

        let text = response.text().await?;
        let data: MetalsApiResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse spot rate response: {}", e))?;

        let xau_rate = data
            .rates
            .and_then(|r| r.xau)
            .ok_or_else(|| anyhow!("Missing rates.XAU field in spot rate response"))?;
        if xau_rate <= 0.0 {
            return Err(anyhow!("Non-positive XAU rate in spot rate response: {xau_rate}"));
        }

        let per_ounce = 1.0 / xau_rate;
        Ok(per_ounce / GRAMS_PER_TROY_OUNCE)
    }
}

#[async_trait]
impl GoldRateProvider for MetalsApiProvider {
    #[instrument(
        name = "MetalsApiFetch",
        skip(self, query),
        fields(currency = %query.base_currency)
    )]
    async fn fetch_rate(&self, query: &RateQuery) -> RateResult {
        match self.request_per_gram(query).await {
            Ok(per_gram) => RateResult::success(query.source, PROVIDER_NAME, per_gram),
            Err(e) => {
                error!(error = ?e, "Spot rate fetch failed");
                RateResult::failure(query.source, &e)
            }
        }
    }
}
