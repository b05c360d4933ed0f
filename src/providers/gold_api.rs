use crate::core::rate::{GRAMS_PER_TROY_OUNCE, GoldRateProvider, RateQuery, RateResult};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const PROVIDER_NAME: &str = "goldapi.io";

/// Paid upstream: authenticated per-currency endpoint quoting gold in the
/// target currency per troy ounce.
pub struct GoldApiProvider {
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GoldApiResponse {
    price: Option<f64>,
}

impl GoldApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        GoldApiProvider {
            base_url: base_url.to_string(),
            timeout,
        }
    }

    async fn request_per_gram(&self, query: &RateQuery) -> Result<f64> {
        let url = format!("{}/api/XAU/{}", self.base_url, query.base_currency);
        debug!("Requesting spot rate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("goldq/0.1")
            .timeout(self.timeout)
            .build()?;
        let response = client
            .get(&url)
            .header("x-access-token", &query.api_key)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} from {}", response.status(), url));
        }

        let data = response
            .json::<GoldApiResponse>()
            .await
            .context("Failed to parse spot rate response")?;
        let per_ounce = data
            .price
            .ok_or_else(|| anyhow!("Missing price field in spot rate response"))?;
        if per_ounce <= 0.0 {
            return Err(anyhow!("Non-positive price in spot rate response: {per_ounce}"));
        }

        Ok(per_ounce / GRAMS_PER_TROY_OUNCE)
    }
}

#[async_trait]
impl GoldRateProvider for GoldApiProvider {
    #[instrument(
        name = "GoldApiFetch",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate::RateSource;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query(currency: &str) -> RateQuery {
        RateQuery {
            source: RateSource::Paid,
            api_key: "test-key".to_string(),
            base_currency: currency.to_string(),
        }
    }

    async fn create_mock_server(currency: &str, template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/XAU/{currency}")))
            .and(header("x-access-token", "test-key"))
            .respond_with(template)
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_fetch_rate_converts_per_ounce_to_per_gram() {
        let body = r#"{"price": 200000.0, "currency": "INR", "metal": "XAU"}"#;
        let server =
            create_mock_server("INR", ResponseTemplate::new(200).set_body_string(body)).await;
        let provider = GoldApiProvider::new(&server.uri(), Duration::from_secs(10));

        let result = provider.fetch_rate(&query("INR")).await;

        let per_gram = result.per_gram.expect("rate should be present");
        assert!((per_gram - 200000.0 / GRAMS_PER_TROY_OUNCE).abs() < 1e-9);
        assert_eq!(result.meta.provider.as_deref(), Some(PROVIDER_NAME));
        assert_eq!(result.meta.source, RateSource::Paid);
        assert!(result.meta.error.is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_recorded_not_raised() {
        let server = create_mock_server("INR", ResponseTemplate::new(500)).await;
        let provider = GoldApiProvider::new(&server.uri(), Duration::from_secs(10));

        let result = provider.fetch_rate(&query("INR")).await;

        assert!(result.per_gram.is_none());
        assert!(result.meta.provider.is_none());
        let error = result.meta.error.expect("error should be recorded");
        assert!(error.contains("500"), "unexpected error: {error}");
    }

    #[tokio::test]
    async fn test_missing_price_field_is_a_failure() {
        let body = r#"{"currency": "INR", "metal": "XAU"}"#;
        let server =
            create_mock_server("INR", ResponseTemplate::new(200).set_body_string(body)).await;
        let provider = GoldApiProvider::new(&server.uri(), Duration::from_secs(10));

        let result = provider.fetch_rate(&query("INR")).await;

        assert!(result.per_gram.is_none());
        assert!(result.meta.error.unwrap().contains("Missing price"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_failure() {
        let server =
            create_mock_server("INR", ResponseTemplate::new(200).set_body_string("not json")).await;
        let provider = GoldApiProvider::new(&server.uri(), Duration::from_secs(10));

        let result = provider.fetch_rate(&query("INR")).await;

        assert!(result.per_gram.is_none());
        assert!(result.meta.error.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_failure() {
        // Port 1 refuses connections
        let provider = GoldApiProvider::new("http://127.0.0.1:1", Duration::from_secs(1));

        let result = provider.fetch_rate(&query("INR")).await;

        assert!(result.per_gram.is_none());
        assert!(!result.meta.error.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_currency_substituted_into_path() {
        let body = r#"{"price": 2400.0}"#;
        let server =
            create_mock_server("USD", ResponseTemplate::new(200).set_body_string(body)).await;
        let provider = GoldApiProvider::new(&server.uri(), Duration::from_secs(10));

        let result = provider.fetch_rate(&query("USD")).await;
        assert!(result.per_gram.is_some());
    }
}
