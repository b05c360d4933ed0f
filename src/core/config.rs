use crate::core::catalogue::CatalogueItem;
use crate::core::pricing::PricingParameters;
use crate::core::rate::{RateQuery, RateSource};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateConfig {
    #[serde(default = "RateConfig::default_source")]
    pub source: RateSource,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "RateConfig::default_currency")]
    pub base_currency: String,
    #[serde(default = "RateConfig::default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "RateConfig::default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "RateConfig::default_fallback")]
    pub fallback_per_gram: f64,
}

impl RateConfig {
    fn default_source() -> RateSource {
        RateSource::Free
    }
    fn default_currency() -> String {
        "INR".to_string()
    }
    fn default_cache_ttl() -> u64 {
        600
    }
    fn default_timeout() -> u64 {
        10
    }
    fn default_fallback() -> f64 {
        6000.0
    }

    pub fn query(&self) -> RateQuery {
        RateQuery {
            source: self.source,
            api_key: self.api_key.clone(),
            base_currency: self.base_currency.clone(),
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        RateConfig {
            source: Self::default_source(),
            api_key: String::new(),
            base_currency: Self::default_currency(),
            cache_ttl_secs: Self::default_cache_ttl(),
            timeout_secs: Self::default_timeout(),
            fallback_per_gram: Self::default_fallback(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GoldApiProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MetalsApiProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub gold_api: Option<GoldApiProviderConfig>,
    pub metals_api: Option<MetalsApiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            gold_api: Some(GoldApiProviderConfig {
                base_url: "https://www.goldapi.io".to_string(),
            }),
            metals_api: Some(MetalsApiProviderConfig {
                base_url: "https://www.metals-api.com".to_string(),
            }),
        }
    }
}

/// Business charges applied to every quote. Defaults mirror typical jeweller
/// practice; all of them can be overridden from the config file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChargesConfig {
    #[serde(default = "ChargesConfig::default_making_pct")]
    pub making_pct: f64,
    #[serde(default = "ChargesConfig::default_making_min")]
    pub making_min: f64,
    #[serde(default = "ChargesConfig::default_hallmarking")]
    pub hallmarking: f64,
    #[serde(default = "ChargesConfig::default_shipping")]
    pub shipping: f64,
    #[serde(default = "ChargesConfig::default_certification")]
    pub certification: f64,
    #[serde(default)]
    pub conversion: f64,
    #[serde(default = "ChargesConfig::default_insurance_pct")]
    pub insurance_pct: f64,
    #[serde(default)]
    pub discount_pct: f64,
    #[serde(default = "ChargesConfig::default_gst_pct")]
    pub gst_pct: f64,
    #[serde(default)]
    pub final_lock_band: f64,
}

impl ChargesConfig {
    fn default_making_pct() -> f64 {
        12.0
    }
    fn default_making_min() -> f64 {
        500.0
    }
    fn default_hallmarking() -> f64 {
        45.0
    }
    fn default_shipping() -> f64 {
        150.0
    }
    fn default_certification() -> f64 {
        300.0
    }
    fn default_insurance_pct() -> f64 {
        1.0
    }
    fn default_gst_pct() -> f64 {
        3.0
    }

    /// Combines the configured charges with per-quote inputs into a full
    /// engine parameter bundle.
    pub fn parameters(
        &self,
        weight_g: f64,
        karat: i32,
        base_rate_per_g: f64,
        stone_cost: f64,
        advance_paid: f64,
    ) -> PricingParameters {
        PricingParameters {
            weight_g,
            karat,
            base_rate_per_g,
            making_pct: self.making_pct,
            making_min: self.making_min,
            stone_cost,
            hallmarking: self.hallmarking,
            shipping: self.shipping,
            insurance_pct: self.insurance_pct,
            certification_fee: self.certification,
            conversion_fee: self.conversion,
            discount_pct: self.discount_pct,
            advance_paid,
            gst_pct: self.gst_pct,
            final_lock_band: self.final_lock_band,
        }
    }
}

impl Default for ChargesConfig {
    fn default() -> Self {
        ChargesConfig {
            making_pct: Self::default_making_pct(),
            making_min: Self::default_making_min(),
            hallmarking: Self::default_hallmarking(),
            shipping: Self::default_shipping(),
            certification: Self::default_certification(),
            conversion: 0.0,
            insurance_pct: Self::default_insurance_pct(),
            discount_pct: 0.0,
            gst_pct: Self::default_gst_pct(),
            final_lock_band: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub rate: RateConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub charges: ChargesConfig,
    #[serde(default)]
    pub catalogue: Vec<CatalogueItem>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "goldq", "goldq")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
rate:
  source: paid
  api_key: "k-123"
  base_currency: "USD"
  cache_ttl_secs: 120
charges:
  making_pct: 10.0
  gst_pct: 5.0
catalogue:
  - sku: "BNG100"
    type: "Bangle"
    karat: 20
    weight_g: 12.0
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.rate.source, RateSource::Paid);
        assert_eq!(config.rate.api_key, "k-123");
        assert_eq!(config.rate.base_currency, "USD");
        assert_eq!(config.rate.cache_ttl_secs, 120);
        // Unset fields take their defaults
        assert_eq!(config.rate.timeout_secs, 10);
        assert_eq!(config.rate.fallback_per_gram, 6000.0);
        assert_eq!(config.charges.making_pct, 10.0);
        assert_eq!(config.charges.gst_pct, 5.0);
        assert_eq!(config.charges.making_min, 500.0);
        assert_eq!(config.catalogue.len(), 1);
        assert_eq!(config.catalogue[0].sku, "BNG100");

        assert!(config.providers.gold_api.is_some());
        assert_eq!(
            config.providers.metals_api.unwrap().base_url,
            "https://www.metals-api.com"
        );
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.rate.source, RateSource::Free);
        assert_eq!(config.rate.base_currency, "INR");
        assert_eq!(config.rate.cache_ttl_secs, 600);
        assert!(config.catalogue.is_empty());
    }

    #[test]
    fn test_provider_overrides() {
        let yaml_str = r#"
providers:
  gold_api:
    base_url: "http://example.com/gold"
  metals_api:
    base_url: "http://example.com/metals"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(
            config.providers.gold_api.unwrap().base_url,
            "http://example.com/gold"
        );
        assert_eq!(
            config.providers.metals_api.unwrap().base_url,
            "http://example.com/metals"
        );
    }

    #[test]
    fn test_query_from_rate_config() {
        let rate = RateConfig {
            source: RateSource::Paid,
            api_key: "secret".to_string(),
            base_currency: "AED".to_string(),
            ..RateConfig::default()
        };
        let query = rate.query();
        assert_eq!(query.source, RateSource::Paid);
        assert_eq!(query.api_key, "secret");
        assert_eq!(query.base_currency, "AED");
    }

    #[test]
    fn test_charges_to_parameters() {
        let charges = ChargesConfig::default();
        let params = charges.parameters(10.0, 22, 6000.0, 250.0, 1000.0);
        assert_eq!(params.weight_g, 10.0);
        assert_eq!(params.karat, 22);
        assert_eq!(params.base_rate_per_g, 6000.0);
        assert_eq!(params.stone_cost, 250.0);
        assert_eq!(params.advance_paid, 1000.0);
        assert_eq!(params.making_pct, 12.0);
        assert_eq!(params.gst_pct, 3.0);
    }
}
