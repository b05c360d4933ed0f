//! Spot gold rate abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Grams in one troy ounce, the unit precious-metal spot prices are quoted in.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.103_476_8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Free,
    Paid,
}

impl Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateSource::Free => "free",
                RateSource::Paid => "paid",
            }
        )
    }
}

impl FromStr for RateSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(RateSource::Free),
            "paid" => Ok(RateSource::Paid),
            _ => Err(anyhow::anyhow!("Invalid rate source: {}", s)),
        }
    }
}

/// Input to a rate lookup. Doubles as the cache key, so the full field set
/// participates in equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RateQuery {
    pub source: RateSource,
    pub api_key: String,
    pub base_currency: String,
}

impl std::fmt::Debug for RateQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateQuery")
            .field("source", &self.source)
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    "<empty>"
                } else {
                    "<redacted>"
                },
            )
            .field("base_currency", &self.base_currency)
            .finish()
    }
}

/// Diagnostic fields attached to every rate lookup, successful or not.
#[derive(Debug, Clone, Serialize)]
pub struct RateMeta {
    pub source: RateSource,
    pub timestamp: DateTime<Utc>,
    pub provider: Option<String>,
    pub error: Option<String>,
}

/// Outcome of a rate lookup. `per_gram` is the price of one gram of 24k gold
/// in the query's base currency; `None` means no upstream could supply a
/// value and `meta.error` carries the reason.
#[derive(Debug, Clone)]
pub struct RateResult {
    pub per_gram: Option<f64>,
    pub meta: RateMeta,
}

impl RateResult {
    pub fn success(source: RateSource, provider: &str, per_gram: f64) -> Self {
        Self {
            per_gram: Some(per_gram),
            meta: RateMeta {
                source,
                timestamp: Utc::now(),
                provider: Some(provider.to_string()),
                error: None,
            },
        }
    }

    pub fn failure(source: RateSource, error: &anyhow::Error) -> Self {
        Self {
            per_gram: None,
            meta: RateMeta {
                source,
                timestamp: Utc::now(),
                provider: None,
                error: Some(format!("{error:#}")),
            },
        }
    }
}

/// A source of the current spot gold rate. Implementations never fail: every
/// upstream problem is folded into the returned `RateResult`.
#[async_trait]
pub trait GoldRateProvider: Send + Sync {
    async fn fetch_rate(&self, query: &RateQuery) -> RateResult;
}
