use crate::core::cache::Cache;
use crate::core::rate::{GoldRateProvider, RateQuery, RateResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

// Time-bounded caching for GoldRateProvider, keyed by the full query so
// different sources, keys, or currencies never collide.
#[derive(Clone)]
pub struct CachingRateProvider<T: GoldRateProvider> {
    inner: T,
    cache: Cache<RateQuery, RateResult>,
}

impl<T: GoldRateProvider> CachingRateProvider<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::new(ttl),
        }
    }
}

#[async_trait]
impl<T: GoldRateProvider> GoldRateProvider for CachingRateProvider<T> {
    async fn fetch_rate(&self, query: &RateQuery) -> RateResult {
        if let Some(cached) = self.cache.get(query).await {
            debug!("Cache hit for rate query: {:?}", query);
            return cached;
        }
        debug!("Cache miss for rate query: {:?}", query);
        let result = self.inner.fetch_rate(query).await;
        self.cache.put(query.clone(), result.clone()).await;
        result
    }
}
