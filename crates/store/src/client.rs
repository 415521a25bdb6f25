//! REST client for the hosted backend's analytics tables.

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use analytics_core::{AnalyticsEventRecord, Error, IntegrationSetting, Result, StoreErrorCode};

use crate::config::StoreConfig;
use crate::sink::EventSink;

/// Cache key for the full settings table.
pub(crate) const SETTINGS_CACHE_KEY: &str = "all";

/// Client for the `analytics_events` and `analytics_settings` tables.
///
/// With a mock URL the client only logs records, which keeps local
/// development and previews free of backend writes.
#[derive(Clone)]
pub struct RestEventStore {
    pub(crate) config: StoreConfig,
    pub(crate) http_client: reqwest::Client,
    pub(crate) settings_cache: Cache<&'static str, Arc<Vec<IntegrationSetting>>>,
    healthy: Arc<AtomicBool>,
}

impl RestEventStore {
    /// Creates a new store client.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(auth_headers(&config.api_key)?)
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {}", e)))?;

        let settings_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(config.settings_cache_ttl_secs))
            .build();

        info!(
            url = %config.url,
            events_table = %config.events_table,
            mock = config.is_mock(),
            "Created event store client"
        );

        Ok(Self {
            config,
            http_client,
            settings_cache,
            healthy: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Probe the events table without reading rows.
    pub async fn check_connection(&self) -> bool {
        if self.config.is_mock() {
            return true;
        }

        let url = self.config.table_url(&self.config.events_table);
        let result = self
            .http_client
            .get(&url)
            .query(&[("select", "event_name"), ("limit", "0")])
            .send()
            .await;

        let healthy = matches!(&result, Ok(resp) if resp.status().is_success());
        if !healthy {
            warn!(url = %url, "Event store connection check failed");
        }
        self.healthy.store(healthy, Ordering::Relaxed);
        healthy
    }

    async fn post_record(&self, record: &AnalyticsEventRecord) -> Result<()> {
        let url = self.config.table_url(&self.config.events_table);

        let response = self
            .http_client
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await
            .map_err(|e| {
                Error::store(
                    StoreErrorCode::Unavailable,
                    format!("event store unreachable: {}", e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::store_status(
                StoreErrorCode::InsertFailed,
                status.as_u16(),
                format!("insert into {} returned {}: {}", self.config.events_table, status, body),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl EventSink for RestEventStore {
    async fn insert(&self, record: &AnalyticsEventRecord) -> Result<()> {
        if self.config.is_mock() {
            debug!(
                event = %record.event_name,
                session_id = %record.session_id,
                "Mock store: record not sent"
            );
            return Ok(());
        }

        let result = self.post_record(record).await;
        self.healthy.store(
            !matches!(&result, Err(e) if e.is_transient()),
            Ordering::Relaxed,
        );
        result
    }

    fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if api_key.is_empty() {
        return Ok(headers);
    }

    let key = HeaderValue::from_str(api_key)
        .map_err(|_| Error::config("store api_key contains invalid header characters"))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| Error::config("store api_key contains invalid header characters"))?;

    headers.insert("apikey", key);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}
