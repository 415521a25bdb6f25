//! Integration settings rows: cached reads and role-gated updates.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use analytics_core::{
    require_integration_manage, Error, IntegrationSetting, Result, StoreErrorCode,
};

use crate::client::{RestEventStore, SETTINGS_CACHE_KEY};

#[derive(Serialize)]
struct SettingUpdate<'a> {
    value: Option<&'a str>,
    enabled: bool,
}

impl RestEventStore {
    /// All integration settings rows, reused for the configured TTL.
    pub async fn integration_settings(&self) -> Result<Arc<Vec<IntegrationSetting>>> {
        if let Some(cached) = self.settings_cache.get(&SETTINGS_CACHE_KEY).await {
            debug!("Integration settings cache hit");
            return Ok(cached);
        }

        let rows = Arc::new(self.fetch_settings().await?);
        self.settings_cache
            .insert(SETTINGS_CACHE_KEY, rows.clone())
            .await;
        Ok(rows)
    }

    async fn fetch_settings(&self) -> Result<Vec<IntegrationSetting>> {
        if self.config.is_mock() {
            return Ok(Vec::new());
        }

        let url = self.config.table_url(&self.config.settings_table);
        let response = self
            .http_client
            .get(&url)
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(|e| {
                Error::store(
                    StoreErrorCode::Unavailable,
                    format!("settings store unreachable: {}", e),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::store_status(
                StoreErrorCode::QueryFailed,
                status.as_u16(),
                format!("select from {} returned {}: {}", self.config.settings_table, status, body),
            ));
        }

        response.json().await.map_err(|e| {
            Error::store(
                StoreErrorCode::QueryFailed,
                format!("invalid settings rows: {}", e),
            )
        })
    }

    /// Update one row's id and switch. Only admin roles may do this.
    pub async fn update_integration_setting(
        &self,
        role: &str,
        key: &str,
        value: Option<&str>,
        enabled: bool,
    ) -> Result<()> {
        require_integration_manage(role)?;

        if !self.config.is_mock() {
            let url = self.config.table_url(&self.config.settings_table);
            let response = self
                .http_client
                .patch(&url)
                .query(&[("key", format!("eq.{}", key))])
                .header("Prefer", "return=minimal")
                .json(&SettingUpdate { value, enabled })
                .send()
                .await
                .map_err(|e| {
                    Error::store(
                        StoreErrorCode::Unavailable,
                        format!("settings store unreachable: {}", e),
                    )
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::store_status(
                    StoreErrorCode::UpdateFailed,
                    status.as_u16(),
                    format!("update of {} returned {}: {}", key, status, body),
                ));
            }
        }

        self.settings_cache.invalidate(&SETTINGS_CACHE_KEY).await;
        info!(key = %key, enabled = enabled, role = %role, "Integration setting updated");
        Ok(())
    }

    /// Apply several updates in order, stopping at the first failure.
    pub async fn save_integration_settings(
        &self,
        role: &str,
        settings: &[IntegrationSetting],
    ) -> Result<()> {
        require_integration_manage(role)?;
        for setting in settings {
            self.update_integration_setting(role, &setting.key, setting.value.as_deref(), setting.enabled)
                .await?;
        }
        Ok(())
    }
}
