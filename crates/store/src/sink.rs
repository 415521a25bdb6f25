//! Persistence sink abstraction.

use async_trait::async_trait;
use std::sync::Arc;

use analytics_core::{AnalyticsEventRecord, Result};

/// Append-only destination for event records.
///
/// The REST store implements this in production; tests substitute an
/// in-memory sink.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Insert exactly one record.
    async fn insert(&self, record: &AnalyticsEventRecord) -> Result<()>;

    /// Check if the sink is healthy.
    fn is_healthy(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    async fn insert(&self, record: &AnalyticsEventRecord) -> Result<()> {
        (**self).insert(record).await
    }

    fn is_healthy(&self) -> bool {
        (**self).is_healthy()
    }
}
