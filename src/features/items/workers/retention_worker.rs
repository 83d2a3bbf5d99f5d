use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::error::Result;
use crate::features::items::services::{CleanupSummary, RetentionService};

/// Background worker that periodically evicts stale found items
pub struct RetentionWorker {
    retention_service: Arc<RetentionService>,
    interval: Duration,
}

impl RetentionWorker {
    pub fn new(retention_service: Arc<RetentionService>, interval: Duration) -> Self {
        Self {
            retention_service,
            interval,
        }
    }

    /// Run a single pass with the configured max age
    pub async fn run_once(&self) -> Result<CleanupSummary> {
        self.retention_service.cleanup(None).await
    }

    /// Run the worker in a background loop. The first pass happens one
    /// interval after start.
    pub async fn run(&self) {
        tracing::info!(
            "Starting retention worker: interval={:?}, max_age={:?}",
            self.interval,
            self.retention_service.default_max_age()
        );

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.run_once().await {
                tracing::error!("Error running retention cleanup: {:?}", e);
            }
        }
    }
}
