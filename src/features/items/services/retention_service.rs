use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::items::models::Inventory;
use crate::features::items::services::ItemStore;

/// Result of a retention run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupSummary {
    pub removed_count: usize,
    pub remaining_count: usize,
}

/// Evicts found reports past a maximum age. Lost reports are never evicted.
pub struct RetentionService {
    store: Arc<ItemStore>,
    default_max_age: Duration,
}

impl RetentionService {
    pub fn new(store: Arc<ItemStore>, default_max_age: Duration) -> Self {
        Self {
            store,
            default_max_age,
        }
    }

    pub fn default_max_age(&self) -> Duration {
        self.default_max_age
    }

    /// Remove found reports older than `max_age` (configured default when `None`)
    pub async fn cleanup(&self, max_age: Option<Duration>) -> Result<CleanupSummary> {
        let max_age = max_age.unwrap_or(self.default_max_age);
        let max_age = chrono::Duration::from_std(max_age)
            .map_err(|_| AppError::Validation("Max age is too large".to_string()))?;

        let now = Utc::now();
        let cutoff = now
            .checked_sub_signed(max_age)
            .ok_or_else(|| AppError::Validation("Max age is too large".to_string()))?;

        let summary = self
            .store
            .mutate(|inventory| Ok(cleanup_in(inventory, cutoff)))
            .await?;

        if summary.removed_count > 0 {
            tracing::info!(
                "Cleanup completed: removed={}, remaining={}",
                summary.removed_count,
                summary.remaining_count
            );
        } else {
            tracing::debug!(
                "Cleanup found nothing to remove (remaining={})",
                summary.remaining_count
            );
        }
        Ok(summary)
    }
}

/// Drop found reports whose `date_found` is strictly before `cutoff`.
///
/// Linked lost reports keep their `resolved` status and `found_item_id`.
pub fn cleanup_in(inventory: &mut Inventory, cutoff: DateTime<Utc>) -> CleanupSummary {
    let removed_count = inventory.remove_found_where(|item| item.date_found < cutoff);

    CleanupSummary {
        removed_count,
        remaining_count: inventory.found_items().len(),
    }
}
