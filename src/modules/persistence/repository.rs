use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::items::models::Inventory;

/// Durable storage for both report collections.
///
/// `load` returns empty collections when no prior state exists. A failed
/// `save` is reported as `AppError::Persistence`; callers do not retry.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn load(&self) -> Result<Inventory>;

    async fn save(&self, inventory: &Inventory) -> Result<()>;
}
