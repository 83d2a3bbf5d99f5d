use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::items::dtos::ResolveLostItemDto;
use crate::features::items::models::{
    FoundItem, Inventory, ItemBase, ItemKind, ItemStatus, LostItem, Provenance,
};
use crate::features::items::services::ItemStore;

/// Outcome of resolving a lost report
#[derive(Debug, Clone)]
pub struct Resolution {
    pub found_item: FoundItem,
    pub updated_lost_item: LostItem,
}

/// Turns an active lost report into a resolved one plus a linked found report
pub struct MatchingService {
    store: Arc<ItemStore>,
}

impl MatchingService {
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }

    /// Resolve `lost_id`.
    ///
    /// Not idempotent: a second call on the same id fails with
    /// `AlreadyResolved` instead of returning the earlier found report.
    pub async fn resolve_lost(&self, lost_id: &str, dto: ResolveLostItemDto) -> Result<Resolution> {
        dto.validate()?;
        let finder_contact = dto.finder_contact.trim().to_string();
        let current_location = dto.current_location.trim().to_string();

        let resolution = self
            .store
            .mutate(|inventory| {
                resolve_in(
                    inventory,
                    lost_id,
                    finder_contact,
                    current_location,
                    Utc::now(),
                )
            })
            .await?;

        tracing::info!(
            "Lost item resolved: lost_id={}, found_id={}",
            resolution.updated_lost_item.base.id,
            resolution.found_item.base.id
        );
        Ok(resolution)
    }
}

/// Apply a resolution to `inventory`. Both records change or neither does.
pub fn resolve_in(
    inventory: &mut Inventory,
    lost_id: &str,
    finder_contact: String,
    current_location: String,
    now: DateTime<Utc>,
) -> Result<Resolution> {
    let lost = inventory
        .find_lost(lost_id)
        .ok_or_else(|| AppError::NotFound(format!("Lost item '{}' not found", lost_id)))?;

    if !lost.is_active() {
        return Err(AppError::AlreadyResolved(format!(
            "Lost item '{}' has already been resolved",
            lost_id
        )));
    }

    let found_item = FoundItem {
        base: ItemBase {
            id: inventory.next_id(),
            item_name: lost.base.item_name.clone(),
            category: lost.base.category,
            description: lost.base.description.clone(),
            contact: finder_contact,
            date_posted: now,
            status: ItemStatus::Active,
        },
        // Last place the owner saw it, kept as provenance
        location: lost.location.clone(),
        date_found: now,
        time_found: Some(now.format("%H:%M").to_string()),
        current_location,
        image: None,
        provenance: Some(Provenance {
            original_lost_item_id: lost.base.id.clone(),
            original_owner_contact: lost.base.contact.clone(),
            reward: lost.reward.clone(),
        }),
    };
    let found_id = found_item.base.id.clone();

    inventory.push_found(found_item.clone());

    match inventory.mark_resolved(lost_id, &found_id, now) {
        Some(updated_lost_item) => Ok(Resolution {
            found_item,
            updated_lost_item,
        }),
        None => {
            inventory.remove(ItemKind::Found, &found_id);
            Err(AppError::Internal(format!(
                "Lost item '{}' could not be resolved",
                lost_id
            )))
        }
    }
}
