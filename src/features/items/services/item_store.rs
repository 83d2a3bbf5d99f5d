use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{CreateFoundItemDto, CreateLostItemDto};
use crate::features::items::models::{FoundItem, Inventory, Item, ItemKind, LostItem};
use crate::modules::persistence::ItemRepository;

/// Authoritative owner of both report collections.
///
/// Every mutation runs under the write lock and is followed by a save while
/// the lock is still held, so persisted snapshots are totally ordered and a
/// reader never observes half of a multi-record change.
pub struct ItemStore {
    inventory: RwLock<Inventory>,
    repository: Arc<dyn ItemRepository>,
}

impl ItemStore {
    /// Load prior state from `repository` and take ownership of it
    pub async fn open(repository: Arc<dyn ItemRepository>) -> Result<Self> {
        let inventory = repository.load().await?;
        tracing::info!(
            "Item store opened: lost={}, found={}",
            inventory.lost_items().len(),
            inventory.found_items().len()
        );

        Ok(Self {
            inventory: RwLock::new(inventory),
            repository,
        })
    }

    /// Run a read-only closure against a consistent view of the inventory
    pub async fn read<T, F>(&self, op: F) -> T
    where
        F: FnOnce(&Inventory) -> T,
    {
        let inventory = self.inventory.read().await;
        op(&*inventory)
    }

    /// Run a mutation under the store-wide lock, saving if anything changed.
    ///
    /// If `op` fails, nothing is saved. If the save fails, the mutation stays
    /// applied in memory and `AppError::Persistence` is returned.
    pub(super) async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Inventory) -> Result<T>,
    {
        let mut inventory = self.inventory.write().await;
        let revision = inventory.revision();

        let value = op(&mut *inventory)?;

        if inventory.revision() != revision {
            if let Err(e) = self.repository.save(&*inventory).await {
                tracing::error!("Failed to persist items after mutation: {}", e);
                return Err(e);
            }
        }

        Ok(value)
    }

    /// Report a lost item
    pub async fn create_lost(&self, dto: CreateLostItemDto) -> Result<LostItem> {
        let input = dto.into_model()?;
        let item = self
            .mutate(|inventory| Ok(inventory.insert_lost(input, Utc::now())))
            .await?;

        tracing::info!(
            "Lost item created: id={}, category={}",
            item.base.id,
            item.base.category
        );
        Ok(item)
    }

    /// Post an independently found item
    pub async fn create_found(&self, dto: CreateFoundItemDto) -> Result<FoundItem> {
        let input = dto.into_model()?;
        let item = self
            .mutate(|inventory| Ok(inventory.insert_found(input, Utc::now())))
            .await?;

        tracing::info!(
            "Found item created: id={}, category={}",
            item.base.id,
            item.base.category
        );
        Ok(item)
    }

    pub async fn get(&self, id: &str) -> Result<Item> {
        self.read(|inventory| inventory.get(id))
            .await
            .ok_or_else(|| AppError::NotFound(format!("Item '{}' not found", id)))
    }

    /// Remove an item. Returns `false` (not an error) when nothing matched.
    pub async fn delete(&self, kind: ItemKind, id: &str) -> Result<bool> {
        let removed = self
            .mutate(|inventory| Ok(inventory.remove(kind, id)))
            .await?;

        if removed {
            tracing::info!("Item deleted: kind={}, id={}", kind, id);
        } else {
            tracing::debug!("Delete skipped, no {} item with id={}", kind, id);
        }
        Ok(removed)
    }

    pub async fn list(&self, kind: ItemKind) -> Vec<Item> {
        self.read(|inventory| match kind {
            ItemKind::Lost => inventory
                .lost_items()
                .iter()
                .cloned()
                .map(Item::Lost)
                .collect(),
            ItemKind::Found => inventory
                .found_items()
                .iter()
                .cloned()
                .map(Item::Found)
                .collect(),
        })
        .await
    }

    /// Snapshot of both collections taken under a single read lock
    pub async fn get_all(&self) -> (Vec<LostItem>, Vec<FoundItem>) {
        self.read(|inventory| {
            (
                inventory.lost_items().to_vec(),
                inventory.found_items().to_vec(),
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::items::models::ItemStatus;
    use crate::shared::test_helpers::{create_test_store, found_item_dto, lost_item_dto};
    use fake::faker::lorem::en::Words;
    use fake::Fake;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_create_lost_assigns_id_and_persists() {
        let (store, repo) = create_test_store().await;

        let item = store.create_lost(lost_item_dto("iPhone 13 Pro")).await.unwrap();
        assert!(!item.base.id.is_empty());
        assert_eq!(item.base.status, ItemStatus::Active);
        assert_eq!(repo.save_count(), 1);

        let saved = repo.last_saved().unwrap();
        assert_eq!(saved.lost_items(), &[item]);
    }

    #[tokio::test]
    async fn test_ids_unique_across_many_creates() {
        let (store, _repo) = create_test_store().await;
        let mut ids = HashSet::new();

        for i in 0..40 {
            let words: Vec<String> = Words(1..4).fake();
            let name = format!("{} {}", words.join(" "), i);
            if i % 2 == 0 {
                ids.insert(store.create_lost(lost_item_dto(&name)).await.unwrap().base.id);
            } else {
                ids.insert(store.create_found(found_item_dto(&name)).await.unwrap().base.id);
            }
        }

        assert_eq!(ids.len(), 40);
        let (lost, found) = store.get_all().await;
        assert_eq!(lost.len() + found.len(), 40);
    }

    #[tokio::test]
    async fn test_empty_item_name_rejected_without_mutation() {
        let (store, repo) = create_test_store().await;
        store.create_lost(lost_item_dto("Wallet")).await.unwrap();

        let result = store.create_lost(lost_item_dto("")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert_eq!(store.list(ItemKind::Lost).await.len(), 1);
        assert_eq!(repo.save_count(), 1);
    }

    #[tokio::test]
    async fn test_get_and_not_found() {
        let (store, _repo) = create_test_store().await;
        let found = store.create_found(found_item_dto("Red Water Bottle")).await.unwrap();

        let item = store.get(&found.base.id).await.unwrap();
        assert_eq!(item.kind(), ItemKind::Found);

        let missing = store.get("does-not-exist").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let (store, repo) = create_test_store().await;
        let lost = store.create_lost(lost_item_dto("Keys")).await.unwrap();

        assert!(!store.delete(ItemKind::Lost, "nope").await.unwrap());
        // Wrong collection does not match either
        assert!(!store.delete(ItemKind::Found, &lost.base.id).await.unwrap());
        assert_eq!(repo.save_count(), 1);

        assert!(store.delete(ItemKind::Lost, &lost.base.id).await.unwrap());
        assert!(!store.delete(ItemKind::Lost, &lost.base.id).await.unwrap());
        assert_eq!(repo.save_count(), 2);
    }

    #[tokio::test]
    async fn test_list_returns_snapshot() {
        let (store, _repo) = create_test_store().await;
        store.create_lost(lost_item_dto("Laptop")).await.unwrap();

        let mut snapshot = store.list(ItemKind::Lost).await;
        snapshot.clear();

        assert_eq!(store.list(ItemKind::Lost).await.len(), 1);
        assert!(store.list(ItemKind::Found).await.is_empty());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported_but_applied_in_memory() {
        let (store, repo) = create_test_store().await;
        repo.set_fail_saves(true);

        let result = store.create_lost(lost_item_dto("Headphones")).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
        assert_eq!(store.list(ItemKind::Lost).await.len(), 1);
    }

    #[tokio::test]
    async fn test_open_loads_existing_state() {
        use crate::shared::test_helpers::InMemoryRepository;

        let seed = crate::features::items::seed::sample_inventory().unwrap();
        let repo = Arc::new(InMemoryRepository::with_inventory(seed));
        let store = ItemStore::open(repo).await.unwrap();

        let item = store.get("sample-lost-1").await.unwrap();
        assert_eq!(item.base().item_name, "iPhone 13 Pro");
    }
}
