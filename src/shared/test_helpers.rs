use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{CreateFoundItemDto, CreateLostItemDto};
use crate::features::items::models::Inventory;
use crate::features::items::handlers::ItemState;
use crate::features::items::services::{ItemStore, MatchingService, RetentionService, SearchService};
use crate::modules::persistence::ItemRepository;

/// Repository that keeps the last saved snapshot in memory
#[derive(Default)]
pub struct InMemoryRepository {
    saved: Mutex<Option<Inventory>>,
    save_count: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryRepository {
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self {
            saved: Mutex::new(Some(inventory)),
            ..Default::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub fn last_saved(&self) -> Option<Inventory> {
        self.saved.lock().unwrap().clone()
    }

    /// Make every subsequent save fail with a persistence error
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn load(&self) -> Result<Inventory> {
        Ok(self.saved.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, inventory: &Inventory) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::Persistence("disk full".to_string()));
        }
        *self.saved.lock().unwrap() = Some(inventory.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub async fn create_test_store() -> (Arc<ItemStore>, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::default());
    let store = ItemStore::open(repository.clone()).await.unwrap();
    (Arc::new(store), repository)
}

/// Handler state over an empty in-memory store, with a one day retention window
pub async fn create_test_state() -> (ItemState, Arc<InMemoryRepository>) {
    let (store, repository) = create_test_store().await;
    let state = ItemState {
        matching_service: Arc::new(MatchingService::new(store.clone())),
        search_service: Arc::new(SearchService::new(store.clone())),
        retention_service: Arc::new(RetentionService::new(
            store.clone(),
            std::time::Duration::from_secs(24 * 60 * 60),
        )),
        item_store: store,
    };
    (state, repository)
}

pub fn lost_item_dto(item_name: &str) -> CreateLostItemDto {
    CreateLostItemDto {
        item_name: item_name.to_string(),
        category: "electronics".to_string(),
        location: "Library - Study Room 3".to_string(),
        date_lost: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        time_lost: Some("14:30".to_string()),
        description: "Black with a clear case".to_string(),
        contact: "john.doe@campus.edu".to_string(),
        reward: Some("$50".to_string()),
    }
}

pub fn found_item_dto(item_name: &str) -> CreateFoundItemDto {
    CreateFoundItemDto {
        item_name: item_name.to_string(),
        category: "other".to_string(),
        location: "Gym - Weight Room".to_string(),
        date_found: None,
        time_found: None,
        description: "Found near the bench press".to_string(),
        contact: "gym.staff@campus.edu".to_string(),
        current_location: "Gym Front Desk".to_string(),
        image: None,
    }
}
