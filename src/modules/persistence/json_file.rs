use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::error::{AppError, Result};
use crate::features::items::models::Inventory;
use crate::modules::persistence::ItemRepository;

/// Stores the inventory as a single pretty-printed JSON document.
///
/// Writes go to `<path>.tmp` first and are renamed over the target, so a
/// crash mid-write never leaves a truncated data file behind.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `initial` if the data file does not exist yet.
    ///
    /// Returns `true` when a new file was created.
    pub async fn initialize(&self, initial: &Inventory) -> Result<bool> {
        if fs::try_exists(&self.path).await? {
            return Ok(false);
        }

        self.write_atomic(initial).await?;
        tracing::info!(
            "Data file initialized at {} with {} items",
            self.path.display(),
            initial.len()
        );
        Ok(true)
    }

    async fn write_atomic(&self, inventory: &Inventory) -> Result<()> {
        let content = serde_json::to_string_pretty(inventory)
            .map_err(|e| AppError::Persistence(format!("Failed to serialize items: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = Self::temp_path(&self.path);
        if let Err(e) = fs::write(&temp_path, content.as_bytes()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }

    fn temp_path(final_path: &Path) -> PathBuf {
        let mut temp = final_path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

#[async_trait]
impl ItemRepository for JsonFileRepository {
    async fn load(&self) -> Result<Inventory> {
        if !fs::try_exists(&self.path).await? {
            tracing::debug!("No data file at {}, starting empty", self.path.display());
            return Ok(Inventory::default());
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Inventory::default());
        }

        let inventory: Inventory = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} lost and {} found items from {}",
            inventory.lost_items().len(),
            inventory.found_items().len(),
            self.path.display()
        );
        Ok(inventory)
    }

    async fn save(&self, inventory: &Inventory) -> Result<()> {
        self.write_atomic(inventory).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::items::models::{Category, CreateLostItem};
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    fn inventory_with_one_lost_item() -> Inventory {
        let mut inventory = Inventory::default();
        inventory.insert_lost(
            CreateLostItem {
                item_name: "Blue Backpack".to_string(),
                category: Category::Accessories,
                description: "JanSport with keychain".to_string(),
                contact: "owner@campus.edu".to_string(),
                location: "Student Union".to_string(),
                date_lost: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                time_lost: Some("10:15".to_string()),
                reward: None,
            },
            Utc::now(),
        );
        inventory
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp_dir.path().join("database.json"));

        let inventory = repo.load().await.unwrap();
        assert!(inventory.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/database.json");
        let repo = JsonFileRepository::new(&path);

        let inventory = inventory_with_one_lost_item();
        repo.save(&inventory).await.unwrap();

        assert!(path.exists());
        assert!(!JsonFileRepository::temp_path(&path).exists());

        let reloaded = repo.load().await.unwrap();
        assert_eq!(reloaded.lost_items(), inventory.lost_items());
        assert!(reloaded.found_items().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_only_writes_once() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp_dir.path().join("database.json"));

        assert!(repo.initialize(&inventory_with_one_lost_item()).await.unwrap());
        assert!(!repo.initialize(&Inventory::default()).await.unwrap());

        let reloaded = repo.load().await.unwrap();
        assert_eq!(reloaded.lost_items().len(), 1);
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("database.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileRepository::new(&path);
        let result = repo.load().await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file cannot act as a parent directory
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let repo = JsonFileRepository::new(blocker.join("database.json"));
        let result = repo.save(&Inventory::default()).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }
}
