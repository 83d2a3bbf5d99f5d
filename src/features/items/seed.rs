//! Sample records written to a fresh data file so the portal is not empty on
//! first launch.

use crate::core::error::Result;
use crate::features::items::models::Inventory;

const SAMPLE_DATA: &str = r#"{
  "lostItems": [
    {
      "id": "sample-lost-1",
      "itemName": "iPhone 13 Pro",
      "category": "electronics",
      "location": "Library - Study Room 3",
      "dateLost": "2024-01-15",
      "timeLost": "14:30",
      "description": "Black iPhone 13 Pro with clear case. Has a small scratch on the back. Last seen charging on the desk.",
      "contact": "john.doe@campus.edu",
      "reward": "$50",
      "datePosted": "2024-01-15T14:30:00.000Z",
      "status": "active"
    },
    {
      "id": "sample-lost-2",
      "itemName": "Calculus Textbook",
      "category": "books",
      "location": "Mathematics Building - Room 201",
      "dateLost": "2024-01-14",
      "timeLost": "16:00",
      "description": "Calculus: Early Transcendentals 8th Edition by James Stewart. Has my name \"Sarah Johnson\" written inside.",
      "contact": "sarah.johnson@campus.edu",
      "reward": "Coffee",
      "datePosted": "2024-01-14T16:00:00.000Z",
      "status": "active"
    }
  ],
  "foundItems": [
    {
      "id": "sample-found-1",
      "itemName": "Silver Laptop",
      "category": "electronics",
      "location": "Cafeteria - Table near window",
      "dateFound": "2024-01-15",
      "timeFound": "12:00",
      "description": "Silver MacBook Air with stickers on the lid. Found on table after lunch rush.",
      "image": null,
      "contact": "security@campus.edu",
      "currentLocation": "Campus Security Office",
      "datePosted": "2024-01-15T12:00:00.000Z",
      "status": "active"
    },
    {
      "id": "sample-found-2",
      "itemName": "Red Water Bottle",
      "category": "other",
      "location": "Gym - Weight Room",
      "dateFound": "2024-01-14",
      "timeFound": "18:30",
      "description": "Red Hydro Flask water bottle with \"Mike\" written on it. Found near the bench press.",
      "image": null,
      "contact": "gym.staff@campus.edu",
      "currentLocation": "Gym Front Desk",
      "datePosted": "2024-01-14T18:30:00.000Z",
      "status": "active"
    }
  ]
}"#;

pub fn sample_inventory() -> Result<Inventory> {
    Ok(serde_json::from_str(SAMPLE_DATA)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::items::models::{Category, ItemStatus};

    #[test]
    fn test_sample_inventory_parses() {
        let inventory = sample_inventory().unwrap();
        assert_eq!(inventory.lost_items().len(), 2);
        assert_eq!(inventory.found_items().len(), 2);

        let phone = inventory.find_lost("sample-lost-1").unwrap();
        assert_eq!(phone.base.category, Category::Electronics);
        assert_eq!(phone.base.status, ItemStatus::Active);
        assert_eq!(phone.reward.as_deref(), Some("$50"));

        assert!(inventory
            .found_items()
            .iter()
            .all(|item| item.provenance.is_none()));
    }
}
