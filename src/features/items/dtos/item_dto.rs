use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::items::models::{
    Category, CreateFoundItem, CreateLostItem, FoundItem, Item, ItemKind, ItemStatus, LostItem,
};
use crate::shared::datetime::option_flexible_datetime;
use crate::shared::validation::{normalize_optional, validate_not_blank, TIME_REGEX};

fn validate_category(value: &str) -> std::result::Result<(), ValidationError> {
    value.parse::<Category>().map(|_| ()).map_err(|_| {
        ValidationError::new("category").with_message(Cow::Borrowed(
            "must be one of: electronics, books, documents, clothing, accessories, other",
        ))
    })
}

fn parse_category(value: &str) -> Result<Category> {
    value.trim().parse::<Category>().map_err(AppError::Validation)
}

// ============================================================================
// Create requests
// ============================================================================

/// Request DTO for reporting a lost item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLostItemDto {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 200, message = "Item name must not exceed 200 characters")
    )]
    pub item_name: String,

    /// One of: electronics, books, documents, clothing, accessories, other
    #[validate(custom(function = "validate_category"))]
    pub category: String,

    /// Where the item was last seen
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 500, message = "Location must not exceed 500 characters")
    )]
    pub location: String,

    pub date_lost: NaiveDate,

    /// Optional time in HH:MM (24h)
    #[validate(regex(path = *TIME_REGEX, message = "Time must be in HH:MM format"))]
    pub time_lost: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: String,

    /// How the owner can be reached
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 500, message = "Contact must not exceed 500 characters")
    )]
    pub contact: String,

    #[validate(length(max = 200, message = "Reward must not exceed 200 characters"))]
    pub reward: Option<String>,
}

impl CreateLostItemDto {
    /// Validate and convert into the store's creation input
    pub fn into_model(self) -> Result<CreateLostItem> {
        self.validate()?;

        Ok(CreateLostItem {
            item_name: self.item_name.trim().to_string(),
            category: parse_category(&self.category)?,
            description: self.description.trim().to_string(),
            contact: self.contact.trim().to_string(),
            location: self.location.trim().to_string(),
            date_lost: self.date_lost,
            time_lost: normalize_optional(self.time_lost),
            reward: normalize_optional(self.reward),
        })
    }
}

/// Request DTO for posting a found item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoundItemDto {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 200, message = "Item name must not exceed 200 characters")
    )]
    pub item_name: String,

    /// One of: electronics, books, documents, clothing, accessories, other
    #[validate(custom(function = "validate_category"))]
    pub category: String,

    /// Where the item was found
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 500, message = "Location must not exceed 500 characters")
    )]
    pub location: String,

    /// Date (YYYY-MM-DD) or ISO-8601 timestamp; defaults to now
    #[serde(default, deserialize_with = "option_flexible_datetime::deserialize")]
    pub date_found: Option<DateTime<Utc>>,

    /// Optional time in HH:MM (24h)
    #[validate(regex(path = *TIME_REGEX, message = "Time must be in HH:MM format"))]
    pub time_found: Option<String>,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: String,

    /// How the finder can be reached
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 500, message = "Contact must not exceed 500 characters")
    )]
    pub contact: String,

    /// Where the item is held for pickup
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 500, message = "Current location must not exceed 500 characters")
    )]
    pub current_location: String,

    /// Opaque image reference (URL or key)
    #[validate(length(max = 2048, message = "Image reference must not exceed 2048 characters"))]
    pub image: Option<String>,
}

impl CreateFoundItemDto {
    /// Validate and convert into the store's creation input
    pub fn into_model(self) -> Result<CreateFoundItem> {
        self.validate()?;

        Ok(CreateFoundItem {
            item_name: self.item_name.trim().to_string(),
            category: parse_category(&self.category)?,
            description: self.description.trim().to_string(),
            contact: self.contact.trim().to_string(),
            location: self.location.trim().to_string(),
            date_found: self.date_found,
            time_found: normalize_optional(self.time_found),
            current_location: self.current_location.trim().to_string(),
            image: normalize_optional(self.image),
        })
    }
}

/// Request DTO for marking a lost item as found
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveLostItemDto {
    /// How the finder can be reached
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 500, message = "Finder contact must not exceed 500 characters")
    )]
    pub finder_contact: String,

    /// Where the item is held for pickup
    #[serde(default)]
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 500, message = "Current location must not exceed 500 characters")
    )]
    pub current_location: String,
}

// ============================================================================
// Query params
// ============================================================================

/// Query params for searching items
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct SearchItemsQuery {
    /// Case-insensitive text matched against name, description and location
    pub q: Option<String>,
    /// Exact category filter
    pub category: Option<String>,
    /// `lost` or `found`
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

/// Typed search filter. `None` means no filter on that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub term: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<ItemKind>,
}

impl ItemFilter {
    pub fn from_query(query: SearchItemsQuery) -> Result<Self> {
        // Blank means no filter; otherwise the term is matched as given
        let term = query.q.filter(|q| !q.trim().is_empty());
        let category = normalize_optional(query.category)
            .map(|c| parse_category(&c))
            .transpose()?;
        let kind = normalize_optional(query.item_type)
            .map(|t| t.parse::<ItemKind>().map_err(AppError::Validation))
            .transpose()?;

        Ok(Self {
            term,
            category,
            kind,
        })
    }
}

/// Query params for triggering a cleanup
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CleanupQuery {
    /// Override the configured max age of found items, in seconds
    pub max_age_secs: Option<u64>,
}

// ============================================================================
// Responses
// ============================================================================

/// Response DTO for a lost or found item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponseDto {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemKind,
    pub item_name: String,
    pub category: Category,
    pub description: String,
    pub location: String,
    pub contact: String,
    pub status: ItemStatus,
    pub date_posted: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_lost: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_lost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_found: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    /// Always present (possibly `null`) on found items, absent on lost items
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    /// Lost items: id of the found report created on resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_item_id: Option<String>,
    /// Found items produced by a resolution: the originating lost report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_lost_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_owner_contact: Option<String>,
}

impl From<LostItem> for ItemResponseDto {
    fn from(item: LostItem) -> Self {
        Self {
            id: item.base.id,
            item_type: ItemKind::Lost,
            item_name: item.base.item_name,
            category: item.base.category,
            description: item.base.description,
            location: item.location,
            contact: item.base.contact,
            status: item.base.status,
            date_posted: item.base.date_posted,
            date_lost: Some(item.date_lost),
            time_lost: item.time_lost,
            date_found: item.date_found,
            time_found: None,
            current_location: None,
            image: None,
            reward: item.reward,
            found_item_id: item.found_item_id,
            original_lost_item_id: None,
            original_owner_contact: None,
        }
    }
}

impl From<FoundItem> for ItemResponseDto {
    fn from(item: FoundItem) -> Self {
        let (original_lost_item_id, original_owner_contact, reward) = match item.provenance {
            Some(p) => (
                Some(p.original_lost_item_id),
                Some(p.original_owner_contact),
                p.reward,
            ),
            None => (None, None, None),
        };

        Self {
            id: item.base.id,
            item_type: ItemKind::Found,
            item_name: item.base.item_name,
            category: item.base.category,
            description: item.base.description,
            location: item.location,
            contact: item.base.contact,
            status: item.base.status,
            date_posted: item.base.date_posted,
            date_lost: None,
            time_lost: None,
            date_found: Some(item.date_found),
            time_found: item.time_found,
            current_location: Some(item.current_location),
            image: Some(item.image),
            reward,
            found_item_id: None,
            original_lost_item_id,
            original_owner_contact,
        }
    }
}

impl From<Item> for ItemResponseDto {
    fn from(item: Item) -> Self {
        match item {
            Item::Lost(lost) => lost.into(),
            Item::Found(found) => found.into(),
        }
    }
}

/// Response DTO for both collections
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllItemsResponseDto {
    pub lost_items: Vec<ItemResponseDto>,
    pub found_items: Vec<ItemResponseDto>,
}

/// Response DTO for a successful resolution
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveLostItemResponseDto {
    pub found_item: ItemResponseDto,
    pub updated_lost_item: ItemResponseDto,
}

/// Response DTO for a delete request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemResponseDto {
    pub id: String,
    /// False when nothing matched; deleting a missing item is not an error
    pub deleted: bool,
}

/// Response DTO for a retention run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponseDto {
    pub removed_count: usize,
    pub remaining_count: usize,
}

/// Response DTO for the health check
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{found_item_dto, lost_item_dto};

    #[test]
    fn test_lost_dto_into_model_trims_and_parses() {
        let mut dto = lost_item_dto("  iPhone 13 Pro ");
        dto.reward = Some("   ".to_string());
        dto.time_lost = Some(String::new());

        let model = dto.into_model().unwrap();
        assert_eq!(model.item_name, "iPhone 13 Pro");
        assert_eq!(model.category, Category::Electronics);
        assert_eq!(model.reward, None);
        assert_eq!(model.time_lost, None);
    }

    #[test]
    fn test_blank_item_name_is_validation_error() {
        let result = lost_item_dto("   ").into_model();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_unknown_category_is_validation_error() {
        let mut dto = found_item_dto("Scarf");
        dto.category = "furniture".to_string();

        let result = dto.into_model();
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("category")));
    }

    #[test]
    fn test_found_dto_requires_current_location() {
        let mut dto = found_item_dto("Scarf");
        dto.current_location = String::new();
        assert!(matches!(dto.into_model(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_time_is_validation_error() {
        let mut dto = lost_item_dto("Keys");
        dto.time_lost = Some("25:00".to_string());
        assert!(matches!(dto.into_model(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_found_dto_accepts_date_only() {
        let json = r#"{
            "itemName": "Umbrella",
            "category": "accessories",
            "location": "Bus stop",
            "dateFound": "2024-02-01",
            "contact": "finder@campus.edu",
            "currentLocation": "Security"
        }"#;

        let dto: CreateFoundItemDto = serde_json::from_str(json).unwrap();
        assert_eq!(
            dto.date_found.unwrap().to_rfc3339(),
            "2024-02-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_filter_from_query_treats_empty_as_absent() {
        let filter = ItemFilter::from_query(SearchItemsQuery {
            q: Some("  ".to_string()),
            category: Some(String::new()),
            item_type: None,
        })
        .unwrap();
        assert_eq!(filter, ItemFilter::default());
    }

    #[test]
    fn test_filter_from_query_keeps_surrounding_whitespace_in_term() {
        let filter = ItemFilter::from_query(SearchItemsQuery {
            q: Some(" pro".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.term.as_deref(), Some(" pro"));
    }

    #[test]
    fn test_filter_from_query_rejects_unknown_type() {
        let result = ItemFilter::from_query(SearchItemsQuery {
            item_type: Some("stolen".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_found_response_flattens_provenance() {
        use crate::features::items::models::{ItemBase, Provenance};

        let found = FoundItem {
            base: ItemBase {
                id: "f1".to_string(),
                item_name: "iPhone".to_string(),
                category: Category::Electronics,
                description: String::new(),
                contact: "finder@campus.edu".to_string(),
                date_posted: Utc::now(),
                status: ItemStatus::Active,
            },
            location: "Library".to_string(),
            date_found: Utc::now(),
            time_found: None,
            current_location: "Security".to_string(),
            image: None,
            provenance: Some(Provenance {
                original_lost_item_id: "l1".to_string(),
                original_owner_contact: "owner@campus.edu".to_string(),
                reward: Some("$50".to_string()),
            }),
        };

        let value = serde_json::to_value(ItemResponseDto::from(found)).unwrap();
        assert_eq!(value["type"], "found");
        assert_eq!(value["originalLostItemId"], "l1");
        assert_eq!(value["reward"], "$50");
        assert!(value.get("dateLost").is_none());
    }

    #[test]
    fn test_image_key_present_only_on_found_responses() {
        use crate::features::items::models::Inventory;

        let mut inventory = Inventory::default();
        let found = inventory.insert_found(found_item_dto("Scarf").into_model().unwrap(), Utc::now());
        let lost = inventory.insert_lost(lost_item_dto("Keys").into_model().unwrap(), Utc::now());

        let found_json = serde_json::to_value(ItemResponseDto::from(found)).unwrap();
        assert!(found_json.as_object().unwrap().contains_key("image"));
        assert!(found_json["image"].is_null());

        let lost_json = serde_json::to_value(ItemResponseDto::from(lost)).unwrap();
        assert!(!lost_json.as_object().unwrap().contains_key("image"));
    }
}
