use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::datetime::{flexible_datetime, option_flexible_datetime};

/// Item category, a closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Books,
    Documents,
    Clothing,
    Accessories,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Books,
        Category::Documents,
        Category::Clothing,
        Category::Accessories,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Books => "books",
            Category::Documents => "documents",
            Category::Clothing => "clothing",
            Category::Accessories => "accessories",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid category '{}'. Expected one of: electronics, books, documents, clothing, accessories, other",
                    s
                )
            })
    }
}

/// Lifecycle status. Lost reports only ever move `Active -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    // Older data files store matched lost reports as "found"
    #[serde(alias = "found")]
    Resolved,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Active => write!(f, "active"),
            ItemStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// Which collection a record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Lost => write!(f, "lost"),
            ItemKind::Found => write!(f, "found"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lost" => Ok(ItemKind::Lost),
            "found" => Ok(ItemKind::Found),
            other => Err(format!(
                "Invalid item type '{}'. Expected 'lost' or 'found'",
                other
            )),
        }
    }
}

/// Fields shared by lost and found reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    pub id: String,
    pub item_name: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    pub contact: String,
    pub date_posted: DateTime<Utc>,
    pub status: ItemStatus,
}

/// A report of an item someone has lost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItem {
    #[serde(flatten)]
    pub base: ItemBase,
    pub location: String,
    pub date_lost: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_lost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    /// Id of the found report created when this report was resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_item_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "option_flexible_datetime::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_found: Option<DateTime<Utc>>,
}

impl LostItem {
    pub fn is_active(&self) -> bool {
        self.base.status == ItemStatus::Active
    }
}

/// Link back to the lost report a found report was produced from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub original_lost_item_id: String,
    pub original_owner_contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
}

/// A report of an item someone has found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem {
    #[serde(flatten)]
    pub base: ItemBase,
    /// Where the item was found (or last seen, when produced by a match)
    pub location: String,
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub date_found: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_found: Option<String>,
    /// Where the item is held for pickup
    pub current_location: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Present only when the report was produced by resolving a lost report
    #[serde(flatten)]
    pub provenance: Option<Provenance>,
}

/// Either kind of report, as seen by readers of the combined collection
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Lost(LostItem),
    Found(FoundItem),
}

impl Item {
    pub fn base(&self) -> &ItemBase {
        match self {
            Item::Lost(item) => &item.base,
            Item::Found(item) => &item.base,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Lost(_) => ItemKind::Lost,
            Item::Found(_) => ItemKind::Found,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Item::Lost(item) => &item.location,
            Item::Found(item) => &item.location,
        }
    }

    pub fn date_posted(&self) -> DateTime<Utc> {
        self.base().date_posted
    }

    /// Case-insensitive substring match on name, description or location.
    /// `needle` must already be lowercase.
    pub fn matches_term(&self, needle: &str) -> bool {
        let base = self.base();
        base.item_name.to_lowercase().contains(needle)
            || base.description.to_lowercase().contains(needle)
            || self.location().to_lowercase().contains(needle)
    }
}

impl From<LostItem> for Item {
    fn from(item: LostItem) -> Self {
        Item::Lost(item)
    }
}

impl From<FoundItem> for Item {
    fn from(item: FoundItem) -> Self {
        Item::Found(item)
    }
}

/// Validated data for creating a lost report
#[derive(Debug, Clone)]
pub struct CreateLostItem {
    pub item_name: String,
    pub category: Category,
    pub description: String,
    pub contact: String,
    pub location: String,
    pub date_lost: NaiveDate,
    pub time_lost: Option<String>,
    pub reward: Option<String>,
}

/// Validated data for creating an independently posted found report
#[derive(Debug, Clone)]
pub struct CreateFoundItem {
    pub item_name: String,
    pub category: Category,
    pub description: String,
    pub contact: String,
    pub location: String,
    /// Defaults to the creation time when absent
    pub date_found: Option<DateTime<Utc>>,
    pub time_found: Option<String>,
    pub current_location: String,
    pub image: Option<String>,
}
