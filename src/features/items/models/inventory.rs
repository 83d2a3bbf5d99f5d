use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::features::items::models::{
    Category, CreateFoundItem, CreateLostItem, FoundItem, Item, ItemBase, ItemKind, ItemStatus,
    LostItem,
};

/// Both report collections, in insertion order.
///
/// This is also the persisted document shape: `{ "lostItems": [...], "foundItems": [...] }`.
/// Every mutating method bumps `revision`, which the store uses to decide
/// whether a save is needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default)]
    lost_items: Vec<LostItem>,
    #[serde(default)]
    found_items: Vec<FoundItem>,
    #[serde(skip)]
    revision: u64,
}

impl Inventory {
    pub fn lost_items(&self) -> &[LostItem] {
        &self.lost_items
    }

    pub fn found_items(&self) -> &[FoundItem] {
        &self.found_items
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.lost_items.len() + self.found_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.lost_items.iter().any(|i| i.base.id == id)
            || self.found_items.iter().any(|i| i.base.id == id)
    }

    /// Lost then found, each in insertion order
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.lost_items
            .iter()
            .cloned()
            .map(Item::Lost)
            .chain(self.found_items.iter().cloned().map(Item::Found))
    }

    pub fn get(&self, id: &str) -> Option<Item> {
        self.lost_items
            .iter()
            .find(|i| i.base.id == id)
            .cloned()
            .map(Item::Lost)
            .or_else(|| {
                self.found_items
                    .iter()
                    .find(|i| i.base.id == id)
                    .cloned()
                    .map(Item::Found)
            })
    }

    pub fn find_lost(&self, id: &str) -> Option<&LostItem> {
        self.lost_items.iter().find(|i| i.base.id == id)
    }

    /// Moves an active lost report to `resolved`, linking it to `found_id`.
    ///
    /// Returns `None` (and changes nothing) if the report is missing or not active.
    pub(in crate::features::items) fn mark_resolved(
        &mut self,
        id: &str,
        found_id: &str,
        now: DateTime<Utc>,
    ) -> Option<LostItem> {
        let item = self
            .lost_items
            .iter_mut()
            .find(|i| i.base.id == id && i.is_active())?;
        item.base.status = ItemStatus::Resolved;
        item.date_found = Some(now);
        item.found_item_id = Some(found_id.to_string());
        let updated = item.clone();
        self.touch();
        Some(updated)
    }

    /// Fresh id, unique across both collections
    pub fn next_id(&self) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if !self.contains_id(&id) {
                return id;
            }
        }
    }

    fn new_base(
        &self,
        item_name: String,
        category: Category,
        description: String,
        contact: String,
        now: DateTime<Utc>,
    ) -> ItemBase {
        ItemBase {
            id: self.next_id(),
            item_name,
            category,
            description,
            contact,
            date_posted: now,
            status: ItemStatus::Active,
        }
    }

    pub fn insert_lost(&mut self, input: CreateLostItem, now: DateTime<Utc>) -> LostItem {
        let item = LostItem {
            base: self.new_base(
                input.item_name,
                input.category,
                input.description,
                input.contact,
                now,
            ),
            location: input.location,
            date_lost: input.date_lost,
            time_lost: input.time_lost,
            reward: input.reward,
            found_item_id: None,
            date_found: None,
        };

        self.lost_items.push(item.clone());
        self.touch();
        item
    }

    pub fn insert_found(&mut self, input: CreateFoundItem, now: DateTime<Utc>) -> FoundItem {
        let item = FoundItem {
            base: self.new_base(
                input.item_name,
                input.category,
                input.description,
                input.contact,
                now,
            ),
            location: input.location,
            date_found: input.date_found.unwrap_or(now),
            time_found: input.time_found,
            current_location: input.current_location,
            image: input.image,
            provenance: None,
        };

        self.found_items.push(item.clone());
        self.touch();
        item
    }

    /// Appends an already-built found report (used by matching)
    pub(in crate::features::items) fn push_found(&mut self, item: FoundItem) {
        self.found_items.push(item);
        self.touch();
    }

    pub fn remove(&mut self, kind: ItemKind, id: &str) -> bool {
        let removed = match kind {
            ItemKind::Lost => {
                let before = self.lost_items.len();
                self.lost_items.retain(|i| i.base.id != id);
                before != self.lost_items.len()
            }
            ItemKind::Found => {
                let before = self.found_items.len();
                self.found_items.retain(|i| i.base.id != id);
                before != self.found_items.len()
            }
        };

        if removed {
            self.touch();
        }
        removed
    }

    /// Drops found reports for which `evict` returns true, returning how many went
    pub(in crate::features::items) fn remove_found_where<F>(&mut self, mut evict: F) -> usize
    where
        F: FnMut(&FoundItem) -> bool,
    {
        let before = self.found_items.len();
        self.found_items.retain(|i| !evict(i));
        let removed = before - self.found_items.len();

        if removed > 0 {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
