use std::sync::Arc;

use crate::core::error::Result;
use crate::features::items::dtos::{ItemFilter, SearchItemsQuery};
use crate::features::items::models::{Inventory, Item};
use crate::features::items::services::ItemStore;

/// Read-only search over both collections
pub struct SearchService {
    store: Arc<ItemStore>,
}

impl SearchService {
    pub fn new(store: Arc<ItemStore>) -> Self {
        Self { store }
    }

    pub async fn search(&self, query: SearchItemsQuery) -> Result<Vec<Item>> {
        let filter = ItemFilter::from_query(query)?;
        let items = self.store.read(|inventory| search_in(inventory, &filter)).await;

        tracing::debug!("Search {:?} matched {} items", filter, items.len());
        Ok(items)
    }
}

/// Filters compose with AND; the term matches if any text field contains it.
/// Results are newest first by `date_posted`, ties kept in lost-then-found
/// insertion order.
pub fn search_in(inventory: &Inventory, filter: &ItemFilter) -> Vec<Item> {
    let needle = filter.term.as_ref().map(|t| t.to_lowercase());

    let mut items: Vec<Item> = inventory
        .items()
        .filter(|item| filter.kind.map_or(true, |kind| item.kind() == kind))
        .filter(|item| {
            filter
                .category
                .map_or(true, |category| item.base().category == category)
        })
        .filter(|item| {
            needle
                .as_deref()
                .map_or(true, |needle| item.matches_term(needle))
        })
        .collect();

    // sort_by is stable
    items.sort_by(|a, b| b.date_posted().cmp(&a.date_posted()));
    items
}
