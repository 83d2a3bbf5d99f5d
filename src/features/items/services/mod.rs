mod item_store;
mod matching_service;
mod retention_service;
mod search_service;

pub use item_store::ItemStore;
pub use matching_service::{MatchingService, Resolution};
pub use retention_service::{CleanupSummary, RetentionService};
pub use search_service::SearchService;
