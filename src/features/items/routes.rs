use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::items::handlers::{self, ItemState};

/// Create routes for the items feature
///
/// All routes are public; the service has no user accounts.
pub fn routes(state: ItemState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/items", get(handlers::list_all_items))
        .route(
            "/api/items/lost",
            get(handlers::list_lost_items).post(handlers::create_lost_item),
        )
        .route(
            "/api/items/found",
            get(handlers::list_found_items).post(handlers::create_found_item),
        )
        .route("/api/items/search", get(handlers::search_items))
        .route("/api/items/{id}", get(handlers::get_item))
        .route(
            "/api/items/lost/{id}/found",
            put(handlers::resolve_lost_item),
        )
        .route("/api/items/{type}/{id}", delete(handlers::delete_item))
        .route("/api/cleanup", post(handlers::cleanup_items))
        .with_state(state)
}
