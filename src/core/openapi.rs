use utoipa::{Modify, OpenApi};

use crate::features::items::{dtos as items_dtos, handlers as items_handlers, models as items_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Items
        items_handlers::list_all_items,
        items_handlers::list_lost_items,
        items_handlers::list_found_items,
        items_handlers::create_lost_item,
        items_handlers::create_found_item,
        items_handlers::search_items,
        items_handlers::get_item,
        items_handlers::resolve_lost_item,
        items_handlers::delete_item,
        // Maintenance
        items_handlers::cleanup_items,
        items_handlers::health_check,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Items
            items_models::Category,
            items_models::ItemKind,
            items_models::ItemStatus,
            items_dtos::CreateLostItemDto,
            items_dtos::CreateFoundItemDto,
            items_dtos::ResolveLostItemDto,
            items_dtos::ItemResponseDto,
            items_dtos::AllItemsResponseDto,
            items_dtos::ResolveLostItemResponseDto,
            items_dtos::DeleteItemResponseDto,
            items_dtos::CleanupResponseDto,
            items_dtos::HealthResponseDto,
            ApiResponse<items_dtos::ItemResponseDto>,
            ApiResponse<Vec<items_dtos::ItemResponseDto>>,
            ApiResponse<items_dtos::AllItemsResponseDto>,
            ApiResponse<items_dtos::ResolveLostItemResponseDto>,
            ApiResponse<items_dtos::DeleteItemResponseDto>,
            ApiResponse<items_dtos::CleanupResponseDto>,
            ApiResponse<items_dtos::HealthResponseDto>,
        )
    ),
    tags(
        (name = "items", description = "Lost and found item reports"),
        (name = "maintenance", description = "Retention cleanup and health"),
    ),
    info(
        title = "Campus Lost & Found API",
        version = "0.1.0",
        description = "API documentation for the campus lost & found service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_item_routes() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        assert!(paths.contains_key("/api/items"));
        assert!(paths.contains_key("/api/items/lost/{id}/found"));
        assert!(paths.contains_key("/api/items/{type}/{id}"));
        assert!(paths.contains_key("/api/cleanup"));
    }

    #[test]
    fn test_swagger_info_modifier_overrides_info() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Lost & Found".to_string(),
            version: "2.0.0".to_string(),
            description: "Staging".to_string(),
        }
        .modify(&mut openapi);

        assert_eq!(openapi.info.title, "Lost & Found");
        assert_eq!(openapi.info.version, "2.0.0");
        assert_eq!(openapi.info.description.as_deref(), Some("Staging"));
    }
}
