use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::items::dtos::{
    AllItemsResponseDto, CleanupQuery, CleanupResponseDto, CreateFoundItemDto, CreateLostItemDto,
    DeleteItemResponseDto, HealthResponseDto, ItemResponseDto, ResolveLostItemDto,
    ResolveLostItemResponseDto, SearchItemsQuery,
};
use crate::features::items::models::ItemKind;
use crate::features::items::services::{
    ItemStore, MatchingService, RetentionService, SearchService,
};
use crate::shared::types::{ApiResponse, Meta};

/// State for item handlers
#[derive(Clone)]
pub struct ItemState {
    pub item_store: Arc<ItemStore>,
    pub matching_service: Arc<MatchingService>,
    pub search_service: Arc<SearchService>,
    pub retention_service: Arc<RetentionService>,
}

fn into_dtos<T: Into<ItemResponseDto>>(items: Vec<T>) -> Vec<ItemResponseDto> {
    items.into_iter().map(Into::into).collect()
}

fn list_response(items: Vec<ItemResponseDto>) -> ApiResponse<Vec<ItemResponseDto>> {
    let total = items.len() as i64;
    ApiResponse::success(Some(items), None, Some(Meta { total }))
}

/// List both lost and found items
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "All items", body = ApiResponse<AllItemsResponseDto>)
    ),
    tag = "items"
)]
pub async fn list_all_items(
    State(state): State<ItemState>,
) -> Result<Json<ApiResponse<AllItemsResponseDto>>> {
    let (lost, found) = state.item_store.get_all().await;
    let dto = AllItemsResponseDto {
        lost_items: into_dtos(lost),
        found_items: into_dtos(found),
    };
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// List lost items
#[utoipa::path(
    get,
    path = "/api/items/lost",
    responses(
        (status = 200, description = "Lost items", body = ApiResponse<Vec<ItemResponseDto>>)
    ),
    tag = "items"
)]
pub async fn list_lost_items(
    State(state): State<ItemState>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = state.item_store.list(ItemKind::Lost).await;
    Ok(Json(list_response(into_dtos(items))))
}

/// List found items
#[utoipa::path(
    get,
    path = "/api/items/found",
    responses(
        (status = 200, description = "Found items", body = ApiResponse<Vec<ItemResponseDto>>)
    ),
    tag = "items"
)]
pub async fn list_found_items(
    State(state): State<ItemState>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = state.item_store.list(ItemKind::Found).await;
    Ok(Json(list_response(into_dtos(items))))
}

/// Report a lost item
#[utoipa::path(
    post,
    path = "/api/items/lost",
    request_body = CreateLostItemDto,
    responses(
        (status = 201, description = "Lost item reported", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "items"
)]
pub async fn create_lost_item(
    State(state): State<ItemState>,
    AppJson(dto): AppJson<CreateLostItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    let item = state.item_store.create_lost(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item.into()),
            Some("Lost item reported".to_string()),
            None,
        )),
    ))
}

/// Post a found item
#[utoipa::path(
    post,
    path = "/api/items/found",
    request_body = CreateFoundItemDto,
    responses(
        (status = 201, description = "Found item posted", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "items"
)]
pub async fn create_found_item(
    State(state): State<ItemState>,
    AppJson(dto): AppJson<CreateFoundItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    let item = state.item_store.create_found(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item.into()),
            Some("Found item posted".to_string()),
            None,
        )),
    ))
}

/// Search lost and found items, newest first
#[utoipa::path(
    get,
    path = "/api/items/search",
    params(SearchItemsQuery),
    responses(
        (status = 200, description = "Matching items", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 400, description = "Unknown category or type")
    ),
    tag = "items"
)]
pub async fn search_items(
    State(state): State<ItemState>,
    Query(query): Query<SearchItemsQuery>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = state.search_service.search(query).await?;
    Ok(Json(list_response(into_dtos(items))))
}

/// Get a lost or found item by ID
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ApiResponse<ItemResponseDto>),
        (status = 404, description = "Item not found")
    ),
    tag = "items"
)]
pub async fn get_item(
    State(state): State<ItemState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = state.item_store.get(&id).await?;
    Ok(Json(ApiResponse::success(Some(item.into()), None, None)))
}

/// Mark a lost item as found
///
/// Creates a linked found item and resolves the lost item in one step.
#[utoipa::path(
    put,
    path = "/api/items/lost/{id}/found",
    params(
        ("id" = String, Path, description = "Lost item ID")
    ),
    request_body = ResolveLostItemDto,
    responses(
        (status = 200, description = "Lost item resolved", body = ApiResponse<ResolveLostItemResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Lost item not found"),
        (status = 409, description = "Lost item already resolved")
    ),
    tag = "items"
)]
pub async fn resolve_lost_item(
    State(state): State<ItemState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<ResolveLostItemDto>,
) -> Result<Json<ApiResponse<ResolveLostItemResponseDto>>> {
    let resolution = state.matching_service.resolve_lost(&id, dto).await?;
    let dto = ResolveLostItemResponseDto {
        found_item: resolution.found_item.into(),
        updated_lost_item: resolution.updated_lost_item.into(),
    };
    Ok(Json(ApiResponse::success(
        Some(dto),
        Some("Lost item marked as found".to_string()),
        None,
    )))
}

/// Delete a lost or found item
///
/// Deleting an item that does not exist is not an error.
#[utoipa::path(
    delete,
    path = "/api/items/{type}/{id}",
    params(
        ("type" = String, Path, description = "`lost` or `found`"),
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Delete processed", body = ApiResponse<DeleteItemResponseDto>),
        (status = 400, description = "Unknown item type")
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(state): State<ItemState>,
    Path((item_type, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<DeleteItemResponseDto>>> {
    let kind = item_type
        .parse::<ItemKind>()
        .map_err(AppError::BadRequest)?;

    let deleted = state.item_store.delete(kind, &id).await?;
    let message = if deleted {
        "Item deleted"
    } else {
        "Item not found, nothing deleted"
    };

    Ok(Json(ApiResponse::success(
        Some(DeleteItemResponseDto { id, deleted }),
        Some(message.to_string()),
        None,
    )))
}

/// Remove found items older than the retention window
#[utoipa::path(
    post,
    path = "/api/cleanup",
    params(CleanupQuery),
    responses(
        (status = 200, description = "Cleanup completed", body = ApiResponse<CleanupResponseDto>)
    ),
    tag = "maintenance"
)]
pub async fn cleanup_items(
    State(state): State<ItemState>,
    Query(query): Query<CleanupQuery>,
) -> Result<Json<ApiResponse<CleanupResponseDto>>> {
    let max_age = query.max_age_secs.map(Duration::from_secs);
    let summary = state.retention_service.cleanup(max_age).await?;

    Ok(Json(ApiResponse::success(
        Some(CleanupResponseDto {
            removed_count: summary.removed_count,
            remaining_count: summary.remaining_count,
        }),
        Some(format!("Removed {} found items", summary.removed_count)),
        None,
    )))
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponse<HealthResponseDto>)
    ),
    tag = "maintenance"
)]
pub async fn health_check() -> Json<ApiResponse<HealthResponseDto>> {
    Json(ApiResponse::success(
        Some(HealthResponseDto {
            status: "OK".to_string(),
            timestamp: Utc::now(),
        }),
        None,
        None,
    ))
}
