mod item_dto;

pub use item_dto::{
    AllItemsResponseDto, CleanupQuery, CleanupResponseDto, CreateFoundItemDto, CreateLostItemDto,
    DeleteItemResponseDto, HealthResponseDto, ItemFilter, ItemResponseDto, ResolveLostItemDto,
    ResolveLostItemResponseDto, SearchItemsQuery,
};
