pub mod item_handler;

pub use item_handler::{
    __path_cleanup_items, __path_create_found_item, __path_create_lost_item, __path_delete_item,
    __path_get_item, __path_health_check, __path_list_all_items, __path_list_found_items,
    __path_list_lost_items, __path_resolve_lost_item, __path_search_items, cleanup_items,
    create_found_item, create_lost_item, delete_item, get_item, health_check, list_all_items,
    list_found_items, list_lost_items, resolve_lost_item, search_items, ItemState,
};
