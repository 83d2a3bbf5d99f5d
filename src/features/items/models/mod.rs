mod inventory;
mod item;

pub use inventory::Inventory;
pub use item::{
    Category, CreateFoundItem, CreateLostItem, FoundItem, Item, ItemBase, ItemKind, ItemStatus,
    LostItem, Provenance,
};
