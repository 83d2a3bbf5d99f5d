//! Persistence module for item records
//!
//! Defines the load/save contract the item store depends on and a JSON
//! file backend that writes atomically.

mod json_file;
mod repository;

pub use json_file::JsonFileRepository;
pub use repository::ItemRepository;
