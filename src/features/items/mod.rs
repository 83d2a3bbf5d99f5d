//! Campus lost & found items.
//!
//! Owns both report collections, resolution of lost reports into linked
//! found reports, search, and retention of found reports.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/items` | Both collections |
//! | GET | `/api/items/lost` | Lost items |
//! | GET | `/api/items/found` | Found items |
//! | POST | `/api/items/lost` | Report a lost item |
//! | POST | `/api/items/found` | Post a found item |
//! | GET | `/api/items/search` | Search by `q`, `category`, `type` |
//! | GET | `/api/items/{id}` | Get item by ID |
//! | PUT | `/api/items/lost/{id}/found` | Mark a lost item as found |
//! | DELETE | `/api/items/{type}/{id}` | Delete an item |
//! | POST | `/api/cleanup` | Evict stale found items |
//! | GET | `/api/health` | Health check |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod workers;

pub use services::{ItemStore, MatchingService, RetentionService, SearchService};
pub use workers::RetentionWorker;
