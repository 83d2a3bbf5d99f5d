//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for durable storage of item records.

pub mod persistence;
