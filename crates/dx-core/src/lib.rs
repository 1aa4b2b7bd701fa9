//! Core domain for the Dexter election-misinformation dashboard: entity
//! types, the read-only seed dataset, the query layer, configuration and the
//! persisted session key-value store.

pub mod config;
pub mod dataset;
pub mod query;
pub mod session_store;
pub mod types;
