//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the AccountStore port (the persistent store)
//! - An in-memory AccountStore for embedding and tests
//! - The sample account set used for seeding

pub mod duckdb;
pub mod memory;
pub mod sample;
