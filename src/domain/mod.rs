//! Domain modules organized as vertical slices, one per remote service.
//!
//! Each sub-module contains:
//! - `mod.rs`: Request and result types
//! - `wire.rs`: Raw serde bodies that differ from the public request types
//! - `client.rs`: Sub-client with one method triple per endpoint

pub mod cstore;
pub mod r1fs;
