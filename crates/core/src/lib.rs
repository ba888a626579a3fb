//! Shopfeed Core - Shared types library.
//!
//! This crate provides the common types used across all Shopfeed components:
//! - `server` - Catalog service exposing the product listing API
//! - `client` - Feed controller, filter controls, and data sources
//! - `cli` - Terminal feed viewer and catalog fixtures
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no async. This keeps it lightweight and allows it to be used anywhere,
//! including inside the client's synchronous state machine.
//!
//! # Modules
//!
//! - [`types`] - Wire-faithful product, page, and filter types
//! - [`query`] - Filtering and fixed-size pagination over a catalog slice

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod query;
pub mod types;

pub use types::*;
