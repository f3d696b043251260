//! TechStore Core - Shared types library.
//!
//! This crate provides common types used across all TechStore components:
//! - `storefront` - Customer-facing catalog, cart, and checkout logic
//! - `admin` - Back-office order and user management
//! - `cli` - Command-line tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, product categories, and status enums
//! - [`text`] - Vietnamese-aware text normalization and slugs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod text;
pub mod types;

pub use types::*;
