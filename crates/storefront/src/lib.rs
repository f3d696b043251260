//! TechStore Storefront - catalog, search, and session state.
//!
//! This crate holds the logic behind the customer-facing store. There is no
//! HTTP surface here: the presentation layer constructs an [`state::AppState`]
//! once at startup and calls the stores directly, re-rendering on change
//! notifications.
//!
//! # Modules
//!
//! - [`catalog`] - Static product catalog and lookups
//! - [`search`] - Accent-insensitive prefix search with filters and sorting
//! - [`storage`] - Key-value persistence port (in-memory or JSON file)
//! - [`services`] - Auth session, cart, favorites, address lookup, checkout
//! - [`notify`] - Change notification between stores
//! - [`state`] - The service container wiring everything together
//! - [`config`] - Environment-based configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod notify;
pub mod search;
pub mod services;
pub mod state;
pub mod storage;
