//! Integration tests for TechStore.
//!
//! The tests in `tests/` exercise flows that cross store boundaries:
//! session namespace switching, checkout clearing the cart, and persistence
//! through a restarted state. Single-store behavior is covered by the unit
//! tests inside each crate.
//!
//! Run with: `cargo test -p techstore-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]

use techstore_storefront::config::StorefrontConfig;
use techstore_storefront::state::AppState;

/// Build an [`AppState`] with zero artificial delays and in-memory storage.
///
/// # Panics
///
/// Panics if the state cannot be constructed (test-only helper).
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_state() -> AppState {
    AppState::new(StorefrontConfig::for_tests()).unwrap()
}

/// Build an [`AppState`] persisting to `path`, with zero delays.
///
/// # Panics
///
/// Panics if the state cannot be constructed (test-only helper).
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_state_at(path: &std::path::Path) -> AppState {
    let config = StorefrontConfig {
        storage_path: Some(path.to_path_buf()),
        ..StorefrontConfig::for_tests()
    };
    AppState::new(config).unwrap()
}
