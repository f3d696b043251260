//! Session-scoped storefront services.
//!
//! Each store owns its slice of session state, persists through the
//! [`crate::storage::KeyValueStorage`] port, and publishes changes through a
//! [`crate::notify::ChangeNotifier`]. The stores are wired together by
//! [`crate::state::AppState`], never by each other.

pub mod address;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod favorites;
