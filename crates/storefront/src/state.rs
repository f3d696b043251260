//! Shared application state.
//!
//! [`AppState`] owns every storefront service and is cheap to clone (one
//! `Arc`). Construction wires the auth store's change notifications into the
//! cart and favorites stores so their storage namespaces track the session.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::{ConfigError, StorefrontConfig};
use crate::services::address::AddressClient;
use crate::services::auth::{AuthError, AuthEvent, AuthStore};
use crate::services::cart::{CartError, CartStore};
use crate::services::checkout::CheckoutService;
use crate::services::favorites::{FavoritesError, FavoritesStore};
use crate::storage::KeyValueStorage;

/// Errors constructing the application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Favorites(#[from] FavoritesError),
}

/// Shared application state for the storefront.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    storage: Arc<dyn KeyValueStorage>,
    auth: Arc<AuthStore>,
    cart: Arc<CartStore>,
    favorites: Arc<FavoritesStore>,
    address: AddressClient,
    checkout: CheckoutService,
}

impl AppState {
    /// Build the state from configuration: open storage, construct the
    /// stores, align cart and favorites with any rehydrated session, and
    /// subscribe them to future auth transitions.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be opened or any store fails to
    /// rehydrate.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let storage = config.open_storage()?;

        let auth = Arc::new(AuthStore::new(Arc::clone(&storage), config.login_delay)?);
        let cart = Arc::new(CartStore::new(Arc::clone(&storage))?);
        let favorites = Arc::new(FavoritesStore::new(Arc::clone(&storage))?);

        // A session rehydrated from storage arrives before any subscription
        // fires; align the stores with it explicitly.
        if let Some(user) = auth.current_user() {
            cart.set_session(Some(&user.id))?;
            favorites.set_session(Some(&user.id))?;
        }

        let cart_sub = Arc::clone(&cart);
        let favorites_sub = Arc::clone(&favorites);
        auth.on_change(move |event| {
            let user_id = match event {
                AuthEvent::LoggedIn(user) => Some(user.id.clone()),
                AuthEvent::LoggedOut => None,
            };
            if let Err(err) = cart_sub.set_session(user_id.as_ref()) {
                tracing::error!(%err, "failed to switch cart namespace");
            }
            if let Err(err) = favorites_sub.set_session(user_id.as_ref()) {
                tracing::error!(%err, "failed to switch favorites namespace");
            }
        });

        let address = AddressClient::new(config.address_api_url.clone());
        let checkout = CheckoutService::new(config.checkout_delay);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::fixture(),
                storage,
                auth,
                cart,
                favorites,
                address,
                checkout,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.inner.storage
    }

    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }

    #[must_use]
    pub fn address(&self) -> &AddressClient {
        &self.inner.address
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("authenticated", &self.inner.auth.is_authenticated())
            .field("cart_items", &self.inner.cart.total_items())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techstore_core::ProductId;

    fn state() -> AppState {
        AppState::new(StorefrontConfig::for_tests()).unwrap()
    }

    #[tokio::test]
    async fn test_login_switches_store_namespaces() {
        let state = state();
        let product = state.catalog().by_id(ProductId::new(1)).unwrap().clone();
        state.cart().add_to_cart(&product, 1, false).unwrap();
        state.favorites().add_to_favorites(product.id).unwrap();

        assert!(state.auth().login("admin", "admin").await.unwrap());
        assert!(state.cart().items().is_empty());
        assert!(state.favorites().favorites().is_empty());
    }

    #[tokio::test]
    async fn test_logout_restores_guest_favorites_but_not_cart() {
        let state = state();
        let product = state.catalog().by_id(ProductId::new(2)).unwrap().clone();
        state.cart().add_to_cart(&product, 1, false).unwrap();
        state.favorites().add_to_favorites(product.id).unwrap();

        assert!(state.auth().login("admin", "admin").await.unwrap());
        state.cart().add_to_cart(&product, 3, false).unwrap();
        state.auth().logout().unwrap();

        assert!(state.cart().items().is_empty());
        assert_eq!(state.favorites().favorites(), vec![product.id]);
    }

    #[test]
    fn test_clone_shares_state() {
        let state = state();
        let clone = state.clone();
        let product = state.catalog().by_id(ProductId::new(3)).unwrap().clone();
        state.cart().add_to_cart(&product, 2, false).unwrap();
        assert_eq!(clone.cart().total_items(), 2);
    }
}
