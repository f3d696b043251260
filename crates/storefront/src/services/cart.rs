//! Shopping cart store.
//!
//! The cart is a list of product snapshots with a quantity and a selection
//! flag. Selection drives checkout: only selected lines are totalled and
//! submitted. Every mutation persists the whole list to the active storage
//! namespace (`cart_guest` or `cart_user_<id>`).
//!
//! # Namespace transitions
//!
//! Login switches the cart to the user's slot: the outgoing lines are
//! flushed to their slot first, then the user's persisted cart is loaded.
//! Logout is deliberately asymmetric: the user's lines are flushed to the
//! user slot and the in-memory cart starts over empty, without loading the
//! guest slot, so a signed-in user's cart never leaks into a guest session
//! on a shared machine.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use techstore_core::{ProductId, UserId};

use crate::catalog::Product;
use crate::notify::{ChangeNotifier, SubscriberId};
use crate::storage::{KeyValueStorage, Namespace, StorageError};

const PREFIX: &str = "cart";

/// Cart store errors.
#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One cart line: a product snapshot plus quantity and selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    pub selected: bool,
}

impl CartItem {
    /// Line subtotal in VND.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.product.price_number * i64::from(self.quantity)
    }
}

/// The shopping cart store.
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    state: Mutex<State>,
    notifier: ChangeNotifier<Vec<CartItem>>,
}

struct State {
    namespace: Namespace,
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create the store in the guest namespace, rehydrating its slot.
    ///
    /// A persisted value that no longer parses is discarded with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Result<Self, CartError> {
        let namespace = Namespace::Guest;
        let items = load_items(storage.as_ref(), &namespace)?;
        Ok(Self {
            storage,
            state: Mutex::new(State { namespace, items }),
            notifier: ChangeNotifier::new(),
        })
    }

    /// Subscribe to cart changes. Callbacks receive the full item list.
    pub fn on_change(
        &self,
        callback: impl Fn(&Vec<CartItem>) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.notifier.subscribe(callback)
    }

    /// Switch the cart to the namespace of `user_id`.
    ///
    /// No-op when the namespace is unchanged. The outgoing items are flushed
    /// to their slot first; then the incoming slot is loaded, except on
    /// logout where the cart starts over empty.
    ///
    /// # Errors
    ///
    /// Returns an error if either slot cannot be read or written.
    pub fn set_session(&self, user_id: Option<&UserId>) -> Result<(), CartError> {
        let target = Namespace::for_session(user_id);
        {
            let mut state = self.lock_state();
            if state.namespace == target {
                return Ok(());
            }

            self.persist_to(&state.namespace, &state.items)?;

            let logging_out =
                matches!(state.namespace, Namespace::User(_)) && target == Namespace::Guest;
            state.items = if logging_out {
                Vec::new()
            } else {
                load_items(self.storage.as_ref(), &target)?
            };
            state.namespace = target;
        }
        self.notify();
        Ok(())
    }

    /// Add `quantity` of `product` to the cart.
    ///
    /// An existing line accumulates quantity. With `auto_select` the line
    /// becomes the only selected one (buy-now semantics); otherwise a new
    /// line is selected only when it is the first item in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn add_to_cart(
        &self,
        product: &Product,
        quantity: u32,
        auto_select: bool,
    ) -> Result<(), CartError> {
        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.product.id == product.id) {
                item.quantity += quantity;
            } else {
                let selected = auto_select || items.is_empty();
                items.push(CartItem {
                    product: product.clone(),
                    quantity,
                    selected,
                });
            }
            if auto_select {
                for item in items.iter_mut() {
                    item.selected = item.product.id == product.id;
                }
            }
        })
    }

    /// Remove the line for `id`. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn remove_from_cart(&self, id: ProductId) -> Result<(), CartError> {
        self.mutate(|items| items.retain(|i| i.product.id != id))
    }

    /// Set the quantity for `id`. A quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn update_quantity(&self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        self.mutate(|items| {
            if quantity == 0 {
                items.retain(|i| i.product.id != id);
            } else if let Some(item) = items.iter_mut().find(|i| i.product.id == id) {
                item.quantity = quantity;
            }
        })
    }

    /// Flip the selection flag of the line for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn toggle_selection(&self, id: ProductId) -> Result<(), CartError> {
        self.mutate(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.product.id == id) {
                item.selected = !item.selected;
            }
        })
    }

    /// Select or deselect every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn select_all(&self, selected: bool) -> Result<(), CartError> {
        self.mutate(|items| {
            for item in items.iter_mut() {
                item.selected = selected;
            }
        })
    }

    /// Empty the cart and erase the persisted slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted slot cannot be removed.
    pub fn clear_cart(&self) -> Result<(), CartError> {
        {
            let mut state = self.lock_state();
            state.items.clear();
            self.storage.remove(&state.namespace.key(PREFIX))?;
        }
        self.notify();
        Ok(())
    }

    /// Snapshot of the current items.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock_state().items.clone()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lock_state().items.iter().map(|i| i.quantity).sum()
    }

    /// Total price across all lines, in VND.
    #[must_use]
    pub fn total_price(&self) -> i64 {
        self.lock_state().items.iter().map(CartItem::subtotal).sum()
    }

    /// Snapshot of the selected lines only.
    #[must_use]
    pub fn selected_items(&self) -> Vec<CartItem> {
        self.lock_state()
            .items
            .iter()
            .filter(|i| i.selected)
            .cloned()
            .collect()
    }

    /// Total price across the selected lines, in VND.
    #[must_use]
    pub fn selected_total_price(&self) -> i64 {
        self.lock_state()
            .items
            .iter()
            .filter(|i| i.selected)
            .map(CartItem::subtotal)
            .sum()
    }

    fn mutate(&self, f: impl FnOnce(&mut Vec<CartItem>)) -> Result<(), CartError> {
        {
            let mut state = self.lock_state();
            f(&mut state.items);
            self.persist_to(&state.namespace, &state.items)?;
        }
        self.notify();
        Ok(())
    }

    fn persist_to(&self, namespace: &Namespace, items: &[CartItem]) -> Result<(), CartError> {
        let json =
            serde_json::to_string(items).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.storage.set(&namespace.key(PREFIX), &json)?;
        Ok(())
    }

    fn notify(&self) {
        let items = self.items();
        self.notifier.notify(&items);
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("total_items", &self.total_items())
            .finish_non_exhaustive()
    }
}

fn load_items(
    storage: &dyn KeyValueStorage,
    namespace: &Namespace,
) -> Result<Vec<CartItem>, CartError> {
    let key = namespace.key(PREFIX);
    match storage.get(&key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(key, %err, "discarding corrupt cart slot");
                Ok(Vec::new())
            }
        },
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::storage::MemoryStorage;

    fn cart() -> CartStore {
        CartStore::new(Arc::new(MemoryStorage::new())).unwrap()
    }

    fn product(catalog: &Catalog, id: i32) -> Product {
        catalog.by_id(ProductId::new(id)).unwrap().clone()
    }

    #[test]
    fn test_first_item_is_selected() {
        let catalog = Catalog::fixture();
        let cart = cart();

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        cart.add_to_cart(&product(&catalog, 2), 1, false).unwrap();

        let items = cart.items();
        assert!(items[0].selected);
        assert!(!items[1].selected);
    }

    #[test]
    fn test_quantity_accumulates() {
        let catalog = Catalog::fixture();
        let cart = cart();

        cart.add_to_cart(&product(&catalog, 1), 2, false).unwrap();
        cart.add_to_cart(&product(&catalog, 1), 3, false).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_auto_select_deselects_others() {
        let catalog = Catalog::fixture();
        let cart = cart();

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        cart.add_to_cart(&product(&catalog, 2), 1, false).unwrap();
        cart.add_to_cart(&product(&catalog, 3), 1, true).unwrap();

        let selected = cart.selected_items();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].product.id, ProductId::new(3));
    }

    #[test]
    fn test_auto_select_existing_line() {
        let catalog = Catalog::fixture();
        let cart = cart();

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        cart.add_to_cart(&product(&catalog, 2), 1, false).unwrap();
        cart.add_to_cart(&product(&catalog, 1), 1, true).unwrap();

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(cart.total_items(), 3);
        let selected = cart.selected_items();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].product.id, ProductId::new(1));
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let catalog = Catalog::fixture();
        let cart = cart();

        cart.add_to_cart(&product(&catalog, 1), 2, false).unwrap();
        cart.update_quantity(ProductId::new(1), 0).unwrap();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let catalog = Catalog::fixture();
        let cart = cart();

        cart.add_to_cart(&product(&catalog, 1), 2, false).unwrap();
        cart.update_quantity(ProductId::new(1), 7).unwrap();
        assert_eq!(cart.total_items(), 7);
    }

    #[test]
    fn test_selected_total_price() {
        let catalog = Catalog::fixture();
        let cart = cart();

        // Product 13: 1,200,000 x2; product 14: 2,800,000 x1.
        cart.add_to_cart(&product(&catalog, 13), 2, false).unwrap();
        cart.add_to_cart(&product(&catalog, 14), 1, false).unwrap();
        cart.select_all(true).unwrap();
        assert_eq!(cart.selected_total_price(), 5_200_000);

        cart.toggle_selection(ProductId::new(14)).unwrap();
        assert_eq!(cart.selected_total_price(), 2_400_000);
        assert_eq!(cart.total_price(), 5_200_000);
    }

    #[test]
    fn test_clear_cart_erases_persisted_slot() {
        let catalog = Catalog::fixture();
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let cart = CartStore::new(Arc::clone(&storage)).unwrap();

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        assert!(storage.get("cart_guest").unwrap().is_some());

        cart.clear_cart().unwrap();
        assert!(cart.items().is_empty());
        assert!(storage.get("cart_guest").unwrap().is_none());
    }

    #[test]
    fn test_persistence_roundtrip_through_fresh_store() {
        let catalog = Catalog::fixture();
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());

        let cart = CartStore::new(Arc::clone(&storage)).unwrap();
        cart.add_to_cart(&product(&catalog, 1), 2, false).unwrap();

        let fresh = CartStore::new(storage).unwrap();
        assert_eq!(fresh.items(), cart.items());
    }

    #[test]
    fn test_namespace_isolation() {
        let catalog = Catalog::fixture();
        let cart = cart();

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        let user = UserId::new("1");
        cart.set_session(Some(&user)).unwrap();

        // Fresh user slot: guest items are not visible.
        assert!(cart.items().is_empty());
        cart.add_to_cart(&product(&catalog, 2), 1, false).unwrap();
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_login_loads_user_slot() {
        let catalog = Catalog::fixture();
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let cart = CartStore::new(Arc::clone(&storage)).unwrap();
        let user = UserId::new("1");

        cart.set_session(Some(&user)).unwrap();
        cart.add_to_cart(&product(&catalog, 3), 1, false).unwrap();
        cart.set_session(None).unwrap();
        cart.set_session(Some(&user)).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id, ProductId::new(3));
    }

    #[test]
    fn test_logout_empties_without_loading_guest_slot() {
        let catalog = Catalog::fixture();
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        let cart = CartStore::new(Arc::clone(&storage)).unwrap();
        let user = UserId::new("1");

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        cart.set_session(Some(&user)).unwrap();
        cart.add_to_cart(&product(&catalog, 2), 1, false).unwrap();
        cart.set_session(None).unwrap();

        // Empty, even though the guest slot still holds product 1.
        assert!(cart.items().is_empty());
        assert!(storage.get("cart_guest").unwrap().is_some());
        // The user's cart was flushed to its slot before the switch.
        assert!(storage.get("cart_user_1").unwrap().is_some());
    }

    #[test]
    fn test_set_session_same_namespace_is_noop() {
        let catalog = Catalog::fixture();
        let cart = cart();
        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        cart.set_session(None).unwrap();
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_corrupt_slot_starts_empty() {
        let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStorage::new());
        storage.set("cart_guest", "noise[").unwrap();
        let cart = CartStore::new(storage).unwrap();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_change_notifications_fire_on_mutation() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let catalog = Catalog::fixture();
        let cart = cart();
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&calls);
        cart.on_change(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        cart.select_all(false).unwrap();
        cart.clear_cart().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_change_callback_may_mutate_cart() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let catalog = Catalog::fixture();
        let cart = Arc::new(cart());

        // Select everything once the cart reaches two lines, the way a
        // consumer reacting to its own store would.
        let reacted = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&reacted);
        let inner = Arc::clone(&cart);
        cart.on_change(move |items| {
            if items.len() == 2 && !flag.swap(true, Ordering::SeqCst) {
                inner.select_all(true).unwrap();
            }
        });

        cart.add_to_cart(&product(&catalog, 1), 1, false).unwrap();
        cart.add_to_cart(&product(&catalog, 2), 1, false).unwrap();

        assert!(reacted.load(Ordering::SeqCst));
        assert!(cart.items().iter().all(|i| i.selected));
    }
}
