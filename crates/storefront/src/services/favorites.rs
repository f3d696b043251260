//! Favorites (wishlist) store.
//!
//! Favorites are an ordered list of product ids, persisted per storage
//! namespace (`favorites_guest` or `favorites_user_<id>`). Unlike the cart,
//! logout falls back to the guest slot: a wishlist is low-stakes enough that
//! continuity beats isolation there.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use techstore_core::{ProductId, UserId};

use crate::notify::{ChangeNotifier, SubscriberId};
use crate::storage::{KeyValueStorage, Namespace, StorageError};

const PREFIX: &str = "favorites";

/// Favorites store errors.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The favorites store.
pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage>,
    state: Mutex<State>,
    notifier: ChangeNotifier<Vec<ProductId>>,
}

struct State {
    namespace: Namespace,
    ids: Vec<ProductId>,
}

impl FavoritesStore {
    /// Create the store in the guest namespace, rehydrating its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Result<Self, FavoritesError> {
        let namespace = Namespace::Guest;
        let ids = load_ids(storage.as_ref(), &namespace)?;
        Ok(Self {
            storage,
            state: Mutex::new(State { namespace, ids }),
            notifier: ChangeNotifier::new(),
        })
    }

    /// Subscribe to favorites changes. Callbacks receive the full id list.
    pub fn on_change(
        &self,
        callback: impl Fn(&Vec<ProductId>) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.notifier.subscribe(callback)
    }

    /// Switch to the namespace of `user_id`, loading its persisted slot.
    ///
    /// No-op when the namespace is unchanged. The outgoing list is flushed
    /// to its slot first. On logout the guest slot is loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if either slot cannot be read or written.
    pub fn set_session(&self, user_id: Option<&UserId>) -> Result<(), FavoritesError> {
        let target = Namespace::for_session(user_id);
        {
            let mut state = self.lock_state();
            if state.namespace == target {
                return Ok(());
            }
            self.persist_to(&state.namespace, &state.ids)?;
            state.ids = load_ids(self.storage.as_ref(), &target)?;
            state.namespace = target;
        }
        self.notify();
        Ok(())
    }

    /// Add `id` to the favorites. Already-favorited ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn add_to_favorites(&self, id: ProductId) -> Result<(), FavoritesError> {
        self.mutate(|ids| {
            if !ids.contains(&id) {
                ids.push(id);
            }
        })
    }

    /// Remove `id` from the favorites. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn remove_from_favorites(&self, id: ProductId) -> Result<(), FavoritesError> {
        self.mutate(|ids| ids.retain(|i| *i != id))
    }

    /// Add `id` when absent, remove it when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be persisted.
    pub fn toggle_favorite(&self, id: ProductId) -> Result<(), FavoritesError> {
        self.mutate(|ids| {
            if ids.contains(&id) {
                ids.retain(|i| *i != id);
            } else {
                ids.push(id);
            }
        })
    }

    /// Whether `id` is favorited.
    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.lock_state().ids.contains(&id)
    }

    /// Snapshot of the favorited ids, in insertion order.
    #[must_use]
    pub fn favorites(&self) -> Vec<ProductId> {
        self.lock_state().ids.clone()
    }

    /// Empty the list and erase the persisted slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted slot cannot be removed.
    pub fn clear_favorites(&self) -> Result<(), FavoritesError> {
        {
            let mut state = self.lock_state();
            state.ids.clear();
            self.storage.remove(&state.namespace.key(PREFIX))?;
        }
        self.notify();
        Ok(())
    }

    fn mutate(&self, f: impl FnOnce(&mut Vec<ProductId>)) -> Result<(), FavoritesError> {
        {
            let mut state = self.lock_state();
            f(&mut state.ids);
            self.persist_to(&state.namespace, &state.ids)?;
        }
        self.notify();
        Ok(())
    }

    fn persist_to(&self, namespace: &Namespace, ids: &[ProductId]) -> Result<(), FavoritesError> {
        let json = serde_json::to_string(ids).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.storage.set(&namespace.key(PREFIX), &json)?;
        Ok(())
    }

    fn notify(&self) {
        let ids = self.favorites();
        self.notifier.notify(&ids);
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("count", &self.lock_state().ids.len())
            .finish_non_exhaustive()
    }
}

fn load_ids(
    storage: &dyn KeyValueStorage,
    namespace: &Namespace,
) -> Result<Vec<ProductId>, FavoritesError> {
    let key = namespace.key(PREFIX);
    match storage.get(&key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(ids) => Ok(ids),
            Err(err) => {
                tracing::warn!(key, %err, "discarding corrupt favorites slot");
                Ok(Vec::new())
            }
        },
        None => Ok(Vec::new()),
    }
}
