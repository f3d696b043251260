//! Session authentication store.
//!
//! Authentication is mocked: exactly one identity exists and only the
//! `admin` / `admin@admin.com` + `admin` credential pair signs in. The store
//! still goes through the full session lifecycle so the rest of the
//! storefront behaves as it would against a real backend: artificial login
//! latency, a persisted session record, rehydration on startup and change
//! notifications on every transition.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use techstore_core::{UserId, UserRole};

use crate::notify::{ChangeNotifier, SubscriberId};
use crate::storage::{KeyValueStorage, StorageError, USER_KEY};

/// Auth store errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The signed-in user, as persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub avatar: String,
    pub role: UserRole,
}

impl SessionUser {
    fn mock_admin() -> Self {
        Self {
            id: UserId::new("1"),
            username: "admin".to_string(),
            full_name: "Quản trị viên".to_string(),
            email: "admin@techstore.com".to_string(),
            phone: "0123456789".to_string(),
            gender: "Nam".to_string(),
            avatar: "/img/admin-avatar.jpg".to_string(),
            role: UserRole::Admin,
        }
    }
}

/// A shallow profile update; `None` fields are left unchanged.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub avatar: Option<String>,
}

/// An authentication transition, delivered to subscribers after the session
/// and its persisted record have both been updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn(SessionUser),
    LoggedOut,
}

/// The session authentication store.
pub struct AuthStore {
    storage: Arc<dyn KeyValueStorage>,
    session: Mutex<Option<SessionUser>>,
    notifier: ChangeNotifier<AuthEvent>,
    login_delay: Duration,
}

impl AuthStore {
    /// Create the store, rehydrating any persisted session.
    ///
    /// A persisted record that no longer parses is discarded and removed;
    /// the session starts signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        login_delay: Duration,
    ) -> Result<Self, AuthError> {
        let session = match storage.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(%err, "discarding corrupt session record");
                    storage.remove(USER_KEY)?;
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            storage,
            session: Mutex::new(session),
            notifier: ChangeNotifier::new(),
            login_delay,
        })
    }

    /// Subscribe to authentication transitions.
    pub fn on_change(&self, callback: impl Fn(&AuthEvent) + Send + Sync + 'static) -> SubscriberId {
        self.notifier.subscribe(callback)
    }

    /// Attempt to sign in. Returns `true` on success.
    ///
    /// Any credential pair other than `admin` (or `admin@admin.com`) with
    /// secret `admin` fails, leaving the current session untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the session record cannot be persisted.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<bool, AuthError> {
        tokio::time::sleep(self.login_delay).await;

        let accepted =
            (identifier == "admin" || identifier == "admin@admin.com") && secret == "admin";
        if !accepted {
            tracing::debug!(identifier, "login rejected");
            return Ok(false);
        }

        let user = SessionUser::mock_admin();
        self.persist(&user)?;
        *self.lock_session() = Some(user.clone());
        tracing::info!(user_id = %user.id, "login succeeded");
        self.notifier.notify(&AuthEvent::LoggedIn(user));
        Ok(true)
    }

    /// Sign out. Idempotent; signing out while signed out does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted session record cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        {
            let mut session = self.lock_session();
            if session.is_none() {
                return Ok(());
            }
            *session = None;
        }
        self.storage.remove(USER_KEY)?;
        tracing::info!("logged out");
        self.notifier.notify(&AuthEvent::LoggedOut);
        Ok(())
    }

    /// Apply a shallow profile update to the current session.
    ///
    /// A no-op when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated record cannot be persisted.
    pub fn update_profile(&self, patch: UserPatch) -> Result<(), AuthError> {
        let updated = {
            let mut session = self.lock_session();
            let Some(user) = session.as_mut() else {
                return Ok(());
            };
            if let Some(full_name) = patch.full_name {
                user.full_name = full_name;
            }
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(phone) = patch.phone {
                user.phone = phone;
            }
            if let Some(gender) = patch.gender {
                user.gender = gender;
            }
            if let Some(avatar) = patch.avatar {
                user.avatar = avatar;
            }
            user.clone()
        };
        self.persist(&updated)?;
        self.notifier.notify(&AuthEvent::LoggedIn(updated));
        Ok(())
    }

    /// The current session user, if signed in.
    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.lock_session().clone()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock_session().is_some()
    }

    fn persist(&self, user: &SessionUser) -> Result<(), AuthError> {
        let json = serde_json::to_string(user)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.storage.set(USER_KEY, &json)?;
        Ok(())
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<SessionUser>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
