//! User management queries.

use techstore_core::{AccountStatus, UserRole};

use crate::models::AccountRecord;
use crate::{Page, paginate};

/// A user listing query. Filters are a conjunction.
#[derive(Debug, Clone)]
pub struct UserQuery {
    pub role: Option<UserRole>,
    pub status: Option<AccountStatus>,
    /// Case-insensitive substring match on full name and email.
    pub search: Option<String>,
    /// 1-based page index.
    pub page: usize,
    pub per_page: usize,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            role: None,
            status: None,
            search: None,
            page: 1,
            per_page: 10,
        }
    }
}

/// Run `query` over `users`, preserving fixture order.
#[must_use]
pub fn query_users(users: &[AccountRecord], query: &UserQuery) -> Page<AccountRecord> {
    let needle = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.trim().is_empty());

    let matches: Vec<AccountRecord> = users
        .iter()
        .filter(|u| query.role.is_none_or(|r| u.role == r))
        .filter(|u| query.status.is_none_or(|s| u.status == s))
        .filter(|u| {
            needle.as_deref().is_none_or(|n| {
                u.full_name.to_lowercase().contains(n) || u.email.to_lowercase().contains(n)
            })
        })
        .cloned()
        .collect();

    paginate(matches, query.page, query.per_page)
}

/// Aggregate account counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub admins: usize,
}

/// Compute account statistics.
#[must_use]
pub fn user_stats(users: &[AccountRecord]) -> UserStats {
    UserStats {
        total: users.len(),
        active: users
            .iter()
            .filter(|u| u.status == AccountStatus::Active)
            .count(),
        inactive: users
            .iter()
            .filter(|u| u.status == AccountStatus::Inactive)
            .count(),
        admins: users.iter().filter(|u| u.role == UserRole::Admin).count(),
    }
}
