//! Order management queries and dashboard statistics.

use techstore_core::{OrderStatus, PaymentStatus};

use crate::models::Order;
use crate::{Page, paginate};

/// Sort order for order listings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OrderSort {
    /// Newest first.
    #[default]
    DateDesc,
    DateAsc,
    TotalDesc,
    TotalAsc,
}

/// An order listing query. Filters are a conjunction.
#[derive(Debug, Clone)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    /// Case-insensitive substring match on order number and customer name.
    pub search: Option<String>,
    pub sort: OrderSort,
    /// 1-based page index.
    pub page: usize,
    pub per_page: usize,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            status: None,
            payment_status: None,
            search: None,
            sort: OrderSort::default(),
            page: 1,
            per_page: 10,
        }
    }
}

/// Run `query` over `orders`.
#[must_use]
pub fn query_orders(orders: &[Order], query: &OrderQuery) -> Page<Order> {
    let needle = query
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.trim().is_empty());

    let mut matches: Vec<Order> = orders
        .iter()
        .filter(|o| query.status.is_none_or(|s| o.status == s))
        .filter(|o| query.payment_status.is_none_or(|s| o.payment_status == s))
        .filter(|o| {
            needle.as_deref().is_none_or(|n| {
                o.order_number.to_lowercase().contains(n)
                    || o.customer.name.to_lowercase().contains(n)
            })
        })
        .cloned()
        .collect();

    match query.sort {
        OrderSort::DateDesc => matches.sort_by_key(|o| std::cmp::Reverse(o.order_date)),
        OrderSort::DateAsc => matches.sort_by_key(|o| o.order_date),
        OrderSort::TotalDesc => matches.sort_by_key(|o| std::cmp::Reverse(o.total_amount)),
        OrderSort::TotalAsc => matches.sort_by_key(|o| o.total_amount),
    }

    paginate(matches, query.page, query.per_page)
}

/// Dashboard statistics over the order set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    /// Revenue of paid orders, in VND.
    pub revenue: i64,
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

/// Compute dashboard statistics.
#[must_use]
pub fn order_stats(orders: &[Order]) -> OrderStats {
    let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
    OrderStats {
        total: orders.len(),
        revenue: orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Paid)
            .map(|o| o.total_amount)
            .sum(),
        pending: count(OrderStatus::Pending),
        processing: count(OrderStatus::Processing),
        shipped: count(OrderStatus::Shipped),
        delivered: count(OrderStatus::Delivered),
        cancelled: count(OrderStatus::Cancelled),
    }
}
