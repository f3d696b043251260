//! Back-office domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use techstore_core::{
    AccountStatus, OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, UserId, UserRole,
};

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price in VND.
    pub price: i64,
    pub quantity: u32,
    pub image: String,
}

impl OrderItem {
    /// Line subtotal in VND.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }
}

/// The buyer on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A back-office order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    /// Order total in VND.
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A back-office user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}
