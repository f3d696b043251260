//! Checkout: shipping-form validation and order submission.
//!
//! Submission is simulated (no payment gateway, no order backend): the form
//! is validated, the selected cart lines are totalled into a confirmation
//! with a generated order number, and the cart is cleared. Confirmations are
//! not appended to the back-office order fixtures; the two datasets are
//! independent.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cart::{CartError, CartItem, CartStore};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("valid phone pattern"));

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("shipping form invalid")]
    Validation(ValidationErrors),
    #[error("no items selected for checkout")]
    EmptyCart,
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.fields.insert(field, message.to_string());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The message for `field`, if that field failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// The shipping form filled in at checkout.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Street address (house number and street).
    pub address: String,
    /// Selected province code, as a string (empty means unselected).
    pub province: String,
    pub district: String,
    pub ward: String,
}

/// A completed order, returned to the buyer after submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Order number of the form `DH<6 digits>`.
    pub order_number: String,
    pub items: Vec<CartItem>,
    /// Total of the purchased lines, in VND.
    pub total: i64,
    pub shipping: ShippingForm,
    pub created_at: DateTime<Utc>,
}

/// Validate the shipping form, collecting every field failure.
///
/// # Errors
///
/// Returns the per-field Vietnamese messages when any field is invalid.
pub fn validate(form: &ShippingForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if form.full_name.trim().is_empty() {
        errors.push("fullName", "Vui lòng nhập họ tên");
    }

    if form.email.trim().is_empty() {
        errors.push("email", "Vui lòng nhập email");
    } else if !EMAIL_RE.is_match(form.email.trim()) {
        errors.push("email", "Email không hợp lệ");
    }

    let phone: String = form.phone.chars().filter(|c| !c.is_whitespace()).collect();
    if phone.is_empty() {
        errors.push("phone", "Vui lòng nhập số điện thoại");
    } else if !PHONE_RE.is_match(&phone) {
        errors.push("phone", "Số điện thoại không hợp lệ");
    }

    if form.address.trim().is_empty() {
        errors.push("address", "Vui lòng nhập địa chỉ");
    }
    if form.province.is_empty() {
        errors.push("province", "Vui lòng chọn Tỉnh/Thành phố");
    }
    if form.district.is_empty() {
        errors.push("district", "Vui lòng chọn Quận/Huyện");
    }
    if form.ward.is_empty() {
        errors.push("ward", "Vui lòng chọn Phường/Xã");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Generate an order number from the current time: `DH` followed by the last
/// six digits of the unix-epoch milliseconds.
#[must_use]
pub fn order_number(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().unsigned_abs();
    format!("DH{:06}", millis % 1_000_000)
}

/// The checkout service.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    submit_delay: Duration,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(submit_delay: Duration) -> Self {
        Self { submit_delay }
    }

    /// Submit an order for the selected cart lines.
    ///
    /// Validates the form, waits out the simulated processing delay, builds
    /// the confirmation and clears the cart.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the form is invalid, `EmptyCart` when no
    /// cart line is selected, or a cart error if clearing fails.
    pub async fn submit(
        &self,
        form: ShippingForm,
        cart: &CartStore,
    ) -> Result<OrderConfirmation, CheckoutError> {
        validate(&form).map_err(CheckoutError::Validation)?;

        let items = cart.selected_items();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        tokio::time::sleep(self.submit_delay).await;

        let now = Utc::now();
        let total = items.iter().map(CartItem::subtotal).sum();
        let confirmation = OrderConfirmation {
            order_number: order_number(now),
            items,
            total,
            shipping: form,
            created_at: now,
        };

        cart.clear_cart()?;
        tracing::info!(
            order_number = %confirmation.order_number,
            total = confirmation.total,
            "order placed"
        );
        Ok(confirmation)
    }
}
