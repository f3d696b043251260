//! Type definitions shared across TechStore crates.

mod category;
mod id;
mod status;

pub use category::Category;
pub use id::{OrderId, ProductId, UserId};
pub use status::{AccountStatus, OrderStatus, PaymentMethod, PaymentStatus, UserRole};
