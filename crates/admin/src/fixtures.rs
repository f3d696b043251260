//! Mock fixture data backing the back office.

use chrono::{DateTime, Utc};

use techstore_core::{
    AccountStatus, OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, UserId, UserRole,
};

use crate::models::{AccountRecord, Customer, Order, OrderItem};

fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

fn item(id: i32, name: &str, price: i64, quantity: u32, image: &str) -> OrderItem {
    OrderItem {
        id: ProductId::new(id),
        name: name.to_string(),
        price,
        quantity,
        image: image.to_string(),
    }
}

fn customer(name: &str, email: &str, phone: &str, address: &str) -> Customer {
    Customer {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
    }
}

/// The five mock orders.
#[must_use]
pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId::new("order-1"),
            order_number: "DH001234".to_string(),
            customer: customer(
                "Nguyễn Văn A",
                "nguyenvana@gmail.com",
                "0123456789",
                "123 Đường ABC, Quận 1, TP.HCM",
            ),
            items: vec![
                item(1, "Camera HD Pro 4K", 15_500_000, 1, "/img/camera.jpg"),
                item(13, "Chuột Gaming Logitech", 1_200_000, 2, "/placeholder.svg"),
            ],
            total_amount: 17_900_000,
            status: OrderStatus::Delivered,
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::Bank,
            order_date: ts("2024-12-01T10:30:00Z"),
            shipping_date: Some(ts("2024-12-02T09:00:00Z")),
            delivery_date: Some(ts("2024-12-05T14:30:00Z")),
            notes: Some("Giao hàng giờ hành chính".to_string()),
        },
        Order {
            id: OrderId::new("order-2"),
            order_number: "DH001235".to_string(),
            customer: customer(
                "Trần Thị B",
                "tranthib@gmail.com",
                "0987654321",
                "456 Đường XYZ, Quận 3, TP.HCM",
            ),
            items: vec![item(
                2,
                "Dell Inspiron 15 3000",
                12_990_000,
                1,
                "/placeholder.svg",
            )],
            total_amount: 12_990_000,
            status: OrderStatus::Shipped,
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::Cod,
            order_date: ts("2024-12-03T14:15:00Z"),
            shipping_date: Some(ts("2024-12-04T08:00:00Z")),
            delivery_date: None,
            notes: None,
        },
        Order {
            id: OrderId::new("order-3"),
            order_number: "DH001236".to_string(),
            customer: customer(
                "Lê Văn C",
                "levanc@gmail.com",
                "0912345678",
                "789 Đường DEF, Quận 7, TP.HCM",
            ),
            items: vec![
                item(5, "MacBook Pro M3", 52_990_000, 1, "/placeholder.svg"),
                item(14, "Bàn phím cơ RGB", 2_800_000, 1, "/placeholder.svg"),
            ],
            total_amount: 55_790_000,
            status: OrderStatus::Processing,
            payment_status: PaymentStatus::Paid,
            payment_method: PaymentMethod::Bank,
            order_date: ts("2024-12-05T16:45:00Z"),
            shipping_date: None,
            delivery_date: None,
            notes: None,
        },
        Order {
            id: OrderId::new("order-4"),
            order_number: "DH001237".to_string(),
            customer: customer(
                "Phạm Thị D",
                "phamthid@gmail.com",
                "0934567890",
                "321 Đường GHI, Quận 5, TP.HCM",
            ),
            items: vec![item(15, "Tai nghe Gaming", 3_500_000, 1, "/placeholder.svg")],
            total_amount: 3_500_000,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Cod,
            order_date: ts("2024-12-06T09:20:00Z"),
            shipping_date: None,
            delivery_date: None,
            notes: Some("Khách hàng yêu cầu gọi trước khi giao".to_string()),
        },
        Order {
            id: OrderId::new("order-5"),
            order_number: "DH001238".to_string(),
            customer: customer(
                "Hoàng Văn E",
                "hoangvane@gmail.com",
                "0945678901",
                "654 Đường JKL, Quận 10, TP.HCM",
            ),
            items: vec![item(
                4,
                "Canon EOS R6 Mark II",
                45_000_000,
                1,
                "/placeholder.svg",
            )],
            total_amount: 45_000_000,
            status: OrderStatus::Cancelled,
            payment_status: PaymentStatus::Failed,
            payment_method: PaymentMethod::Card,
            order_date: ts("2024-12-02T11:10:00Z"),
            shipping_date: None,
            delivery_date: None,
            notes: Some("Khách hàng hủy do thay đổi ý định".to_string()),
        },
    ]
}

/// The five mock user accounts.
#[must_use]
pub fn users() -> Vec<AccountRecord> {
    vec![
        AccountRecord {
            id: UserId::new("user-1"),
            full_name: "Nguyễn Văn Admin".to_string(),
            email: "admin@techstore.com".to_string(),
            phone: "0123456789".to_string(),
            role: UserRole::Admin,
            status: AccountStatus::Active,
            avatar: "/img/admin-avatar.jpg".to_string(),
            created_at: ts("2024-01-01T00:00:00Z"),
            last_active: Utc::now(),
        },
        AccountRecord {
            id: UserId::new("user-2"),
            full_name: "Trần Thị Lan".to_string(),
            email: "lan.tran@gmail.com".to_string(),
            phone: "0987654321".to_string(),
            role: UserRole::User,
            status: AccountStatus::Active,
            avatar: "/placeholder.svg".to_string(),
            created_at: ts("2024-02-15T00:00:00Z"),
            last_active: ts("2024-12-05T00:00:00Z"),
        },
        AccountRecord {
            id: UserId::new("user-3"),
            full_name: "Lê Văn Minh".to_string(),
            email: "minh.le@gmail.com".to_string(),
            phone: "0912345678".to_string(),
            role: UserRole::User,
            status: AccountStatus::Active,
            avatar: "/placeholder.svg".to_string(),
            created_at: ts("2024-03-10T00:00:00Z"),
            last_active: ts("2024-12-04T00:00:00Z"),
        },
        AccountRecord {
            id: UserId::new("user-4"),
            full_name: "Phạm Thị Hoa".to_string(),
            email: "hoa.pham@gmail.com".to_string(),
            phone: "0934567890".to_string(),
            role: UserRole::User,
            status: AccountStatus::Inactive,
            avatar: "/placeholder.svg".to_string(),
            created_at: ts("2024-04-20T00:00:00Z"),
            last_active: ts("2024-11-20T00:00:00Z"),
        },
        AccountRecord {
            id: UserId::new("user-5"),
            full_name: "Hoàng Văn Đức".to_string(),
            email: "duc.hoang@gmail.com".to_string(),
            phone: "0945678901".to_string(),
            role: UserRole::User,
            status: AccountStatus::Active,
            avatar: "/placeholder.svg".to_string(),
            created_at: ts("2024-05-05T00:00:00Z"),
            last_active: ts("2024-12-03T00:00:00Z"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_totals_match_lines() {
        for order in orders() {
            let computed: i64 = order.items.iter().map(OrderItem::subtotal).sum();
            assert_eq!(computed, order.total_amount, "order {}", order.order_number);
        }
    }

    #[test]
    fn test_fixture_counts() {
        assert_eq!(orders().len(), 5);
        assert_eq!(users().len(), 5);
    }

    #[test]
    fn test_order_ids_unique() {
        let mut numbers: Vec<String> = orders().into_iter().map(|o| o.order_number).collect();
        numbers.sort();
        numbers.dedup();
        assert_eq!(numbers.len(), 5);
    }
}
