//! Back-office order commands.

use techstore_admin::fixtures;
use techstore_admin::orders::{OrderQuery, order_stats, query_orders};
use techstore_core::OrderStatus;

use super::format_vnd;

/// List the mock orders, optionally filtered.
///
/// # Errors
///
/// Returns an error when `status` is not a valid order status.
pub fn list(status: Option<&str>, search: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let status = status.map(str::parse::<OrderStatus>).transpose()?;
    let orders = fixtures::orders();

    let page = query_orders(
        &orders,
        &OrderQuery {
            status,
            search: search.map(str::to_string),
            ..Default::default()
        },
    );

    println!(
        "{:<10} {:<20} {:<12} {:<8} {:>14}",
        "NUMBER", "CUSTOMER", "STATUS", "PAYMENT", "TOTAL"
    );
    for order in &page.items {
        println!(
            "{:<10} {:<20} {:<12} {:<8} {:>14}",
            order.order_number,
            order.customer.name,
            order.status.as_str(),
            order.payment_status.as_str(),
            format_vnd(order.total_amount),
        );
    }

    let stats = order_stats(&orders);
    println!(
        "{} of {} order(s); paid revenue {}",
        page.items.len(),
        stats.total,
        format_vnd(stats.revenue)
    );
    Ok(())
}
