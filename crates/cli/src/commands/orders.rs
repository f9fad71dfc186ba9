//! Admin order commands.

use supplement_store_admin::{AdminOrders, OrderQuery};
use supplement_store_core::{OrderId, OrderStatus};
use tracing::info;

/// Log the admin order table for `query`.
pub fn list(admin: &AdminOrders, query: &OrderQuery) {
    let view = admin.list_view(query);
    let (first, last) = view.showing;

    info!(
        "Showing {first} to {last} of {} orders (page {} of {})",
        view.total_matching,
        view.page,
        view.total_pages.max(1)
    );
    for row in &view.rows {
        info!(
            "  {:<12} {:<12} {:<16} {:>2} item(s) {:>9}  {}",
            row.id, row.created_at, row.customer_name, row.item_count, row.total, row.status_label
        );
    }
    if view.rows.is_empty() {
        info!("No orders found. Try adjusting your filters.");
    }
    if view.total_pages > 1 {
        let pages: Vec<String> = view
            .page_numbers
            .iter()
            .map(|n| {
                if *n == view.page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        info!("Pages: {}", pages.join(" "));
    }
}

/// Log the detail view of one order.
///
/// # Errors
///
/// Returns an error if no order has `id`.
pub fn show(admin: &AdminOrders, id: &OrderId) -> Result<(), Box<dyn std::error::Error>> {
    let order = admin.detail(id)?;

    info!("Order #{} [{}]", order.id, order.status_heading);
    info!("  Placed:   {}", order.created_at);
    info!("  Customer: {} (user {})", order.customer_name, order.user_id);
    info!("  Email:    {}", order.customer_email);
    info!("  Phone:    {}", order.customer_phone);
    for line in &order.address_lines {
        info!("  Address:  {line}");
    }
    for item in &order.items {
        info!(
            "  {} x{} @ {} = {}",
            item.product_name, item.quantity, item.unit_price, item.line_total
        );
    }
    info!("  Subtotal: {}", order.subtotal);
    info!("  Shipping: {}", order.shipping);
    info!("  Tax:      {}", order.tax);
    info!("  Total:    {}", order.total);
    Ok(())
}

/// Change an order's status, optionally only if it is still `expected`.
///
/// # Errors
///
/// Returns an error for an unknown order, an unknown status token, or a
/// status that changed since `expected` was read.
pub fn set_status(
    admin: &AdminOrders,
    id: &OrderId,
    status: &str,
    expected: Option<OrderStatus>,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = match expected {
        Some(expected) => admin.update_status_from(id, expected, status)?,
        None => admin.update_status(id, status)?,
    };
    info!("Order #{id} is now {}", status.label());
    show(admin, id)
}
