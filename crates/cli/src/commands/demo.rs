//! Scripted storefront session.
//!
//! Walks the whole customer flow against an in-memory state: sign in, fill a
//! cart, favorite a product, and check out. Useful as a smoke test and as a
//! worked example of the store APIs.

use techstore_core::ProductId;
use techstore_storefront::config::StorefrontConfig;
use techstore_storefront::services::checkout::ShippingForm;
use techstore_storefront::state::AppState;

use super::format_vnd;

/// Run the demo session.
///
/// # Errors
///
/// Returns an error if any store operation fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    println!("Signing in as admin...");
    if !state.auth().login("admin", "admin").await? {
        println!("login rejected");
        return Ok(());
    }
    let user = state
        .auth()
        .current_user()
        .ok_or("no session after login")?;
    println!("Welcome, {}", user.full_name);

    let catalog = state.catalog();
    let camera = catalog
        .by_id(ProductId::new(1))
        .ok_or("fixture product missing")?
        .clone();
    let mouse = catalog
        .by_id(ProductId::new(13))
        .ok_or("fixture product missing")?
        .clone();

    state.cart().add_to_cart(&camera, 1, false)?;
    state.cart().add_to_cart(&mouse, 2, false)?;
    state.cart().select_all(true)?;
    state.favorites().add_to_favorites(camera.id)?;

    println!("Cart:");
    for item in state.cart().items() {
        println!(
            "  {} x{} = {}",
            item.product.name,
            item.quantity,
            format_vnd(item.subtotal())
        );
    }
    println!("Total: {}", format_vnd(state.cart().selected_total_price()));

    let form = ShippingForm {
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        address: "123 Đường ABC".to_string(),
        province: "79".to_string(),
        district: "760".to_string(),
        ward: "26734".to_string(),
    };

    println!("Placing order...");
    let confirmation = state.checkout().submit(form, state.cart()).await?;
    println!(
        "Order {} confirmed: {} line(s), {}",
        confirmation.order_number,
        confirmation.items.len(),
        format_vnd(confirmation.total)
    );
    println!("Cart after checkout: {} item(s)", state.cart().total_items());

    state.auth().logout()?;
    println!("Signed out.");
    Ok(())
}
