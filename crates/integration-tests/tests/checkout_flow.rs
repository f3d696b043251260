//! End-to-end checkout: cart selection, submission, cart clearing.

use techstore_core::ProductId;
use techstore_integration_tests::test_state;
use techstore_storefront::services::checkout::{CheckoutError, ShippingForm};

fn shipping_form() -> ShippingForm {
    ShippingForm {
        full_name: "Trần Thị B".to_string(),
        email: "tranthib@gmail.com".to_string(),
        phone: "0987654321".to_string(),
        address: "456 Đường XYZ".to_string(),
        province: "79".to_string(),
        district: "772".to_string(),
        ward: "27208".to_string(),
    }
}

#[tokio::test]
async fn test_checkout_buys_selected_lines_and_clears_cart() {
    let state = test_state();
    let catalog = state.catalog();
    let mouse = catalog.by_id(ProductId::new(13)).unwrap().clone();
    let keyboard = catalog.by_id(ProductId::new(14)).unwrap().clone();

    state.cart().add_to_cart(&mouse, 2, false).unwrap();
    state.cart().add_to_cart(&keyboard, 1, false).unwrap();
    state.cart().select_all(true).unwrap();

    let confirmation = state
        .checkout()
        .submit(shipping_form(), state.cart())
        .await
        .unwrap();

    assert!(confirmation.order_number.starts_with("DH"));
    assert_eq!(confirmation.items.len(), 2);
    assert_eq!(confirmation.total, 2 * 1_200_000 + 2_800_000);
    assert!(state.cart().items().is_empty());
    assert_eq!(state.cart().selected_total_price(), 0);
}

#[tokio::test]
async fn test_buy_now_checks_out_only_the_autoselected_line() {
    let state = test_state();
    let catalog = state.catalog();
    let camera = catalog.by_id(ProductId::new(1)).unwrap().clone();
    let headset = catalog.by_id(ProductId::new(15)).unwrap().clone();

    state.cart().add_to_cart(&camera, 1, false).unwrap();
    // Buy-now: the headset becomes the only selected line.
    state.cart().add_to_cart(&headset, 1, true).unwrap();

    let confirmation = state
        .checkout()
        .submit(shipping_form(), state.cart())
        .await
        .unwrap();

    assert_eq!(confirmation.items.len(), 1);
    assert_eq!(confirmation.items[0].product.id, headset.id);
    assert_eq!(confirmation.total, 3_500_000);
}

#[tokio::test]
async fn test_invalid_form_leaves_cart_intact() {
    let state = test_state();
    let camera = state.catalog().by_id(ProductId::new(1)).unwrap().clone();
    state.cart().add_to_cart(&camera, 1, false).unwrap();

    let mut form = shipping_form();
    form.email = "not-an-email".to_string();
    form.ward = String::new();

    let err = state
        .checkout()
        .submit(form, state.cart())
        .await
        .unwrap_err();
    match err {
        CheckoutError::Validation(errors) => {
            assert_eq!(errors.get("email"), Some("Email không hợp lệ"));
            assert_eq!(errors.get("ward"), Some("Vui lòng chọn Phường/Xã"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(state.cart().total_items(), 1);
}

#[tokio::test]
async fn test_checkout_while_signed_in_clears_the_user_slot() {
    let state = test_state();
    assert!(state.auth().login("admin", "admin").await.unwrap());

    let laptop = state.catalog().by_id(ProductId::new(3)).unwrap().clone();
    state.cart().add_to_cart(&laptop, 1, false).unwrap();

    state
        .checkout()
        .submit(shipping_form(), state.cart())
        .await
        .unwrap();

    // The persisted user slot was erased too: a relogin sees an empty cart.
    state.auth().logout().unwrap();
    assert!(state.auth().login("admin", "admin").await.unwrap());
    assert!(state.cart().items().is_empty());
}
