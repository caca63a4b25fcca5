//! Checkout against a real database: totals, stock decrements, rollback and
//! concurrent checkouts for the last units.
//!
//! Requires `STOREFRONT_DATABASE_URL`. Run with:
//! `cargo test -p electroshop-integration-tests -- --ignored`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use electroshop_core::checkout::{CheckoutForm, CheckoutViolation, plan_checkout};
use electroshop_core::{Cart, PaymentInfo, PaymentMethod};
use electroshop_integration_tests::{insert_product, orders_containing, price, stock_of, test_pool};
use electroshop_storefront::db::{OrderRepository, RepositoryError};
use electroshop_storefront::services::{CheckoutError, CheckoutService};

fn cod_form() -> CheckoutForm {
    CheckoutForm {
        name: "Ann".to_string(),
        address: "1 Main St".to_string(),
        payment_method: "cash_on_delivery".to_string(),
        ..CheckoutForm::default()
    }
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_checkout_decrements_stock_and_totals() {
    let pool = test_pool().await;
    let product = insert_product(&pool, 1000, 5).await;

    let mut cart = Cart::new();
    assert_eq!(cart.add_item(&product, 3), Some(3));

    let order = CheckoutService::new(&pool)
        .checkout(&cod_form(), &cart, None)
        .await
        .unwrap();

    assert_eq!(order.total, price(3000));
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
    assert!(order.payment_info.is_none());
    assert_eq!(stock_of(&pool, product.id).await, 2);

    let stored = OrderRepository::new(&pool)
        .get_by_id(order.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, order);
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_credit_card_details_are_masked() {
    let pool = test_pool().await;
    let product = insert_product(&pool, 4999, 2).await;

    let mut cart = Cart::new();
    cart.add_item(&product, 1);
    let form = CheckoutForm {
        payment_method: "credit_card".to_string(),
        cc_number: "4111 1111 1111 1234".to_string(),
        cc_expiry: "12-29".to_string(),
        cc_cvc: "123".to_string(),
        ..cod_form()
    };

    let order = CheckoutService::new(&pool)
        .checkout(&form, &cart, None)
        .await
        .unwrap();
    let stored = OrderRepository::new(&pool)
        .get_by_id(order.id)
        .await
        .unwrap()
        .unwrap();

    match stored.payment_info {
        Some(PaymentInfo::CreditCard { card_last4, expiry }) => {
            assert_eq!(card_last4, "1234");
            assert_eq!(expiry, "12-29");
        }
        other => panic!("unexpected payment info: {other:?}"),
    }

    let raw: serde_json::Value =
        sqlx::query_scalar("SELECT payment_info FROM customer_order WHERE id = $1")
            .bind(order.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let mut keys: Vec<&str> = raw.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["card_last4", "expiry", "method"]);
    assert!(!raw.to_string().contains("4111"));
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_rejected_checkout_changes_nothing() {
    let pool = test_pool().await;
    let product = insert_product(&pool, 1000, 5).await;

    let mut cart = Cart::new();
    cart.add_item(&product, 2);
    let form = CheckoutForm {
        payment_method: "bitcoin".to_string(),
        ..cod_form()
    };

    let err = CheckoutService::new(&pool)
        .checkout(&form, &cart, None)
        .await
        .unwrap_err();

    let CheckoutError::Rejected(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert_eq!(errors.messages(), vec!["Invalid payment method."]);
    assert_eq!(stock_of(&pool, product.id).await, 5);
    assert_eq!(orders_containing(&pool, product.id).await, 0);
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_place_rolls_back_when_stock_moves_after_planning() {
    let pool = test_pool().await;
    let plenty = insert_product(&pool, 500, 10).await;
    let scarce = insert_product(&pool, 700, 2).await;

    let mut cart = Cart::new();
    cart.add_item(&plenty, 4);
    cart.add_item(&scarce, 2);
    let pending = plan_checkout(&cod_form(), &cart, &[plenty.clone(), scarce.clone()]).unwrap();

    // Stock drops between validation and the guarded decrement.
    sqlx::query("UPDATE product SET stock = 1 WHERE id = $1")
        .bind(scarce.id)
        .execute(&pool)
        .await
        .unwrap();

    let err = OrderRepository::new(&pool)
        .place(&pending, None)
        .await
        .unwrap_err();

    let RepositoryError::StockConflict {
        product_id,
        product_name,
    } = err
    else {
        panic!("expected a stock conflict, got {err:?}");
    };
    assert_eq!(product_id, scarce.id);
    assert_eq!(product_name, scarce.name);
    // The earlier decrement of `plenty` was undone with the order insert.
    assert_eq!(stock_of(&pool, plenty.id).await, 10);
    assert_eq!(stock_of(&pool, scarce.id).await, 1);
    assert_eq!(orders_containing(&pool, plenty.id).await, 0);
    assert_eq!(orders_containing(&pool, scarce.id).await, 0);
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_stale_cart_rolls_back_every_decrement() {
    let pool = test_pool().await;
    let plenty = insert_product(&pool, 500, 10).await;
    let scarce = insert_product(&pool, 700, 2).await;

    let mut cart = Cart::new();
    cart.add_item(&plenty, 4);
    cart.add_item(&scarce, 2);

    // Someone else buys the scarce item after it went into the cart.
    sqlx::query("UPDATE product SET stock = 1 WHERE id = $1")
        .bind(scarce.id)
        .execute(&pool)
        .await
        .unwrap();

    let err = CheckoutService::new(&pool)
        .checkout(&cod_form(), &cart, None)
        .await
        .unwrap_err();

    let CheckoutError::Rejected(errors) = err else {
        panic!("expected validation errors, got {err:?}");
    };
    assert!(errors.contains(&CheckoutViolation::InsufficientStock {
        product_name: scarce.name.clone(),
    }));
    assert_eq!(stock_of(&pool, plenty.id).await, 10);
    assert_eq!(stock_of(&pool, scarce.id).await, 1);
    assert_eq!(orders_containing(&pool, plenty.id).await, 0);
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_concurrent_checkouts_for_last_units() {
    let pool = test_pool().await;
    let product = insert_product(&pool, 1000, 3).await;

    let mut cart = Cart::new();
    cart.add_item(&product, 3);
    let form = cod_form();

    let first = CheckoutService::new(&pool);
    let second = CheckoutService::new(&pool);
    let (a, b) = tokio::join!(
        first.checkout(&form, &cart, None),
        second.checkout(&form, &cart, None),
    );

    let outcomes = [a, b];
    let successes = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one checkout must win: {outcomes:?}");

    let loser = outcomes.iter().find_map(|r| r.as_ref().err()).unwrap();
    let CheckoutError::Rejected(errors) = loser else {
        panic!("expected insufficient stock, got {loser:?}");
    };
    assert_eq!(
        errors.messages(),
        vec![format!("Not enough stock for {}.", product.name)]
    );

    assert_eq!(stock_of(&pool, product.id).await, 0);
    assert_eq!(orders_containing(&pool, product.id).await, 1);
}

#[tokio::test]
#[ignore = "Requires STOREFRONT_DATABASE_URL"]
async fn test_many_concurrent_checkouts_never_oversell() {
    let pool = test_pool().await;
    let product = insert_product(&pool, 100, 5).await;

    let mut cart = Cart::new();
    cart.add_item(&product, 1);

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..12 {
        let pool = pool.clone();
        let cart = cart.clone();
        tasks.spawn(async move {
            CheckoutService::new(&pool)
                .checkout(&cod_form(), &cart, None)
                .await
                .is_ok()
        });
    }

    let mut placed = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap() {
            placed += 1;
        }
    }

    assert_eq!(placed, 5);
    assert_eq!(stock_of(&pool, product.id).await, 0);
    assert_eq!(orders_containing(&pool, product.id).await, 5);
}
