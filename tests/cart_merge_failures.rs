use std::sync::Arc;

use axum_cart_api::{
    models::{Cart, CartItem},
    repository::{MockCartRepository, RepositoryError},
    services::cart_service::{CartError, CartStore},
};
use chrono::Utc;
use sea_orm::DbErr;

fn cart(user_id: &str, items: &[(&str, i32)]) -> Cart {
    let mut cart = Cart::empty(user_id, Utc::now());
    cart.items = items
        .iter()
        .map(|(product_id, quantity)| CartItem {
            product_id: (*product_id).to_string(),
            quantity: *quantity,
        })
        .collect();
    cart
}

fn db_down() -> RepositoryError {
    RepositoryError::Database(DbErr::Custom("connection reset".into()))
}

#[tokio::test]
async fn failed_save_keeps_guest_cart() {
    let mut repo = MockCartRepository::new();

    repo.expect_find()
        .once()
        .withf(|id| id == "g")
        .returning(|_| Ok(Some(cart("g", &[("p1", 2)]))));
    repo.expect_find_or_create()
        .once()
        .withf(|id| id == "u")
        .returning(|_| Ok(cart("u", &[("p1", 3)])));
    repo.expect_save().once().returning(|_| Err(db_down()));
    repo.expect_delete().never();

    let store = CartStore::new(Arc::new(repo));
    let result = store.merge_guest_cart("g", "u").await;

    assert!(
        matches!(
            result,
            Err(CartError::Storage { context, .. }) if context == "Error merging guest cart"
        ),
        "expected merge storage error"
    );
}

#[tokio::test]
async fn failed_guest_lookup_aborts_before_any_write() {
    let mut repo = MockCartRepository::new();

    repo.expect_find().once().returning(|_| Err(db_down()));
    repo.expect_find_or_create().never();
    repo.expect_save().never();
    repo.expect_delete().never();

    let store = CartStore::new(Arc::new(repo));
    let result = store.merge_guest_cart("g", "u").await;

    assert!(
        matches!(result, Err(CartError::Storage { .. })),
        "expected storage error, got {result:?}"
    );
}

#[tokio::test]
async fn failed_delete_is_reported_after_save() {
    let mut repo = MockCartRepository::new();

    repo.expect_find()
        .once()
        .returning(|_| Ok(Some(cart("g", &[("p1", 2)]))));
    repo.expect_find_or_create()
        .once()
        .returning(|_| Ok(cart("u", &[])));
    repo.expect_save()
        .once()
        .withf(|saved| saved.user_id == "u" && saved.items.len() == 1)
        .returning(|saved| Ok(saved.clone()));
    repo.expect_delete()
        .once()
        .withf(|id| id == "g")
        .returning(|_| Err(db_down()));

    let store = CartStore::new(Arc::new(repo));
    let result = store.merge_guest_cart("g", "u").await;

    assert!(
        matches!(result, Err(CartError::Storage { .. })),
        "expected storage error, got {result:?}"
    );
}

#[tokio::test]
async fn merge_without_guest_items_never_writes() -> anyhow::Result<()> {
    let mut repo = MockCartRepository::new();

    repo.expect_find()
        .once()
        .returning(|_| Ok(Some(cart("g", &[]))));
    repo.expect_find_or_create()
        .once()
        .returning(|_| Ok(cart("u", &[("p1", 1)])));
    repo.expect_save().never();
    repo.expect_delete().never();

    let store = CartStore::new(Arc::new(repo));
    let merged = store.merge_guest_cart("g", "u").await?;

    assert_eq!(merged.items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn storage_errors_carry_operation_context() {
    let mut repo = MockCartRepository::new();
    repo.expect_find_or_create().returning(|_| Err(db_down()));
    let store = CartStore::new(Arc::new(repo));

    let contexts = [
        (store.get_cart("u").await, "Error getting cart"),
        (store.add_item("u", "p", 1).await, "Error adding item to cart"),
        (store.remove_item("u", "p").await, "Error removing item from cart"),
        (
            store.update_item_quantity("u", "p", 1).await,
            "Error updating item quantity",
        ),
        (store.clear_cart("u").await, "Error clearing cart"),
    ];

    for (result, expected) in contexts {
        let err = result.expect_err("storage failure should propagate");
        let message = err.to_string();
        assert!(
            message.starts_with(expected) && message.contains("connection reset"),
            "unexpected message: {message}"
        );
    }
}
