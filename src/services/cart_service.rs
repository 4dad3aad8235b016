use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::Cart,
    repository::{CartRepository, RepositoryError},
};

const GET_CART: &str = "Error getting cart";
const ADD_ITEM: &str = "Error adding item to cart";
const REMOVE_ITEM: &str = "Error removing item from cart";
const UPDATE_QUANTITY: &str = "Error updating item quantity";
const CLEAR_CART: &str = "Error clearing cart";
const MERGE_GUEST_CART: &str = "Error merging guest cart";

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Item not found in cart: {product_id}")]
    ItemNotFound { product_id: String },

    #[error("quantity must be greater than 0")]
    InvalidQuantity,

    #[error("quantity for product {product_id} is too large")]
    QuantityOverflow { product_id: String },

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

fn storage(context: &'static str) -> impl FnOnce(RepositoryError) -> CartError {
    move |source| CartError::Storage { context, source }
}

/// Cart operations over an injected repository.
///
/// Every mutating operation loads the cart with get-or-create semantics,
/// applies its change in memory and writes the whole document back.
#[derive(Clone)]
pub struct CartStore {
    repository: Arc<dyn CartRepository>,
}

impl CartStore {
    pub fn new(repository: Arc<dyn CartRepository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_cart(&self, user_id: &str) -> Result<Cart, CartError> {
        self.repository
            .find_or_create(user_id)
            .await
            .map_err(storage(GET_CART))
    }

    /// Creates an empty cart under a freshly minted guest id.
    #[tracing::instrument(skip(self))]
    pub async fn open_guest_cart(&self) -> Result<Cart, CartError> {
        let guest_id = Uuid::new_v4().to_string();
        tracing::debug!(guest_id = %guest_id, "opening guest cart");
        self.get_cart(&guest_id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<Cart, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }

        let mut cart = self
            .repository
            .find_or_create(user_id)
            .await
            .map_err(storage(ADD_ITEM))?;

        if cart.add_quantity(product_id, quantity).is_none() {
            return Err(CartError::QuantityOverflow {
                product_id: product_id.to_string(),
            });
        }

        self.repository
            .save(&cart)
            .await
            .map_err(storage(ADD_ITEM))
    }

    /// Removing a product the cart does not hold is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, user_id: &str, product_id: &str) -> Result<Cart, CartError> {
        let mut cart = self
            .repository
            .find_or_create(user_id)
            .await
            .map_err(storage(REMOVE_ITEM))?;

        if !cart.remove(product_id) {
            tracing::debug!("product not in cart, nothing removed");
        }

        self.repository
            .save(&cart)
            .await
            .map_err(storage(REMOVE_ITEM))
    }

    /// Sets the quantity of a line already in the cart; `quantity <= 0` removes it.
    /// Unlike [`CartStore::remove_item`], a missing line is an error here.
    #[tracing::instrument(skip(self))]
    pub async fn update_item_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<Cart, CartError> {
        let mut cart = self
            .repository
            .find_or_create(user_id)
            .await
            .map_err(storage(UPDATE_QUANTITY))?;

        if !cart.set_quantity(product_id, quantity) {
            return Err(CartError::ItemNotFound {
                product_id: product_id.to_string(),
            });
        }

        self.repository
            .save(&cart)
            .await
            .map_err(storage(UPDATE_QUANTITY))
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: &str) -> Result<Cart, CartError> {
        let mut cart = self
            .repository
            .find_or_create(user_id)
            .await
            .map_err(storage(CLEAR_CART))?;

        cart.items.clear();

        self.repository
            .save(&cart)
            .await
            .map_err(storage(CLEAR_CART))
    }

    /// Folds a guest cart into the authenticated user's cart and deletes the
    /// guest record.
    ///
    /// The read, write and delete are separate storage calls with no
    /// transaction around them, so a concurrent write to either cart can be
    /// lost. The guest cart is only deleted after the merged cart has been
    /// saved.
    #[tracing::instrument(skip(self))]
    pub async fn merge_guest_cart(
        &self,
        guest_id: &str,
        user_id: &str,
    ) -> Result<Cart, CartError> {
        if guest_id == user_id {
            return self
                .repository
                .find_or_create(user_id)
                .await
                .map_err(storage(MERGE_GUEST_CART));
        }

        let guest_cart = self
            .repository
            .find(guest_id)
            .await
            .map_err(storage(MERGE_GUEST_CART))?;
        let mut user_cart = self
            .repository
            .find_or_create(user_id)
            .await
            .map_err(storage(MERGE_GUEST_CART))?;

        let Some(guest_cart) = guest_cart.filter(|cart| !cart.items.is_empty()) else {
            tracing::debug!("no guest items to merge");
            return Ok(user_cart);
        };

        user_cart
            .absorb(&guest_cart.items)
            .map_err(|product_id| CartError::QuantityOverflow { product_id })?;

        let merged = self
            .repository
            .save(&user_cart)
            .await
            .map_err(storage(MERGE_GUEST_CART))?;

        self.repository
            .delete(guest_id)
            .await
            .map_err(storage(MERGE_GUEST_CART))?;

        tracing::info!(
            merged_items = guest_cart.items.len(),
            "guest cart merged"
        );
        Ok(merged)
    }
}
