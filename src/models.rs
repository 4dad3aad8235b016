use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn empty(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[cfg(test)]
    fn item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    /// Adds `quantity` to the line for `product_id`, appending a new line when
    /// there is none. Returns the resulting quantity, or `None` if the sum
    /// overflows, in which case the cart is left untouched.
    pub fn add_quantity(&mut self, product_id: &str, quantity: i32) -> Option<i32> {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(item) => {
                item.quantity = item.quantity.checked_add(quantity)?;
                Some(item.quantity)
            }
            None => {
                self.items.push(CartItem {
                    product_id: product_id.to_string(),
                    quantity,
                });
                Some(quantity)
            }
        }
    }

    /// Replaces the quantity of an existing line; non-positive quantities drop it.
    /// Returns `false` when the cart has no line for `product_id`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i32) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.product_id == product_id)
        else {
            return false;
        };

        if quantity <= 0 {
            self.items.remove(index);
        } else if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        true
    }

    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        self.items.len() != before
    }

    /// Folds `items` into this cart, summing lines that share a product.
    /// On overflow returns the offending product id and leaves the cart as it was.
    pub fn absorb(&mut self, items: &[CartItem]) -> Result<(), String> {
        let mut merged = self.items.clone();
        for incoming in items {
            match merged
                .iter_mut()
                .find(|item| item.product_id == incoming.product_id)
            {
                Some(item) => {
                    item.quantity = item
                        .quantity
                        .checked_add(incoming.quantity)
                        .ok_or_else(|| incoming.product_id.clone())?;
                }
                None => merged.push(incoming.clone()),
            }
        }
        self.items = merged;
        Ok(())
    }
}
