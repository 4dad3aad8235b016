use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::Cart;

use super::{CartRepository, RepositoryError};

/// Process-local cart storage. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: RwLock<HashMap<String, Cart>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.carts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.carts.read().await.is_empty()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find(&self, user_id: &str) -> Result<Option<Cart>, RepositoryError> {
        Ok(self.carts.read().await.get(user_id).cloned())
    }

    async fn find_or_create(&self, user_id: &str) -> Result<Cart, RepositoryError> {
        let mut carts = self.carts.write().await;
        let cart = carts
            .entry(user_id.to_string())
            .or_insert_with(|| Cart::empty(user_id, Utc::now()));
        Ok(cart.clone())
    }

    async fn save(&self, cart: &Cart) -> Result<Cart, RepositoryError> {
        let mut carts = self.carts.write().await;
        let created_at = carts
            .get(&cart.user_id)
            .map_or(cart.created_at, |stored| stored.created_at);

        let stored = Cart {
            user_id: cart.user_id.clone(),
            items: cart.items.clone(),
            created_at,
            updated_at: Utc::now(),
        };
        carts.insert(stored.user_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, user_id: &str) -> Result<u64, RepositoryError> {
        Ok(u64::from(self.carts.write().await.remove(user_id).is_some()))
    }
}
