//! Cart persistence.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::models::Cart;

mod memory;
mod postgres;

pub use memory::InMemoryCartRepository;
pub use postgres::PgCartRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("malformed items for cart {user_id}: {source}")]
    Malformed {
        user_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cart {0} disappeared while being written")]
    Missing(String),
}

/// Storage for cart documents, keyed by user id.
///
/// Implementations stamp `created_at` on first insert and refresh
/// `updated_at` on every write. Nothing here serializes concurrent writers:
/// the last `save` for a user id wins.
#[automock]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Looks up a cart without creating one.
    async fn find(&self, user_id: &str) -> Result<Option<Cart>, RepositoryError>;

    /// Returns the stored cart, inserting an empty one first if needed.
    /// Safe to call concurrently for the same user id.
    async fn find_or_create(&self, user_id: &str) -> Result<Cart, RepositoryError>;

    /// Writes the cart's items and returns the stored document.
    async fn save(&self, cart: &Cart) -> Result<Cart, RepositoryError>;

    /// Deletes a cart, returning the number of records removed.
    async fn delete(&self, user_id: &str) -> Result<u64, RepositoryError>;
}
