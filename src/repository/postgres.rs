use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, Set, sea_query::OnConflict,
};

use crate::{
    entity::carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts, Model as CartModel},
    models::{Cart, CartItem},
};

use super::{CartRepository, RepositoryError};

#[derive(Debug, Clone)]
pub struct PgCartRepository {
    orm: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn find(&self, user_id: &str) -> Result<Option<Cart>, RepositoryError> {
        Carts::find_by_id(user_id.to_string())
            .one(&self.orm)
            .await?
            .map(cart_from_entity)
            .transpose()
    }

    async fn find_or_create(&self, user_id: &str) -> Result<Cart, RepositoryError> {
        let now = Utc::now();
        let empty = CartActive {
            user_id: Set(user_id.to_string()),
            items: Set(serde_json::json!([])),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        // A concurrent creator may win the insert; either way the row exists afterwards.
        Carts::insert(empty)
            .on_conflict(OnConflict::column(CartCol::UserId).do_nothing().to_owned())
            .exec_without_returning(&self.orm)
            .await?;

        self.find(user_id)
            .await?
            .ok_or_else(|| RepositoryError::Missing(user_id.to_string()))
    }

    async fn save(&self, cart: &Cart) -> Result<Cart, RepositoryError> {
        let items = serde_json::to_value(&cart.items).map_err(|source| {
            RepositoryError::Malformed {
                user_id: cart.user_id.clone(),
                source,
            }
        })?;
        let now = Utc::now();

        let existing = Carts::find_by_id(cart.user_id.clone())
            .one(&self.orm)
            .await?;

        let model = match existing {
            Some(model) => {
                let mut active: CartActive = model.into();
                active.items = Set(items);
                active.updated_at = Set(now.into());
                active.update(&self.orm).await?
            }
            None => {
                CartActive {
                    user_id: Set(cart.user_id.clone()),
                    items: Set(items),
                    created_at: Set(cart.created_at.into()),
                    updated_at: Set(now.into()),
                }
                .insert(&self.orm)
                .await?
            }
        };

        cart_from_entity(model)
    }

    async fn delete(&self, user_id: &str) -> Result<u64, RepositoryError> {
        let result = Carts::delete_by_id(user_id.to_string())
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected)
    }
}

fn cart_from_entity(model: CartModel) -> Result<Cart, RepositoryError> {
    let items: Vec<CartItem> =
        serde_json::from_value(model.items).map_err(|source| RepositoryError::Malformed {
            user_id: model.user_id.clone(),
            source,
        })?;

    Ok(Cart {
        user_id: model.user_id,
        items,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
