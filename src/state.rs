use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::{AppConfig, StorageBackend},
    db::{create_orm_conn, run_migrations},
    repository::{CartRepository, InMemoryCartRepository, PgCartRepository},
    services::cart_service::CartStore,
};

#[derive(Clone)]
pub struct AppState {
    pub carts: CartStore,
    pub jwt_secret: Option<Arc<str>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn CartRepository>, jwt_secret: Option<&str>) -> Self {
        Self {
            carts: CartStore::new(repository),
            jwt_secret: jwt_secret.map(Arc::from),
        }
    }

    /// Connects the configured storage backend and runs migrations where needed.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let repository: Arc<dyn CartRepository> = match config.storage {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is not set")?;
                let orm = create_orm_conn(database_url).await?;
                run_migrations(&orm).await?;
                Arc::new(PgCartRepository::new(orm))
            }
            StorageBackend::Memory => {
                tracing::warn!("using in-memory cart storage, carts are lost on restart");
                Arc::new(InMemoryCartRepository::new())
            }
        };

        if config.jwt_secret.is_none() {
            tracing::warn!("JWT_SECRET is not set, guest cart merges will be refused");
        }

        Ok(Self::new(repository, config.jwt_secret.as_deref()))
    }
}
