//! Backend selection and the bundle of store handles the upper layers use.

use std::sync::Arc;

use tracing::info;

use booker_core::config::DatabaseConfig;
use booker_core::result::AppResult;
use booker_core::traits::Clock;

use crate::connection::DatabasePool;
use crate::engine::PgBookingEngine;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::postgres::PgInventoryStore;
use crate::repositories::UserRepository;
use crate::store::{BookingEngine, InventoryStore, UserDirectory};

/// Trait-object handles onto one backend.
#[derive(Clone)]
pub struct Stores {
    /// Event and booking reads, event creation.
    pub inventory: Arc<dyn InventoryStore>,
    /// The booking transitions.
    pub engine: Arc<dyn BookingEngine>,
    /// User registration and lookup.
    pub users: Arc<dyn UserDirectory>,
    /// Present for the PostgreSQL backend.
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Open the backend named by `config.url`.
    pub async fn open(config: &DatabaseConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        if config.is_memory() {
            info!("Using in-memory store");
            return Ok(Self::memory(clock));
        }
        let pool = DatabasePool::connect(config).await?;
        Ok(Self::postgres(pool, clock))
    }

    /// Stores over an open PostgreSQL pool.
    pub fn postgres(pool: DatabasePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            inventory: Arc::new(PgInventoryStore::new(pool.clone())),
            engine: Arc::new(PgBookingEngine::new(pool.pool().clone(), clock)),
            users: Arc::new(UserRepository::new(pool.pool().clone())),
            pool: Some(pool),
        }
    }

    /// Stores over a fresh in-memory backend.
    pub fn memory(clock: Arc<dyn Clock>) -> Self {
        let store = MemoryStore::new(clock);
        Self {
            inventory: Arc::new(store.clone()),
            engine: Arc::new(store.clone()),
            users: Arc::new(store),
            pool: None,
        }
    }

    /// The PostgreSQL pool, if this is the PostgreSQL backend.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Apply pending migrations. The memory backend has no schema.
    pub async fn migrate(&self) -> AppResult<()> {
        match &self.pool {
            Some(pool) => run_migrations(pool.pool()).await,
            None => Ok(()),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("postgres", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}
