//! Database connection pool and migrations.

use std::sync::{Arc, RwLock};

use diesel::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::storage::{CredentialRecord, StorageError, UserStore};

use super::config::DbConfig;
use super::user::User;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

type PgPool = Pool<ConnectionManager<PgConnection>>;

/// PostgreSQL connection pool wrapper.
///
/// Clones share the pool. [`UserStore::close`] drops it for every clone; idle
/// connections are released at once and checked-out ones when returned.
#[derive(Debug, Clone)]
pub struct DbConnection {
    pool: Arc<RwLock<Option<PgPool>>>,
}

impl DbConnection {
    /// Creates the pool. Fails when the database cannot be reached.
    pub fn new(config: &DbConfig) -> Result<Self, StorageError> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        Ok(Self::from_pool(Pool::builder().build(manager)?))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(Some(pool))),
        }
    }

    /// Runs pending migrations.
    pub fn setup(self) -> Result<Self, StorageError> {
        info!("Running Database Migrations");
        self.get()?
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| StorageError::Migration(err.to_string()))?;
        Ok(self)
    }

    pub fn get(
        &self,
    ) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StorageError> {
        let pool = self
            .pool
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .clone()
            .ok_or(StorageError::Closed)?;
        Ok(pool.get()?)
    }
}

impl UserStore for DbConnection {
    fn find_by_username(&self, username: &str) -> Result<CredentialRecord, StorageError> {
        Ok(User::fetch_by_username(username, self)?.into())
    }

    fn ping(&self) -> Result<(), StorageError> {
        let conn = &mut self.get()?;
        diesel::sql_query("SELECT 1").execute(conn)?;
        Ok(())
    }

    fn close(&self) {
        info!("Closing database pool");
        match self.pool.write() {
            Ok(mut pool) => drop(pool.take()),
            Err(poisoned) => drop(poisoned.into_inner().take()),
        }
    }
}
