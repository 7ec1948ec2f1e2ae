//! Owner lookups against a `user` table kept by the identity subsystem in
//! the same database.

use hotelier_core::error::HotelierResult;
use hotelier_core::repository::UserDirectory;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

/// Read-only view of the identity subsystem's users, keyed by UUID.
#[derive(Clone)]
pub struct SurrealUserDirectory<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserDirectory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserDirectory for SurrealUserDirectory<C> {
    async fn user_exists(&self, user_id: Uuid) -> HotelierResult<bool> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id FROM type::record('user', $id)")
            .bind(("id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<IdRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }
}
