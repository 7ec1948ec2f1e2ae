//! Database-specific error types and conversions.

use hotelier_core::error::HotelierError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query rejected: {0}")]
    Query(String),

    /// A stored value could not be mapped back onto the domain model.
    #[error("Corrupt record: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for HotelierError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => HotelierError::NotFound { entity, id },
            other => HotelierError::Database(other.to_string()),
        }
    }
}
