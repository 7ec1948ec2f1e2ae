//! Error types for the Hotelier system.

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum HotelierError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The owner's user id does not resolve in the identity subsystem.
    #[error("Referenced user not found: {user_id}")]
    ReferenceUnresolved { user_id: Uuid },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type HotelierResult<T> = Result<T, HotelierError>;
