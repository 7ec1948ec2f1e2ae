//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations must validate
//! and normalize on every write; see [`HotelRepository`].

use uuid::Uuid;

use crate::error::HotelierResult;
use crate::models::hotel::{Hotel, HotelDraft, SubscriptionStatus, UpdateHotel};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Hotels
// ---------------------------------------------------------------------------

/// Persistence for hotel records.
///
/// `create` validates the candidate and `update` validates the stored
/// record merged with the patch. Both then run
/// [`crate::models::hotel::HotelData::normalize_before_save`] with the
/// current instant immediately before the write. Nothing is written when
/// validation fails.
pub trait HotelRepository: Send + Sync {
    fn create(&self, input: HotelDraft) -> impl Future<Output = HotelierResult<Hotel>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = HotelierResult<Hotel>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateHotel,
    ) -> impl Future<Output = HotelierResult<Hotel>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = HotelierResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = HotelierResult<PaginatedResult<Hotel>>> + Send;
    fn list_by_name(
        &self,
        name: &str,
        pagination: Pagination,
    ) -> impl Future<Output = HotelierResult<PaginatedResult<Hotel>>> + Send;
    fn list_by_owner(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = HotelierResult<PaginatedResult<Hotel>>> + Send;
    /// Filters on the status as of the last write.
    fn list_by_status(
        &self,
        status: SubscriptionStatus,
        pagination: Pagination,
    ) -> impl Future<Output = HotelierResult<PaginatedResult<Hotel>>> + Send;
    fn list_by_location(
        &self,
        city: &str,
        state: &str,
        pagination: Pagination,
    ) -> impl Future<Output = HotelierResult<PaginatedResult<Hotel>>> + Send;
}

// ---------------------------------------------------------------------------
// Identity subsystem
// ---------------------------------------------------------------------------

/// Lookup into the external user store that `owner.userId` points at.
pub trait UserDirectory: Send + Sync {
    fn user_exists(&self, user_id: Uuid) -> impl Future<Output = HotelierResult<bool>> + Send;
}
