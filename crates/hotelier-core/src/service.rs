//! Hotel registration service — the write path for hotel records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{HotelierError, HotelierResult};
use crate::models::hotel::{Hotel, HotelDraft, SubscriptionStatus, UpdateHotel};
use crate::repository::{HotelRepository, UserDirectory};
use crate::validation;

/// Derived subscription state of one hotel at a given instant.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    pub hotel_id: Uuid,
    pub status: SubscriptionStatus,
    pub is_active: bool,
    pub days_until_expiration: u64,
}

impl SubscriptionSummary {
    pub fn of(hotel: &Hotel, now: DateTime<Utc>) -> Self {
        Self {
            hotel_id: hotel.id,
            status: hotel.subscription.status,
            is_active: hotel.is_subscription_active(now),
            days_until_expiration: hotel.days_until_expiration(now),
        }
    }
}

/// Hotel service.
///
/// Generic over repository implementations so that the record logic
/// has no dependency on the database crate.
pub struct HotelService<R: HotelRepository, D: UserDirectory> {
    hotels: R,
    users: D,
}

impl<R: HotelRepository, D: UserDirectory> HotelService<R, D> {
    pub fn new(hotels: R, users: D) -> Self {
        Self { hotels, users }
    }

    /// Register a new hotel for an existing owner.
    pub async fn register(&self, draft: HotelDraft) -> HotelierResult<Hotel> {
        let data = validation::validate(draft)?;
        self.ensure_user_exists(data.owner.user_id).await?;

        let hotel = self.hotels.create(HotelDraft::from(data)).await?;
        info!(hotel_id = %hotel.id, owner = %hotel.owner.user_id, "Hotel registered");
        Ok(hotel)
    }

    /// Apply a patch. A replacement owner must resolve in the directory.
    pub async fn update(&self, id: Uuid, patch: UpdateHotel) -> HotelierResult<Hotel> {
        if let Some(user_id) = patch.owner.as_ref().and_then(|o| o.user_id) {
            self.ensure_user_exists(user_id).await?;
        }
        self.hotels.update(id, patch).await
    }

    pub async fn get(&self, id: Uuid) -> HotelierResult<Hotel> {
        self.hotels.get_by_id(id).await
    }

    pub async fn subscription_summary(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> HotelierResult<SubscriptionSummary> {
        let hotel = self.hotels.get_by_id(id).await?;
        Ok(SubscriptionSummary::of(&hotel, now))
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> HotelierResult<()> {
        if self.users.user_exists(user_id).await? {
            Ok(())
        } else {
            debug!(%user_id, "Owner reference did not resolve");
            Err(HotelierError::ReferenceUnresolved { user_id })
        }
    }
}
