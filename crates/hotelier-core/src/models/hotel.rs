//! Hotel domain model.
//!
//! A hotel is the tenant record of the booking platform. Address, contact
//! details, owner and subscription are embedded values: they have no
//! identity of their own and are only ever reached through their hotel.
//!
//! Records arrive as a [`HotelDraft`] (raw caller input), become
//! [`HotelData`] once they pass [`crate::validation::validate`], and are
//! returned from storage as a [`Hotel`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;


/// A label that is outside the closed set of an enum field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{value}' is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Commercial plan of a hotel's subscription.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    #[default]
    Basic,
    Standard,
    Premium,
}

impl SubscriptionPlan {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Standard, Self::Premium];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "subscription plan",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a subscription.
///
/// The state is derived from the subscription window on every write;
/// see [`Subscription::status_at`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    #[default]
    Trial,
}

impl SubscriptionStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Expired, Self::Trial];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Trial => "trial",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "subscription status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone: String,
    /// Always stored lower-cased.
    pub email: String,
    pub website: String,
}

/// The registered owner of a hotel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Identifier of a user in the identity subsystem. Not owned here.
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub plan: SubscriptionPlan,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
}

impl Subscription {
    /// The status the subscription window implies at `now`.
    ///
    /// `now == end_date` still counts as active here, while
    /// [`Subscription::is_active`] already reports `false` at that instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        if now < self.start_date {
            SubscriptionStatus::Trial
        } else if now > self.end_date {
            SubscriptionStatus::Expired
        } else {
            SubscriptionStatus::Active
        }
    }

    /// Recompute `status` from the window. Returns the previous status
    /// when it changed.
    pub fn normalize(&mut self, now: DateTime<Utc>) -> Option<SubscriptionStatus> {
        let next = self.status_at(now);
        if next == self.status {
            return None;
        }
        Some(std::mem::replace(&mut self.status, next))
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && now >= self.start_date && now < self.end_date
    }

    /// Whole days left until `end_date`, rounding partial days up.
    /// Zero once the subscription has ended.
    pub fn days_until_expiration(&self, now: DateTime<Utc>) -> u64 {
        if now > self.end_date {
            return 0;
        }
        let remaining: TimeDelta = self.end_date - now;
        let whole = remaining.num_days();
        let partial = remaining - TimeDelta::days(whole) > TimeDelta::zero();
        u64::try_from(whole + i64::from(partial)).unwrap_or(0)
    }
}

/// Validated hotel content, ready to be written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HotelData {
    pub name: String,
    pub address: Address,
    pub contact_info: ContactInfo,
    pub owner: Owner,
    pub subscription: Subscription,
}

impl HotelData {
    /// Pre-write hook: bring `subscription.status` in line with `now`.
    ///
    /// Every create and update runs this immediately before the write.
    /// Only the status is touched.
    pub fn normalize_before_save(&mut self, now: DateTime<Utc>) -> Option<SubscriptionStatus> {
        self.subscription.normalize(now)
    }
}

/// A stored hotel tenant record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub address: Address,
    pub contact_info: ContactInfo,
    pub owner: Owner,
    pub subscription: Subscription,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    pub fn from_data(
        id: Uuid,
        data: HotelData,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: data.name,
            address: data.address,
            contact_info: data.contact_info,
            owner: data.owner,
            subscription: data.subscription,
            created_at,
            updated_at,
        }
    }

    pub fn is_subscription_active(&self, now: DateTime<Utc>) -> bool {
        self.subscription.is_active(now)
    }

    pub fn days_until_expiration(&self, now: DateTime<Utc>) -> u64 {
        self.subscription.days_until_expiration(now)
    }
}

// ---------------------------------------------------------------------------
// Caller input
// ---------------------------------------------------------------------------

/// Unvalidated address. Absent fields deserialize as empty text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressDraft {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfoDraft {
    pub phone: String,
    pub email: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct OwnerDraft {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Unvalidated subscription. `plan` and `status` stay raw labels so that
/// out-of-set values can be reported instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionDraft {
    pub plan: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// Candidate hotel record as supplied by a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HotelDraft {
    pub name: String,
    pub address: Option<AddressDraft>,
    pub contact_info: Option<ContactInfoDraft>,
    pub owner: Option<OwnerDraft>,
    pub subscription: Option<SubscriptionDraft>,
}

impl From<HotelData> for HotelDraft {
    fn from(hotel: HotelData) -> Self {
        Self {
            name: hotel.name,
            address: Some(AddressDraft {
                street: hotel.address.street,
                city: hotel.address.city,
                state: hotel.address.state,
                zip_code: hotel.address.zip_code,
                country: hotel.address.country,
            }),
            contact_info: Some(ContactInfoDraft {
                phone: hotel.contact_info.phone,
                email: hotel.contact_info.email,
                website: hotel.contact_info.website,
            }),
            owner: Some(OwnerDraft {
                user_id: Some(hotel.owner.user_id),
                name: hotel.owner.name,
                email: hotel.owner.email,
                phone: hotel.owner.phone,
            }),
            subscription: Some(SubscriptionDraft {
                plan: Some(hotel.subscription.plan.as_str().to_string()),
                start_date: Some(hotel.subscription.start_date),
                end_date: Some(hotel.subscription.end_date),
                status: Some(hotel.subscription.status.as_str().to_string()),
            }),
        }
    }
}

impl From<Hotel> for HotelDraft {
    fn from(hotel: Hotel) -> Self {
        Self::from(HotelData {
            name: hotel.name,
            address: hotel.address,
            contact_info: hotel.contact_info,
            owner: hotel.owner,
            subscription: hotel.subscription,
        })
    }
}

/// Changes to an existing hotel.
///
/// Each embedded value is replaced whole when present; defaults apply to
/// a replacement subscription exactly as they do on create.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateHotel {
    pub name: Option<String>,
    pub address: Option<AddressDraft>,
    pub contact_info: Option<ContactInfoDraft>,
    pub owner: Option<OwnerDraft>,
    pub subscription: Option<SubscriptionDraft>,
}

impl UpdateHotel {
    /// Merge this patch into `draft`.
    pub fn apply_to(self, draft: &mut HotelDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if self.address.is_some() {
            draft.address = self.address;
        }
        if self.contact_info.is_some() {
            draft.contact_info = self.contact_info;
        }
        if self.owner.is_some() {
            draft.owner = self.owner;
        }
        if self.subscription.is_some() {
            draft.subscription = self.subscription;
        }
    }
}
