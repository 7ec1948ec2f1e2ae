//! SurrealDB implementation of [`HotelRepository`].

use chrono::{DateTime, Utc};
use hotelier_core::error::HotelierResult;
use hotelier_core::models::hotel::{
    Address, ContactInfo, Hotel, HotelData, HotelDraft, Owner, Subscription, SubscriptionStatus,
    UpdateHotel,
};
use hotelier_core::repository::{HotelRepository, PaginatedResult, Pagination};
use hotelier_core::validation;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Stored shape
// -----------------------------------------------------------------------

#[derive(Debug, SurrealValue)]
struct AddressRow {
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
}

#[derive(Debug, SurrealValue)]
struct ContactInfoRow {
    phone: String,
    email: String,
    website: String,
}

#[derive(Debug, SurrealValue)]
struct OwnerRow {
    user_id: String,
    name: String,
    email: String,
    phone: String,
}

#[derive(Debug, SurrealValue)]
struct SubscriptionRow {
    plan: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: String,
}

/// Everything a write sets; bound as a single `$hotel` parameter.
#[derive(Debug, SurrealValue)]
struct HotelContent {
    name: String,
    address: AddressRow,
    contact_info: ContactInfoRow,
    owner: OwnerRow,
    subscription: SubscriptionRow,
}

/// Row returned by `CREATE`/`UPDATE`/point lookups, where the id is known.
#[derive(Debug, SurrealValue)]
struct HotelRow {
    name: String,
    address: AddressRow,
    contact_info: ContactInfoRow,
    owner: OwnerRow,
    subscription: SubscriptionRow,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct HotelRowWithId {
    record_id: String,
    name: String,
    address: AddressRow,
    contact_info: ContactInfoRow,
    owner: OwnerRow,
    subscription: SubscriptionRow,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

impl From<HotelData> for HotelContent {
    fn from(data: HotelData) -> Self {
        Self {
            name: data.name,
            address: AddressRow {
                street: data.address.street,
                city: data.address.city,
                state: data.address.state,
                zip_code: data.address.zip_code,
                country: data.address.country,
            },
            contact_info: ContactInfoRow {
                phone: data.contact_info.phone,
                email: data.contact_info.email,
                website: data.contact_info.website,
            },
            owner: OwnerRow {
                user_id: data.owner.user_id.to_string(),
                name: data.owner.name,
                email: data.owner.email,
                phone: data.owner.phone,
            },
            subscription: SubscriptionRow {
                plan: data.subscription.plan.as_str().to_string(),
                start_date: data.subscription.start_date,
                end_date: data.subscription.end_date,
                status: data.subscription.status.as_str().to_string(),
            },
        }
    }
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

impl HotelRow {
    fn into_hotel(self, id: Uuid) -> Result<Hotel, DbError> {
        let subscription = Subscription {
            plan: self
                .subscription
                .plan
                .parse()
                .map_err(|e| DbError::Decode(format!("{e}")))?,
            start_date: self.subscription.start_date,
            end_date: self.subscription.end_date,
            status: self
                .subscription
                .status
                .parse()
                .map_err(|e| DbError::Decode(format!("{e}")))?,
        };
        Ok(Hotel {
            id,
            name: self.name,
            address: Address {
                street: self.address.street,
                city: self.address.city,
                state: self.address.state,
                zip_code: self.address.zip_code,
                country: self.address.country,
            },
            contact_info: ContactInfo {
                phone: self.contact_info.phone,
                email: self.contact_info.email,
                website: self.contact_info.website,
            },
            owner: Owner {
                user_id: parse_uuid(&self.owner.user_id, "owner")?,
                name: self.owner.name,
                email: self.owner.email,
                phone: self.owner.phone,
            },
            subscription,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl HotelRowWithId {
    fn try_into_hotel(self) -> Result<Hotel, DbError> {
        let id = parse_uuid(&self.record_id, "hotel")?;
        HotelRow {
            name: self.name,
            address: self.address,
            contact_info: self.contact_info,
            owner: self.owner,
            subscription: self.subscription,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_hotel(id)
    }
}

fn not_found(id: impl Into<String>) -> DbError {
    DbError::NotFound {
        entity: "hotel".into(),
        id: id.into(),
    }
}

// -----------------------------------------------------------------------
// Repository
// -----------------------------------------------------------------------

/// SurrealDB implementation of the Hotel repository.
#[derive(Clone)]
pub struct SurrealHotelRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealHotelRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Run the pre-write hook and log any status correction.
    fn prepare_write(id: Uuid, mut data: HotelData, now: DateTime<Utc>) -> HotelContent {
        if let Some(previous) = data.normalize_before_save(now) {
            info!(
                hotel_id = %id,
                from = %previous,
                to = %data.subscription.status,
                "Subscription status corrected before write"
            );
        }
        data.into()
    }

    /// Shared body of the filtered list queries. `filter` is a trusted
    /// WHERE clause; `params` are its bound values.
    async fn list_where(
        &self,
        filter: &str,
        params: Vec<(&'static str, String)>,
        pagination: Pagination,
    ) -> HotelierResult<PaginatedResult<Hotel>> {
        let mut count_query = self
            .db
            .query(format!("SELECT count() AS total FROM hotel {filter} GROUP ALL"));
        for (key, value) in params.iter().cloned() {
            count_query = count_query.bind((key, value));
        }
        let mut count_result = count_query.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map_or(0, |r| r.total);

        let mut list_query = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM hotel {filter} \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset"
            ))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        for (key, value) in params {
            list_query = list_query.bind((key, value));
        }
        let mut result = list_query.await.map_err(DbError::from)?;
        let rows: Vec<HotelRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(HotelRowWithId::try_into_hotel)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}

impl<C: Connection> HotelRepository for SurrealHotelRepository<C> {
    async fn create(&self, input: HotelDraft) -> HotelierResult<Hotel> {
        let data = validation::validate(input)?;
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let content = Self::prepare_write(id, data, Utc::now());

        let result = self
            .db
            .query(
                "CREATE type::record('hotel', $id) SET \
                 name = $hotel.name, \
                 address = $hotel.address, \
                 contact_info = $hotel.contact_info, \
                 owner = $hotel.owner, \
                 subscription = $hotel.subscription",
            )
            .bind(("id", id_str.clone()))
            .bind(("hotel", content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        debug!(hotel_id = %id, "Hotel created");
        Ok(row.into_hotel(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> HotelierResult<Hotel> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('hotel', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        Ok(row.into_hotel(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateHotel) -> HotelierResult<Hotel> {
        let mut draft = HotelDraft::from(self.get_by_id(id).await?);
        input.apply_to(&mut draft);
        let data = validation::validate(draft)?;
        let content = Self::prepare_write(id, data, Utc::now());

        let id_str = id.to_string();
        let result = self
            .db
            .query(
                "UPDATE type::record('hotel', $id) SET \
                 name = $hotel.name, \
                 address = $hotel.address, \
                 contact_info = $hotel.contact_info, \
                 owner = $hotel.owner, \
                 subscription = $hotel.subscription, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("hotel", content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<HotelRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(id_str))?;

        debug!(hotel_id = %id, "Hotel updated");
        Ok(row.into_hotel(id)?)
    }

    async fn delete(&self, id: Uuid) -> HotelierResult<()> {
        self.db
            .query("DELETE type::record('hotel', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        debug!(hotel_id = %id, "Hotel deleted");
        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> HotelierResult<PaginatedResult<Hotel>> {
        self.list_where("", Vec::new(), pagination).await
    }

    async fn list_by_name(
        &self,
        name: &str,
        pagination: Pagination,
    ) -> HotelierResult<PaginatedResult<Hotel>> {
        self.list_where(
            "WHERE name = $name",
            vec![("name", name.trim().to_string())],
            pagination,
        )
        .await
    }

    async fn list_by_owner(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> HotelierResult<PaginatedResult<Hotel>> {
        self.list_where(
            "WHERE owner.user_id = $user_id",
            vec![("user_id", user_id.to_string())],
            pagination,
        )
        .await
    }

    async fn list_by_status(
        &self,
        status: SubscriptionStatus,
        pagination: Pagination,
    ) -> HotelierResult<PaginatedResult<Hotel>> {
        self.list_where(
            "WHERE subscription.status = $status",
            vec![("status", status.as_str().to_string())],
            pagination,
        )
        .await
    }

    async fn list_by_location(
        &self,
        city: &str,
        state: &str,
        pagination: Pagination,
    ) -> HotelierResult<PaginatedResult<Hotel>> {
        self.list_where(
            "WHERE address.city = $city AND address.state = $state",
            vec![
                ("city", city.trim().to_string()),
                ("state", state.trim().to_string()),
            ],
            pagination,
        )
        .await
    }
}
