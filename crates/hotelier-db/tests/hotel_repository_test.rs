//! Integration tests for the hotel repository using in-memory SurrealDB.

use chrono::{Duration, Utc};
use hotelier_core::error::HotelierError;
use hotelier_core::models::hotel::{
    AddressDraft, ContactInfoDraft, HotelDraft, OwnerDraft, SubscriptionDraft,
    SubscriptionPlan, SubscriptionStatus, UpdateHotel,
};
use hotelier_core::repository::{HotelRepository, Pagination};
use hotelier_core::validation::ValidationErrorKind;
use hotelier_db::repository::SurrealHotelRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> SurrealHotelRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    hotelier_db::run_migrations(&db).await.unwrap();
    SurrealHotelRepository::new(db)
}

/// A draft whose subscription window is `[now + start_days, now + end_days]`.
fn draft(name: &str, city: &str, owner: Uuid, start_days: i64, end_days: i64) -> HotelDraft {
    let now = Utc::now();
    HotelDraft {
        name: name.into(),
        address: Some(AddressDraft {
            street: "12 Harbour Road".into(),
            city: city.into(),
            state: "Lisboa".into(),
            zip_code: "1100-148".into(),
            country: "Portugal".into(),
        }),
        contact_info: Some(ContactInfoDraft {
            phone: "+351 21 000 0000".into(),
            email: "Front.Desk@Example.com".into(),
            website: "https://hotel.example".into(),
        }),
        owner: Some(OwnerDraft {
            user_id: Some(owner),
            name: "Ana Costa".into(),
            email: "ana@example.com".into(),
            phone: "(21) 555-0101".into(),
        }),
        subscription: Some(SubscriptionDraft {
            plan: Some("standard".into()),
            start_date: Some(now + Duration::days(start_days)),
            end_date: Some(now + Duration::days(end_days)),
            status: None,
        }),
    }
}

#[tokio::test]
async fn create_and_get_hotel() {
    let repo = setup().await;
    let owner = Uuid::new_v4();

    let hotel = repo
        .create(draft("Harbour View", "Lisboa", owner, -1, 30))
        .await
        .unwrap();

    assert_eq!(hotel.name, "Harbour View");
    assert_eq!(hotel.contact_info.email, "front.desk@example.com");
    assert_eq!(hotel.owner.user_id, owner);
    assert_eq!(hotel.subscription.plan, SubscriptionPlan::Standard);

    let fetched = repo.get_by_id(hotel.id).await.unwrap();
    assert_eq!(fetched.id, hotel.id);
    assert_eq!(fetched.address, hotel.address);
    assert_eq!(fetched.subscription, hotel.subscription);
}

#[tokio::test]
async fn create_normalizes_status_from_dates() {
    let repo = setup().await;
    let owner = Uuid::new_v4();

    let current = repo
        .create(draft("Current", "Lisboa", owner, -1, 30))
        .await
        .unwrap();
    assert_eq!(current.subscription.status, SubscriptionStatus::Active);
    assert!(current.is_subscription_active(Utc::now()));

    let future = repo
        .create(draft("Future", "Lisboa", owner, 5, 30))
        .await
        .unwrap();
    assert_eq!(future.subscription.status, SubscriptionStatus::Trial);

    let mut lapsed = draft("Lapsed", "Lisboa", owner, -30, -1);
    if let Some(sub) = lapsed.subscription.as_mut() {
        sub.status = Some("active".into());
    }
    let lapsed = repo.create(lapsed).await.unwrap();
    assert_eq!(lapsed.subscription.status, SubscriptionStatus::Expired);
    assert_eq!(lapsed.days_until_expiration(Utc::now()), 0);
}

#[tokio::test]
async fn create_rejects_invalid_record_and_writes_nothing() {
    let repo = setup().await;

    let mut bad = draft("   ", "Lisboa", Uuid::new_v4(), -1, 30);
    bad.contact_info = Some(ContactInfoDraft {
        phone: "abc".into(),
        email: "NOT AN EMAIL".into(),
        website: "https://hotel.example".into(),
    });

    let err = repo.create(bad).await.unwrap_err();
    match err {
        HotelierError::Validation(errors) => {
            assert_eq!(
                errors.field("name").unwrap().kind,
                ValidationErrorKind::RequiredFieldMissing
            );
            assert_eq!(
                errors.field("contactInfo.phone").unwrap().kind,
                ValidationErrorKind::PatternMismatch
            );
            assert_eq!(
                errors.field("contactInfo.email").unwrap().kind,
                ValidationErrorKind::PatternMismatch
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let all = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(all.total, 0);
    assert!(all.items.is_empty());
}

#[tokio::test]
async fn update_hotel_revalidates_and_refreshes_timestamp() {
    let repo = setup().await;
    let hotel = repo
        .create(draft("Before", "Lisboa", Uuid::new_v4(), -1, 30))
        .await
        .unwrap();

    let updated = repo
        .update(
            hotel.id,
            UpdateHotel {
                name: Some("  After  ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, hotel.id);
    assert_eq!(updated.name, "After");
    assert_eq!(updated.address, hotel.address); // unchanged
    assert!(updated.updated_at >= hotel.updated_at);
    assert_eq!(updated.created_at, hotel.created_at);
}

#[tokio::test]
async fn update_rejects_invalid_patch() {
    let repo = setup().await;
    let hotel = repo
        .create(draft("Strict", "Lisboa", Uuid::new_v4(), -1, 30))
        .await
        .unwrap();

    let err = repo
        .update(
            hotel.id,
            UpdateHotel {
                contact_info: Some(ContactInfoDraft {
                    phone: "abc".into(),
                    email: "desk@example.com".into(),
                    website: "https://hotel.example".into(),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    match err {
        HotelierError::Validation(errors) => {
            let field = errors.field("contactInfo.phone").unwrap();
            assert_eq!(field.kind, ValidationErrorKind::PatternMismatch);
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let unchanged = repo.get_by_id(hotel.id).await.unwrap();
    assert_eq!(unchanged.contact_info, hotel.contact_info);
}

#[tokio::test]
async fn update_with_new_window_recomputes_status() {
    let repo = setup().await;
    let hotel = repo
        .create(draft("Renewal", "Lisboa", Uuid::new_v4(), -60, -30))
        .await
        .unwrap();
    assert_eq!(hotel.subscription.status, SubscriptionStatus::Expired);

    let now = Utc::now();
    let renewed = repo
        .update(
            hotel.id,
            UpdateHotel {
                subscription: Some(SubscriptionDraft {
                    plan: Some("premium".into()),
                    start_date: Some(now - Duration::days(1)),
                    end_date: Some(now + Duration::days(365)),
                    status: Some("expired".into()),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(renewed.subscription.plan, SubscriptionPlan::Premium);
    assert_eq!(renewed.subscription.status, SubscriptionStatus::Active);
}

#[tokio::test]
async fn update_missing_hotel_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update(Uuid::new_v4(), UpdateHotel::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HotelierError::NotFound { .. }));
}

#[tokio::test]
async fn delete_hotel() {
    let repo = setup().await;
    let hotel = repo
        .create(draft("To Delete", "Lisboa", Uuid::new_v4(), -1, 30))
        .await
        .unwrap();

    repo.delete(hotel.id).await.unwrap();

    let result = repo.get_by_id(hotel.id).await;
    assert!(result.is_err(), "should not find deleted hotel");
}

#[tokio::test]
async fn list_hotels_with_pagination() {
    let repo = setup().await;
    let owner = Uuid::new_v4();

    for i in 0..5 {
        repo.create(draft(&format!("Hotel {i}"), "Lisboa", owner, -1, 30))
            .await
            .unwrap();
    }

    let page1 = repo
        .list(Pagination {
            offset: 0,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page1.items.len(), 3);
    assert_eq!(page1.total, 5);

    let page2 = repo
        .list(Pagination {
            offset: 3,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page2.items.len(), 2);
    assert_eq!(page2.total, 5);
}

#[tokio::test]
async fn indexed_lookups() {
    let repo = setup().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.create(draft("Alfama Rooms", "Lisboa", alice, -1, 30))
        .await
        .unwrap();
    repo.create(draft("Ribeira Suites", "Porto", alice, 10, 40))
        .await
        .unwrap();
    repo.create(draft("Alfama Rooms", "Porto", bob, -40, -10))
        .await
        .unwrap();

    let by_name = repo
        .list_by_name("Alfama Rooms", Pagination::default())
        .await
        .unwrap();
    assert_eq!(by_name.total, 2);

    let by_owner = repo
        .list_by_owner(alice, Pagination::default())
        .await
        .unwrap();
    assert_eq!(by_owner.total, 2);
    assert!(by_owner.items.iter().all(|h| h.owner.user_id == alice));

    let trial = repo
        .list_by_status(SubscriptionStatus::Trial, Pagination::default())
        .await
        .unwrap();
    assert_eq!(trial.total, 1);
    assert_eq!(trial.items[0].name, "Ribeira Suites");

    let expired = repo
        .list_by_status(SubscriptionStatus::Expired, Pagination::default())
        .await
        .unwrap();
    assert_eq!(expired.total, 1);
    assert_eq!(expired.items[0].owner.user_id, bob);

    let porto = repo
        .list_by_location("Porto", "Lisboa", Pagination::default())
        .await
        .unwrap();
    assert_eq!(porto.total, 2);

    let nowhere = repo
        .list_by_location("Faro", "Algarve", Pagination::default())
        .await
        .unwrap();
    assert_eq!(nowhere.total, 0);
    assert!(nowhere.items.is_empty());
}
