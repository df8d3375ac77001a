//! Tests for the in-memory repository: CRUD, cascade delete, and the
//! party-size invariant under concurrent mutation.

use std::sync::Arc;

use chrono::NaiveDate;

use parkplan::api::{
    DietaryRestriction, NewPartyMember, NewTrip, TicketType, TripId, TripStatus, UserId,
};
use parkplan::db::repositories::LocalRepository;
use parkplan::db::repository::{
    CatalogRepository, PartyRepository, RepositoryError, TripRepository,
};
use parkplan::models::trip::NavigationStep;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn member(name: &str, age: i32) -> NewPartyMember {
    NewPartyMember {
        name: name.to_string(),
        age,
        ticket_type: TicketType::Base,
        dietary_restriction: DietaryRestriction::None,
        das_eligible: false,
    }
}

fn new_trip(user: &str) -> NewTrip {
    NewTrip {
        user_id: UserId::new(user),
        name: "Summer Trip".to_string(),
        start_date: date(2025, 7, 16),
        end_date: date(2025, 7, 30),
    }
}

#[tokio::test]
async fn test_create_and_get_trip() {
    let repo = LocalRepository::new();
    let trip = repo
        .create_trip(new_trip("u1"), vec![member("Ana", 34), member("Ben", 6)])
        .await
        .unwrap();

    assert_eq!(trip.party_size, 2);
    assert_eq!(trip.status, TripStatus::Planning);
    assert_eq!(trip.current_step, NavigationStep::Overview);

    let bundle = repo.get_trip(trip.id).await.unwrap();
    assert_eq!(bundle.members.len(), 2);
    assert_eq!(bundle.members[0].name, "Ana");
    assert_eq!(bundle.members[1].sort_order, 1);
    assert!(bundle.hotel_reservations.is_empty());
    assert!(bundle.events.is_empty());
}

#[tokio::test]
async fn test_get_missing_trip_is_not_found() {
    let repo = LocalRepository::new();
    let err = repo.get_trip(TripId::new()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_trips_most_recent_first() {
    let repo = LocalRepository::new();
    let user = UserId::new("u1");
    let first = repo
        .create_trip(new_trip("u1"), vec![member("Ana", 34)])
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = repo
        .create_trip(new_trip("u1"), vec![member("Ben", 30)])
        .await
        .unwrap();
    // Another user's trip must not leak into the listing.
    repo.create_trip(new_trip("u2"), vec![member("Zoe", 28)])
        .await
        .unwrap();

    let trips = repo.list_trips_for_user(&user).await.unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].id, second.id);
    assert_eq!(trips[1].id, first.id);
}

#[tokio::test]
async fn test_party_size_tracks_membership() {
    let repo = LocalRepository::new();
    let trip = repo
        .create_trip(new_trip("u1"), vec![member("Ana", 34)])
        .await
        .unwrap();

    let (added, updated) = repo.insert_member(trip.id, member("Ben", 6)).await.unwrap();
    assert_eq!(updated.party_size, 2);
    assert_eq!(added.sort_order, 1);

    let after_remove = repo.remove_member(added.id).await.unwrap();
    assert_eq!(after_remove.party_size, 1);

    let record = repo.get_trip_record(trip.id).await.unwrap();
    assert_eq!(record.party_size, 1);
}

#[tokio::test]
async fn test_cannot_remove_last_member() {
    let repo = LocalRepository::new();
    let trip = repo
        .create_trip(new_trip("u1"), vec![member("Ana", 34)])
        .await
        .unwrap();
    let members = repo.list_members(trip.id).await.unwrap();

    let err = repo.remove_member(members[0].id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConflictError { .. }));

    // The member is still there and the size is unchanged.
    let record = repo.get_trip_record(trip.id).await.unwrap();
    assert_eq!(record.party_size, 1);
    assert_eq!(repo.list_members(trip.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_trip_cascades_and_is_idempotent() {
    let repo = LocalRepository::new();
    let trip = repo
        .create_trip(new_trip("u1"), vec![member("Ana", 34)])
        .await
        .unwrap();

    repo.delete_trip(trip.id).await.unwrap();
    assert!(repo.get_trip(trip.id).await.is_err());
    assert!(repo.list_members(trip.id).await.is_err());

    // A second delete is a no-op, not an error.
    repo.delete_trip(trip.id).await.unwrap();
}

#[tokio::test]
async fn test_update_trip_fields() {
    let repo = LocalRepository::new();
    let trip = repo
        .create_trip(new_trip("u1"), vec![member("Ana", 34)])
        .await
        .unwrap();

    let updated = repo
        .update_trip(
            trip.id,
            "Renamed".to_string(),
            date(2025, 8, 1),
            date(2025, 8, 10),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.start_date, date(2025, 8, 1));

    let stepped = repo
        .set_current_step(trip.id, NavigationStep::Dining)
        .await
        .unwrap();
    assert_eq!(stepped.current_step, NavigationStep::Dining);

    let activated = repo
        .set_trip_status(trip.id, TripStatus::Active)
        .await
        .unwrap();
    assert_eq!(activated.status, TripStatus::Active);
}

#[tokio::test]
async fn test_concurrent_member_inserts_keep_size_consistent() {
    let repo = Arc::new(LocalRepository::new());
    let trip = repo
        .create_trip(new_trip("u1"), vec![member("Ana", 34)])
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let repo = Arc::clone(&repo);
        let trip_id = trip.id;
        handles.push(tokio::spawn(async move {
            repo.insert_member(trip_id, member(&format!("Guest {}", i), 20 + i))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let record = repo.get_trip_record(trip.id).await.unwrap();
    assert_eq!(record.party_size, 17);
    assert_eq!(repo.list_members(trip.id).await.unwrap().len(), 17);
}

#[tokio::test]
async fn test_seeded_catalog_is_present() {
    let repo = LocalRepository::new();
    let parks = repo.list_parks().await.unwrap();
    assert_eq!(parks.len(), 4);

    let attractions = repo.list_attractions(parks[0].id).await.unwrap();
    assert!(!attractions.is_empty());

    let hotels = repo.list_hotels().await.unwrap();
    assert!(!hotels.is_empty());
    let rooms = repo.list_room_types(hotels[0].id).await.unwrap();
    assert!(!rooms.is_empty());
    assert!(rooms.iter().all(|r| r.hotel_id == hotels[0].id));

    let restaurants = repo.list_restaurants().await.unwrap();
    assert!(!restaurants.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.is_ok());
}
